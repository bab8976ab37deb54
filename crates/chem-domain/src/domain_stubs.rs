use crate::compound_repository::{CompoundRepository, InMemoryCompoundRepository};
use crate::CompoundRecord;

const ACETIC_ACID_REFERENCE: &str =
    "Serjeant, E.P., Dempsey B.; Ionisation Constants of Organic  Acids in Aqueous Solution. International Union of \
     Pure and  Applied Chemistry (IUPAC). IUPAC Chemical Data Series No.  23, 1979. New York, New York: Pergamon \
     Press, Inc., p. 989";

pub struct DomainStubs;

impl DomainStubs {
    /// Registro de ácido acético tal como lo produce el resolvedor.
    pub fn acetic_acid() -> CompoundRecord {
        CompoundRecord::new(176, "4.76 at 25 °C", ACETIC_ACID_REFERENCE)
            .unwrap_or_else(|_| unreachable!("registro de ejemplo válido"))
            .with_cas(Some("64-19-7".into()))
            .with_iupac_name(Some("acetic acid".into()))
            .with_inchi(Some("InChI=1S/C2H4O2/c1-2(3)4/h1H3,(H,3,4)".into()))
            .with_inchikey(Some("QTBSBXVTEAMEQO-UHFFFAOYSA-N".into()))
            .with_smiles(Some("CC(=O)O".into()), Some("CC(=O)O".into()))
    }

    /// Registro de metanol.
    pub fn methanol() -> CompoundRecord {
        CompoundRecord::new(887, "15.3", "Serjeant, E.P., Dempsey B.; IUPAC Chemical Data Series No. 23")
            .unwrap_or_else(|_| unreachable!("registro de ejemplo válido"))
            .with_cas(Some("67-56-1".into()))
            .with_iupac_name(Some("methanol".into()))
            .with_inchi(Some("InChI=1S/CH4O/c1-2/h2H,1H3".into()))
            .with_inchikey(Some("OKKJLVBELUTLKV-UHFFFAOYSA-N".into()))
            .with_smiles(Some("CO".into()), Some("CO".into()))
    }

    /// Crea una caché en memoria pre-poblada con ácido acético y metanol.
    pub fn sample_repo() -> InMemoryCompoundRepository {
        let repo = InMemoryCompoundRepository::new();
        let _ = repo.insert(Self::acetic_acid());
        let _ = repo.insert(Self::methanol());
        repo
    }
}
