// compound_record.rs
use crate::DomainError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub const PUBCHEM_SOURCE: &str = "Pubchem";

/// Resultado de pKa de un compuesto, tal como se guarda en la caché local.
///
/// Los nombres serializados son las claves históricas de los documentos
/// (`Substance_CASRN`, `InChIKey`, ...), así que los ficheros existentes se
/// siguen leyendo. La identidad para deduplicar es la igualdad de todos los
/// campos.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompoundRecord {
  source: String,
  #[serde(rename = "Pubchem_CID", deserialize_with = "cid_from_number_or_text")]
  cid: u64,
  #[serde(rename = "pKa")]
  pka: String,
  // Vacía sólo en documentos importados que no traían la cita.
  #[serde(default, skip_serializing_if = "String::is_empty")]
  reference: String,
  #[serde(rename = "Substance_CASRN", default, skip_serializing_if = "Option::is_none")]
  cas: Option<String>,
  #[serde(rename = "IUPAC_Name", default, skip_serializing_if = "Option::is_none")]
  iupac_name: Option<String>,
  #[serde(rename = "InChI", default, skip_serializing_if = "Option::is_none")]
  inchi: Option<String>,
  #[serde(rename = "InChIKey", default, skip_serializing_if = "Option::is_none")]
  inchikey: Option<String>,
  #[serde(rename = "Canonical_SMILES", default, skip_serializing_if = "Option::is_none")]
  canonical_smiles: Option<String>,
  #[serde(rename = "Isomeric_SMILES", default, skip_serializing_if = "Option::is_none")]
  isomeric_smiles: Option<String>,
  // Sólo presentes en documentos importados de conjuntos de datos antiguos.
  #[serde(rename = "Original_SMILES", default, skip_serializing_if = "Option::is_none")]
  original_smiles: Option<String>,
  #[serde(rename = "Structure_SMILES", default, skip_serializing_if = "Option::is_none")]
  structure_smiles: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}

// Los documentos antiguos guardan el CID como texto ("887").
fn cid_from_number_or_text<'de, D>(deserializer: D) -> Result<u64, D::Error>
  where D: Deserializer<'de>
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum RawCid {
    Number(u64),
    Text(String),
  }

  match RawCid::deserialize(deserializer)? {
    RawCid::Number(cid) => Ok(cid),
    RawCid::Text(text) => text.trim()
                              .parse()
                              .map_err(|_| serde::de::Error::custom(format!("Pubchem_CID inválido: {:?}", text))),
  }
}

impl CompoundRecord {
  pub fn new(cid: u64, pka: &str, reference: &str) -> Result<Self, DomainError> {
    if cid == 0 {
      return Err(DomainError::ValidationError("El CID de PubChem debe ser positivo".to_string()));
    }
    if pka.trim().is_empty() {
      return Err(DomainError::ValidationError("El valor de pKa no puede estar vacío".to_string()));
    }
    if reference.trim().is_empty() {
      return Err(DomainError::ValidationError("La referencia del pKa no puede estar vacía".to_string()));
    }
    Ok(Self { source: PUBCHEM_SOURCE.to_string(),
              cid,
              pka: pka.to_string(),
              reference: reference.to_string(),
              cas: None,
              iupac_name: None,
              inchi: None,
              inchikey: None,
              canonical_smiles: None,
              isomeric_smiles: None,
              original_smiles: None,
              structure_smiles: None })
  }

  pub fn with_cas(mut self, cas: Option<String>) -> Self {
    self.cas = non_blank(cas);
    self
  }

  pub fn with_iupac_name(mut self, name: Option<String>) -> Self {
    self.iupac_name = non_blank(name);
    self
  }

  pub fn with_inchi(mut self, inchi: Option<String>) -> Self {
    self.inchi = non_blank(inchi);
    self
  }

  pub fn with_inchikey(mut self, inchikey: Option<String>) -> Self {
    self.inchikey = non_blank(inchikey);
    self
  }

  pub fn with_smiles(mut self, canonical: Option<String>, isomeric: Option<String>) -> Self {
    self.canonical_smiles = non_blank(canonical);
    self.isomeric_smiles = non_blank(isomeric);
    self
  }

  pub fn source(&self) -> &str {
    &self.source
  }

  pub fn cid(&self) -> u64 {
    self.cid
  }

  pub fn pka(&self) -> &str {
    &self.pka
  }

  pub fn reference(&self) -> &str {
    &self.reference
  }

  pub fn cas(&self) -> Option<&str> {
    self.cas.as_deref()
  }

  pub fn iupac_name(&self) -> Option<&str> {
    self.iupac_name.as_deref()
  }

  pub fn inchi(&self) -> Option<&str> {
    self.inchi.as_deref()
  }

  pub fn inchikey(&self) -> Option<&str> {
    self.inchikey.as_deref()
  }

  pub fn canonical_smiles(&self) -> Option<&str> {
    self.canonical_smiles.as_deref()
  }

  pub fn isomeric_smiles(&self) -> Option<&str> {
    self.isomeric_smiles.as_deref()
  }

  /// Campos por los que se puede buscar el registro en la caché.
  pub fn lookup_keys(&self) -> impl Iterator<Item = &str> {
    [&self.cas,
     &self.iupac_name,
     &self.inchi,
     &self.inchikey,
     &self.original_smiles,
     &self.structure_smiles,
     &self.canonical_smiles,
     &self.isomeric_smiles].into_iter()
                           .filter_map(|v| v.as_deref())
  }

  /// `true` si `identifier` es igual a alguno de los identificadores
  /// alternativos del registro.
  pub fn matches_identifier(&self, identifier: &str) -> bool {
    !identifier.is_empty() && self.lookup_keys().any(|k| k == identifier)
  }
}

impl fmt::Display for CompoundRecord {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f,
           "CompoundRecord(CID: {}, pKa: {}, InChIKey: {})",
           self.cid,
           self.pka,
           self.inchikey.as_deref().unwrap_or("-"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn methanol() -> CompoundRecord {
    CompoundRecord::new(887, "15.3", "Serjeant, E.P., Dempsey B.").unwrap()
                                                                             .with_cas(Some("67-56-1".into()))
                                                                             .with_iupac_name(Some("methanol".into()))
                                                                             .with_inchi(Some("InChI=1S/CH4O/c1-2/h2H,1H3".into()))
                                                                             .with_inchikey(Some("OKKJLVBELUTLKV-UHFFFAOYSA-N".into()))
                                                                             .with_smiles(Some("CO".into()), Some("CO".into()))
  }

  #[test]
  fn rejects_empty_pka_zero_cid_and_missing_reference() {
    assert!(matches!(CompoundRecord::new(887, "  ", "ref"), Err(DomainError::ValidationError(_))));
    assert!(matches!(CompoundRecord::new(0, "15.3", "ref"), Err(DomainError::ValidationError(_))));
    assert!(matches!(CompoundRecord::new(887, "15.3", " "), Err(DomainError::ValidationError(_))));
  }

  #[test]
  fn serializes_with_document_keys() {
    let value = serde_json::to_value(methanol()).unwrap();
    assert_eq!(value,
               json!({
                 "source": "Pubchem",
                 "Pubchem_CID": 887,
                 "pKa": "15.3",
                 "reference": "Serjeant, E.P., Dempsey B.",
                 "Substance_CASRN": "67-56-1",
                 "IUPAC_Name": "methanol",
                 "InChI": "InChI=1S/CH4O/c1-2/h2H,1H3",
                 "InChIKey": "OKKJLVBELUTLKV-UHFFFAOYSA-N",
                 "Canonical_SMILES": "CO",
                 "Isomeric_SMILES": "CO"
               }));
  }

  #[test]
  fn legacy_smiles_fields_are_searchable() {
    let doc = json!({
      "source": "Pubchem",
      "Pubchem_CID": 996,
      "pKa": "9.99 @ 25 °C",
      "Original_SMILES": "OC1=CC=CC=C1"
    });
    let record: CompoundRecord = serde_json::from_value(doc).unwrap();
    assert!(record.matches_identifier("OC1=CC=CC=C1"));
    assert_eq!(record.reference(), "");
    assert!(!serde_json::to_string(&record).unwrap().contains("reference"));
  }

  #[test]
  fn cid_stored_as_text_is_accepted() {
    let doc = json!({"source": "Pubchem", "Pubchem_CID": "887", "pKa": "15.3", "reference": "r"});
    let record: CompoundRecord = serde_json::from_value(doc).unwrap();
    assert_eq!(record.cid(), 887);
    assert_eq!(serde_json::to_value(&record).unwrap()["Pubchem_CID"], 887);

    let bad = json!({"source": "Pubchem", "Pubchem_CID": "abc", "pKa": "15.3"});
    assert!(serde_json::from_value::<CompoundRecord>(bad).is_err());
  }

  #[test]
  fn matches_any_alternate_identifier() {
    let m = methanol();
    for key in ["67-56-1", "methanol", "InChI=1S/CH4O/c1-2/h2H,1H3", "OKKJLVBELUTLKV-UHFFFAOYSA-N", "CO"] {
      assert!(m.matches_identifier(key), "key {}", key);
    }
    assert!(!m.matches_identifier("887"));
    assert!(!m.matches_identifier("15.3"));
    assert!(!m.matches_identifier(""));
  }

  #[test]
  fn blank_optional_fields_are_dropped() {
    let r = CompoundRecord::new(1, "1.0", "ref").unwrap().with_inchikey(Some(String::new())).with_cas(Some("  ".into()));
    assert_eq!(r.inchikey(), None);
    assert_eq!(r.cas(), None);
  }
}
