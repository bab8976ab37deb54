// identifier.rs
use crate::DomainError;
use chem_providers::Namespace;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Notación textual de un identificador químico.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
  Cas,
  Inchi,
  InchiKey,
  Smiles,
}

impl IdentifierKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      IdentifierKind::Cas => "cas",
      IdentifierKind::Inchi => "inchi",
      IdentifierKind::InchiKey => "inchikey",
      IdentifierKind::Smiles => "smiles",
    }
  }

  /// Namespace de PubChem para buscar CIDs. CAS se busca como nombre.
  pub fn namespace(&self) -> Namespace {
    match self {
      IdentifierKind::Cas => Namespace::Name,
      IdentifierKind::Inchi => Namespace::Inchi,
      IdentifierKind::InchiKey => Namespace::InchiKey,
      IdentifierKind::Smiles => Namespace::Smiles,
    }
  }
}

impl fmt::Display for IdentifierKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for IdentifierKind {
  type Err = DomainError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "cas" => Ok(IdentifierKind::Cas),
      "inchi" => Ok(IdentifierKind::Inchi),
      "inchikey" => Ok(IdentifierKind::InchiKey),
      "smiles" => Ok(IdentifierKind::Smiles),
      other => Err(DomainError::ValidationError(format!("Tipo de identificador desconocido: {}", other))),
    }
  }
}

// https://www.ebi.ac.uk/miriam/main/collections/MIR:00000237
static CAS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,7}-\d{2}-\d$").unwrap());
static CAS_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,7}-\d{2}-\d").unwrap());
// https://www.ebi.ac.uk/miriam/main/collections/MIR:00000383
static INCHI: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^InChI=1S?/[A-Za-z0-9.]+(\+[0-9]+)?(/[cnpqbtmsih][A-Za-z0-9\-+(),/?;.]+)*$").unwrap()
});
// https://www.ebi.ac.uk/miriam/main/collections/MIR:00000387
// Sin ancla final: una clave bien formada seguida de más texto sigue siendo InChIKey.
static INCHIKEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{14}-[A-Z]{10}(-[A-Z])?").unwrap());
static SMILES_BODY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^J][a-zA-Z0-9@+\-\[\]()\\/%=#$]+$").unwrap());

fn is_cas(s: &str) -> bool {
  CAS.is_match(s)
}

fn is_inchi(s: &str) -> bool {
  INCHI.is_match(s)
}

fn is_inchikey(s: &str) -> bool {
  INCHIKEY.is_match(s)
}

/// Acepta mucho texto no químico ("123456789", "qwertyui"). Se mantiene así:
/// sólo funciona porque se evalúa en último lugar.
fn is_smiles(s: &str) -> bool {
  !s.starts_with("InChI=") && !CAS_PREFIX.is_match(s) && !INCHIKEY.is_match(s) && SMILES_BODY.is_match(s)
}

/// Reglas en orden de prioridad. El orden es parte del contrato: los
/// patrones se solapan y gana la primera regla que coincide.
const RULES: [(fn(&str) -> bool, IdentifierKind); 4] = [(is_cas, IdentifierKind::Cas),
                                                        (is_inchi, IdentifierKind::Inchi),
                                                        (is_inchikey, IdentifierKind::InchiKey),
                                                        (is_smiles, IdentifierKind::Smiles)];

/// Determina la notación de `identifier` (CAS, InChI, InChIKey o SMILES).
///
/// `None` si ninguna regla coincide. No valida la química: sólo la forma.
pub fn classify(identifier: &str) -> Option<IdentifierKind> {
  RULES.iter().find(|(matches, _)| matches(identifier)).map(|(_, kind)| *kind)
}
