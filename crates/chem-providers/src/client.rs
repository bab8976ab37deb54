// client.rs
use crate::ProviderError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Espacio de nombres de entrada de PUG REST usado para buscar CIDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Namespace {
  Name,
  Smiles,
  Inchi,
  InchiKey,
}

impl Namespace {
  /// Segmento de ruta (y nombre del parámetro de query) que espera PubChem.
  pub fn as_str(&self) -> &'static str {
    match self {
      Namespace::Name => "name",
      Namespace::Smiles => "smiles",
      Namespace::Inchi => "inchi",
      Namespace::InchiKey => "inchikey",
    }
  }
}

impl fmt::Display for Namespace {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Propiedades canónicas de un compuesto tal como las reporta PubChem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundProperties {
  #[serde(rename = "CID")]
  pub cid: u64,
  #[serde(rename = "InChI", default)]
  pub inchi: Option<String>,
  #[serde(rename = "InChIKey", default)]
  pub inchikey: Option<String>,
  #[serde(rename = "IUPACName", default)]
  pub iupac_name: Option<String>,
  #[serde(rename = "CanonicalSMILES", alias = "ConnectivitySMILES", default)]
  pub canonical_smiles: Option<String>,
  #[serde(rename = "IsomericSMILES", alias = "SMILES", default)]
  pub isomeric_smiles: Option<String>,
}

/// Primer nodo `Information` de la sección "Dissociation Constants".
/// Sólo existe si el nodo trae tanto la cita como el valor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PugViewInformation {
  pub reference: String,
  pub value: String,
}

/// Contrato del servicio químico remoto.
///
/// Todas las llamadas son bloqueantes. Las implementaciones no reintentan:
/// la única política de reintento (fallback a `Namespace::Name`) vive en el
/// resolvedor del dominio.
pub trait PubChemClient: Send + Sync {
  /// CIDs candidatos para `identifier` en `namespace`. Lista vacía si
  /// PubChem no conoce el identificador.
  fn cids(&self, identifier: &str, namespace: Namespace) -> Result<Vec<u64>, ProviderError>;

  /// Lista completa de sinónimos del compuesto.
  fn synonyms(&self, cid: u64) -> Result<Vec<String>, ProviderError>;

  /// InChI, InChIKey, nombre IUPAC y SMILES canónicos del compuesto.
  fn properties(&self, cid: u64) -> Result<CompoundProperties, ProviderError>;

  /// Sección de constantes de disociación. `None` cuando la respuesta no es
  /// un 200 limpio (sin redirecciones) o el documento no trae referencia y
  /// valor.
  fn dissociation_constants(&self, cid: u64) -> Result<Option<PugViewInformation>, ProviderError>;
}
