// error.rs
use chem_providers::ProviderError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
  #[error("Error de validación: {0}")]
  ValidationError(String),
  #[error("Error externo: {0}")]
  ExternalError(String),
  #[error("Error de serialización: {0}")]
  SerializationError(String),
}

impl From<ProviderError> for DomainError {
  fn from(e: ProviderError) -> Self {
    Self::ExternalError(e.to_string())
  }
}

impl From<serde_json::Error> for DomainError {
  fn from(e: serde_json::Error) -> Self {
    Self::SerializationError(e.to_string())
  }
}

/// Motivo por el que el resolvedor remoto no produjo un registro.
///
/// Los llamadores normales no distinguen estos casos (ver
/// `PkaResolver::lookup`); la distinción existe para diagnóstico.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
  /// PubChem no devolvió ningún CID candidato.
  #[error("Compuesto no encontrado en PubChem: {0}")]
  NotFound(String),
  /// Hay candidato pero no coincide exactamente con la entrada.
  #[error("No es una coincidencia exacta en PubChem: {identifier} (CID {cid})")]
  NotExactMatch { identifier: String, cid: u64 },
  /// Candidato verificado sin sección de constantes de disociación.
  #[error("pKa no encontrado en PubChem para CID {0}")]
  DetailUnavailable(u64),
  /// Fallo de transporte o de formato en el proveedor.
  #[error("Error del proveedor: {0}")]
  Provider(#[from] ProviderError),
  #[error(transparent)]
  Domain(#[from] DomainError),
}
