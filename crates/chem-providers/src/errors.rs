// errors.rs
use thiserror::Error;

/// Errores del proveedor PubChem.
///
/// Un 404 de PUG REST no es un error: significa "sin candidatos" y se
/// devuelve como lista vacía. Aquí sólo llegan fallos de transporte,
/// códigos inesperados y respuestas que no se pueden decodificar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
  #[error("Error de transporte: {0}")]
  Transport(String),
  #[error("Respuesta HTTP {code} inesperada para {url}")]
  Status { code: u16, url: String },
  #[error("Respuesta JSON inválida: {0}")]
  Decode(String),
  #[error("Documento XML inválido: {0}")]
  Xml(String),
}

impl From<serde_json::Error> for ProviderError {
  fn from(e: serde_json::Error) -> Self {
    Self::Decode(e.to_string())
  }
}

impl From<quick_xml::Error> for ProviderError {
  fn from(e: quick_xml::Error) -> Self {
    Self::Xml(e.to_string())
  }
}

impl From<std::io::Error> for ProviderError {
  fn from(e: std::io::Error) -> Self {
    Self::Transport(e.to_string())
  }
}
