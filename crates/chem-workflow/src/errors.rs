use thiserror::Error;

// Errores internos de la búsqueda.
//
// `PkaSearch::search_pka` nunca los deja salir: se registran (en modo debug)
// y el resultado es `None`. Sólo la fábrica los devuelve al llamador.
#[derive(Error, Debug)]
pub enum WorkflowError {
  /// Errores originados por operaciones del dominio quimico o de la cache.
  #[error("Error de dominio: {0}")]
  Domain(#[from] chem_domain::DomainError),

  /// Configuracion invalida al construir la busqueda.
  #[error("Error de configuracion: {0}")]
  Configuration(String),
}
