use crate::{PkaSearch, WorkflowError};
use chem_domain::LookupConfig;
use chem_persistence::JsonCompoundRepository;
use chem_providers::{HttpPubChemClient, ProviderConfig};
use std::path::PathBuf;
use std::sync::Arc;

/// Fábrica para construir una `PkaSearch` lista para usar contra PubChem
/// y la caché en disco.
pub struct PkaSearchFactory;

impl PkaSearchFactory {
  /// Caché y cliente desde variables de entorno (`PKA_DB_PATH`,
  /// `PUBCHEM_BASE_URL`, `PUBCHEM_TIMEOUT_SECS`); el modo debug lo decide el
  /// llamador (p. ej. `LookupConfig::from_env()` combinado con la CLI).
  pub fn from_env(config: LookupConfig) -> Result<PkaSearch, WorkflowError> {
    let repo = chem_persistence::new_compound_repo_from_env()?;
    let client = HttpPubChemClient::from_env();
    Ok(PkaSearch::new(Arc::new(repo), Arc::new(client), config))
  }

  /// Construcción explícita: caché en `db_path`, cliente con `provider`.
  pub fn create(db_path: impl Into<PathBuf>,
                provider: ProviderConfig,
                config: LookupConfig)
                -> Result<PkaSearch, WorkflowError> {
    let db_path = db_path.into();
    if db_path.as_os_str().is_empty() {
      return Err(WorkflowError::Configuration("la ruta de la caché no puede estar vacía".to_string()));
    }
    let repo = JsonCompoundRepository::open(db_path)?;
    Ok(PkaSearch::new(Arc::new(repo), Arc::new(HttpPubChemClient::new(provider)), config))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chem_domain::CompoundRepository;

  #[test]
  fn empty_db_path_is_rejected() {
    let res = PkaSearchFactory::create("", ProviderConfig::default(), LookupConfig::default());
    assert!(matches!(res, Err(WorkflowError::Configuration(_))));
  }

  #[test]
  fn create_opens_store_without_network() {
    let dir = tempfile::tempdir().expect("tempdir");
    let search = PkaSearchFactory::create(dir.path().join("db.json"), ProviderConfig::default(), LookupConfig::default())
      .expect("search");
    assert_eq!(search.repository().len().expect("len"), 0);
  }

  #[test]
  fn from_env_opens_store_at_configured_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("env_db.json");
    std::fs::write(&path, serde_json::to_string(&serde_json::json!({
                     "_default": {"1": chem_domain::DomainStubs::methanol()}
                   })).expect("json"))
    .expect("write db");
    std::env::set_var("PKA_DB_PATH", &path);

    let search = PkaSearchFactory::from_env(LookupConfig::new(true)).expect("search");
    assert_eq!(search.repository().len().expect("len"), 1);
    assert!(search.search_pka("67-56-1").expect("cached").is_cached());
  }
}
