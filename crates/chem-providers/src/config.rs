// config.rs
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://pubchem.ncbi.nlm.nih.gov";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_USER_AGENT: &str =
  "Mozilla/5.0 (X11; CentOS; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/73.0.3683.75 Safari/537.36";

/// Configuración del cliente HTTP de PubChem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
  pub base_url: String,
  pub timeout: Duration,
  pub user_agent: String,
}

impl Default for ProviderConfig {
  fn default() -> Self {
    Self { base_url: DEFAULT_BASE_URL.to_string(),
           timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
           user_agent: DEFAULT_USER_AGENT.to_string() }
  }
}

impl ProviderConfig {
  /// Lee `PUBCHEM_BASE_URL` y `PUBCHEM_TIMEOUT_SECS` (cargando `.env` si
  /// existe). Valores ausentes o inválidos caen al valor por defecto.
  pub fn from_env() -> Self {
    dotenvy::dotenv().ok();
    let mut cfg = Self::default();
    if let Ok(url) = std::env::var("PUBCHEM_BASE_URL") {
      if !url.trim().is_empty() {
        cfg.base_url = url.trim().trim_end_matches('/').to_string();
      }
    }
    match std::env::var("PUBCHEM_TIMEOUT_SECS").map(|s| s.trim().parse::<u64>()) {
      Ok(Ok(secs)) if secs > 0 => cfg.timeout = Duration::from_secs(secs),
      Ok(_) => log::warn!("PUBCHEM_TIMEOUT_SECS inválido; se usan {}s", DEFAULT_TIMEOUT_SECS),
      Err(_) => {}
    }
    cfg
  }

  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into().trim_end_matches('/').to_string();
    self
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }
}
