// config.rs

/// Opciones del resolvedor y del orquestador de búsqueda.
///
/// `debug` sólo cambia la verbosidad: con él activo los motivos de fallo
/// (no encontrado, coincidencia no exacta, pKa ausente) se registran en el
/// log. El resultado devuelto es el mismo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupConfig {
  pub debug: bool,
}

impl LookupConfig {
  pub fn new(debug: bool) -> Self {
    Self { debug }
  }

  /// Lee `PKA_DEBUG` (`1`, `true`, `yes`, `on`), cargando `.env` si existe.
  pub fn from_env() -> Self {
    dotenvy::dotenv().ok();
    let debug = std::env::var("PKA_DEBUG").map(|v| parse_flag(&v)).unwrap_or(false);
    Self { debug }
  }
}

pub(crate) fn parse_flag(value: &str) -> bool {
  matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn flag_values() {
    for v in ["1", "true", "True", " yes ", "ON"] {
      assert!(parse_flag(v), "{}", v);
    }
    for v in ["0", "false", "", "debug"] {
      assert!(!parse_flag(v), "{}", v);
    }
  }
}
