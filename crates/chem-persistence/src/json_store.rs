use chem_domain::{CompoundRecord, CompoundRepository, DomainError, RecordId};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

pub const DEFAULT_DB_PATH: &str = "data/pka_db.json";
const DEFAULT_TABLE: &str = "_default";

struct StoreState {
  records: BTreeMap<RecordId, CompoundRecord>,
  dirty: bool,
}

/// Almacén de documentos respaldado por un fichero JSON.
///
/// Funciona como una capa de caché: el fichero se lee completo al abrir, las
/// inserciones quedan en memoria y se escriben con `flush()` o al soltar el
/// repositorio. Quien lo use debe asegurarse de que el `Drop` ocurre (o
/// llamar a `flush`) antes de salir del proceso.
pub struct JsonCompoundRepository {
  path: PathBuf,
  state: Mutex<StoreState>,
}

fn map_io_err(path: &Path, e: std::io::Error) -> DomainError {
  DomainError::ExternalError(format!("store {}: {}", path.display(), e))
}

impl JsonCompoundRepository {
  /// Abre (o prepara para crear) la base en `path`. Un fichero inexistente
  /// o vacío equivale a una base vacía.
  pub fn open(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
    let path = path.into();
    let records = if path.exists() {
      let raw = fs::read_to_string(&path).map_err(|e| map_io_err(&path, e))?;
      Self::parse(&raw)?
    } else {
      BTreeMap::new()
    };
    log::debug!("store {}: {} documentos cargados", path.display(), records.len());
    Ok(Self { path, state: Mutex::new(StoreState { records, dirty: false }) })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  fn parse(raw: &str) -> Result<BTreeMap<RecordId, CompoundRecord>, DomainError> {
    let mut records = BTreeMap::new();
    if raw.trim().is_empty() {
      return Ok(records);
    }
    let root: JsonValue = serde_json::from_str(raw)?;
    let table = match root.get(DEFAULT_TABLE) {
      Some(JsonValue::Object(table)) => table,
      Some(_) => return Err(DomainError::SerializationError("la tabla '_default' no es un objeto".to_string())),
      None => return Ok(records),
    };
    for (key, doc) in table {
      let id: RecordId = key.parse()
                            .map_err(|_| DomainError::SerializationError(format!("id de documento inválido: {}", key)))?;
      let record: CompoundRecord = serde_json::from_value(doc.clone())?;
      records.insert(id, record);
    }
    Ok(records)
  }

  fn lock_state(&self) -> Result<MutexGuard<'_, StoreState>, DomainError> {
    self.state.lock().map_err(|e| DomainError::ExternalError(format!("Mutex 'store' poisoned: {}", e)))
  }

  /// Escribe el contenido en disco si hubo cambios desde la última escritura.
  pub fn flush(&self) -> Result<(), DomainError> {
    let mut state = self.lock_state()?;
    if !state.dirty {
      return Ok(());
    }
    let serialized = Self::render(&state.records)?;
    if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
      fs::create_dir_all(parent).map_err(|e| map_io_err(parent, e))?;
    }
    let tmp = self.path.with_extension("json.tmp");
    fs::write(&tmp, serialized).map_err(|e| map_io_err(&tmp, e))?;
    fs::rename(&tmp, &self.path).map_err(|e| map_io_err(&self.path, e))?;
    state.dirty = false;
    log::debug!("store {}: {} documentos escritos", self.path.display(), state.records.len());
    Ok(())
  }

  // Claves ordenadas e indentación de 4 espacios.
  fn render(records: &BTreeMap<RecordId, CompoundRecord>) -> Result<Vec<u8>, DomainError> {
    let mut table = Map::new();
    for (id, record) in records {
      table.insert(id.to_string(), serde_json::to_value(record)?);
    }
    let mut root = Map::new();
    root.insert(DEFAULT_TABLE.to_string(), JsonValue::Object(table));

    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    JsonValue::Object(root).serialize(&mut ser)?;
    Ok(out)
  }
}

impl CompoundRepository for JsonCompoundRepository {
  fn search(&self, identifier: &str) -> Result<Vec<(RecordId, CompoundRecord)>, DomainError> {
    let state = self.lock_state()?;
    Ok(state.records
            .iter()
            .filter(|(_, r)| r.matches_identifier(identifier))
            .map(|(id, r)| (*id, r.clone()))
            .collect())
  }

  fn insert(&self, record: CompoundRecord) -> Result<RecordId, DomainError> {
    let mut state = self.lock_state()?;
    let id = state.records.keys().next_back().map_or(1, |last| last + 1);
    state.records.insert(id, record);
    state.dirty = true;
    Ok(id)
  }

  fn len(&self) -> Result<usize, DomainError> {
    Ok(self.lock_state()?.records.len())
  }

  fn flush(&self) -> Result<(), DomainError> {
    JsonCompoundRepository::flush(self)
  }
}

impl Drop for JsonCompoundRepository {
  fn drop(&mut self) {
    if let Err(e) = self.flush() {
      log::error!("no se pudo escribir la caché de pKa: {}", e);
    }
  }
}

/// Abre la caché indicada por `PKA_DB_PATH` (o `data/pka_db.json`).
pub fn new_compound_repo_from_env() -> Result<JsonCompoundRepository, DomainError> {
  dotenvy::dotenv().ok();
  let path = std::env::var("PKA_DB_PATH").ok()
                                         .filter(|p| !p.trim().is_empty())
                                         .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
  JsonCompoundRepository::open(path)
}
