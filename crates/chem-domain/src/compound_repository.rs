use crate::{CompoundRecord, DomainError};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Identificador asignado por el almacén a cada documento.
pub type RecordId = u64;

/// Trait que define la caché local de resultados de pKa.
///
/// El almacén no impone unicidad entre registros; la deduplicación la hace
/// el orquestador de búsqueda antes de insertar.
pub trait CompoundRepository: Send + Sync {
    /// Registros cuyo CAS, nombre IUPAC, InChI, InChIKey o cualquier SMILES
    /// es igual a `identifier`, ordenados por `RecordId`.
    fn search(&self, identifier: &str) -> Result<Vec<(RecordId, CompoundRecord)>, DomainError>;

    /// Inserta el registro y devuelve su `RecordId`.
    fn insert(&self, record: CompoundRecord) -> Result<RecordId, DomainError>;

    /// Número de documentos almacenados.
    fn len(&self) -> Result<usize, DomainError>;

    fn is_empty(&self) -> Result<bool, DomainError> {
        Ok(self.len()? == 0)
    }

    /// Persiste escrituras pendientes. Los almacenes sin buffer no hacen nada.
    fn flush(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

/// Implementación en memoria para tests y desarrollo.
pub struct InMemoryCompoundRepository {
    records: Arc<Mutex<BTreeMap<RecordId, CompoundRecord>>>,
}

impl InMemoryCompoundRepository {
    pub fn new() -> Self {
        Self { records: Arc::new(Mutex::new(BTreeMap::new())) }
    }

    // Helper to map poisoned mutex errors into DomainError
    fn lock_records(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<RecordId, CompoundRecord>>, DomainError> {
        self.records
            .lock()
            .map_err(|e| DomainError::ExternalError(format!("Mutex 'records' poisoned: {}", e)))
    }
}

impl CompoundRepository for InMemoryCompoundRepository {
    fn search(&self, identifier: &str) -> Result<Vec<(RecordId, CompoundRecord)>, DomainError> {
        let records = self.lock_records()?;
        Ok(records.iter()
                  .filter(|(_, r)| r.matches_identifier(identifier))
                  .map(|(id, r)| (*id, r.clone()))
                  .collect())
    }

    fn insert(&self, record: CompoundRecord) -> Result<RecordId, DomainError> {
        let mut records = self.lock_records()?;
        let id = records.keys().next_back().map_or(1, |last| last + 1);
        records.insert(id, record);
        Ok(id)
    }

    fn len(&self) -> Result<usize, DomainError> {
        Ok(self.lock_records()?.len())
    }
}

impl Default for InMemoryCompoundRepository {
    fn default() -> Self {
        Self::new()
    }
}
