// stubs.rs
use crate::{CompoundProperties, Namespace, ProviderError, PubChemClient, PugViewInformation};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Implementación en memoria de `PubChemClient` para tests y ejemplos.
///
/// Responde con datos precargados y cuenta cada llamada, de modo que las
/// pruebas pueden comprobar que un acierto de caché no toca la red.
#[derive(Default)]
pub struct StubPubChemClient {
  cids: HashMap<(Namespace, String), Vec<u64>>,
  synonyms: HashMap<u64, Vec<String>>,
  properties: HashMap<u64, CompoundProperties>,
  dissociation: HashMap<u64, PugViewInformation>,
  failing: bool,
  calls: AtomicUsize,
}

impl StubPubChemClient {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registra los CIDs que devuelve la búsqueda `identifier` en `namespace`.
  pub fn with_cids(mut self, namespace: Namespace, identifier: &str, cids: Vec<u64>) -> Self {
    self.cids.insert((namespace, identifier.to_string()), cids);
    self
  }

  pub fn with_synonyms<I, S>(mut self, cid: u64, synonyms: I) -> Self
    where I: IntoIterator<Item = S>,
          S: Into<String>
  {
    self.synonyms.insert(cid, synonyms.into_iter().map(Into::into).collect());
    self
  }

  pub fn with_properties(mut self, properties: CompoundProperties) -> Self {
    self.properties.insert(properties.cid, properties);
    self
  }

  pub fn with_dissociation(mut self, cid: u64, reference: &str, value: &str) -> Self {
    self.dissociation
        .insert(cid, PugViewInformation { reference: reference.to_string(), value: value.to_string() });
    self
  }

  /// Hace que toda llamada falle con un error de transporte.
  pub fn failing(mut self) -> Self {
    self.failing = true;
    self
  }

  /// Número total de llamadas recibidas.
  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }

  fn record_call(&self) -> Result<(), ProviderError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    if self.failing {
      return Err(ProviderError::Transport("stub: conexión rechazada".to_string()));
    }
    Ok(())
  }
}

impl PubChemClient for StubPubChemClient {
  fn cids(&self, identifier: &str, namespace: Namespace) -> Result<Vec<u64>, ProviderError> {
    self.record_call()?;
    Ok(self.cids.get(&(namespace, identifier.to_string())).cloned().unwrap_or_default())
  }

  fn synonyms(&self, cid: u64) -> Result<Vec<String>, ProviderError> {
    self.record_call()?;
    Ok(self.synonyms.get(&cid).cloned().unwrap_or_default())
  }

  fn properties(&self, cid: u64) -> Result<CompoundProperties, ProviderError> {
    self.record_call()?;
    Ok(self.properties.get(&cid).cloned().unwrap_or_else(|| CompoundProperties { cid, ..Default::default() }))
  }

  fn dissociation_constants(&self, cid: u64) -> Result<Option<PugViewInformation>, ProviderError> {
    self.record_call()?;
    Ok(self.dissociation.get(&cid).cloned())
  }
}
