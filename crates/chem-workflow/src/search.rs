use crate::WorkflowError;
use chem_domain::{CompoundRecord, CompoundRepository, IdentifierKind, LookupConfig, PkaResolver};
use chem_providers::PubChemClient;
use serde::Serialize;
use std::sync::Arc;

/// Resultado positivo de una búsqueda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SearchOutcome {
  /// Uno o más registros ya presentes en la caché local.
  Cached(Vec<CompoundRecord>),
  /// Registro obtenido de PubChem (insertado en la caché si tiene InChIKey).
  Resolved(CompoundRecord),
}

impl SearchOutcome {
  pub fn records(&self) -> &[CompoundRecord] {
    match self {
      SearchOutcome::Cached(records) => records,
      SearchOutcome::Resolved(record) => std::slice::from_ref(record),
    }
  }

  pub fn is_cached(&self) -> bool {
    matches!(self, SearchOutcome::Cached(_))
  }
}

/// Búsqueda de pKa: caché local primero, PubChem después.
///
/// Un registro resuelto se guarda una sola vez: antes de insertar se busca
/// por su InChIKey y, si ya existe uno idéntico, se devuelve ése. Los
/// registros sin InChIKey no se guardan.
pub struct PkaSearch {
  repo: Arc<dyn CompoundRepository>,
  resolver: PkaResolver,
  config: LookupConfig,
}

impl PkaSearch {
  pub fn new(repo: Arc<dyn CompoundRepository>, client: Arc<dyn PubChemClient>, config: LookupConfig) -> Self {
    Self { repo, resolver: PkaResolver::new(client, config), config }
  }

  pub fn repository(&self) -> &Arc<dyn CompoundRepository> {
    &self.repo
  }

  /// Busca el pKa de `identifier`. `None` si no hay resultado por cualquier
  /// motivo; el detalle sólo aparece en el log en modo debug.
  pub fn search_pka(&self, identifier: &str) -> Option<SearchOutcome> {
    self.search_pka_with(identifier, None)
  }

  /// Como `search_pka`, con un tipo de identificador declarado para la
  /// consulta remota.
  pub fn search_pka_with(&self, identifier: &str, declared: Option<IdentifierKind>) -> Option<SearchOutcome> {
    match self.try_search(identifier, declared) {
      Ok(outcome) => outcome,
      Err(e) => {
        if self.config.debug {
          log::warn!("{}: {}", identifier, e);
        }
        None
      }
    }
  }

  /// Escribe a disco lo pendiente en la caché.
  pub fn flush(&self) -> Result<(), WorkflowError> {
    self.repo.flush()?;
    Ok(())
  }

  fn try_search(&self, identifier: &str,
                declared: Option<IdentifierKind>)
                -> Result<Option<SearchOutcome>, WorkflowError> {
    let cached = self.repo.search(identifier)?;
    if !cached.is_empty() {
      return Ok(Some(SearchOutcome::Cached(cached.into_iter().map(|(_, r)| r).collect())));
    }

    let Some(resolution) = self.resolver.lookup(identifier, declared) else {
      return Ok(None);
    };
    let record = resolution.record;

    let inchikey = match record.inchikey() {
      Some(key) => key.to_string(),
      None => {
        if self.config.debug {
          log::debug!("{}: registro sin InChIKey, no se guarda en caché", identifier);
        }
        return Ok(Some(SearchOutcome::Resolved(record)));
      }
    };

    // Puede existir ya bajo otro identificador de entrada
    let existing = self.repo.search(&inchikey)?;
    if let Some((id, same)) = existing.into_iter().find(|(_, r)| *r == record) {
      if self.config.debug {
        log::debug!("{}: ya existe como documento {}, no se inserta", identifier, id);
      }
      return Ok(Some(SearchOutcome::Resolved(same)));
    }

    let id = self.repo.insert(record.clone())?;
    if self.config.debug {
      log::debug!("{}: insertado como documento {}", identifier, id);
    }
    Ok(Some(SearchOutcome::Resolved(record)))
  }
}
