// resolver.rs
use crate::{classify, CompoundRecord, IdentifierKind, LookupConfig, LookupError};
use chem_providers::{CompoundProperties, Namespace, PubChemClient};
use std::sync::Arc;

const PKA_LABEL: &str = "pKa = ";

/// Registro obtenido de PubChem junto con cómo se buscó.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
  pub identifier: String,
  /// Tipo efectivo usado en la búsqueda (`None` = sin clasificar).
  pub kind: Option<IdentifierKind>,
  pub record: CompoundRecord,
}

/// Resolvedor remoto: identificador -> CID verificado -> pKa.
///
/// Nunca devuelve un registro que no sea coincidencia exacta para CAS
/// (sinónimos), InChI o InChIKey (propiedad canónica). SMILES y entradas sin
/// clasificar no tienen verificación independiente y se aceptan tal cual.
/// No escribe en la caché.
pub struct PkaResolver {
  client: Arc<dyn PubChemClient>,
  config: LookupConfig,
}

impl PkaResolver {
  pub fn new(client: Arc<dyn PubChemClient>, config: LookupConfig) -> Self {
    Self { client, config }
  }

  pub fn config(&self) -> LookupConfig {
    self.config
  }

  /// Igual que `resolve` pero colapsa cualquier fallo en `None`.
  ///
  /// El motivo sólo se registra en el log cuando `debug` está activo.
  pub fn lookup(&self, identifier: &str, declared: Option<IdentifierKind>) -> Option<Resolution> {
    match self.resolve(identifier, declared) {
      Ok(resolution) => Some(resolution),
      Err(e) => {
        if self.config.debug {
          log::warn!("{}: {}", identifier, e);
        }
        None
      }
    }
  }

  /// Busca el pKa de `identifier` en PubChem.
  ///
  /// `declared` fuerza el tipo del identificador; sin él se usa `classify`.
  pub fn resolve(&self, identifier: &str, declared: Option<IdentifierKind>) -> Result<Resolution, LookupError> {
    let kind = declared.or_else(|| classify(identifier));
    let namespace = kind.map_or(Namespace::Name, |k| k.namespace());

    let cid = self.candidate_cid(identifier, namespace)?
                  .ok_or_else(|| LookupError::NotFound(identifier.to_string()))?;

    let mut synonyms: Option<Vec<String>> = None;
    let mut properties: Option<CompoundProperties> = None;
    let exact = match kind {
      Some(IdentifierKind::Cas) => {
        let list = self.client.synonyms(cid)?;
        let found = list.iter().any(|s| s == identifier);
        synonyms = Some(list);
        found
      }
      Some(IdentifierKind::Inchi) => {
        let props = self.client.properties(cid)?;
        let same = props.inchi.as_deref() == Some(identifier);
        properties = Some(props);
        same
      }
      Some(IdentifierKind::InchiKey) => {
        let props = self.client.properties(cid)?;
        let same = props.inchikey.as_deref() == Some(identifier);
        properties = Some(props);
        same
      }
      Some(IdentifierKind::Smiles) | None => true,
    };
    if self.config.debug {
      log::debug!("{identifier}: CID {cid}, coincidencia exacta = {exact}");
    }
    if !exact {
      return Err(LookupError::NotExactMatch { identifier: identifier.to_string(), cid });
    }

    let info = self.client.dissociation_constants(cid)?.ok_or(LookupError::DetailUnavailable(cid))?;
    let properties = match properties {
      Some(p) => p,
      None => self.client.properties(cid)?,
    };
    let cas = match kind {
      Some(IdentifierKind::Cas) => Some(identifier.to_string()),
      _ => self.cas_from_synonyms(cid, synonyms),
    };

    let pka = info.value.strip_prefix(PKA_LABEL).unwrap_or(&info.value);
    let record = CompoundRecord::new(cid, pka, &info.reference)?.with_cas(cas)
                                                               .with_iupac_name(properties.iupac_name)
                                                               .with_inchi(properties.inchi)
                                                               .with_inchikey(properties.inchikey)
                                                               .with_smiles(properties.canonical_smiles,
                                                                            properties.isomeric_smiles);
    Ok(Resolution { identifier: identifier.to_string(), kind, record })
  }

  /// Primer CID positivo; si el namespace específico no encuentra nada se
  /// reintenta una vez por nombre.
  fn candidate_cid(&self, identifier: &str, namespace: Namespace) -> Result<Option<u64>, LookupError> {
    let mut cids = self.client.cids(identifier, namespace)?;
    if cids.is_empty() && namespace != Namespace::Name {
      if self.config.debug {
        log::debug!("{identifier}: sin CID por {namespace}, reintentando por nombre");
      }
      cids = self.client.cids(identifier, Namespace::Name)?;
    }
    Ok(cids.into_iter().find(|cid| *cid > 0))
  }

  /// Número CAS tomado de los sinónimos; ausente si la consulta falla.
  fn cas_from_synonyms(&self, cid: u64, known: Option<Vec<String>>) -> Option<String> {
    let synonyms = match known {
      Some(list) => list,
      None => match self.client.synonyms(cid) {
        Ok(list) => list,
        Err(e) => {
          if self.config.debug {
            log::debug!("CID {cid}: sinónimos no disponibles: {e}");
          }
          return None;
        }
      },
    };
    synonyms.into_iter().find(|s| classify(s) == Some(IdentifierKind::Cas))
  }
}
