// http.rs
use crate::{parse_dissociation_information, CompoundProperties, Namespace, ProviderConfig, ProviderError, PubChemClient,
            PugViewInformation};
use serde::de::DeserializeOwned;
use serde::Deserialize;

const PROPERTY_LIST: &str = "InChI,InChIKey,IUPACName,CanonicalSMILES,IsomericSMILES";
const DISSOCIATION_HEADING: &str = "Dissociation Constants";

#[derive(Debug, Deserialize)]
struct IdentifierListResponse {
  #[serde(rename = "IdentifierList")]
  identifier_list: IdentifierList,
}

#[derive(Debug, Deserialize)]
struct IdentifierList {
  #[serde(rename = "CID", default)]
  cid: Vec<u64>,
}

#[derive(Debug, Deserialize)]
struct SynonymsResponse {
  #[serde(rename = "InformationList")]
  information_list: InformationList,
}

#[derive(Debug, Deserialize)]
struct InformationList {
  #[serde(rename = "Information", default)]
  information: Vec<SynonymInformation>,
}

#[derive(Debug, Deserialize)]
struct SynonymInformation {
  #[serde(rename = "Synonym", default)]
  synonym: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PropertyTableResponse {
  #[serde(rename = "PropertyTable")]
  property_table: PropertyTable,
}

#[derive(Debug, Deserialize)]
struct PropertyTable {
  #[serde(rename = "Properties", default)]
  properties: Vec<CompoundProperties>,
}

/// Cliente bloqueante de PubChem sobre `ureq`.
///
/// No sigue redirecciones: PUG View responde con 3xx cuando el registro se
/// movió y eso cuenta como respuesta no limpia.
pub struct HttpPubChemClient {
  agent: ureq::Agent,
  config: ProviderConfig,
}

impl HttpPubChemClient {
  pub fn new(config: ProviderConfig) -> Self {
    let agent = ureq::AgentBuilder::new().timeout(config.timeout)
                                         .redirects(0)
                                         .user_agent(&config.user_agent)
                                         .build();
    Self { agent, config }
  }

  pub fn from_env() -> Self {
    Self::new(ProviderConfig::from_env())
  }

  pub fn config(&self) -> &ProviderConfig {
    &self.config
  }

  fn pug_url(&self, path: &str) -> String {
    format!("{}/rest/pug/{}", self.config.base_url, path)
  }

  /// GET que decodifica JSON. `Ok(None)` cuando el código está en `absent`
  /// (404 PUGREST.NotFound y, para búsquedas de CIDs, 400 PUGREST.BadRequest).
  fn get_json<T: DeserializeOwned>(&self,
                                   url: &str,
                                   query: Option<(&str, &str)>,
                                   absent: &[u16])
                                   -> Result<Option<T>, ProviderError> {
    let mut request = self.agent.get(url);
    if let Some((key, value)) = query {
      request = request.query(key, value);
    }
    match request.call() {
      Ok(response) if response.status() == 200 => {
        let body = response.into_string()?;
        Ok(Some(serde_json::from_str(&body)?))
      }
      Ok(response) => Err(ProviderError::Status { code: response.status(), url: url.to_string() }),
      Err(ureq::Error::Status(code, _)) if absent.contains(&code) => Ok(None),
      Err(ureq::Error::Status(code, _)) => Err(ProviderError::Status { code, url: url.to_string() }),
      Err(ureq::Error::Transport(err)) => Err(ProviderError::Transport(err.to_string())),
    }
  }
}

impl PubChemClient for HttpPubChemClient {
  fn cids(&self, identifier: &str, namespace: Namespace) -> Result<Vec<u64>, ProviderError> {
    let url = self.pug_url(&format!("compound/{}/cids/JSON", namespace.as_str()));
    // Un nombre clasificado como SMILES recibe 400 en el namespace smiles:
    // cuenta como "sin candidatos" para que el resolvedor reintente por nombre.
    log::debug!("PubChem cids {namespace}: {identifier}");
    let found: Option<IdentifierListResponse> = self.get_json(&url, Some((namespace.as_str(), identifier)), &[400, 404])?;
    // PubChem responde CID 0 cuando la estructura es válida pero no existe
    Ok(found.map(|r| r.identifier_list.cid.into_iter().filter(|cid| *cid > 0).collect())
            .unwrap_or_default())
  }

  fn synonyms(&self, cid: u64) -> Result<Vec<String>, ProviderError> {
    let url = self.pug_url(&format!("compound/cid/{cid}/synonyms/JSON"));
    let found: Option<SynonymsResponse> = self.get_json(&url, None, &[404])?;
    Ok(found.and_then(|r| r.information_list.information.into_iter().next())
            .map(|info| info.synonym)
            .unwrap_or_default())
  }

  fn properties(&self, cid: u64) -> Result<CompoundProperties, ProviderError> {
    let url = self.pug_url(&format!("compound/cid/{cid}/property/{PROPERTY_LIST}/JSON"));
    let found: Option<PropertyTableResponse> = self.get_json(&url, None, &[404])?;
    let props = found.and_then(|r| r.property_table.properties.into_iter().next())
                     .unwrap_or_else(|| CompoundProperties { cid, ..Default::default() });
    Ok(props)
  }

  fn dissociation_constants(&self, cid: u64) -> Result<Option<PugViewInformation>, ProviderError> {
    let url = format!("{}/rest/pug_view/data/compound/{cid}/XML", self.config.base_url);
    match self.agent.get(&url).query("heading", DISSOCIATION_HEADING).call() {
      Ok(response) if response.status() == 200 => {
        let body = response.into_string()?;
        parse_dissociation_information(&body)
      }
      Ok(response) => {
        log::debug!("PUG View {cid}: respuesta no limpia ({})", response.status());
        Ok(None)
      }
      Err(ureq::Error::Status(code, _)) => {
        log::debug!("PUG View {cid}: HTTP {code}");
        Ok(None)
      }
      Err(ureq::Error::Transport(err)) => Err(ProviderError::Transport(err.to_string())),
    }
  }
}
