use chem_domain::{CompoundRecord, CompoundRepository, DomainStubs, InMemoryCompoundRepository, LookupConfig};
use chem_persistence::JsonCompoundRepository;
use chem_providers::{CompoundProperties, Namespace, StubPubChemClient};
use chem_workflow::{PkaSearch, SearchOutcome};
use std::sync::Arc;

const ACETIC_INCHIKEY: &str = "QTBSBXVTEAMEQO-UHFFFAOYSA-N";
const ACETIC_INCHI: &str = "InChI=1S/C2H4O2/c1-2(3)4/h1H3,(H,3,4)";

fn acetic_acid_properties() -> CompoundProperties {
  CompoundProperties { cid: 176,
                       inchi: Some(ACETIC_INCHI.into()),
                       inchikey: Some(ACETIC_INCHIKEY.into()),
                       iupac_name: Some("acetic acid".into()),
                       canonical_smiles: Some("CC(=O)O".into()),
                       isomeric_smiles: Some("CC(=O)O".into()) }
}

fn pubchem() -> StubPubChemClient {
  StubPubChemClient::new().with_cids(Namespace::Name, "64-19-7", vec![176])
                          .with_cids(Namespace::InchiKey, ACETIC_INCHIKEY, vec![176])
                          .with_cids(Namespace::Smiles, "OC(C)=O", vec![176])
                          .with_synonyms(176, ["acetic acid", "64-19-7", "Ethanoic acid"])
                          .with_properties(acetic_acid_properties())
                          .with_dissociation(176, "Serjeant, E.P., Dempsey B.", "pKa = 4.76 at 25 °C")
}

#[test]
fn acetic_acid_by_cas_is_resolved_and_cached() {
  let repo = Arc::new(InMemoryCompoundRepository::new());
  let client = Arc::new(pubchem());
  let search = PkaSearch::new(repo.clone(), client.clone(), LookupConfig::default());

  let outcome = search.search_pka("64-19-7").expect("resolved");
  let record = match &outcome {
    SearchOutcome::Resolved(r) => r.clone(),
    other => panic!("expected Resolved, got {:?}", other),
  };
  assert_eq!(record.pka(), "4.76 at 25 °C");
  assert_eq!(record.reference(), "Serjeant, E.P., Dempsey B.");
  assert_eq!(record.cas(), Some("64-19-7"));
  assert_eq!(repo.len().unwrap(), 1);

  // Segunda búsqueda por cualquier identificador alternativo: sin red
  let calls = client.calls();
  for key in ["64-19-7", ACETIC_INCHIKEY, ACETIC_INCHI, "acetic acid", "CC(=O)O"] {
    let again = search.search_pka(key).expect("cached");
    assert_eq!(again, SearchOutcome::Cached(vec![record.clone()]), "key {}", key);
  }
  assert_eq!(client.calls(), calls);
}

#[test]
fn same_compound_through_another_identifier_is_not_duplicated() {
  let repo = Arc::new(InMemoryCompoundRepository::new());
  let client = Arc::new(pubchem());
  let search = PkaSearch::new(repo.clone(), client, LookupConfig::new(true));

  // SMILES no canónico: no está en caché, se resuelve remotamente
  let first = search.search_pka("OC(C)=O").expect("resolved");
  assert!(!first.is_cached());
  assert_eq!(repo.len().unwrap(), 1);

  // Una copia idéntica ya guardada bajo la InChIKey: no se vuelve a insertar
  let again = search.search_pka("OC(C)=O").expect("resolved");
  assert_eq!(again.records(), first.records());
  assert_eq!(repo.search(ACETIC_INCHIKEY).unwrap().len(), 1);
  assert_eq!(repo.len().unwrap(), 1);
}

#[test]
fn different_content_under_same_inchikey_is_inserted() {
  let repo = Arc::new(InMemoryCompoundRepository::new());
  // Registro previo con otro valor de pKa para la misma InChIKey
  let older = CompoundRecord::new(176, "4.75", "Serjeant, E.P., Dempsey B.").unwrap().with_inchikey(Some(ACETIC_INCHIKEY.into()));
  repo.insert(older).unwrap();

  let search = PkaSearch::new(repo.clone(), Arc::new(pubchem()), LookupConfig::default());
  let outcome = search.search_pka("OC(C)=O").expect("resolved");
  assert_eq!(outcome.records()[0].pka(), "4.76 at 25 °C");
  assert_eq!(repo.search(ACETIC_INCHIKEY).unwrap().len(), 2);
}

#[test]
fn unknown_inchikey_is_absent_and_not_stored() {
  let repo = Arc::new(InMemoryCompoundRepository::new());
  let client = Arc::new(pubchem());
  let search = PkaSearch::new(repo.clone(), client.clone(), LookupConfig::new(true));

  assert_eq!(search.search_pka("SNAOXHWORPTDTJ-UHFFFAOYNA-N"), None);
  assert_eq!(repo.len().unwrap(), 0);
  // inchikey + reintento por nombre
  assert_eq!(client.calls(), 2);
}

#[test]
fn near_miss_inchi_is_absent() {
  let near = "InChI=1S/C2H4O2/c1-2(3)4/h1H3,(H,3,5)";
  let repo = Arc::new(InMemoryCompoundRepository::new());
  let client = Arc::new(pubchem().with_cids(Namespace::Inchi, near, vec![176]));
  let search = PkaSearch::new(repo.clone(), client, LookupConfig::default());

  assert_eq!(search.search_pka(near), None);
  assert!(repo.is_empty().unwrap());
}

#[test]
fn record_without_inchikey_is_returned_but_not_cached() {
  let client = StubPubChemClient::new().with_cids(Namespace::Smiles, "OC1=CC=CC=C1", vec![996])
                                       .with_dissociation(996, "CRC Handbook", "9.99 @ 25 °C");
  let repo = Arc::new(InMemoryCompoundRepository::new());
  let search = PkaSearch::new(repo.clone(), Arc::new(client), LookupConfig::default());

  let outcome = search.search_pka("OC1=CC=CC=C1").expect("resolved");
  assert_eq!(outcome.records()[0].pka(), "9.99 @ 25 °C");
  assert_eq!(outcome.records()[0].inchikey(), None);
  assert_eq!(repo.len().unwrap(), 0);
}

#[test]
fn compound_without_dissociation_section_is_absent() {
  let client = StubPubChemClient::new().with_cids(Namespace::Name, "2950-43-8", vec![76284])
                                       .with_synonyms(76284, ["2950-43-8"]);
  let search = PkaSearch::new(Arc::new(InMemoryCompoundRepository::new()), Arc::new(client), LookupConfig::default());
  assert_eq!(search.search_pka("2950-43-8"), None);
}

#[test]
fn cached_hits_return_every_matching_record() {
  let repo = Arc::new(DomainStubs::sample_repo());
  repo.insert(DomainStubs::acetic_acid()).unwrap();
  let search = PkaSearch::new(repo, Arc::new(StubPubChemClient::new().failing()), LookupConfig::default());
  let outcome = search.search_pka("64-19-7").expect("cached");
  assert_eq!(outcome.records().len(), 2);
}

#[test]
fn results_persist_in_json_store() {
  let dir = tempfile::tempdir().expect("tempdir");
  let path = dir.path().join("pka_db.json");
  {
    let repo = Arc::new(JsonCompoundRepository::open(&path).unwrap());
    let search = PkaSearch::new(repo, Arc::new(pubchem()), LookupConfig::default());
    assert!(search.search_pka("64-19-7").is_some());
    search.flush().unwrap();
  }

  let repo = Arc::new(JsonCompoundRepository::open(&path).unwrap());
  let client = Arc::new(StubPubChemClient::new().failing());
  let search = PkaSearch::new(repo, client.clone(), LookupConfig::default());
  let outcome = search.search_pka(ACETIC_INCHIKEY).expect("cached on disk");
  assert!(outcome.is_cached());
  assert_eq!(client.calls(), 0);
}
