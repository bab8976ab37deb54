//! chem-workflow: búsqueda de pKa
//!
//! Orquesta la caché local (`chem_domain::CompoundRepository`) y el
//! resolvedor remoto (`chem_domain::PkaResolver`): primero la caché, después
//! PubChem, y finalmente la escritura del resultado nuevo sin duplicados.

pub mod errors;
pub mod factory;
pub mod search;

pub use errors::WorkflowError;
pub use factory::PkaSearchFactory;
pub use search::{PkaSearch, SearchOutcome};
