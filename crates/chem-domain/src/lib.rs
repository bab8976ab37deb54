mod compound_record;
mod compound_repository;
mod config;
mod domain_stubs;
mod errors;
mod identifier;
mod resolver;

pub use compound_record::{CompoundRecord, PUBCHEM_SOURCE};
pub use compound_repository::{CompoundRepository, InMemoryCompoundRepository, RecordId};
pub use config::LookupConfig;
pub use domain_stubs::DomainStubs;
pub use errors::{DomainError, LookupError};
pub use identifier::{classify, IdentifierKind};
pub use resolver::{PkaResolver, Resolution};
