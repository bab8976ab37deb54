//! Persistencia de la caché local de pKa.
//!
//! Expone `JsonCompoundRepository`, un almacén de documentos en un único
//! fichero JSON legible que implementa `chem_domain::CompoundRepository`.
//! El formato (`{"_default": {"<id>": {...}}}`) es el de las bases de
//! documentos existentes, así que se pueden abrir ficheros ya poblados.

mod json_store;

pub use json_store::{new_compound_repo_from_env, JsonCompoundRepository, DEFAULT_DB_PATH};
