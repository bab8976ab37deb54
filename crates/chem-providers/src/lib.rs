//! chem-providers: acceso a PubChem
//!
//! Este crate encapsula el servicio externo: búsqueda de CIDs por
//! identificador (PUG REST), recuperación de sinónimos y propiedades
//! canónicas, y la descarga/parseo del documento PUG View con las
//! constantes de disociación. El resto del workspace sólo ve el trait
//! `PubChemClient`, de modo que las pruebas pueden usar `StubPubChemClient`.

mod client;
mod config;
mod errors;
mod http;
mod pug_view;
pub mod stubs;

pub use client::{CompoundProperties, Namespace, PubChemClient, PugViewInformation};
pub use config::ProviderConfig;
pub use errors::ProviderError;
pub use http::HttpPubChemClient;
pub use pug_view::{parse_dissociation_information, PUG_VIEW_NS};
pub use stubs::StubPubChemClient;
