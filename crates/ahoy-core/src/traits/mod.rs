//! Collaborator seams: persistence, transport, clock/ids, and token storage.

pub mod environment;
pub mod storage;
pub mod token_store;
pub mod transport;

pub use environment::{Clock, DeviceIdProvider, IdGenerator};
pub use storage::KeyValueStore;
pub use token_store::TokenStore;
pub use transport::{Headers, HttpRequest, HttpResponse, Transport};
