//! Statiki Client - talks to the provisioning backend over HTTP
//!
//! Both calls post form-encoded bodies and expect JSON back. Any non-2xx
//! response is a transport failure carrying the body exactly as received.

mod error;
mod http;

pub use error::ClientError;
pub use http::{HttpBackend, HttpBackendConfig};
pub use secrecy::SecretString;
