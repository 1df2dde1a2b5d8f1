// unifi-sdn-api: Session-authenticated async client for the UniFi SDN controller API

pub mod auth;
pub mod client;
pub mod devices;
pub mod error;
pub mod health;
pub mod models;
pub mod sites;
pub mod system;
pub mod transport;

pub use auth::{Credentials, Session};
pub use client::ApiClient;
pub use error::Error;
pub use models::{ApiResponse, Meta, RawDevice, RawSite, RawSiteHealth};
pub use system::ControllerStatus;
pub use transport::{TlsMode, TransportConfig};
