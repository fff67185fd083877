// cgx-api: Async Rust client for the CloudGenix SD-WAN controller API

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod transport;

pub use client::CgxClient;
pub use error::Error;
pub use models::{Profile, Site, Tenant, WanInterface, WanInterfaceLabel};
pub use transport::{TlsMode, TransportConfig};

/// Default controller endpoint for the public CloudGenix cloud.
pub const DEFAULT_CONTROLLER: &str = "https://api.elcapitan.cloudgenix.com";
