//! Shared permission model plus clients for the permission backend and plugin metadata.

pub mod aggregator;
pub mod client;
pub mod config;
pub mod discovery;
pub mod error;
pub mod interfaces;
pub mod types;

pub use aggregator::PermissionAggregator;
pub use client::PermissionClient;
pub use config::Config;
pub use discovery::{StaticIdentity, UrlPatternDiscovery};
pub use error::PermissionError;
pub use interfaces::{DiscoveryApi, IdentityApi};
pub use types::*;
