//! Async client for a network-policy controller REST API
//!
//! Models tenants, networks, endpoint groups, policies and rules as local
//! handles whose methods create, replace and delete the matching objects on
//! the controller at `http://{host}:9999/api/`.
//!
//! # Module Structure
//!
//! - [`config`] - Which controller to talk to, and how
//! - [`api`] - HTTP transport and URL construction
//! - [`resource`] - Per-collection create/delete/list operations
//! - [`model`] - Stateful object handles built on the operations
//! - [`error`] - Typed error taxonomy
//! - [`logging`] - Optional file logging for embedding tools
//!
//! Every call returns a [`Result`]; deadlines can be applied per call with
//! `tokio::time::timeout` or per client with [`ClientConfig::with_timeout`].

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod resource;

pub use api::client::{Collection, ControllerClient};
pub use config::ClientConfig;
pub use error::{format_api_error, CascadeError, Error, Result};
pub use model::{EndpointGroup, Network, Policy, Rule, Tenant};
pub use resource::{Direction, Encap, FabricMode, NetworkSpec, RuleAction, RuleSpec};
