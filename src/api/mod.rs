//! Controller API interaction module
//!
//! # Module Structure
//!
//! - [`client`] - Controller client handle and URL construction
//! - [`http`] - HTTP transport with status-to-error mapping
//!
//! # Example
//!
//! ```no_run
//! use netpolicy_client::api::client::{Collection, ControllerClient};
//!
//! async fn example() -> netpolicy_client::Result<()> {
//!     let client = ControllerClient::for_host("netmaster")?;
//!     let tenants = client.get(&client.collection_url(Collection::Tenants)).await?;
//!     println!("{}", tenants);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;
