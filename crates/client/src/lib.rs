//! Storedash Client - typed access to the per-store REST API.
//!
//! Storefronts read catalog data anonymously; management tools act as a
//! store owner by sending the owner id in the identity header.
//!
//! ```rust,ignore
//! use storedash_client::{DashboardClient, endpoint::Billboards};
//!
//! let client = DashboardClient::new("http://localhost:3000")?.with_owner("user_123");
//! let store = client.create_store("Shoes").await?;
//! let billboards = client.list::<Billboards>(store.id).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod endpoint;
pub mod error;

pub use client::{DEFAULT_IDENTITY_HEADER, DashboardClient, ProductQuery};
pub use endpoint::{Endpoint, WritableEndpoint};
pub use error::ClientError;
