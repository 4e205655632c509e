//! # shawl-api: Inventory Backend Client for Shawl POS
//!
//! The inventory and sales ledger live behind a remote HTTP service.
//! This crate is the only place that talks to it.
//!
//! ## Responsibilities
//!
//! - [`client::ShawlApiClient`] - reqwest client for the full backend
//!   contract (products, sales, dashboard, color classification)
//! - [`client::InventoryApi`] - the narrow seam the scan coordinator
//!   depends on, fakeable in tests
//! - [`error::ApiError`] - the failure taxonomy: `NotFound` is a
//!   creation offer, `OutOfStock` is definitive, everything else is
//!   transient and only ever retried by an explicit operator action
//! - [`config::BackendConfig`] - the injected backend address
//!
//! ## Example
//! ```rust,no_run
//! use shawl_api::{BackendConfig, InventoryApi, ShawlApiClient};
//! use shawl_core::CandidateIdentifier;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BackendConfig::new("https://pos.example.com")?;
//! let client = ShawlApiClient::new(config);
//!
//! let candidate = CandidateIdentifier::new("SHL-1042")?;
//! match client.resolve_product(&candidate).await {
//!     Ok(product) => println!("{} in stock: {}", product.name, product.stock_qty),
//!     Err(shawl_api::ApiError::NotFound { code }) => println!("offer to create {}", code),
//!     Err(e) => eprintln!("transient failure: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::{InventoryApi, ShawlApiClient};
pub use config::{BackendConfig, ConfigError};
pub use error::{ApiError, ApiResult};
