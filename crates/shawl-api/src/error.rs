//! # API Error Taxonomy
//!
//! Typed failures for every backend interaction.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Backend Error Mapping                                │
//! │                                                                         │
//! │  HTTP response                      ApiError                            │
//! │  ─────────────                      ────────                            │
//! │  404 on /products/{code} ─────────► NotFound   (creation offer, not a  │
//! │                                                 system error)           │
//! │  400 "Insufficient stock" ────────► OutOfStock (user-visible, NO retry)│
//! │  400 "code already exists" ───────► DuplicateCode                      │
//! │  other 4xx/5xx ───────────────────► Backend    (transient, manual      │
//! │  connect/timeout ─────────────────► Transport   retry only)            │
//! │  malformed body ──────────────────► InvalidResponse                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in this crate retries automatically. A retried `POST /sales`
//! on an ambiguous failure could decrement stock twice; the operator
//! re-clicks instead.

use thiserror::Error;

/// Errors surfaced by the inventory backend client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The identifier resolves to no product.
    ///
    /// Not a system error: the coordinator answers this with an offer
    /// to create the product, pre-filled with the scanned code.
    #[error("product not found: {code}")]
    NotFound { code: String },

    /// The backend rejected a sale for lack of stock.
    #[error("insufficient stock for {code}")]
    OutOfStock { code: String },

    /// A create collided with an existing product code.
    #[error("product code already exists: {code}")]
    DuplicateCode { code: String },

    /// Any other backend rejection or server failure. Transient;
    /// retried only by an explicit operator action.
    #[error("backend error ({status}): {detail}")]
    Backend { status: u16, detail: String },

    /// The request never produced a response (DNS, connect, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered 2xx but the body violated the contract.
    #[error("invalid backend response: {reason}")]
    InvalidResponse { reason: String },
}

impl ApiError {
    /// True for failures worth re-submitting manually; false for
    /// definitive answers (not found, out of stock, duplicate).
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ApiError::Backend { .. } | ApiError::Transport(_) | ApiError::InvalidResponse { .. }
        )
    }
}

/// Convenience type alias for Results with ApiError.
pub type ApiResult<T> = Result<T, ApiError>;
