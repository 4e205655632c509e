//! # Backend Client
//!
//! HTTP client for the inventory service, plus the [`InventoryApi`]
//! seam the scan coordinator is written against.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET    /api/products/{code}            resolve a candidate            │
//! │  GET    /api/products?category=&search= list / filter products         │
//! │  POST   /api/products                   create (code optional)        │
//! │  DELETE /api/products/{code}            remove a product              │
//! │  POST   /api/sales                      record sale, decrement stock  │
//! │  GET    /api/sales?search=              sales ledger                  │
//! │  GET    /api/dashboard/stats            revenue / unit aggregates     │
//! │  POST   /api/detect-color               classify a ColorSample        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every call is submitted at most once. The client maps backend
//! rejections to the [`ApiError`] taxonomy and otherwise stays out of
//! the way; stock arithmetic, code minting and color classification are
//! server-side.

use serde::Deserialize;
use tracing::{debug, info, warn};

use shawl_core::{
    CandidateIdentifier, ColorMatch, ColorSample, DashboardStats, NewProduct, Product,
    ProductCategory, SaleIntent, SaleRecord,
};

use crate::config::BackendConfig;
use crate::error::{ApiError, ApiResult};

// =============================================================================
// Inventory API Seam
// =============================================================================

/// The slice of the backend the scan pipeline needs.
///
/// The coordinator is generic over this trait so its state machine can
/// be tested against an in-memory fake with no network at all.
#[allow(async_fn_in_trait)]
pub trait InventoryApi {
    /// Resolves a candidate identifier to a product.
    ///
    /// Fails `NotFound` when no product carries the code; any other
    /// failure is transient and surfaced distinctly.
    async fn resolve_product(&self, candidate: &CandidateIdentifier) -> ApiResult<Product>;

    /// Submits one sale intent. Never retried internally.
    async fn record_sale(&self, intent: &SaleIntent) -> ApiResult<SaleRecord>;

    /// Classifies an averaged color sample.
    async fn detect_color(&self, sample: ColorSample) -> ApiResult<ColorMatch>;
}

// =============================================================================
// HTTP Client
// =============================================================================

/// Reqwest-backed client for the inventory backend.
#[derive(Debug, Clone)]
pub struct ShawlApiClient {
    http: reqwest::Client,
    config: BackendConfig,
}

/// FastAPI-style error body: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

impl ShawlApiClient {
    /// Creates a client for the configured backend.
    pub fn new(config: BackendConfig) -> Self {
        ShawlApiClient {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Fetches a single product by code.
    pub async fn get_product(&self, code: &str) -> ApiResult<Product> {
        debug!(code = %code, "get_product");
        let resp = self
            .http
            .get(self.config.api_url(&format!("/products/{}", code)))
            .send()
            .await?;
        read_json(resp, code).await
    }

    /// Lists products, optionally filtered by category and/or a
    /// name-or-code search string.
    pub async fn list_products(
        &self,
        category: Option<ProductCategory>,
        search: Option<&str>,
    ) -> ApiResult<Vec<Product>> {
        debug!(?category, ?search, "list_products");
        let mut req = self.http.get(self.config.api_url("/products"));
        if let Some(cat) = category {
            req = req.query(&[("category", cat.as_str())]);
        }
        if let Some(s) = search {
            req = req.query(&[("search", s)]);
        }
        read_json(req.send().await?, "").await
    }

    /// Creates a product. When `code` is `None` the backend mints the
    /// next sequential "SH-NNNN" code.
    pub async fn create_product(&self, product: &NewProduct) -> ApiResult<Product> {
        let code_hint = product.code.as_deref().unwrap_or("<minted>");
        debug!(code = %code_hint, name = %product.name, "create_product");

        let resp = self
            .http
            .post(self.config.api_url("/products"))
            .json(product)
            .send()
            .await?;
        let created: Product = read_json(resp, code_hint).await?;
        info!(code = %created.code, "product created");
        Ok(created)
    }

    /// Deletes a product by code.
    pub async fn delete_product(&self, code: &str) -> ApiResult<()> {
        debug!(code = %code, "delete_product");
        let resp = self
            .http
            .delete(self.config.api_url(&format!("/products/{}", code)))
            .send()
            .await?;
        let status = resp.status();
        if status.is_success() {
            info!(code = %code, "product deleted");
            return Ok(());
        }
        Err(error_from_response(resp, code).await)
    }

    /// Lists recorded sales, newest first, optionally filtered.
    pub async fn list_sales(&self, search: Option<&str>) -> ApiResult<Vec<SaleRecord>> {
        debug!(?search, "list_sales");
        let mut req = self.http.get(self.config.api_url("/sales"));
        if let Some(s) = search {
            req = req.query(&[("search", s)]);
        }
        read_json(req.send().await?, "").await
    }

    /// Fetches aggregate revenue/unit statistics.
    pub async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        debug!("dashboard_stats");
        let resp = self
            .http
            .get(self.config.api_url("/dashboard/stats"))
            .send()
            .await?;
        read_json(resp, "").await
    }
}

impl InventoryApi for ShawlApiClient {
    async fn resolve_product(&self, candidate: &CandidateIdentifier) -> ApiResult<Product> {
        self.get_product(candidate.as_str()).await
    }

    async fn record_sale(&self, intent: &SaleIntent) -> ApiResult<SaleRecord> {
        debug!(code = %intent.product_code, qty = intent.quantity, "record_sale");
        let resp = self
            .http
            .post(self.config.api_url("/sales"))
            .json(intent)
            .send()
            .await?;
        let record: SaleRecord = read_json(resp, &intent.product_code).await?;
        info!(code = %record.product_code, qty = record.quantity, "sale recorded");
        Ok(record)
    }

    async fn detect_color(&self, sample: ColorSample) -> ApiResult<ColorMatch> {
        debug!(r = sample.r, g = sample.g, b = sample.b, "detect_color");
        let resp = self
            .http
            .post(self.config.api_url("/detect-color"))
            .json(&sample)
            .send()
            .await?;
        let m: ColorMatch = read_json(resp, "").await?;
        m.check_invariants().map_err(|e| {
            warn!(error = %e, "backend returned inconsistent color match");
            ApiError::InvalidResponse {
                reason: e.to_string(),
            }
        })?;
        Ok(m)
    }
}

// =============================================================================
// Response Mapping
// =============================================================================

/// Parses a 2xx JSON body or maps the failure to [`ApiError`].
async fn read_json<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
    code: &str,
) -> ApiResult<T> {
    let status = resp.status();
    if status.is_success() {
        return resp.json::<T>().await.map_err(|e| ApiError::InvalidResponse {
            reason: e.to_string(),
        });
    }

    Err(error_from_response(resp, code).await)
}

/// Maps a non-2xx response to the error taxonomy.
async fn error_from_response(resp: reqwest::Response, code: &str) -> ApiError {
    let status = resp.status().as_u16();
    let detail = match resp.json::<ErrorBody>().await {
        Ok(body) => body.detail.unwrap_or_default(),
        Err(_) => String::new(),
    };
    classify_error(status, &detail, code)
}

/// Pure classification of a backend rejection.
///
/// The backend signals its cases through the status code plus a detail
/// string; this is the single place that string knowledge lives.
pub(crate) fn classify_error(status: u16, detail: &str, code: &str) -> ApiError {
    let lower = detail.to_ascii_lowercase();
    match status {
        404 => ApiError::NotFound {
            code: code.to_string(),
        },
        400 if lower.contains("stock") => ApiError::OutOfStock {
            code: code.to_string(),
        },
        400 if lower.contains("already exists") => ApiError::DuplicateCode {
            code: code.to_string(),
        },
        _ => ApiError::Backend {
            status,
            detail: if detail.is_empty() {
                "no detail".to_string()
            } else {
                detail.to_string()
            },
        },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
