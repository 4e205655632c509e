//! # Domain Types
//!
//! Core domain types used throughout Shawl POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   SaleRecord    │   │   ColorMatch    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  code (unique)  │   │  id (UUID)      │   │  name           │       │
//! │  │  name           │   │  product_code   │   │  hex + rgb+hsv  │       │
//! │  │  price (> 0)    │   │  price_at_sale  │   │  confidence 0-1 │       │
//! │  │  stock_qty ≥ 0  │   │  quantity       │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌──────────────────────┐   ┌─────────────────┐                        │
//! │  │ CandidateIdentifier  │   │   ColorSample   │                        │
//! │  │  ──────────────────  │   │  ─────────────  │                        │
//! │  │  [A-Za-z0-9-]+       │   │  {r, g, b} mean │                        │
//! │  │  from any strategy   │   │  of 40x40 patch │                        │
//! │  └──────────────────────┘   └─────────────────┘                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Contract
//! The inventory backend speaks camelCase JSON; every type that crosses
//! the HTTP boundary carries `#[serde(rename_all = "camelCase")]`.
//! Products are owned by the backend - the pipeline holds only a
//! transient, request-scoped copy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Color Sample
// =============================================================================

/// Arithmetic mean of a sampled pixel patch.
///
/// Produced by [`crate::sampler::sample`] and forwarded as-is to the
/// backend classifier. No local color naming happens on this side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSample {
    /// Renders the sample as a lowercase `#rrggbb` triplet.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// HSV projection returned by the backend classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    /// Hue in degrees, 0-360.
    pub h: f64,
    /// Saturation, 0-1.
    pub s: f64,
    /// Value, 0-1.
    pub v: f64,
}

/// Server-side classification of a [`ColorSample`].
///
/// The classification algorithm (name + confidence) lives behind the
/// `/detect-color` endpoint and is opaque to this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorMatch {
    pub name: ColorName,
    pub hex: String,
    pub rgb: ColorSample,
    pub hsv: Hsv,
    pub confidence: f64,
}

impl ColorMatch {
    /// Checks the response invariants: confidence in [0, 1] and hex
    /// consistent with the rgb triplet.
    pub fn check_invariants(&self) -> CoreResult<()> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(CoreError::InvalidCandidate {
                reason: format!("confidence {} outside [0, 1]", self.confidence),
            });
        }
        if !self.hex.eq_ignore_ascii_case(&self.rgb.to_hex()) {
            return Err(CoreError::InvalidCandidate {
                reason: format!("hex {} does not match rgb {}", self.hex, self.rgb.to_hex()),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Candidate Identifier
// =============================================================================

/// A normalized token produced by a recognition strategy, intended to
/// match a product code.
///
/// ## Invariant
/// Non-empty and matches `[A-Za-z0-9-]+`. Enforced at construction; a
/// `CandidateIdentifier` in hand is always submittable to the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateIdentifier(String);

impl CandidateIdentifier {
    /// Wraps an already-normalized token, rejecting anything that
    /// violates the shape invariant.
    pub fn new(token: impl Into<String>) -> CoreResult<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(CoreError::InvalidCandidate {
                reason: "empty identifier".to_string(),
            });
        }
        if !token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(CoreError::InvalidCandidate {
                reason: format!("'{}' contains characters outside [A-Za-z0-9-]", token),
            });
        }
        Ok(CandidateIdentifier(token))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CandidateIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Product Category
// =============================================================================

/// Fabric category of a shawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Wool,
    Silk,
    Cotton,
    Cashmere,
    Synthetic,
    Mixed,
}

impl ProductCategory {
    /// Stable wire name, matching the backend enum.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Wool => "wool",
            ProductCategory::Silk => "silk",
            ProductCategory::Cotton => "cotton",
            ProductCategory::Cashmere => "cashmere",
            ProductCategory::Synthetic => "synthetic",
            ProductCategory::Mixed => "mixed",
        }
    }
}

// =============================================================================
// Color Name
// =============================================================================

/// Backend color vocabulary.
///
/// The classifier only ever answers with one of these names; keeping
/// the enum client-side catches contract drift at deserialization time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorName {
    Black,
    White,
    Grey,
    LightGrey,
    DarkGrey,
    Red,
    LightRed,
    DarkRed,
    Orange,
    Brown,
    Yellow,
    LightYellow,
    Green,
    LightGreen,
    DarkGreen,
    Blue,
    LightBlue,
    DarkBlue,
    Purple,
    LightPurple,
    DarkPurple,
    Pink,
    LightPink,
    Maroon,
    Navy,
    Teal,
    Olive,
    Beige,
    Cream,
}

impl ColorName {
    /// Stable wire name (snake_case), matching the backend enum.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorName::Black => "black",
            ColorName::White => "white",
            ColorName::Grey => "grey",
            ColorName::LightGrey => "light_grey",
            ColorName::DarkGrey => "dark_grey",
            ColorName::Red => "red",
            ColorName::LightRed => "light_red",
            ColorName::DarkRed => "dark_red",
            ColorName::Orange => "orange",
            ColorName::Brown => "brown",
            ColorName::Yellow => "yellow",
            ColorName::LightYellow => "light_yellow",
            ColorName::Green => "green",
            ColorName::LightGreen => "light_green",
            ColorName::DarkGreen => "dark_green",
            ColorName::Blue => "blue",
            ColorName::LightBlue => "light_blue",
            ColorName::DarkBlue => "dark_blue",
            ColorName::Purple => "purple",
            ColorName::LightPurple => "light_purple",
            ColorName::DarkPurple => "dark_purple",
            ColorName::Pink => "pink",
            ColorName::LightPink => "light_pink",
            ColorName::Maroon => "maroon",
            ColorName::Navy => "navy",
            ColorName::Teal => "teal",
            ColorName::Olive => "olive",
            ColorName::Beige => "beige",
            ColorName::Cream => "cream",
        }
    }

    /// Human display form: underscores to spaces, title case.
    /// "light_grey" → "Light Grey".
    pub fn display_name(&self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as served by the inventory backend.
///
/// Request-scoped copy only; the backend remains the owner of stock
/// levels and the sole arbiter of stock mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique business key, e.g. "SH-0042".
    pub code: String,
    pub name: String,
    pub color_name: ColorName,
    /// `#RRGGBB` triplet of the dominant fabric color.
    pub color_hex: String,
    /// Price in currency units; backend guarantees > 0. Monetary
    /// arithmetic stays server-side, this is display data here.
    pub price: f64,
    pub category: ProductCategory,
    /// Current stock; backend guarantees ≥ 0.
    pub stock_qty: i64,
}

/// Payload for creating a product.
///
/// `code` is optional: the backend mints a sequential "SH-NNNN" code
/// when absent. The scan flow pre-fills it from an unresolved
/// candidate so a not-found scan is one click from a new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub name: String,
    pub color_name: ColorName,
    pub color_hex: String,
    pub price: f64,
    pub category: ProductCategory,
    pub stock_qty: i64,
}

// =============================================================================
// Sales
// =============================================================================

/// Intent to record one sale, submitted to the backend.
///
/// The stock decrement and its atomicity live behind `POST /sales`;
/// this side submits the intent exactly once per explicit operator
/// action and never retries on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleIntent {
    pub product_code: String,
    pub quantity: i64,
}

impl SaleIntent {
    /// Single-unit sale, the default for the scan-and-sell flow.
    pub fn single(product_code: impl Into<String>) -> Self {
        SaleIntent {
            product_code: product_code.into(),
            quantity: 1,
        }
    }
}

/// A recorded sale as returned by the backend.
///
/// Product name, price and color are frozen at sale time on the server
/// (snapshot pattern), so later product edits never rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub id: Uuid,
    pub product_code: String,
    pub product_name: String,
    pub price_at_sale: f64,
    pub color_at_sale: String,
    pub timestamp: DateTime<Utc>,
    pub quantity: i64,
}

// =============================================================================
// Dashboard Statistics
// =============================================================================

/// Revenue totals by time range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueTotals {
    pub today: f64,
    pub month: f64,
    pub all_time: f64,
}

/// Unit/product counts by time range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountTotals {
    pub today: i64,
    pub month: i64,
    pub all_time: i64,
}

/// One row of the top-sellers board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopSeller {
    pub product_code: String,
    pub product_name: String,
    pub total_units: i64,
    pub total_revenue: f64,
}

/// Aggregate statistics from `GET /dashboard/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_revenue: RevenueTotals,
    pub total_units: CountTotals,
    pub distinct_products: CountTotals,
    pub top_sellers: Vec<TopSeller>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_sample_hex() {
        let sample = ColorSample { r: 120, g: 45, b: 200 };
        assert_eq!(sample.to_hex(), "#782dc8");
    }

    #[test]
    fn test_candidate_identifier_shape() {
        assert!(CandidateIdentifier::new("SHL-1042").is_ok());
        assert!(CandidateIdentifier::new("abc123").is_ok());
        assert!(CandidateIdentifier::new("").is_err());
        assert!(CandidateIdentifier::new("has space").is_err());
        assert!(CandidateIdentifier::new("emoji🧣").is_err());
    }

    #[test]
    fn test_color_match_invariants() {
        let rgb = ColorSample { r: 120, g: 45, b: 200 };
        let mut m = ColorMatch {
            name: ColorName::Purple,
            hex: "#782dc8".to_string(),
            rgb,
            hsv: Hsv { h: 269.0, s: 0.775, v: 0.784 },
            confidence: 0.8,
        };
        assert!(m.check_invariants().is_ok());

        m.confidence = 1.2;
        assert!(m.check_invariants().is_err());

        m.confidence = 0.8;
        m.hex = "#000000".to_string();
        assert!(m.check_invariants().is_err());
    }

    #[test]
    fn test_color_name_display() {
        assert_eq!(ColorName::LightGrey.display_name(), "Light Grey");
        assert_eq!(ColorName::Red.display_name(), "Red");
    }

    #[test]
    fn test_product_wire_format() {
        let json = r##"{
            "code": "SH-0001",
            "name": "Pashmina Classic",
            "colorName": "dark_red",
            "colorHex": "#8b0000",
            "price": 49.99,
            "category": "cashmere",
            "stockQty": 12
        }"##;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.code, "SH-0001");
        assert_eq!(product.color_name, ColorName::DarkRed);
        assert_eq!(product.category, ProductCategory::Cashmere);
        assert_eq!(product.stock_qty, 12);
    }

    #[test]
    fn test_sale_intent_single() {
        let intent = SaleIntent::single("SH-0001");
        assert_eq!(intent.quantity, 1);
        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["productCode"], "SH-0001");
    }
}
