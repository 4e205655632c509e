//! # shawl-label: Printable Label Composer for Shawl POS
//!
//! Renders a [`shawl_core::Product`] into a fixed-size label image
//! carrying its name, a QR symbol, a Code 128 barcode and the code and
//! price lines. Output is a plain RGBA image or PNG bytes; spooling it
//! to a printer is the host application's job.
//!
//! Composition is fully deterministic, so labels can be regenerated at
//! any time and diffed byte-for-byte.
//!
//! ## Example
//! ```rust
//! use shawl_core::{ColorName, Product, ProductCategory};
//! use shawl_label::compose_png;
//!
//! let product = Product {
//!     code: "SH-0042".to_string(),
//!     name: "Pashmina Classic".to_string(),
//!     color_name: ColorName::Maroon,
//!     color_hex: "#800000".to_string(),
//!     price: 49.99,
//!     category: ProductCategory::Cashmere,
//!     stock_qty: 5,
//! };
//!
//! let png = compose_png(&product).unwrap();
//! assert_eq!(&png[1..4], b"PNG");
//! ```

pub mod canvas;
pub mod compose;
pub mod error;
pub mod font;

pub use compose::{compose_label, compose_png, LABEL_HEIGHT, LABEL_WIDTH};
pub use error::{LabelError, LabelResult};
