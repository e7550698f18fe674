//! Code generation for Webasyst extensions.
//!
//! Renders embedded Handlebars templates into PHP, Smarty, CSS and
//! JavaScript files laid out the way the Webasyst framework expects them.
//!
//! # Architecture
//!
//! - [`template_engine`]: Handlebars registry with every template compiled in
//! - [`types`]: [`GeneratedCode`] plan and its filesystem export
//! - [`generators`]: one module per artifact family, each exposing its
//!   parameter record and a `create_*` function
//!
//! # Examples
//!
//! ```
//! use webasyst_codegen::generators::model::{CreateModelParams, create_model};
//! use webasyst_codegen::template_engine::TemplateEngine;
//! use webasyst_core::ProjectLayout;
//!
//! let temp = tempfile::TempDir::new().unwrap();
//! std::fs::create_dir_all(temp.path().join("wa-apps/shop")).unwrap();
//!
//! let engine = TemplateEngine::new().unwrap();
//! let params = CreateModelParams {
//!     app_id: "shop".into(),
//!     table_name: "shop_product".into(),
//! };
//! let text = create_model(&engine, &ProjectLayout::new(temp.path()), &params).unwrap();
//! assert!(text.contains("ShopProductModel"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod generators;
pub mod template_engine;
pub mod types;

pub use template_engine::TemplateEngine;
pub use types::{GeneratedCode, GeneratedFile};
