//! # workbench_templates
//!
//! Template sources and rendering for s3c-workbench.
//!
//! Environment files (compose manifest, `defaults.env`, per-service
//! configuration) are produced by substituting configuration values into
//! templates. Templates are embedded in the binary and can be replaced as a
//! whole by pointing [`TemplateSource::Directory`] at a directory with the
//! same layout.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use workbench_templates::{TemplateRenderer, TemplateSource};
//!
//! let renderer = TemplateRenderer::new(TemplateSource::Embedded);
//! let data = serde_json::json!({"global": {"logLevel": "info"}});
//!
//! renderer
//!     .render_to_file("vault/config.json", &data, Path::new("./env/default/config/vault/config.json"))
//!     .unwrap();
//! ```

pub mod engine;
pub mod error;
pub mod renderer;
pub mod source;

pub use engine::Template;
pub use error::{TemplateError, TemplateResult};
pub use renderer::TemplateRenderer;
pub use source::{TemplateSource, EMBEDDED_TEMPLATES};
