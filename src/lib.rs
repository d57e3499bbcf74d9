//! R3XA Schema Tools
//!
//! Turns the annotated `schema-full.json` into the two artifacts the project
//! publishes:
//!
//! - **Runtime schema** (`schema.json`): the same tree with editorial keys
//!   (`$comment`, `examples`, `rationale`, `see`, `notes`) removed at every depth.
//! - **Specification** (`docs/specification.md`): a Markdown rendering of the
//!   header fields, the settings / data sources / data sets collections and the
//!   shared types, with resolved type names and links into the appendix.
//!
//! ## Pipeline
//!
//! ```text
//! schema-full.json ──► SchemaDocument ──┬──► KeyStripper ──► schema.json
//!                                       │
//!                                       └──► SpecRenderer ──► docs/specification.md
//!                                              ├─ shape   (detect_type_shape)
//!                                              ├─ names   (NameResolver)
//!                                              └─ markdown (Table, escape_cell)
//! ```
//!
//! Both transformations are pure functions over an immutable tree; only the
//! file wrappers ([`strip_file`], [`generate_spec_file`]) touch the disk.

pub mod config;
pub mod document;
pub mod error;
pub mod freshness;
pub mod markdown;
pub mod names;
pub mod shape;
pub mod spec;
pub mod strip;

pub use config::{RenderConfig, StripConfig, ToolsConfig};
pub use document::SchemaDocument;
pub use error::{Result, SchemaError};
pub use freshness::{check_freshness, Freshness};
pub use names::NameResolver;
pub use shape::{detect_type_shape, TypeShape};
pub use spec::{generate_spec_file, render_spec_file, render_type, SpecRenderer};
pub use strip::{strip_file, KeyStripper, StripReport, Stripped};
