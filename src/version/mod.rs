//! Version layer: the version model and the sources that produce versions
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Registry  │────▶│   Extract   │────▶│  Versions   │──▶ filter
//! │ (raw tags)  │     │   (parse)   │     │  (model)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │
//!        ▼
//! ┌─────────────────────────────┐
//! │         Registries          │
//! │ (github, dockerhub, maven)  │
//! └─────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`]: `Patch`, `Version` and the `Versions` list
//! - [`extract`]: Turns raw tag names into versions, recording rejects
//! - [`registry`]: Registry trait for fetching tag names from remote sources
//! - [`registries`]: Concrete registry implementations
//! - [`error`]: Error types for parsing and registry operations

pub mod error;
pub mod extract;
pub mod registries;
pub mod registry;
pub mod types;

pub use types::{Patch, Version, Versions};
