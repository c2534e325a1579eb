//! Hikma content classifier
//!
//! Taxonomy registry and keyword/heuristic categorization engine for the
//! knowledge platform. Free text is scored against per-category keyword
//! lists, semantic regex patterns, contextual signals and a bounded feedback
//! history; the output is an advisory category assignment with tags,
//! confidence and metadata hints.
//!
//! Everything here is in-process and synchronous: no network, no
//! persistence, no locks. Engines are explicit instances owned by the
//! caller.

pub mod config;
pub mod engine;
pub mod error;
pub mod feedback;
pub mod metadata;
pub mod models;
pub mod scoring;
pub mod tags;
pub mod taxonomy;

// Re-export commonly used types
pub use config::ClassifierConfig;
pub use engine::CategorizationEngine;
pub use error::{ClassifierError, Result};
pub use models::{CategorizationResult, ContentAnalysis, Feedback, MetadataHints};
pub use taxonomy::Taxonomy;
