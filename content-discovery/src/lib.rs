//! Hikma content discovery
//!
//! In-memory content index with text search, conjunctive multi-field
//! filtering, sorting, faceting and a set of recommendation heuristics
//! (personalized, similar, trending, featured, new). Composes with the
//! classifier's taxonomy for category lookups and suggestion candidates.
//!
//! The engine is an explicit instance owned by the caller's content-service
//! layer. All state (content map, user preferences, search history) is
//! volatile and single-owner; see `DiscoveryEngine` for the concurrency
//! contract.

pub mod config;
pub mod error;
pub mod index;
pub mod models;
pub mod recommend;
pub mod search;

// Re-export commonly used types
pub use config::{DiscoveryConfig, PersonalizationWeights, SimilarityWeights, TrendingWeights};
pub use error::{DiscoveryError, Result};
pub use index::DiscoveryEngine;
pub use models::{
    EngagementKind, SearchFacets, SearchFilters, SearchQuery, SearchRecord, SearchResult, SortBy,
    SortDirection, UserPreferences,
};
