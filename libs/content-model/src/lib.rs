//! Hikma content data model
//!
//! Value types shared by the classification and discovery engines:
//! - Category descriptors for the static taxonomy
//! - Weighted, confidence-scored content tags
//! - Enumerated content metadata (difficulty, format, audience, ...)
//! - The content item itself with engagement counters and flags
//!
//! This crate carries no engine logic and performs no I/O; everything here
//! is constructed by callers (import flows, UI layers) and handed to the
//! engines.

mod category;
mod content;
mod metadata;
mod tag;

pub use category::Category;
pub use content::{ContentItem, ContentPatch, EngagementStats};
pub use metadata::{
    ContentFormat, ContentKind, ContentMetadata, Difficulty, DurationBucket, TargetAudience,
};
pub use tag::{ContentTag, TagSource};

/// Sentinel category id used whenever a content item references a category
/// the taxonomy does not know. Classification is advisory, so unknown ids
/// degrade to this bucket instead of being rejected.
pub const GENERAL_CATEGORY: &str = "general";
