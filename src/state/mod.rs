//! State module for tracking crawl progress
//!
//! This module provides the per-run state shared by link discovery and the
//! article pipeline.
//!
//! # Components
//!
//! - `VisitedSet`: URLs already processed by a crawler instance
//! - `LinkCandidateSet`: capped, deduplicated article links for one category
//! - `PaginationCursor`: current listing page and its URL

mod candidates;
mod cursor;
mod visited;

// Re-export main types
pub use candidates::{InsertOutcome, LinkCandidateSet, MAX_CANDIDATES};
pub use cursor::PaginationCursor;
pub use visited::VisitedSet;
