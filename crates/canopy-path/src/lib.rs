//! Path syntax for the canopy namespace.
//!
//! Every mounted store is addressed through the same path grammar:
//!
//! ```text
//! drive:/segment/segment/...
//! ```
//!
//! The drive prefix (everything before the first `:`) names a mounted root
//! context and is optional; the remainder is a separator-delimited segment
//! sequence. All functions here are pure string manipulation — no store
//! access, no state.
//!
//! # Canonical form
//!
//! A canonical path uses `/` as its only separator and starts with exactly
//! one leading `/`. [`normalize`] rewrites any input into this form and is
//! idempotent. A path is *well-formed* when normalization produces no empty
//! segments (no doubled or trailing separators).
//!
//! # Modules
//!
//! - [`canonical`] — normalization, drive splitting, segment extraction
//! - [`error`] — error types for path validation

pub mod canonical;
pub mod error;

pub use canonical::{
    is_well_formed, join, leaf_name, normalize, parent_path, segments, split_drive, strip_drive,
    validate, DRIVE_SEPARATOR, SEPARATOR,
};
pub use error::{PathError, Result};
