//! Navigation engine for the canopy namespace.
//!
//! This crate is the provider core: it takes a path string plus an
//! operation and resolves it against the mounted drives, delegating all
//! tree access to the backing store and all string handling to the path
//! crate. Every operation runs the same short-lived pipeline:
//!
//! 1. **Validate** the path — a malformed path never touches the store
//! 2. **Resolve the drive** owning the path's drive prefix
//! 3. **Resolve the node set** by querying the backing store
//! 4. **Confirm** each affected node individually through the injected
//!    [`ShouldProcess`] callback
//! 5. **Execute** the mutation through the store primitives
//! 6. **Emit** each resulting node, tagged with its source path and its
//!    container/leaf kind
//!
//! Query operations (get, exists) answer "empty"/"false" for malformed
//! paths and missing drives; mutating operations fail fatally in the same
//! situations. Per-node failures inside a batch are reported as
//! [`ErrorRecord`]s in the output and do not abort sibling nodes.
//!
//! # Modules
//!
//! - [`error`] — [`NavError`] and the machine-readable [`ErrorCategory`]
//! - [`capability`] — the capability set an engine is composed from
//! - [`confirm`] — the injectable confirmation side-channel
//! - [`descriptor`] — the static operation descriptor table
//! - [`params`] — dynamic per-operation parameters
//! - [`item`] — operation output records
//! - [`engine`] — the [`NavigationEngine`] itself

pub mod capability;
pub mod confirm;
pub mod descriptor;
pub mod engine;
pub mod error;
pub mod item;
pub mod params;

pub use capability::{Capability, CapabilitySet};
pub use confirm::{AcceptAll, DenyAll, ShouldProcess};
pub use descriptor::{descriptor, OpDescriptor, Operation, Param};
pub use engine::NavigationEngine;
pub use error::{ErrorCategory, NavError, Result};
pub use item::{ErrorRecord, ItemRecord, OperationOutput};
pub use params::OpParams;
