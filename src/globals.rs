//! # Global Engine Handle
//!
//! The fitted vector space model and neighbor index are process-wide state:
//! built once at startup, shared by every query for the lifetime of the
//! process. This module owns that state behind a single versioned handle.
//!
//! ## Architecture
//!
//! - **Lazy Initialization**: the slot is created on first access via
//!   `once_cell::sync::Lazy`; it holds `None` until an engine is installed.
//! - **Atomic Swap**: a catalog refresh builds a complete new engine off to
//!   the side, then replaces the `Arc` under a short write lock. Readers
//!   always see a fully-consistent model+index pair, never a half-updated
//!   vocabulary.
//! - **Cheap Reads**: `active_engine` clones the `Arc` under the read lock;
//!   queries then run without holding any lock at all.

use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use crate::engine::SearchEngine;
use crate::errors::EngineResult;
use crate::types::CatalogRecord;

/// The currently-active search engine, if one has been installed.
static ENGINE: Lazy<RwLock<Option<Arc<SearchEngine>>>> = Lazy::new(|| RwLock::new(None));

/// Install a fully-built engine as the active one, returning the previous
/// engine if there was one.
///
/// The swap is atomic from a reader's perspective: in-flight queries keep
/// their `Arc` to the old engine and drain naturally.
pub fn install_engine(engine: SearchEngine) -> Option<Arc<SearchEngine>> {
    let mut slot = ENGINE.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    slot.replace(Arc::new(engine))
}

/// Get a handle to the active engine.
///
/// Returns `None` until [`install_engine`] (or [`rebuild_engine`]) has run.
pub fn active_engine() -> Option<Arc<SearchEngine>> {
    let slot = ENGINE.read().unwrap_or_else(|poisoned| poisoned.into_inner());
    slot.clone()
}

/// Build an engine from a catalog snapshot and swap it in.
///
/// The build happens entirely outside the lock; on failure the previously
/// active engine keeps serving untouched.
pub fn rebuild_engine(records: Vec<CatalogRecord>) -> EngineResult<Arc<SearchEngine>> {
    let engine = Arc::new(SearchEngine::build(records)?);
    let mut slot = ENGINE.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    slot.replace(Arc::clone(&engine));
    Ok(engine)
}
