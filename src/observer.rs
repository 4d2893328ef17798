//! Diagnostic events emitted while a page is loaded.
//!
//! The loader never prints anything itself. Callers pass a [`LoadObserver`]
//! and decide what to do with each event; [`TracingObserver`] is the default.

use std::path::Path;

use crate::error::{ErrorKind, PageLoaderError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    ValidatingInput,
    FetchingDocument,
    RewritingResources,
    PersistingDocument,
    Done,
}

#[derive(Debug)]
pub enum LoadEvent<'a> {
    PhaseEntered(LoadPhase),
    /// Local resources found in the page, before any download starts.
    ResourcesDiscovered { count: usize },
    ResourceSaved { url: &'a str, path: &'a Path },
    ResourceFailed { url: &'a str, error: &'a PageLoaderError },
    DocumentSaved { path: &'a Path },
    Failed { kind: ErrorKind, error: &'a PageLoaderError },
}

pub trait LoadObserver: Send + Sync {
    fn on_event(&self, event: &LoadEvent<'_>);
}

impl<F> LoadObserver for F
where
    F: Fn(&LoadEvent<'_>) + Send + Sync,
{
    fn on_event(&self, event: &LoadEvent<'_>) {
        self(event)
    }
}

/// Forwards every event to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl LoadObserver for TracingObserver {
    fn on_event(&self, event: &LoadEvent<'_>) {
        match event {
            LoadEvent::PhaseEntered(phase) => tracing::debug!(?phase, "entering phase"),
            LoadEvent::ResourcesDiscovered { count } => {
                tracing::info!(count, "local resources discovered")
            }
            LoadEvent::ResourceSaved { url, path } => {
                tracing::debug!(url, path = %path.display(), "resource saved")
            }
            LoadEvent::ResourceFailed { url, error } => {
                tracing::warn!(url, %error, "resource skipped")
            }
            LoadEvent::DocumentSaved { path } => {
                tracing::info!(path = %path.display(), "page saved")
            }
            LoadEvent::Failed { kind, error } => tracing::error!(?kind, %error, "load failed"),
        }
    }
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl LoadObserver for NoopObserver {
    fn on_event(&self, _event: &LoadEvent<'_>) {}
}
