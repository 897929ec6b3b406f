//! Error types for Halo.
//!
//! Subsystems keep their own narrower errors (window, registry, UI query,
//! configuration) and handle them where they occur. [`HaloError`] is what
//! commands and app setup surface.

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during application execution.
///
/// Serializes as `{ "kind": ..., "message": ... }` so the frontend can
/// branch on the kind without parsing messages.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum HaloError {
    /// Overlay window operation failed.
    #[error("Window error: {0}")]
    WindowError(String),
    /// The overlay has not been set up yet.
    #[error("Overlay is not initialized")]
    NotInitialized,
}
