//! Error types for attune-core.

use thiserror::Error;

/// All errors that can arise while resolving the fixed layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// `dirs::home_dir()` returned `None` — cannot locate the store or the
    /// runtime configuration root.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}
