//! Error taxonomy for the loader lifecycle.
//!
//! Only the lifecycle operations surface typed errors; manifest and
//! host-registration problems stay non-fatal and fall back open.

use thiserror::Error;

/// Errors returned by [`Loader`](crate::loader::Loader) lifecycle operations.
#[derive(Debug, Error)]
pub enum Error {
  /// Collection was attempted after the collection phase had closed.
  #[error("bundle collection is closed for this render pass")]
  CollectPhaseClosed,

  /// The render pass was run while the loader was in the wrong phase.
  #[error("cannot run: loader is in the {0} phase")]
  RunPhaseClosed(&'static str),

  /// A lookup referenced a bundle id that was never collected.
  #[error("unknown bundle: {0}")]
  UnknownBundle(String),
}
