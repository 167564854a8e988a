//! Host platform primitives the loader drives.

use serde_json::{Map, Value};

use crate::hooks::LocalizeParams;
use crate::resources::AssetKind;

/// One registration call against the host.
#[derive(Debug)]
pub struct RegisterRequest<'a> {
  /// Process-unique handle the asset registers under.
  pub handle: &'a str,
  /// Resolved, cache-busted URI.
  pub src: &'a str,
  /// Host-opaque dependency handles, passed through verbatim; ordering them
  /// is the host's job, not ours.
  pub deps: &'a [String],
  /// Bundle version forwarded as the asset version.
  pub version: &'a str,
  /// Script or style, selecting the host primitive.
  pub kind: AssetKind,
  /// Kind defaults or declared overrides, opaque to this crate.
  pub args: &'a Map<String, Value>,
}

/// The page-rendering surface the loader mutates.
///
/// Implementations own host-global registration state. A `false` return marks
/// the operation as declined and short-circuits the current asset only; the
/// rest of the bundle keeps processing.
pub trait Host {
  /// Register an asset under its handle.
  fn register(&mut self, request: &RegisterRequest<'_>) -> bool;

  /// Enqueue a previously registered asset by handle.
  fn enqueue(&mut self, kind: AssetKind, handle: &str) -> bool;

  /// Bind localization data to a registered script.
  fn localize(&mut self, params: &LocalizeParams) -> bool;
}
