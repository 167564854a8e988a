//! Build-manifest loading, caching and lookup.

mod cache;
mod read;

pub use cache::ManifestCache;
pub use read::read_manifest_file;

use std::collections::BTreeMap;

use serde::Deserialize;

/// Mapping from logical asset names to their fingerprinted counterparts.
///
/// The mapping is a pure override: a lookup miss returns the logical name
/// unchanged, so pages keep working when a build did not fingerprint a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
  entries: BTreeMap<String, String>,
}

impl Manifest {
  /// Resolve a logical asset name, falling back to the name itself.
  pub fn resolve<'a>(&'a self, logical: &'a str) -> &'a str {
    self
      .entries
      .get(logical)
      .map(String::as_str)
      .unwrap_or(logical)
  }

  /// Fingerprinted name for `logical`, when the manifest has one.
  pub fn get(&self, logical: &str) -> Option<&str> {
    self.entries.get(logical).map(String::as_str)
  }

  /// Whether the manifest carries any entries at all.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Number of entries in the manifest.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Iterate over `(logical, fingerprinted)` pairs.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self
      .entries
      .iter()
      .map(|(logical, resolved)| (logical.as_str(), resolved.as_str()))
  }
}

impl FromIterator<(String, String)> for Manifest {
  fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
    Self {
      entries: iter.into_iter().collect(),
    }
  }
}
