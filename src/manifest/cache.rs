//! Time-bounded cache for loaded manifests.

use std::collections::HashMap;
use std::path::Path;
use std::time::{Duration, Instant};

use log::{debug, trace};

use super::{Manifest, read_manifest_file};

/// Version prefix marking a development build; disables caching entirely.
const DEV_VERSION_PREFIX: &str = "0.0.0";

/// Caches loaded manifests per `(bundle id, version)` for a bounded lifetime.
///
/// Mirrors a transient store: entries expire after the configured TTL and are
/// evicted lazily on the next access. Development versions and debug mode
/// bypass the cache so local rebuilds are picked up immediately.
#[derive(Debug)]
pub struct ManifestCache {
  debug: bool,
  ttl: Duration,
  entries: HashMap<String, CacheEntry>,
}

#[derive(Debug)]
struct CacheEntry {
  expires_at: Instant,
  manifest: Manifest,
}

impl ManifestCache {
  /// Create a cache with the given debug flag and entry lifetime.
  pub fn new(debug: bool, ttl: Duration) -> Self {
    Self {
      debug,
      ttl,
      entries: HashMap::new(),
    }
  }

  /// Load the manifest for a bundle, going to disk at most once per TTL window.
  pub fn load(&mut self, dir: &Path, file: &str, id: &str, version: &str) -> Manifest {
    if !self.enabled_for(version) {
      trace!("manifest cache bypassed for {id} {version}");
      return read_manifest_file(dir, file);
    }

    let key = cache_key(id, version);
    if let Some(entry) = self.entries.get(&key) {
      if entry.expires_at > Instant::now() {
        trace!("manifest cache hit for {key}");
        return entry.manifest.clone();
      }
      self.entries.remove(&key);
    }

    debug!("manifest cache miss for {key}; reading from disk");
    let manifest = read_manifest_file(dir, file);
    if !manifest.is_empty() {
      self.entries.insert(key, CacheEntry {
        expires_at: Instant::now() + self.ttl,
        manifest: manifest.clone(),
      });
    }

    manifest
  }

  /// Whether caching applies to the given version string.
  fn enabled_for(&self, version: &str) -> bool {
    !self.debug && !version.starts_with(DEV_VERSION_PREFIX)
  }

  /// Drop every cached entry.
  pub fn clear(&mut self) {
    self.entries.clear();
  }
}

fn cache_key(id: &str, version: &str) -> String {
  format!("{id}_assets_{version}")
}
