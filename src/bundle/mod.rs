//! Named, versioned, prioritized collections of asset resources.

mod config;

pub use config::{AssetDecl, AssetSpec, BundleConfig, Context, DEFAULT_MANIFEST_FILE};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::warn;

use crate::hooks::Hooks;
use crate::host::Host;
use crate::manifest::{Manifest, ManifestCache};
use crate::resources::{AssetResource, FileResource, LoadMode, Resource, join_uri};

/// A named, versioned collection of resources for one feature area.
///
/// Built once from its declarative config; immutable afterwards. Declared
/// sources are resolved through the manifest at construction, and leftover
/// manifest entries (incidental built files such as images and fonts) are
/// carried as plain file resources for retrieval.
#[derive(Debug)]
pub struct Bundle {
  id: String,
  version: String,
  priority: i32,
  base_dir: PathBuf,
  base_uri: String,
  resources: BTreeMap<String, Resource>,
  grouped: BTreeMap<Context, Vec<String>>,
}

impl Bundle {
  /// Materialize a bundle, loading its manifest through the cache.
  pub fn new(config: BundleConfig, cache: &mut ManifestCache) -> Self {
    let manifest = match &config.manifest {
      Some(file) => cache.load(&config.base_dir, file, &config.id, &config.version),
      None => Manifest::default(),
    };
    Self::with_manifest(config, &manifest)
  }

  /// Materialize a bundle from an explicit, already-loaded manifest.
  pub fn with_manifest(config: BundleConfig, manifest: &Manifest) -> Self {
    let BundleConfig {
      id,
      version,
      priority,
      base_dir,
      base_uri,
      assets,
      ..
    } = config;

    let mut bundle = Self {
      id,
      version,
      priority,
      base_dir,
      base_uri,
      resources: BTreeMap::new(),
      grouped: BTreeMap::new(),
    };
    bundle.load_assets(assets, manifest);
    bundle
  }

  /// Parse the declared groups into concrete resources, then absorb manifest
  /// entries nothing declared as plain files.
  fn load_assets(&mut self, groups: BTreeMap<Context, Vec<AssetDecl>>, manifest: &Manifest) {
    for (ctx, decls) in groups {
      for decl in decls {
        let mut spec = decl.into_spec();
        let id = spec.src.clone();
        spec.src = manifest.resolve(&id).to_string();

        if self.resources.contains_key(&id) {
          warn!(
            "duplicate asset id {id} in bundle {}; last declaration wins",
            self.id
          );
        }

        let asset = AssetResource::new(
          &self.id,
          &self.version,
          &self.base_dir,
          &self.base_uri,
          ctx,
          spec,
        );
        self.resources.insert(id.clone(), Resource::Asset(asset));

        let group = self.grouped.entry(ctx).or_default();
        if !group.contains(&id) {
          group.push(id);
        }
      }
    }

    for (id, src) in manifest.iter() {
      if self.resources.contains_key(id) {
        continue;
      }
      let file = FileResource::new(&self.base_dir, &self.base_uri, src.to_string());
      self.resources.insert(id.to_string(), Resource::File(file));
    }
  }

  /// Bundle id.
  pub fn id(&self) -> &str {
    &self.id
  }

  /// Bundle version, forwarded to every asset registration.
  pub fn version(&self) -> &str {
    &self.version
  }

  /// Render-hook priority; bundles run ascending.
  pub fn priority(&self) -> i32 {
    self.priority
  }

  /// Base directory holding the built assets.
  pub fn base_dir(&self) -> &Path {
    &self.base_dir
  }

  /// Base URI the assets are served under.
  pub fn base_uri(&self) -> &str {
    &self.base_uri
  }

  /// Ordered asset ids declared for a context, empty when none were.
  pub fn context_ids(&self, ctx: Context) -> &[String] {
    self
      .grouped
      .get(&ctx)
      .map(Vec::as_slice)
      .unwrap_or_default()
  }

  /// Look up a resource by its declared id.
  pub fn resource(&self, id: &str) -> Option<&Resource> {
    self.resources.get(id)
  }

  /// Iterate every resource with its id.
  pub fn resources(&self) -> impl Iterator<Item = (&str, &Resource)> {
    self
      .resources
      .iter()
      .map(|(id, resource)| (id.as_str(), resource))
  }

  /// Process every asset declared for `ctx`, in declaration order.
  ///
  /// Returns how many assets made it through the full pipeline.
  pub fn process_context(
    &self,
    ctx: Context,
    mode: &LoadMode,
    hooks: &Hooks,
    host: &mut dyn Host,
  ) -> usize {
    let mut processed = 0;
    for id in self.context_ids(ctx) {
      let Some(asset) = self.resources.get(id).and_then(Resource::as_asset) else {
        continue;
      };
      if asset.process(mode, hooks, host) {
        processed += 1;
      }
    }
    processed
  }

  /// Cache-busted URI for a logical source; unknown sources join the base URI
  /// unchanged.
  pub fn uri_for(&self, src: &str) -> String {
    match self.resources.get(src) {
      Some(resource) => resource.uri().to_string(),
      None => join_uri(&self.base_uri, src),
    }
  }

  /// Cache-busted filesystem path for a logical source; unknown sources join
  /// the base directory unchanged.
  pub fn path_for(&self, src: &str) -> PathBuf {
    match self.resources.get(src) {
      Some(resource) => resource.path().to_path_buf(),
      None => self.base_dir.join(src),
    }
  }
}
