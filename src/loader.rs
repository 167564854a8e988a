//! Render-phase loader collecting bundles and driving the enqueue pipeline.

use std::collections::HashMap;
use std::path::PathBuf;

use log::{debug, warn};

use crate::bundle::{Bundle, BundleConfig, Context};
use crate::config::LoaderOptions;
use crate::error::Error;
use crate::hooks::Hooks;
use crate::host::Host;
use crate::manifest::ManifestCache;
use crate::resources::LoadMode;

/// Lifecycle phase of a [`Loader`].
///
/// The uninitialized state exists only before construction; building the
/// loader resolves the execution context, which is then fixed for its
/// lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
  ContextResolved,
  BundlesCollected,
  Running,
}

impl Phase {
  fn name(self) -> &'static str {
    match self {
      Self::ContextResolved => "context-resolved",
      Self::BundlesCollected => "bundles-collected",
      Self::Running => "running",
    }
  }
}

/// A bundle source gathered during the collection phase.
pub enum BundleSource {
  /// Raw declarative config, materialized during collection.
  Config(BundleConfig),
  /// Already-materialized bundle, stored unchanged.
  Ready(Bundle),
}

impl From<BundleConfig> for BundleSource {
  fn from(config: BundleConfig) -> Self {
    Self::Config(config)
  }
}

impl From<Bundle> for BundleSource {
  fn from(bundle: Bundle) -> Self {
    Self::Ready(bundle)
  }
}

/// Collects registered bundles and processes them on the render hook.
///
/// One loader serves one render pass: the composition root constructs it with
/// the resolved execution context, feeds it every collaborator's bundle
/// source exactly once on the early lifecycle hook, and calls [`Loader::run`]
/// when the host's render hook fires.
pub struct Loader {
  context: Context,
  hook: &'static str,
  phase: Phase,
  cache: ManifestCache,
  bundles: Vec<Bundle>,
  index: HashMap<String, usize>,
}

impl Loader {
  /// Build a loader for the given execution context.
  pub fn new(context: Context, options: &LoaderOptions) -> Self {
    Self {
      context,
      hook: context.render_hook(),
      phase: Phase::ContextResolved,
      cache: ManifestCache::new(options.debug, options.cache_ttl()),
      bundles: Vec::new(),
      index: HashMap::new(),
    }
  }

  /// The execution context resolved at construction.
  pub fn context(&self) -> Context {
    self.context
  }

  /// Name of the host render hook this loader should be driven from.
  pub fn render_hook(&self) -> &'static str {
    self.hook
  }

  /// Gather every collaborator's bundle source — once per loader.
  ///
  /// Configs with no declared assets are skipped; already-materialized
  /// bundles pass through unchanged. A second invocation declines, guarding
  /// against collection being re-triggered from inside a collaborator
  /// callback at the wrong time. Returns the number of bundles stored.
  pub fn collect_bundles<I>(&mut self, sources: I) -> Result<usize, Error>
  where
    I: IntoIterator<Item = BundleSource>,
  {
    if self.phase != Phase::ContextResolved {
      return Err(Error::CollectPhaseClosed);
    }

    let mut collected = 0;
    for source in sources {
      let bundle = match source {
        BundleSource::Ready(bundle) => bundle,
        BundleSource::Config(config) => {
          if !config.has_assets() {
            debug!("skipping bundle {} with no declared assets", config.id);
            continue;
          }
          Bundle::new(config, &mut self.cache)
        }
      };
      self.insert(bundle);
      collected += 1;
    }

    self.phase = Phase::BundlesCollected;
    debug!("collected {collected} bundles for the {} context", self.context.as_str());
    Ok(collected)
  }

  /// Store a bundle, replacing a previous registration in place.
  fn insert(&mut self, bundle: Bundle) {
    match self.index.get(bundle.id()) {
      Some(&slot) => {
        warn!(
          "bundle {} registered twice; replacing the previous registration",
          bundle.id()
        );
        self.bundles[slot] = bundle;
      }
      None => {
        self.index.insert(bundle.id().to_string(), self.bundles.len());
        self.bundles.push(bundle);
      }
    }
  }

  /// Drive every bundle for the active context, priority ascending.
  ///
  /// Bundles with equal priority keep their collection order; within one
  /// bundle, assets run in declaration order. Every scheduled asset is
  /// processed in `auto` mode — deferred assets register but wait for their
  /// matching trigger. Returns how many assets completed the pipeline.
  pub fn run(&mut self, hooks: &Hooks, host: &mut dyn Host) -> Result<usize, Error> {
    if self.phase != Phase::BundlesCollected {
      return Err(Error::RunPhaseClosed(self.phase.name()));
    }
    self.phase = Phase::Running;

    let mut schedule: Vec<(i32, usize)> = self
      .bundles
      .iter()
      .enumerate()
      .map(|(sequence, bundle)| (bundle.priority(), sequence))
      .collect();
    schedule.sort_by_key(|&(priority, _)| priority);

    let mut processed = 0;
    for (_, sequence) in schedule {
      let bundle = &self.bundles[sequence];
      processed += bundle.process_context(self.context, &LoadMode::Auto, hooks, host);
    }

    Ok(processed)
  }

  /// Look up a collected bundle by id.
  pub fn bundle(&self, id: &str) -> Option<&Bundle> {
    self.index.get(id).map(|&slot| &self.bundles[slot])
  }

  /// Cache-busted URI for a logical source within a collected bundle.
  pub fn asset_uri(&self, bundle_id: &str, src: &str) -> Result<String, Error> {
    self
      .bundle(bundle_id)
      .map(|bundle| bundle.uri_for(src))
      .ok_or_else(|| Error::UnknownBundle(bundle_id.to_string()))
  }

  /// Cache-busted filesystem path for a logical source within a collected
  /// bundle.
  pub fn asset_path(&self, bundle_id: &str, src: &str) -> Result<PathBuf, Error> {
    self
      .bundle(bundle_id)
      .map(|bundle| bundle.path_for(src))
      .ok_or_else(|| Error::UnknownBundle(bundle_id.to_string()))
  }
}
