//! Adapters translating the earlier registration shapes onto [`BundleConfig`].
//!
//! Two generations of the registration API predate the declarative bundle
//! config. Both register per-namespace asset maps split into `styles` and
//! `scripts` lists per context; the second additionally accepts an explicit
//! manifest location. These adapters translate at the boundary so everything
//! downstream speaks the one canonical config shape.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::bundle::{AssetDecl, BundleConfig, Context, DEFAULT_MANIFEST_FILE};

/// Per-context asset lists in the legacy shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamespaceAssets {
    /// Stylesheet sources; the legacy loaders enqueued these before scripts.
    #[serde(default)]
    pub styles: Vec<String>,
    /// Script sources.
    #[serde(default)]
    pub scripts: Vec<String>,
}

/// Registration payload accepted by both legacy loader generations.
#[derive(Debug, Clone, Deserialize)]
pub struct NamespaceConfig {
    /// Asset lists per execution context.
    #[serde(default)]
    pub assets: BTreeMap<Context, NamespaceAssets>,
    /// Namespace version; generation defaults differ, see the adapters.
    #[serde(default)]
    pub version: Option<String>,
    /// Render-hook priority, defaulting to 50.
    #[serde(default)]
    pub priority: Option<i32>,
    /// Local filesystem path to the built assets root.
    pub dist_path: PathBuf,
    /// Public URI of the built assets root.
    pub dist_uri: String,
    /// Explicit manifest location, honoured by the second generation only.
    #[serde(default)]
    pub manifest: Option<String>,
}

/// Translate a first-generation `register_namespace` call.
///
/// The first generation always read `assets.json` next to the built assets
/// and defaulted the version to `1.0.0`.
pub fn from_namespace_v1(namespace: &str, config: NamespaceConfig) -> BundleConfig {
    translate(namespace, config, "1.0.0", false)
}

/// Translate a second-generation `register_namespace` call.
///
/// Honours an explicitly configured manifest location (reduced to its file
/// name; the manifest always sits in the assets root) and defaults the
/// version to the development sentinel, keeping caching off for callers that
/// never versioned their bundles.
pub fn from_namespace_v2(namespace: &str, config: NamespaceConfig) -> BundleConfig {
    translate(namespace, config, "0.0.0-dev", true)
}

fn translate(
    namespace: &str,
    config: NamespaceConfig,
    default_version: &str,
    honour_manifest: bool,
) -> BundleConfig {
    let assets = config
        .assets
        .into_iter()
        .map(|(ctx, group)| {
            let decls = group
                .styles
                .into_iter()
                .chain(group.scripts)
                .map(AssetDecl::Src)
                .collect();
            (ctx, decls)
        })
        .collect();

    let manifest = match config.manifest {
        Some(path) if honour_manifest => Some(manifest_file_name(&path)),
        _ => Some(DEFAULT_MANIFEST_FILE.to_string()),
    };

    let mut bundle = BundleConfig::new(namespace, config.dist_path, config.dist_uri);
    bundle.version = config
        .version
        .unwrap_or_else(|| default_version.to_string());
    if let Some(priority) = config.priority {
        bundle.priority = priority;
    }
    bundle.assets = assets;
    bundle.manifest = manifest;
    bundle
}

fn manifest_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(DEFAULT_MANIFEST_FILE)
        .to_string()
}
