//! Declarative bundle configuration consumed from collaborators.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::resources::LoadMode;

/// Manifest file name assumed when a config does not name one.
pub const DEFAULT_MANIFEST_FILE: &str = "assets.json";

const DEFAULT_PRIORITY: i32 = 50;

/// Execution surface an asset group targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Context {
    /// Public, front-end page renders.
    Front,
    /// Administrative surface renders.
    Admin,
}

impl Context {
    /// Context tag as it appears in configs and hook payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Admin => "admin",
        }
    }

    /// Name of the host render hook that drives this surface.
    pub fn render_hook(self) -> &'static str {
        match self {
            Self::Front => "enqueue_assets",
            Self::Admin => "admin_enqueue_assets",
        }
    }
}

/// Registration input for one bundle.
///
/// Collaborators hand these to the loader during the collection phase, either
/// deserialized from stored configuration or built in code.
#[derive(Debug, Clone, Deserialize)]
pub struct BundleConfig {
    /// Bundle id, unique across the process; duplicate registrations are
    /// last-writer-wins.
    pub id: String,
    /// Semantic version; a `0.0.0` prefix marks a development build and
    /// disables manifest caching.
    #[serde(default = "default_version")]
    pub version: String,
    /// Render-hook priority; bundles run ascending.
    #[serde(default = "default_priority")]
    pub priority: i32,
    /// Base directory holding the built assets and the manifest.
    pub base_dir: PathBuf,
    /// Base URI the assets are served under.
    pub base_uri: String,
    /// Declared assets, grouped per execution context in declaration order.
    #[serde(default)]
    pub assets: BTreeMap<Context, Vec<AssetDecl>>,
    /// Manifest file name, `false` in stored configs to disable resolution.
    #[serde(default = "default_manifest", deserialize_with = "manifest_setting")]
    pub manifest: Option<String>,
}

impl BundleConfig {
    /// Minimal config for building bundles in code.
    pub fn new(
        id: impl Into<String>,
        base_dir: impl Into<PathBuf>,
        base_uri: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            version: default_version(),
            priority: DEFAULT_PRIORITY,
            base_dir: base_dir.into(),
            base_uri: base_uri.into(),
            assets: BTreeMap::new(),
            manifest: default_manifest(),
        }
    }

    /// Whether any context declares at least one asset.
    pub fn has_assets(&self) -> bool {
        self.assets.values().any(|group| !group.is_empty())
    }
}

fn default_version() -> String {
    "0.0.0-dev".to_string()
}

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

fn default_manifest() -> Option<String> {
    Some(DEFAULT_MANIFEST_FILE.to_string())
}

/// Accepts a manifest file name, or `false`/`null` to disable resolution.
fn manifest_setting<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Name(String),
        Toggle(bool),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Name(name)) => Some(name),
        Some(Raw::Toggle(true)) => default_manifest(),
        Some(Raw::Toggle(false)) | None => None,
    })
}

/// One declared asset: a bare source string or a structured entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AssetDecl {
    /// Bare `"path/to/file.js"` shorthand.
    Src(String),
    /// Structured declaration with dependencies, mode and host overrides.
    Spec(AssetSpec),
}

impl AssetDecl {
    /// Declared source key, before manifest resolution.
    pub fn src(&self) -> &str {
        match self {
            Self::Src(src) => src,
            Self::Spec(spec) => &spec.src,
        }
    }

    /// Expand the shorthand into a full spec with default fields.
    pub(crate) fn into_spec(self) -> AssetSpec {
        match self {
            Self::Src(src) => AssetSpec {
                src,
                deps: Vec::new(),
                mode: LoadMode::Auto,
                args: Map::new(),
            },
            Self::Spec(spec) => spec,
        }
    }
}

/// Structured asset declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetSpec {
    /// Declared source, relative to the bundle base; doubles as the asset id.
    pub src: String,
    /// Host-opaque dependency handles, in order.
    #[serde(default)]
    pub deps: Vec<String>,
    /// When the asset enqueues relative to the render pass.
    #[serde(default)]
    pub mode: LoadMode,
    /// Raw registration-argument overrides forwarded to the host untouched.
    #[serde(flatten)]
    pub args: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_and_structured_declarations() {
        let config: BundleConfig = serde_json::from_str(
            r#"{
                "id": "shop",
                "base_dir": "/srv/dist",
                "base_uri": "https://cdn.test/dist",
                "assets": {
                    "front": [
                        "js/app.js",
                        { "src": "css/app.css", "deps": ["base"], "mode": "lazy", "media": "print" }
                    ]
                }
            }"#,
        )
        .expect("valid config");

        assert_eq!(config.version, "0.0.0-dev");
        assert_eq!(config.priority, 50);
        assert_eq!(config.manifest.as_deref(), Some("assets.json"));

        let front = &config.assets[&Context::Front];
        assert_eq!(front[0].src(), "js/app.js");

        let spec = front[1].clone().into_spec();
        assert_eq!(spec.deps, vec!["base".to_string()]);
        assert_eq!(spec.mode, LoadMode::Trigger("lazy".to_string()));
        assert_eq!(spec.args["media"], "print");
    }

    #[test]
    fn manifest_false_disables_resolution() {
        let config: BundleConfig = serde_json::from_str(
            r#"{"id": "a", "base_dir": "d", "base_uri": "u", "manifest": false}"#,
        )
        .expect("valid config");
        assert!(config.manifest.is_none());

        let config: BundleConfig = serde_json::from_str(
            r#"{"id": "a", "base_dir": "d", "base_uri": "u", "manifest": "built.json"}"#,
        )
        .expect("valid config");
        assert_eq!(config.manifest.as_deref(), Some("built.json"));
    }

    #[test]
    fn shorthand_expands_to_auto_mode() {
        let spec = AssetDecl::Src("js/app.js".to_string()).into_spec();
        assert_eq!(spec.mode, LoadMode::Auto);
        assert!(spec.deps.is_empty());
        assert!(spec.args.is_empty());
    }

    #[test]
    fn empty_asset_map_reports_no_assets() {
        let config = BundleConfig::new("shop", "/srv/dist", "https://cdn.test");
        assert!(!config.has_assets());
    }
}
