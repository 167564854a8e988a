//! Enqueueable asset resources and the register/enqueue pipeline.

use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use super::{AssetKind, FileResource, extension_of};
use crate::bundle::{AssetSpec, Context};
use crate::hooks::{Hooks, LocalizeParams, names};
use crate::host::{Host, RegisterRequest};

/// When an asset enqueues relative to the render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadMode {
  /// Enqueue immediately during the render-hook pass.
  #[default]
  Auto,
  /// Enqueue only when processed with the matching trigger tag.
  Trigger(String),
}

impl LoadMode {
  /// Mode tag as declared in configs.
  pub fn as_str(&self) -> &str {
    match self {
      Self::Auto => "auto",
      Self::Trigger(tag) => tag,
    }
  }
}

impl From<String> for LoadMode {
  fn from(tag: String) -> Self {
    if tag == "auto" {
      Self::Auto
    } else {
      Self::Trigger(tag)
    }
  }
}

impl<'de> Deserialize<'de> for LoadMode {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    Ok(String::deserialize(deserializer)?.into())
  }
}

/// A script or style registered and enqueued through the host.
///
/// Kind, context and resolved locations are fixed at construction; processing
/// never mutates the resource.
#[derive(Debug, Clone)]
pub struct AssetResource {
  file: FileResource,
  kind: AssetKind,
  ctx: Context,
  mode: LoadMode,
  deps: Vec<String>,
  args: Map<String, Value>,
  bundle_id: String,
  version: String,
  handle: String,
}

impl AssetResource {
  /// Build an asset for its owning bundle. `spec.src` must already be
  /// manifest-resolved.
  pub(crate) fn new(
    bundle_id: &str,
    version: &str,
    base_dir: &Path,
    base_uri: &str,
    ctx: Context,
    spec: AssetSpec,
  ) -> Self {
    let kind = AssetKind::from_ext(&extension_of(&spec.src));
    let file = FileResource::new(base_dir, base_uri, spec.src);
    let handle = format!("{bundle_id}-{}", file.name());

    Self {
      file,
      kind,
      ctx,
      mode: spec.mode,
      deps: spec.deps,
      args: spec.args,
      bundle_id: bundle_id.to_string(),
      version: version.to_string(),
      handle,
    }
  }

  /// Script or style.
  pub fn kind(&self) -> AssetKind {
    self.kind
  }

  /// Execution surface this asset belongs to.
  pub fn ctx(&self) -> Context {
    self.ctx
  }

  /// Declared load mode.
  pub fn mode(&self) -> &LoadMode {
    &self.mode
  }

  /// Dependency handles, in declaration order.
  pub fn deps(&self) -> &[String] {
    &self.deps
  }

  /// Process-unique handle: `{bundle-id}-{basename}`.
  pub fn handle(&self) -> &str {
    &self.handle
  }

  /// Version the asset registers under (the bundle version).
  pub fn version(&self) -> &str {
    &self.version
  }

  /// Basename derived from the resolved source.
  pub fn name(&self) -> &str {
    self.file.name()
  }

  /// Resolved source, relative to the bundle base.
  pub fn src(&self) -> &str {
    self.file.src()
  }

  /// Resolved public URI.
  pub fn uri(&self) -> &str {
    self.file.uri()
  }

  /// Resolved filesystem path.
  pub fn path(&self) -> &Path {
    self.file.path()
  }

  /// Registration arguments: declared overrides, or the kind defaults.
  pub fn args(&self) -> Map<String, Value> {
    if !self.args.is_empty() {
      return self.args.clone();
    }

    let mut defaults = Map::new();
    match self.kind {
      AssetKind::Script => defaults.insert("in_footer".to_string(), Value::Bool(true)),
      AssetKind::Style => defaults.insert("media".to_string(), Value::String("all".to_string())),
    };
    defaults
  }

  /// Run the register/enqueue pipeline for one render pass.
  ///
  /// Returns `false` when any stage declines: the type-level hook gate, the
  /// per-asset gate, host registration, or a load mode that does not match
  /// `mode`.
  pub fn process(&self, mode: &LoadMode, hooks: &Hooks, host: &mut dyn Host) -> bool {
    if !hooks.kind_gate(&names::load_kind_gate(&self.bundle_id, self.kind)) {
      debug!(
        "{} loading declined for bundle {}",
        self.kind.plural(),
        self.bundle_id
      );
      return false;
    }

    self.register(hooks, host) && self.enqueue(mode, host)
  }

  /// Register the asset with the host.
  ///
  /// Scripts additionally fire the localize action and, when a
  /// `localize_params_{handle}` filter is attached, bind the collaborator-
  /// populated payload through the host localization primitive.
  pub fn register(&self, hooks: &Hooks, host: &mut dyn Host) -> bool {
    if !hooks.asset_gate(&names::asset_gate(&self.bundle_id, self.kind), self.name()) {
      debug!("{} declined by hook", self.handle);
      return false;
    }

    let args = self.args();
    let registered = host.register(&RegisterRequest {
      handle: &self.handle,
      src: self.uri(),
      deps: &self.deps,
      version: &self.version,
      kind: self.kind,
      args: &args,
    });

    if !registered {
      warn!("host refused registration of {}", self.handle);
      return false;
    }

    if self.kind == AssetKind::Script {
      hooks.fire_localize(&names::localize_action(&self.bundle_id), self.name());

      let filter = names::localize_params(&self.handle);
      if hooks.has_localize_params(&filter) {
        let params =
          hooks.apply_localize_params(&filter, LocalizeParams::seed(&self.handle, self.name()));
        host.localize(&params);
      }
    }

    true
  }

  /// Enqueue the asset when its declared mode matches the processed mode.
  pub fn enqueue(&self, mode: &LoadMode, host: &mut dyn Host) -> bool {
    if *mode != self.mode {
      return false;
    }

    host.enqueue(self.kind, &self.handle)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_support::{HostCall, RecordingHost};
  use serde_json::json;

  fn asset(src: &str, mode: LoadMode) -> AssetResource {
    let spec = AssetSpec {
      src: src.to_string(),
      deps: vec!["jquery".to_string()],
      mode,
      args: Map::new(),
    };
    AssetResource::new(
      "shop",
      "1.2.0",
      Path::new("/srv/dist"),
      "https://cdn.test/dist",
      Context::Front,
      spec,
    )
  }

  #[test]
  fn load_mode_parses_auto_and_triggers() {
    assert_eq!(LoadMode::from("auto".to_string()), LoadMode::Auto);
    assert_eq!(
      LoadMode::from("lazy".to_string()),
      LoadMode::Trigger("lazy".to_string())
    );
    assert_eq!(LoadMode::Trigger("lazy".into()).as_str(), "lazy");
  }

  #[test]
  fn kind_and_handle_derive_from_resolved_source() {
    let script = asset("js/app.3f9a1c.js", LoadMode::Auto);
    assert_eq!(script.kind(), AssetKind::Script);
    assert_eq!(script.handle(), "shop-app.3f9a1c");
    assert_eq!(script.uri(), "https://cdn.test/dist/js/app.3f9a1c.js");

    let style = asset("css/app.css", LoadMode::Auto);
    assert_eq!(style.kind(), AssetKind::Style);
  }

  #[test]
  fn default_args_depend_on_kind() {
    assert_eq!(asset("a.js", LoadMode::Auto).args(), {
      let mut map = Map::new();
      map.insert("in_footer".to_string(), json!(true));
      map
    });
    assert_eq!(asset("a.css", LoadMode::Auto).args()["media"], "all");
  }

  #[test]
  fn declared_args_replace_the_defaults() {
    let spec = AssetSpec {
      src: "a.css".to_string(),
      deps: Vec::new(),
      mode: LoadMode::Auto,
      args: {
        let mut map = Map::new();
        map.insert("media".to_string(), json!("print"));
        map
      },
    };
    let style = AssetResource::new(
      "shop",
      "1.2.0",
      Path::new("/srv/dist"),
      "https://cdn.test/dist",
      Context::Front,
      spec,
    );

    assert_eq!(style.args()["media"], "print");
  }

  #[test]
  fn process_registers_and_enqueues_auto_assets() {
    let hooks = Hooks::new();
    let mut host = RecordingHost::new();

    assert!(asset("js/app.js", LoadMode::Auto).process(&LoadMode::Auto, &hooks, &mut host));
    assert_eq!(host.registered(), vec!["shop-app"]);
    assert_eq!(host.enqueued(), vec!["shop-app"]);
  }

  #[test]
  fn mode_mismatch_registers_but_never_enqueues() {
    let hooks = Hooks::new();
    let mut host = RecordingHost::new();

    let lazy = asset("js/app.js", LoadMode::Trigger("lazy".to_string()));
    assert!(!lazy.process(&LoadMode::Auto, &hooks, &mut host));
    assert_eq!(host.registered(), vec!["shop-app"]);
    assert!(host.enqueued().is_empty());

    // The matching trigger enqueues on a later pass.
    assert!(lazy.process(&LoadMode::Trigger("lazy".to_string()), &hooks, &mut host));
    assert_eq!(host.enqueued(), vec!["shop-app"]);
  }

  #[test]
  fn refused_registration_short_circuits_enqueue() {
    let hooks = Hooks::new();
    let mut host = RecordingHost::new();
    host.refuse_register.push("shop-app".to_string());

    assert!(!asset("js/app.js", LoadMode::Auto).process(&LoadMode::Auto, &hooks, &mut host));
    assert!(host.enqueued().is_empty());
  }

  #[test]
  fn scripts_localize_only_with_an_attached_filter() {
    let mut hooks = Hooks::new();
    let mut host = RecordingHost::new();

    let script = asset("js/app.js", LoadMode::Auto);
    assert!(script.process(&LoadMode::Auto, &hooks, &mut host));
    assert!(host.localized().is_empty());

    hooks.on_localize_params(names::localize_params("shop-app"), |mut params| {
      params.l10n = json!({"checkoutUrl": "/checkout"});
      params
    });

    let mut host = RecordingHost::new();
    assert!(script.process(&LoadMode::Auto, &hooks, &mut host));
    let localized = host.localized();
    assert_eq!(localized.len(), 1);
    assert_eq!(localized[0].handle, "shop-app");
    assert_eq!(localized[0].object_name, "app");
    assert_eq!(localized[0].l10n, json!({"checkoutUrl": "/checkout"}));
  }

  #[test]
  fn localize_action_fires_per_registration() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut hooks = Hooks::new();
    hooks.on_localize(names::localize_action("shop"), move |basename| {
      sink.borrow_mut().push(basename.to_string());
    });

    let mut host = RecordingHost::new();
    asset("js/app.js", LoadMode::Auto).process(&LoadMode::Auto, &hooks, &mut host);

    assert_eq!(*seen.borrow(), vec!["app".to_string()]);
  }

  #[test]
  fn styles_never_touch_the_localize_flow() {
    let mut hooks = Hooks::new();
    hooks.on_localize_params(names::localize_params("shop-app"), |params| params);

    let mut host = RecordingHost::new();
    let style = asset("css/app.css", LoadMode::Auto);
    assert!(style.process(&LoadMode::Auto, &hooks, &mut host));
    assert!(host.localized().is_empty());
  }

  #[test]
  fn register_call_carries_the_full_request() {
    let hooks = Hooks::new();
    let mut host = RecordingHost::new();
    asset("js/app.js", LoadMode::Auto).register(&hooks, &mut host);

    match &host.calls[0] {
      HostCall::Register {
        handle,
        src,
        deps,
        version,
        kind,
        ..
      } => {
        assert_eq!(handle, "shop-app");
        assert_eq!(src, "https://cdn.test/dist/js/app.js");
        assert_eq!(deps, &vec!["jquery".to_string()]);
        assert_eq!(version, "1.2.0");
        assert_eq!(*kind, AssetKind::Script);
      }
      other => panic!("expected a register call, saw {other:?}"),
    }
  }
}
