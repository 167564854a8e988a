//! Named extension points gating and augmenting asset loading.
//!
//! Collaborators attach callbacks under conventionally-built names; the
//! processing pipeline consults them at fixed points. An absent hook always
//! means "proceed" — declining is an explicit act.

use std::collections::HashMap;

use serde_json::{Map, Value};

/// Payload forwarded verbatim to the host script-localization primitive.
///
/// The `l10n` value is an opaque, collaborator-supplied JSON payload; the
/// pipeline never inspects it.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalizeParams {
  /// Handle of the registered script the data binds to.
  pub handle: String,
  /// Localization data, seeded as an empty object.
  pub l10n: Value,
  /// Name of the page-global object the host exposes the data under.
  pub object_name: String,
}

impl LocalizeParams {
  pub(crate) fn seed(handle: &str, object_name: &str) -> Self {
    Self {
      handle: handle.to_string(),
      l10n: Value::Object(Map::new()),
      object_name: object_name.to_string(),
    }
  }
}

type KindGate = Box<dyn Fn(bool) -> bool>;
type AssetGate = Box<dyn Fn(bool, &str) -> bool>;
type LocalizeAction = Box<dyn Fn(&str)>;
type LocalizeFilter = Box<dyn Fn(LocalizeParams) -> LocalizeParams>;

/// Registry of named extension callbacks.
///
/// Single-threaded by design: callbacks run on the render thread, in
/// attachment order, each seeing the verdict left by the previous one.
#[derive(Default)]
pub struct Hooks {
  kind_gates: HashMap<String, Vec<KindGate>>,
  asset_gates: HashMap<String, Vec<AssetGate>>,
  localize_actions: HashMap<String, Vec<LocalizeAction>>,
  localize_filters: HashMap<String, Vec<LocalizeFilter>>,
}

impl Hooks {
  /// Empty registry; every gate defaults to allowing.
  pub fn new() -> Self {
    Self::default()
  }

  /// Attach a type-level gate (see [`names::load_kind_gate`]).
  pub fn on_kind_gate(&mut self, name: impl Into<String>, gate: impl Fn(bool) -> bool + 'static) {
    self
      .kind_gates
      .entry(name.into())
      .or_default()
      .push(Box::new(gate));
  }

  /// Attach a per-asset gate receiving the asset basename (see
  /// [`names::asset_gate`]).
  pub fn on_asset_gate(
    &mut self,
    name: impl Into<String>,
    gate: impl Fn(bool, &str) -> bool + 'static,
  ) {
    self
      .asset_gates
      .entry(name.into())
      .or_default()
      .push(Box::new(gate));
  }

  /// Attach a localize observer fired after a script registers (see
  /// [`names::localize_action`]).
  pub fn on_localize(&mut self, name: impl Into<String>, action: impl Fn(&str) + 'static) {
    self
      .localize_actions
      .entry(name.into())
      .or_default()
      .push(Box::new(action));
  }

  /// Attach a localization-data filter for one handle (see
  /// [`names::localize_params`]).
  pub fn on_localize_params(
    &mut self,
    name: impl Into<String>,
    filter: impl Fn(LocalizeParams) -> LocalizeParams + 'static,
  ) {
    self
      .localize_filters
      .entry(name.into())
      .or_default()
      .push(Box::new(filter));
  }

  /// Evaluate a type-level gate, defaulting to `true`.
  pub fn kind_gate(&self, name: &str) -> bool {
    match self.kind_gates.get(name) {
      Some(chain) => chain.iter().fold(true, |verdict, gate| gate(verdict)),
      None => true,
    }
  }

  /// Evaluate a per-asset gate for `basename`, defaulting to `true`.
  pub fn asset_gate(&self, name: &str, basename: &str) -> bool {
    match self.asset_gates.get(name) {
      Some(chain) => chain
        .iter()
        .fold(true, |verdict, gate| gate(verdict, basename)),
      None => true,
    }
  }

  /// Fire every localize observer attached under `name`.
  pub fn fire_localize(&self, name: &str, basename: &str) {
    if let Some(actions) = self.localize_actions.get(name) {
      for action in actions {
        action(basename);
      }
    }
  }

  /// Whether any localization-data filter is attached under `name`.
  ///
  /// Checked before the payload is built so unhooked scripts skip the
  /// localization round-trip entirely.
  pub fn has_localize_params(&self, name: &str) -> bool {
    self
      .localize_filters
      .get(name)
      .is_some_and(|chain| !chain.is_empty())
  }

  /// Run `params` through the localization-data filter chain under `name`.
  pub fn apply_localize_params(&self, name: &str, params: LocalizeParams) -> LocalizeParams {
    match self.localize_filters.get(name) {
      Some(chain) => chain.iter().fold(params, |params, filter| filter(params)),
      None => params,
    }
  }
}

/// Conventional hook-name constructors.
pub mod names {
  use crate::resources::AssetKind;

  /// `{bundle}_load_{kind}s` — gates a whole asset kind for one bundle.
  pub fn load_kind_gate(bundle_id: &str, kind: AssetKind) -> String {
    format!("{bundle_id}_load_{}", kind.plural())
  }

  /// `{bundle}_load_{kind}` — gates one asset of a bundle by basename.
  pub fn asset_gate(bundle_id: &str, kind: AssetKind) -> String {
    format!("{bundle_id}_load_{}", kind.as_str())
  }

  /// `{bundle}_localize_script` — fired after each script registration.
  pub fn localize_action(bundle_id: &str) -> String {
    format!("{bundle_id}_localize_script")
  }

  /// `localize_params_{handle}` — supplies localization data for one handle.
  pub fn localize_params(handle: &str) -> String {
    format!("localize_params_{handle}")
  }
}
