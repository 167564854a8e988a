//! Shared test doubles for the processing pipeline.

use serde_json::{Map, Value};

use crate::hooks::LocalizeParams;
use crate::host::{Host, RegisterRequest};
use crate::resources::AssetKind;

/// One observed host call, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
  /// A register call with its full request payload.
  Register {
    /// Handle the asset registered under.
    handle: String,
    /// Resolved URI.
    src: String,
    /// Dependency handles as passed through.
    deps: Vec<String>,
    /// Forwarded version string.
    version: String,
    /// Script or style.
    kind: AssetKind,
    /// Merged registration arguments.
    args: Map<String, Value>,
  },
  /// An enqueue call by handle.
  Enqueue {
    /// Script or style.
    kind: AssetKind,
    /// Enqueued handle.
    handle: String,
  },
  /// A localize call with the filtered payload.
  Localize {
    /// Payload as handed to the host.
    params: LocalizeParams,
  },
}

/// Host stub recording every call; registrations listed in
/// `refuse_register` return `false`.
#[derive(Debug, Default)]
pub struct RecordingHost {
  /// Every call observed, in order.
  pub calls: Vec<HostCall>,
  /// Handles whose registration the stub refuses.
  pub refuse_register: Vec<String>,
}

impl RecordingHost {
  /// Fresh stub accepting everything.
  pub fn new() -> Self {
    Self::default()
  }

  /// Handles registered so far, in order.
  pub fn registered(&self) -> Vec<&str> {
    self
      .calls
      .iter()
      .filter_map(|call| match call {
        HostCall::Register { handle, .. } => Some(handle.as_str()),
        _ => None,
      })
      .collect()
  }

  /// Handles enqueued so far, in order.
  pub fn enqueued(&self) -> Vec<&str> {
    self
      .calls
      .iter()
      .filter_map(|call| match call {
        HostCall::Enqueue { handle, .. } => Some(handle.as_str()),
        _ => None,
      })
      .collect()
  }

  /// Localization payloads bound so far, in order.
  pub fn localized(&self) -> Vec<&LocalizeParams> {
    self
      .calls
      .iter()
      .filter_map(|call| match call {
        HostCall::Localize { params } => Some(params),
        _ => None,
      })
      .collect()
  }
}

impl Host for RecordingHost {
  fn register(&mut self, request: &RegisterRequest<'_>) -> bool {
    let accepted = !self
      .refuse_register
      .iter()
      .any(|handle| handle == request.handle);

    self.calls.push(HostCall::Register {
      handle: request.handle.to_string(),
      src: request.src.to_string(),
      deps: request.deps.to_vec(),
      version: request.version.to_string(),
      kind: request.kind,
      args: request.args.clone(),
    });

    accepted
  }

  fn enqueue(&mut self, kind: AssetKind, handle: &str) -> bool {
    self.calls.push(HostCall::Enqueue {
      kind,
      handle: handle.to_string(),
    });
    true
  }

  fn localize(&mut self, params: &LocalizeParams) -> bool {
    self.calls.push(HostCall::Localize {
      params: params.clone(),
    });
    true
  }
}
