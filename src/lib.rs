#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod bundle;
pub mod config;
pub mod error;
pub mod hooks;
pub mod host;
pub mod legacy;
pub mod loader;
pub mod manifest;
pub mod resources;

#[cfg(test)]
mod test_support;

pub use bundle::{AssetDecl, AssetSpec, Bundle, BundleConfig, Context};
pub use config::LoaderOptions;
pub use error::Error;
pub use hooks::{Hooks, LocalizeParams};
pub use host::{Host, RegisterRequest};
pub use loader::{BundleSource, Loader};
pub use manifest::{Manifest, ManifestCache};
pub use resources::{AssetKind, AssetResource, FileKind, FileResource, LoadMode, Resource};
