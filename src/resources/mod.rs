//! Resource kinds and the resource sum type managed by bundles.

mod asset;
mod file;

pub use asset::{AssetResource, LoadMode};
pub use file::FileResource;

use std::path::Path;

/// Enqueueable asset kinds, fixed at construction from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
  /// JavaScript handled by the host's script primitives.
  Script,
  /// Stylesheet handled by the host's style primitives.
  Style,
}

impl AssetKind {
  /// Pick the kind for a declared asset extension. Unknown extensions register
  /// as scripts, matching the registry's default fallback kind.
  pub fn from_ext(ext: &str) -> Self {
    match ext {
      "css" => Self::Style,
      _ => Self::Script,
    }
  }

  /// Singular kind tag used in hook names and host dispatch.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Script => "script",
      Self::Style => "style",
    }
  }

  /// Plural kind tag used in type-level hook names.
  pub fn plural(self) -> &'static str {
    match self {
      Self::Script => "scripts",
      Self::Style => "styles",
    }
  }
}

/// Passive file kinds picked up from the manifest without being declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
  /// Raster or vector image.
  Image,
  /// Web font.
  Font,
}

impl FileKind {
  /// Pick the kind for a fingerprinted file extension, defaulting to image.
  pub fn from_ext(ext: &str) -> Self {
    match ext {
      "ttf" | "woff" | "woff2" => Self::Font,
      "jpg" | "png" | "gif" | "ico" | "svg" | "jpeg" | "webp" | "avif" | "apng" => Self::Image,
      _ => Self::Image,
    }
  }
}

/// A resource owned by a bundle: an enqueueable asset or a plain file.
#[derive(Debug, Clone)]
pub enum Resource {
  /// Registerable and enqueueable script or style.
  Asset(AssetResource),
  /// Passive file (image, font) carried along for retrieval only.
  File(FileResource),
}

impl Resource {
  /// Resolved URI of the underlying file.
  pub fn uri(&self) -> &str {
    match self {
      Self::Asset(asset) => asset.uri(),
      Self::File(file) => file.uri(),
    }
  }

  /// Resolved filesystem path of the underlying file.
  pub fn path(&self) -> &Path {
    match self {
      Self::Asset(asset) => asset.path(),
      Self::File(file) => file.path(),
    }
  }

  /// Basename of the underlying file.
  pub fn name(&self) -> &str {
    match self {
      Self::Asset(asset) => asset.name(),
      Self::File(file) => file.name(),
    }
  }

  /// The asset view of this resource, when it is one.
  pub fn as_asset(&self) -> Option<&AssetResource> {
    match self {
      Self::Asset(asset) => Some(asset),
      Self::File(_) => None,
    }
  }
}

/// Extension of a relative source path, empty when absent.
pub(crate) fn extension_of(src: &str) -> String {
  Path::new(src)
    .extension()
    .and_then(|ext| ext.to_str())
    .unwrap_or_default()
    .to_string()
}

/// Final path component of `src` with its extension stripped.
pub(crate) fn basename_of(src: &str) -> String {
  Path::new(src)
    .file_stem()
    .and_then(|stem| stem.to_str())
    .unwrap_or(src)
    .to_string()
}

/// Join a base URI and a relative source with exactly one separating slash.
pub(crate) fn join_uri(base_uri: &str, src: &str) -> String {
  format!("{}/{}", base_uri.trim_end_matches('/'), src)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn script_is_the_default_asset_kind() {
    assert_eq!(AssetKind::from_ext("js"), AssetKind::Script);
    assert_eq!(AssetKind::from_ext("mjs"), AssetKind::Script);
    assert_eq!(AssetKind::from_ext("css"), AssetKind::Style);
  }

  #[test]
  fn image_is_the_default_file_kind() {
    assert_eq!(FileKind::from_ext("webp"), FileKind::Image);
    assert_eq!(FileKind::from_ext("woff2"), FileKind::Font);
    assert_eq!(FileKind::from_ext("map"), FileKind::Image);
  }

  #[test]
  fn basename_strips_one_extension() {
    assert_eq!(basename_of("dist/js/app.min.js"), "app.min");
    assert_eq!(basename_of("style.css"), "style");
  }

  #[test]
  fn join_uri_normalises_trailing_slashes() {
    assert_eq!(join_uri("https://cdn.test/", "a.js"), "https://cdn.test/a.js");
    assert_eq!(join_uri("https://cdn.test", "a.js"), "https://cdn.test/a.js");
  }
}
