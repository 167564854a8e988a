//! Plain file resources resolved through the manifest.

use std::fs;
use std::path::{Path, PathBuf};

use super::{FileKind, basename_of, extension_of, join_uri};

/// One physical file inside a bundle's base directory.
///
/// The source is resolved through the manifest exactly once, when the owning
/// bundle is constructed; path and URI are baked at that point and never
/// re-resolved.
#[derive(Debug, Clone)]
pub struct FileResource {
  src: String,
  ext: String,
  name: String,
  kind: FileKind,
  path: PathBuf,
  uri: String,
}

impl FileResource {
  pub(crate) fn new(base_dir: &Path, base_uri: &str, src: String) -> Self {
    let ext = extension_of(&src);
    let name = basename_of(&src);
    let kind = FileKind::from_ext(&ext);
    let path = base_dir.join(&src);
    let uri = join_uri(base_uri, &src);

    Self {
      src,
      ext,
      name,
      kind,
      path,
      uri,
    }
  }

  /// Resolved source, relative to the bundle's base directory.
  pub fn src(&self) -> &str {
    &self.src
  }

  /// File extension derived from the resolved source.
  pub fn ext(&self) -> &str {
    &self.ext
  }

  /// Basename derived from the resolved source.
  pub fn name(&self) -> &str {
    &self.name
  }

  /// The registry kind this file resolved to.
  pub fn kind(&self) -> FileKind {
    self.kind
  }

  /// Absolute filesystem path under the bundle's base directory.
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Public URI under the bundle's base URI.
  pub fn uri(&self) -> &str {
    &self.uri
  }

  /// File contents, when readable.
  pub fn data(&self) -> Option<String> {
    fs::read_to_string(&self.path).ok()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn derives_extension_name_and_locations() {
    let file = FileResource::new(
      Path::new("/srv/app/dist"),
      "https://cdn.test/dist",
      "images/logo.f00d.svg".to_string(),
    );

    assert_eq!(file.ext(), "svg");
    assert_eq!(file.name(), "logo.f00d");
    assert_eq!(file.kind(), FileKind::Image);
    assert_eq!(file.path(), Path::new("/srv/app/dist/images/logo.f00d.svg"));
    assert_eq!(file.uri(), "https://cdn.test/dist/images/logo.f00d.svg");
  }

  #[test]
  fn missing_files_have_no_data() {
    let file = FileResource::new(
      Path::new("/nonexistent"),
      "https://cdn.test",
      "fonts/body.woff2".to_string(),
    );

    assert_eq!(file.kind(), FileKind::Font);
    assert!(file.data().is_none());
  }
}
