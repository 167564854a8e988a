//! Fail-open disk reads for manifest files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::warn;

use super::Manifest;

/// Read a manifest from `dir`, probing for a TOML then a JSON variant.
///
/// The provided `file` name is reduced to its stem, so `assets.json`,
/// `assets.toml` and plain `assets` all address the same manifest pair.
/// Every failure mode — missing files, unreadable files, malformed content —
/// produces an empty manifest: assets then fall back to their logical names
/// rather than breaking the page.
pub fn read_manifest_file(dir: &Path, file: &str) -> Manifest {
  match try_read(dir, file) {
    Ok(manifest) => manifest,
    Err(err) => {
      warn!(
        "manifest {file} in {} unreadable ({err:#}); continuing with an empty manifest",
        dir.display()
      );
      Manifest::default()
    }
  }
}

fn try_read(dir: &Path, file: &str) -> Result<Manifest> {
  let stem = Path::new(file)
    .file_stem()
    .and_then(|stem| stem.to_str())
    .unwrap_or(file);

  let toml_path = dir.join(format!("{stem}.toml"));
  if toml_path.exists() {
    return read_toml(&toml_path);
  }

  let json_path = dir.join(format!("{stem}.json"));
  if json_path.exists() {
    return read_json(&json_path);
  }

  Ok(Manifest::default())
}

fn read_toml(path: &Path) -> Result<Manifest> {
  let content =
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let entries: BTreeMap<String, String> =
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
  Ok(entries.into_iter().collect())
}

fn read_json(path: &Path) -> Result<Manifest> {
  let content =
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}
