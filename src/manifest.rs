use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{ExportError, Result};

/// A model name split into its base name and version tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelName {
    pub base: String,
    pub tag: String,
}

impl ModelName {
    /// Split `name` on `:`. Exactly two non-empty parts are required.
    pub fn parse(name: &str) -> Result<Self> {
        let mut parts = name.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(base), Some(tag), None) if !base.is_empty() && !tag.is_empty() => Ok(Self {
                base: base.to_string(),
                tag: tag.to_string(),
            }),
            _ => Err(ExportError::InvalidModelName(name.to_string())),
        }
    }
}

impl std::fmt::Display for ModelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.base, self.tag)
    }
}

/// Manifest JSON as written by the Ollama daemon. Unknown fields are
/// ignored; `config` and per-layer `digest` are optional.
#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    config: Option<LayerRef>,
    #[serde(default)]
    layers: Vec<LayerRef>,
}

#[derive(Debug, Deserialize)]
struct LayerRef {
    #[serde(default)]
    digest: Option<String>,
}

impl Manifest {
    /// Ordered digest list: the config digest first if present, then each
    /// layer digest in array order. Duplicates are kept.
    pub fn digests(&self) -> Vec<String> {
        let mut digests = Vec::new();
        if let Some(digest) = self.config.as_ref().and_then(|c| c.digest.clone()) {
            digests.push(digest);
        }
        for layer in &self.layers {
            if let Some(digest) = &layer.digest {
                digests.push(digest.clone());
            }
        }
        digests
    }
}

/// Locate the manifest file for a model under `manifest_dir`.
///
/// Manifests are never synthesized; a missing file is fatal.
pub fn find_manifest(manifest_dir: &Path, name: &ModelName) -> Result<PathBuf> {
    let path = manifest_dir.join(&name.base).join(&name.tag);
    if !path.exists() {
        return Err(ExportError::ManifestNotFound(name.to_string()));
    }
    Ok(path)
}

/// Read and parse a manifest file, returning its digest list.
pub fn read_digests(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    let manifest: Manifest = serde_json::from_str(&content)?;
    Ok(manifest.digests())
}

/// Map a digest to its on-disk blob filename.
pub fn digest_filename(digest: &str) -> String {
    digest.replace(':', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_name() {
        let name = ModelName::parse("llama3:8b").unwrap();
        assert_eq!(name.base, "llama3");
        assert_eq!(name.tag, "8b");
        assert_eq!(name.to_string(), "llama3:8b");
    }

    #[test]
    fn test_parse_name_rejects_malformed() {
        assert!(ModelName::parse("llama3").is_err());
        assert!(ModelName::parse("a:b:c").is_err());
        assert!(ModelName::parse(":8b").is_err());
        assert!(ModelName::parse("llama3:").is_err());
        assert!(ModelName::parse("").is_err());
    }

    #[test]
    fn test_digest_order_preserved() {
        let json = r#"{
            "config": {"digest": "sha256:aa"},
            "layers": [
                {"digest": "sha256:bb", "mediaType": "application/vnd.ollama.image.model"},
                {"mediaType": "application/vnd.ollama.image.template"},
                {"digest": "sha256:cc"}
            ]
        }"#;
        let manifest: Manifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.digests(), vec!["sha256:aa", "sha256:bb", "sha256:cc"]);
    }

    #[test]
    fn test_digests_not_deduped() {
        let json = r#"{
            "config": {"digest": "sha256:aa"},
            "layers": [{"digest": "sha256:bb"}, {"digest": "sha256:bb"}]
        }"#;
        let manifest: Manifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.digests(), vec!["sha256:aa", "sha256:bb", "sha256:bb"]);
    }

    #[test]
    fn test_config_optional() {
        let json = r#"{"layers": [{"digest": "sha256:bb"}]}"#;
        let manifest: Manifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.digests(), vec!["sha256:bb"]);
    }

    #[test]
    fn test_find_manifest() {
        let dir = TempDir::new().unwrap();
        let name = ModelName::parse("llama3:8b").unwrap();
        let model_dir = dir.path().join("llama3");
        std::fs::create_dir_all(&model_dir).unwrap();
        std::fs::write(model_dir.join("8b"), "{}").unwrap();

        let path = find_manifest(dir.path(), &name).unwrap();
        assert_eq!(path, model_dir.join("8b"));
    }

    #[test]
    fn test_find_manifest_missing() {
        let dir = TempDir::new().unwrap();
        let name = ModelName::parse("llama3:8b").unwrap();
        let result = find_manifest(dir.path(), &name);
        assert!(matches!(result, Err(ExportError::ManifestNotFound(_))));
    }

    #[test]
    fn test_read_digests_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest");
        std::fs::write(
            &path,
            r#"{"config":{"digest":"sha256:aa"},"layers":[{"digest":"sha256:bb"},{}]}"#,
        )
        .unwrap();

        let digests = read_digests(&path).unwrap();
        assert_eq!(digests, vec!["sha256:aa", "sha256:bb"]);
    }

    #[test]
    fn test_read_digests_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(read_digests(&path), Err(ExportError::Json(_))));
    }

    #[test]
    fn test_digest_filename() {
        assert_eq!(digest_filename("sha256:abc"), "sha256-abc");
        // Round-trips for the algorithm-prefix convention
        assert_eq!(digest_filename("sha256:abc").replace('-', ":"), "sha256:abc");
    }
}
