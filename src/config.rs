use std::path::{Path, PathBuf};

/// Default destination directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "ollama";

/// System-wide store locations probed on Linux and other non-desktop
/// platforms, in order.
const SYSTEM_CANDIDATES: [&str; 2] = ["/var/lib/ollama", "/var/lib/ollama/models"];

/// Last-resort store root when no candidate holds a `blobs` directory.
const SYSTEM_FALLBACK: &str = "/usr/share/ollama/models";

/// Resolved source and destination roots for one export run.
///
/// Constructed once at startup and passed into every component that needs
/// a path.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub source_root: PathBuf,
    pub output_root: PathBuf,
}

impl ExportConfig {
    /// Build a config from optional overrides, falling back to the
    /// platform defaults.
    pub fn resolve(source_override: Option<PathBuf>, output_override: Option<PathBuf>) -> Self {
        Self {
            source_root: source_override.unwrap_or_else(default_source_root),
            output_root: output_override.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        }
    }

    /// Directory holding manifest files in the source store.
    pub fn manifest_dir(&self) -> PathBuf {
        manifest_dir_under(&self.source_root)
    }

    /// Directory holding blob files in the source store.
    pub fn blob_dir(&self) -> PathBuf {
        self.source_root.join("blobs")
    }

    /// Manifest directory mirrored on the output side.
    pub fn output_manifest_dir(&self) -> PathBuf {
        manifest_dir_under(&self.output_root)
    }

    /// Blob directory mirrored on the output side.
    pub fn output_blob_dir(&self) -> PathBuf {
        self.output_root.join("blobs")
    }
}

// The registry/library nesting is a fixed contract of the Ollama store
// layout, not configurable.
fn manifest_dir_under(root: &Path) -> PathBuf {
    root.join("manifests")
        .join("registry.ollama.ai")
        .join("library")
}

/// Platform default for the Ollama store root.
fn default_source_root() -> PathBuf {
    if cfg!(any(target_os = "macos", target_os = "windows")) {
        if let Some(home) = dirs::home_dir() {
            return home.join(".ollama").join("models");
        }
    }

    let candidates: Vec<PathBuf> = SYSTEM_CANDIDATES.iter().map(PathBuf::from).collect();
    probe_store_root(&candidates)
}

/// Return the first candidate containing a `blobs` subdirectory, or the
/// hardcoded fallback when none does.
fn probe_store_root(candidates: &[PathBuf]) -> PathBuf {
    for candidate in candidates {
        if candidate.join("blobs").is_dir() {
            return candidate.clone();
        }
    }
    PathBuf::from(SYSTEM_FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_fixed_store_suffixes() {
        let config = ExportConfig::resolve(Some(PathBuf::from("/srv/ollama")), None);
        assert_eq!(
            config.manifest_dir(),
            PathBuf::from("/srv/ollama/manifests/registry.ollama.ai/library")
        );
        assert_eq!(config.blob_dir(), PathBuf::from("/srv/ollama/blobs"));
    }

    #[test]
    fn test_output_default() {
        let config = ExportConfig::resolve(None, None);
        assert_eq!(config.output_root, PathBuf::from(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn test_overrides_used_verbatim() {
        let config = ExportConfig::resolve(
            Some(PathBuf::from("/data/store")),
            Some(PathBuf::from("/mnt/usb/ollama")),
        );
        assert_eq!(config.source_root, PathBuf::from("/data/store"));
        assert_eq!(config.output_root, PathBuf::from("/mnt/usb/ollama"));
    }

    #[test]
    fn test_output_side_mirrors_layout() {
        let config = ExportConfig::resolve(None, Some(PathBuf::from("out")));
        assert_eq!(
            config.output_manifest_dir(),
            PathBuf::from("out/manifests/registry.ollama.ai/library")
        );
        assert_eq!(config.output_blob_dir(), PathBuf::from("out/blobs"));
    }

    #[test]
    fn test_probe_picks_candidate_with_blobs() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        fs::create_dir_all(&first).unwrap();
        fs::create_dir_all(second.join("blobs")).unwrap();

        let root = probe_store_root(&[first, second.clone()]);
        assert_eq!(root, second);
    }

    #[test]
    fn test_probe_first_hit_wins() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        fs::create_dir_all(first.join("blobs")).unwrap();
        fs::create_dir_all(second.join("blobs")).unwrap();

        let root = probe_store_root(&[first.clone(), second]);
        assert_eq!(root, first);
    }

    #[test]
    fn test_probe_fallback() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");

        let root = probe_store_root(&[missing]);
        assert_eq!(root, PathBuf::from(SYSTEM_FALLBACK));
    }
}
