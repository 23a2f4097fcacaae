use std::path::Path;

use serde::Deserialize;

/// Directories skipped entirely during file discovery unless overridden.
const DEFAULT_EXCLUDED_DIRS: &[&str] = &["node_modules", "dist", "build", ".git"];

/// File extensions considered source files unless overridden.
const DEFAULT_SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

/// Configuration loaded from `dep-agent.toml` at the project root.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyzeConfig {
    /// Directory names skipped entirely during discovery (version-control
    /// metadata, dependency installs, build output).
    pub excluded_dirs: Vec<String>,
    /// File-extension suffixes considered source files.
    pub source_extensions: Vec<String>,
    /// Include ambient type-declaration files (`*.d.ts`) in discovery.
    pub include_type_declarations: bool,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            source_extensions: DEFAULT_SOURCE_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            include_type_declarations: false,
        }
    }
}

impl AnalyzeConfig {
    /// Load configuration from `dep-agent.toml` in the given root directory.
    ///
    /// Returns the default configuration if the file does not exist or cannot
    /// be parsed.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join("dep-agent.toml");

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(config) => config,
                Err(err) => {
                    eprintln!("warning: failed to parse dep-agent.toml: {err}. Using defaults.");
                    Self::default()
                }
            },
            Err(err) => {
                eprintln!("warning: failed to read dep-agent.toml: {err}. Using defaults.");
                Self::default()
            }
        }
    }

    /// Returns true if a directory with this name must be skipped during discovery.
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.excluded_dirs.iter().any(|d| d == name)
    }

    /// Returns true if the file's extension is in the configured source set.
    pub fn matches_extension(&self, path: &Path) -> bool {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        self.source_extensions.iter().any(|e| e == ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("tempdir")
    }

    #[test]
    fn test_defaults() {
        let config = AnalyzeConfig::default();
        assert!(config.is_excluded_dir("node_modules"));
        assert!(config.is_excluded_dir(".git"));
        assert!(!config.is_excluded_dir("src"));
        assert!(config.matches_extension(Path::new("a.ts")));
        assert!(config.matches_extension(Path::new("a.tsx")));
        assert!(!config.matches_extension(Path::new("a.rs")));
        assert!(!config.matches_extension(Path::new("Makefile")));
        assert!(!config.include_type_declarations);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tmp();
        let config = AnalyzeConfig::load(dir.path());
        assert!(config.is_excluded_dir("node_modules"));
    }

    #[test]
    fn test_load_partial_override() {
        let dir = tmp();
        fs::write(
            dir.path().join("dep-agent.toml"),
            r#"excluded_dirs = ["vendor"]"#,
        )
        .unwrap();
        let config = AnalyzeConfig::load(dir.path());
        assert!(config.is_excluded_dir("vendor"));
        assert!(!config.is_excluded_dir("node_modules"));
        // Unset fields keep their defaults.
        assert!(config.matches_extension(Path::new("a.ts")));
    }

    #[test]
    fn test_load_malformed_file_uses_defaults() {
        let dir = tmp();
        fs::write(dir.path().join("dep-agent.toml"), "excluded_dirs = not toml").unwrap();
        let config = AnalyzeConfig::load(dir.path());
        assert!(config.is_excluded_dir("node_modules"));
    }

    #[test]
    fn test_include_type_declarations_override() {
        let dir = tmp();
        fs::write(
            dir.path().join("dep-agent.toml"),
            "include_type_declarations = true",
        )
        .unwrap();
        let config = AnalyzeConfig::load(dir.path());
        assert!(config.include_type_declarations);
    }
}
