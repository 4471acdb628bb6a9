//! Asset configuration: declares scopes and builds a [`Registry`].
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── error      # ConfigError, ConfigDiagnostics
//! ├── mapping    # [mapping] entries
//! ├── util       # URL joining
//! └── mod.rs     # AssetsConfig (this file)
//! ```
//!
//! # Example
//!
//! ```toml
//! path = "www"                 # base directory, relative to this file
//! url = "https://example.com"  # base URL
//!
//! [mapping]
//! default = "assets"
//! images = { path = "img", extension = ["webp", "png"] }
//! ```
//!
//! Without a `[mapping]` table a single default scope `"assets"` is used.

mod error;
mod mapping;
mod util;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use mapping::{ExtensionList, MappingEntry, MappingTable};
pub use util::join_url;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::registry::{DEFAULT_SCOPE, Registry};
use crate::{debug, log};

/// Mapping key that stands for the default scope.
const DEFAULT_KEY: &str = "default";

/// Directory used by the implicit default mapping.
const DEFAULT_DIR: &str = "assets";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory of the config file; relative `path` values resolve
    /// against it (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Base filesystem directory (defaults to the root)
    pub path: Option<PathBuf>,

    /// Base URL (defaults to root-relative URLs)
    pub url: Option<String>,

    /// Scope id → mapping entry
    pub mapping: Option<BTreeMap<String, MappingEntry>>,
}

impl AssetsConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        debug!("config"; "loaded {}", path.display());
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            log!("warning"; "- {}", field);
        }
    }

    /// Base filesystem directory.
    pub fn base_path(&self) -> PathBuf {
        match &self.path {
            Some(path) => self.root.join(path),
            None => self.root.clone(),
        }
    }

    /// Base URL.
    pub fn base_url(&self) -> &str {
        self.url.as_deref().unwrap_or_default()
    }

    /// Effective mapping as `(scope id, entry)` pairs.
    ///
    /// The `default` key becomes the default scope `""`.
    pub fn scopes(&self) -> Vec<(String, MappingEntry)> {
        match &self.mapping {
            Some(mapping) => mapping
                .iter()
                .map(|(key, entry)| {
                    let scope = if key == DEFAULT_KEY { DEFAULT_SCOPE } else { key.as_str() };
                    (scope.to_owned(), entry.clone())
                })
                .collect(),
            None => vec![(
                DEFAULT_SCOPE.to_owned(),
                MappingEntry::Simple(DEFAULT_DIR.to_owned()),
            )],
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the configuration, reporting every problem at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        if let Some(mapping) = &self.mapping {
            if mapping.contains_key(DEFAULT_KEY) && mapping.contains_key(DEFAULT_SCOPE) {
                diag.error_with_hint(
                    "mapping",
                    "both 'default' and \"\" declare the default scope",
                    "keep only one of them",
                );
            }
            for (key, entry) in mapping {
                Self::validate_entry(key, entry, &mut diag);
            }
        }

        diag.into_result()
    }

    fn validate_entry(key: &str, entry: &MappingEntry, diag: &mut ConfigDiagnostics) {
        let field = format!("mapping.{key}");

        if key.contains(':') {
            diag.error_with_hint(
                field.clone(),
                format!("scope id '{key}' contains ':'"),
                "':' separates the scope from the reference",
            );
        }

        if entry.source().as_os_str().is_empty() {
            diag.error(field.clone(), "path must not be empty");
        }

        for ext in entry.extensions() {
            if ext.starts_with('.') {
                diag.error_with_hint(
                    format!("{field}.extension"),
                    format!("extension '{ext}' starts with a dot"),
                    format!("write '{}'", ext.trim_start_matches('.')),
                );
            }
        }
    }

    // ========================================================================
    // registry
    // ========================================================================

    /// Validate and build a registry with one filesystem mapper per scope.
    pub fn build_registry(&self) -> Result<Registry, ConfigError> {
        self.validate()?;

        let base_url = self.base_url();
        let base_path = self.base_path();

        let mut registry = Registry::new();
        for (scope, entry) in self.scopes() {
            let mapper = entry.to_mapper(base_url, &base_path);
            debug!(
                "config";
                "scope '{}': {} -> {}",
                scope,
                mapper.base_url(),
                mapper.base_path().display()
            );
            registry.add_mapper(scope, mapper)?;
        }
        Ok(registry)
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::options::AssetOptions;
    use tempfile::TempDir;

    #[test]
    fn test_default_mapping() {
        let config = AssetsConfig::from_str("").unwrap();
        assert_eq!(
            config.scopes(),
            vec![("".to_owned(), MappingEntry::Simple("assets".into()))]
        );

        let registry = config.build_registry().unwrap();
        assert_eq!(registry.scopes(), vec![""]);
    }

    #[test]
    fn test_default_key_maps_to_default_scope() {
        let config = AssetsConfig::from_str(
            r#"
url = "https://example.com"

[mapping]
default = "assets"
cdn = { path = "dist", url = "https://cdn.example.com/v1", extension = "js" }
"#,
        )
        .unwrap();

        let scopes: Vec<_> = config.scopes().into_iter().map(|(s, _)| s).collect();
        assert_eq!(scopes, vec!["cdn", ""]);

        let registry = config.build_registry().unwrap();
        assert_eq!(registry.scopes(), vec!["", "cdn"]);
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let config = AssetsConfig::from_str(
            r#"
[mapping]
default = "assets"
"" = "public"
"a:b" = "x"
images = { path = "", extension = [".png", "jpg"] }
"#,
        )
        .unwrap();

        match config.validate().unwrap_err() {
            ConfigError::Diagnostics(diag) => {
                assert_eq!(diag.len(), 4);
                let fields: Vec<_> = diag.errors().iter().map(|d| d.field.as_str()).collect();
                assert!(fields.contains(&"mapping"));
                assert!(fields.contains(&"mapping.a:b"));
                assert!(fields.contains(&"mapping.images"));
                assert!(fields.contains(&"mapping.images.extension"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(config.build_registry().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let err = AssetsConfig::from_str("mapping = 42").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_load_rejects_misspelled_mapping_key() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("assets.toml");
        fs::write(
            &file,
            "[mapping]\nimages = { path = \"img\", extensions = [\"svg\", \"png\"] }\n",
        )
        .unwrap();

        let err = AssetsConfig::load(&file).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = AssetsConfig::load(&dir.path().join("assets.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(..)));
    }

    #[test]
    fn test_load_tolerates_unknown_fields() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("assets.toml");
        fs::write(&file, "path = \"www\"\nunknown_key = true\n").unwrap();

        let config = AssetsConfig::load(&file).unwrap();
        assert_eq!(config.base_path(), dir.path().join("www"));
    }

    #[test]
    fn test_load_and_resolve() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("www/assets")).unwrap();
        fs::create_dir_all(dir.path().join("www/img")).unwrap();
        fs::write(dir.path().join("www/assets/app.css"), "body {}").unwrap();
        fs::write(dir.path().join("www/img/logo.png"), "png").unwrap();

        let file = dir.path().join("assets.toml");
        fs::write(
            &file,
            r#"
path = "www"
url = "https://example.com/site/"

[mapping]
default = "assets"
images = { path = "img", url = "static/images", extension = ["svg", "png"] }
"#,
        )
        .unwrap();

        let registry = AssetsConfig::load(&file).unwrap().build_registry().unwrap();
        let options = AssetOptions::new();

        let css = registry.get_asset("app.css", &options).unwrap().unwrap();
        assert!(css.url().starts_with("https://example.com/site/assets/app.css?v="));

        let logo = registry.get_asset("images:logo", &options).unwrap().unwrap();
        assert!(
            logo.url()
                .starts_with("https://example.com/site/static/images/logo.png?v=")
        );
        assert!(logo.as_file().unwrap().exists());

        assert!(registry.get_asset("images:missing", &options).unwrap().is_none());
    }
}
