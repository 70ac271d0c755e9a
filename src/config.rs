//! Loading of menu configuration and entity registry documents.
//!
//! Documents may be YAML, JSON or TOML; the format is chosen from the file
//! extension and YAML is assumed when there is none.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::compiler::InMemoryRegistry;
use crate::models::{EntityKind, MenuDeclaration};

/// A configuration document: the menu block plus an optional inline registry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigDocument {
    /// The `dial_menu:` block
    pub dial_menu: MenuDeclaration,
    /// The `registry:` block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<RegistryDocument>,
}

/// Registered entity ids, grouped by kind.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryDocument {
    /// Switch ids
    pub switches: Vec<String>,
    /// Cover ids
    pub covers: Vec<String>,
    /// Climate ids
    pub climates: Vec<String>,
    /// Media player ids
    pub media_players: Vec<String>,
    /// Font ids
    pub fonts: Vec<String>,
    /// Time source ids
    pub time_sources: Vec<String>,
}

impl RegistryDocument {
    /// Ids listed for one kind.
    #[must_use]
    pub fn ids(&self, kind: EntityKind) -> &[String] {
        match kind {
            EntityKind::Switch => &self.switches,
            EntityKind::Cover => &self.covers,
            EntityKind::Climate => &self.climates,
            EntityKind::MediaPlayer => &self.media_players,
            EntityKind::Font => &self.fonts,
            EntityKind::TimeSource => &self.time_sources,
        }
    }

    /// Builds an in-memory registry, registering ids in document order.
    #[must_use]
    pub fn to_registry(&self) -> InMemoryRegistry {
        let mut registry = InMemoryRegistry::new();
        for kind in EntityKind::ALL {
            for id in self.ids(kind) {
                registry.register(kind, id.as_str());
            }
        }
        registry
    }
}

/// Serialization format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// YAML (`.yaml`, `.yml`, or no extension)
    Yaml,
    /// JSON (`.json`)
    Json,
    /// TOML (`.toml`)
    Toml,
}

impl DocumentFormat {
    /// Picks the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns an error for an unrecognized extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            None | Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            Some(other) => anyhow::bail!(
                "Unsupported file extension '.{other}' for {} (expected .yaml, .yml, .json or .toml)",
                path.display()
            ),
        }
    }

    fn parse<T: for<'de> Deserialize<'de>>(self, content: &str) -> Result<T> {
        Ok(match self {
            Self::Yaml => serde_yml::from_str(content)?,
            Self::Json => serde_json::from_str(content)?,
            Self::Toml => toml::from_str(content)?,
        })
    }
}

/// Parses a configuration document from text.
///
/// # Errors
///
/// Returns an error if the text is not a valid document in `format`.
pub fn parse_document(content: &str, format: DocumentFormat) -> Result<ConfigDocument> {
    format
        .parse(content)
        .context("Failed to parse configuration document")
}

/// Loads a configuration document from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_document(path: &Path) -> Result<ConfigDocument> {
    let format = DocumentFormat::from_path(path)?;
    let content = fs::read_to_string(path)
        .context(format!("Failed to read config file: {}", path.display()))?;

    let document: ConfigDocument = format
        .parse(&content)
        .context(format!("Failed to parse config file: {}", path.display()))?;

    tracing::debug!(
        "Loaded {} with {} app declarations",
        path.display(),
        document.dial_menu.apps.len()
    );
    Ok(document)
}

/// Loads a standalone registry document from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_registry(path: &Path) -> Result<RegistryDocument> {
    let format = DocumentFormat::from_path(path)?;
    let content = fs::read_to_string(path)
        .context(format!("Failed to read registry file: {}", path.display()))?;

    format
        .parse(&content)
        .context(format!("Failed to parse registry file: {}", path.display()))
}

/// Loads a configuration file and the registry it should compile against.
///
/// A separate registry file replaces the document's inline `registry:`
/// block. With neither, the registry is empty.
///
/// # Errors
///
/// Returns an error if either file cannot be read or parsed.
pub fn load_with_registry(
    config_path: &Path,
    registry_path: Option<&Path>,
) -> Result<(MenuDeclaration, InMemoryRegistry)> {
    let document = load_document(config_path)?;
    let registry = match registry_path {
        Some(path) => load_registry(path)?,
        None => document.registry.unwrap_or_default(),
    };
    Ok((document.dial_menu, registry.to_registry()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::EntityRegistry;
    use crate::models::{ColorValue, Numeric, PeriodValue};
    use tempfile::TempDir;

    const YAML: &str = r##"
dial_menu:
  display_id: round_display
  idle_timeout: 45s
  apps:
    - name: Gate
      type: cover
      icon_type: gate
      color: 0x03A964
      cover_id: front_gate
registry:
  covers: [front_gate]
"##;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.yaml")).unwrap(), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.YML")).unwrap(), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.json")).unwrap(), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("a.toml")).unwrap(), DocumentFormat::Toml);
        assert_eq!(DocumentFormat::from_path(Path::new("menu")).unwrap(), DocumentFormat::Yaml);
        assert!(DocumentFormat::from_path(Path::new("a.ini")).is_err());
    }

    #[test]
    fn test_parse_yaml_document() {
        let document = parse_document(YAML, DocumentFormat::Yaml).unwrap();
        let app = &document.dial_menu.apps[0];
        assert_eq!(app.cover_id.as_deref(), Some("front_gate"));
        assert_eq!(app.color, Some(ColorValue::Int(0x03A964)));
        assert_eq!(
            document.dial_menu.idle_timeout,
            Some(PeriodValue::Text("45s".to_string()))
        );
        assert_eq!(document.registry.unwrap().covers, vec!["front_gate"]);
    }

    #[test]
    fn test_parse_toml_document() {
        let toml = r#"
[dial_menu]
display_id = "round_display"
radius = 90

[[dial_menu.apps]]
name = "Home"
icon_type = "home"
"#;
        let document = parse_document(toml, DocumentFormat::Toml).unwrap();
        assert_eq!(document.dial_menu.radius, Some(Numeric::Value(90)));
        assert_eq!(document.dial_menu.apps[0].name.as_deref(), Some("Home"));
        assert!(document.registry.is_none());
    }

    #[test]
    fn test_unknown_controller_key_rejected() {
        let yaml = "dial_menu:\n  display_id: d\n  colour: red\n";
        assert!(parse_document(yaml, DocumentFormat::Yaml).is_err());
    }

    #[test]
    fn test_load_document_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("menu.yaml");
        fs::write(&path, YAML).unwrap();

        let (declaration, registry) = load_with_registry(&path, None).unwrap();
        assert_eq!(declaration.display_id.as_deref(), Some("round_display"));
        assert!(registry.lookup(EntityKind::Cover, "front_gate").is_some());
    }

    #[test]
    fn test_registry_file_replaces_inline_block() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_dir.path().join("menu.yaml");
        let registry_path = temp_dir.path().join("entities.json");
        fs::write(&config, YAML).unwrap();
        fs::write(&registry_path, r#"{"switches": ["hall"]}"#).unwrap();

        let (_, registry) = load_with_registry(&config, Some(&registry_path)).unwrap();
        assert!(registry.lookup(EntityKind::Switch, "hall").is_some());
        assert!(registry.lookup(EntityKind::Cover, "front_gate").is_none());
    }

    #[test]
    fn test_missing_file_names_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.yaml");
        let error = load_document(&path).unwrap_err();
        assert!(format!("{error:#}").contains("absent.yaml"));
    }

    #[test]
    fn test_registry_slots_follow_document_order() {
        let document = RegistryDocument {
            switches: vec!["hall".to_string(), "lamp".to_string()],
            ..RegistryDocument::default()
        };
        let registry = document.to_registry();
        assert_eq!(registry.lookup(EntityKind::Switch, "lamp").unwrap().slot(), 1);
        assert_eq!(registry.len(), 2);
    }
}
