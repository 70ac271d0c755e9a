//! Raw menu declarations as written in the configuration document.
//!
//! These types mirror the document one-to-one and carry no validation beyond
//! rejecting unknown keys. Required keys are `Option` here so that a missing
//! value can be reported against the declaration that omitted it.

use serde::{Deserialize, Serialize};

/// Color as declared: an integer (`0xFD5C4C`) or a hex string (`"#FD5C4C"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    /// Packed `0xRRGGBB` integer
    Int(u64),
    /// Hex string in `#RRGGBB`, `RRGGBB` or `0xRRGGBB` form
    Hex(String),
    /// Anything else, such as a negative number or a list
    Other(serde_yml::Value),
}

/// A number as declared, or whatever was written in its place.
///
/// Keeping the raw value lets the schema stage report a wrong type against
/// the key that holds it instead of failing the whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric<T> {
    /// Value of the expected type
    Value(T),
    /// Value of some other type
    Other(serde_yml::Value),
}

impl<T> From<T> for Numeric<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

/// Time period as declared: bare milliseconds or a string with a unit (`"30s"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PeriodValue {
    /// Milliseconds
    Millis(i64),
    /// Number followed by a unit (`ms`, `s`, `min`, `h`, `d`)
    Text(String),
    /// Anything else
    Other(serde_yml::Value),
}

/// Renders a raw document value the way it was written.
#[must_use]
pub fn describe_value(value: &serde_yml::Value) -> String {
    serde_yml::to_string(value).map_or_else(
        |_| format!("{value:?}"),
        |text| text.trim().to_string(),
    )
}

/// A single value or a list of values; a lone mapping is accepted where a
/// list is expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// List form
    Many(Vec<T>),
    /// Single mapping
    One(T),
}

impl<T> OneOrMany<T> {
    /// Flattens into a list, preserving declaration order.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

/// One entry of an app's `switches:` list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SwitchItem {
    /// Switch entity id (required)
    pub switch_id: Option<String>,
    /// Label shown for this switch (required)
    pub name: Option<String>,
    /// Optional per-switch color
    pub color: Option<ColorValue>,
}

/// One entry of an app's `covers:` list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoverItem {
    /// Cover entity id (required)
    pub cover_id: Option<String>,
    /// Label shown for this cover (required)
    pub name: Option<String>,
    /// Optional per-cover color
    pub color: Option<ColorValue>,
}

/// One app declaration.
///
/// The key set is uniform across app types; which keys matter depends on `type`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppDeclaration {
    /// App identifier; generated from the controller id and index when unset
    pub id: Option<String>,
    /// Display name (required)
    pub name: Option<String>,
    /// Type tag: `generic`, `switch`, `cover`, `climate` or `media_player`
    #[serde(rename = "type")]
    pub app_type: Option<String>,
    /// Icon key from the symbol table
    pub icon_type: Option<String>,
    /// Explicit app color
    pub color: Option<ColorValue>,
    /// Singular switch binding
    pub switch_id: Option<String>,
    /// Switch binding list
    pub switches: Option<OneOrMany<SwitchItem>>,
    /// Singular cover binding
    pub cover_id: Option<String>,
    /// Cover binding list
    pub covers: Option<OneOrMany<CoverItem>>,
    /// Climate entity id
    pub climate_id: Option<String>,
    /// Thermostat setpoint increment
    pub temperature_step: Option<Numeric<f64>>,
    /// Media player entity id
    pub media_player_id: Option<String>,
    /// Volume increment
    pub volume_step: Option<Numeric<f64>>,
}

impl AppDeclaration {
    /// Creates a declaration with a name and type tag; every other key is unset.
    pub fn new(name: impl Into<String>, app_type: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            app_type: Some(app_type.into()),
            ..Self::default()
        }
    }
}

/// Controller-level declaration (the `dial_menu:` block).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MenuDeclaration {
    /// Controller identifier
    pub id: Option<String>,
    /// Display reference (required)
    pub display_id: Option<String>,
    /// Optional touchscreen reference
    pub touchscreen: Option<String>,
    /// Optional rotary encoder reference
    pub encoder: Option<String>,
    /// Optional push button reference
    pub button: Option<String>,
    /// App declarations in render order
    #[serde(default)]
    pub apps: Vec<AppDeclaration>,
    /// Circle radius in pixels
    pub radius: Option<Numeric<i64>>,
    /// Unfocused button diameter
    pub button_size: Option<Numeric<i64>>,
    /// Focused button diameter
    pub button_size_focused: Option<Numeric<i64>>,
    /// Inactivity delay before the idle screen
    pub idle_timeout: Option<PeriodValue>,
    /// Time source entity id for the idle clock
    pub time_id: Option<String>,
    /// Language tag
    pub language: Option<String>,
    /// Font entity id for the small text size
    pub font_14: Option<String>,
    /// Font entity id for the large text size
    pub font_18: Option<String>,
}

impl MenuDeclaration {
    /// Creates a declaration bound to a display with the given apps.
    pub fn new(display_id: impl Into<String>, apps: Vec<AppDeclaration>) -> Self {
        Self {
            display_id: Some(display_id.into()),
            apps,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switches_accept_single_mapping() {
        let yaml = r##"
name: Lights
type: switch
switches:
  switch_id: lamp
  name: Lamp
"##;
        let decl: AppDeclaration = serde_yml::from_str(yaml).unwrap();
        let items = decl.switches.unwrap().into_vec();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].switch_id.as_deref(), Some("lamp"));
    }

    #[test]
    fn test_color_accepts_int_and_string() {
        let decl: AppDeclaration =
            serde_yml::from_str("name: A\ncolor: 16711680\n").unwrap();
        assert_eq!(decl.color, Some(ColorValue::Int(0xFF0000)));

        let decl: AppDeclaration =
            serde_yml::from_str("name: A\ncolor: \"#00FF00\"\n").unwrap();
        assert_eq!(decl.color, Some(ColorValue::Hex("#00FF00".to_string())));
    }

    #[test]
    fn test_wrongly_typed_values_are_kept() {
        let decl: AppDeclaration =
            serde_yml::from_str("name: A\ncolor: -1\ntemperature_step: fast\n").unwrap();
        assert!(matches!(decl.color, Some(ColorValue::Other(_))));
        match decl.temperature_step {
            Some(Numeric::Other(value)) => assert_eq!(describe_value(&value), "fast"),
            other => panic!("unexpected step {other:?}"),
        }

        let decl: AppDeclaration = serde_yml::from_str("name: A\nvolume_step: 1\n").unwrap();
        assert_eq!(decl.volume_step, Some(Numeric::Value(1.0)));
    }

    #[test]
    fn test_app_id_is_optional() {
        let decl: AppDeclaration = serde_yml::from_str("id: lights_app\nname: A\n").unwrap();
        assert_eq!(decl.id.as_deref(), Some("lights_app"));

        let decl: AppDeclaration = serde_yml::from_str("name: A\n").unwrap();
        assert_eq!(decl.id, None);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result: Result<AppDeclaration, _> = serde_yml::from_str("name: A\nsize: 3\n");
        assert!(result.is_err());

        let result: Result<SwitchItem, _> =
            serde_yml::from_str("cover_id: gate\nname: Gate\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_idle_timeout_forms() {
        let decl: MenuDeclaration =
            serde_yml::from_str("display_id: d\nidle_timeout: 45s\n").unwrap();
        assert_eq!(decl.idle_timeout, Some(PeriodValue::Text("45s".to_string())));

        let decl: MenuDeclaration =
            serde_yml::from_str("display_id: d\nidle_timeout: 1500\n").unwrap();
        assert_eq!(decl.idle_timeout, Some(PeriodValue::Millis(1500)));
    }
}
