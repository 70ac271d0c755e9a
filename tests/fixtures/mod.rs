//! Shared test fixtures for integration and E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use dialmenu::compiler::InMemoryRegistry;
use dialmenu::models::{AppDeclaration, EntityKind, MenuDeclaration};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A menu using every app type, with an inline registry.
pub const HOME_MENU_YAML: &str = r##"
dial_menu:
  display_id: round_display
  encoder: dial
  button: dial_button
  radius: 90
  idle_timeout: 1min
  language: fr
  time_id: sntp_time
  font_14: roboto_14
  font_18: roboto_18
  apps:
    - name: Lights
      type: switch
      icon_type: light
      switches:
        - switch_id: hall_light
          name: Hall
        - switch_id: porch_light
          name: Porch
          color: "#FFB300"
    - name: Gate
      type: cover
      icon_type: gate
      color: 0x03A964
      cover_id: front_gate
    - name: Heating
      type: climate
      icon_type: thermostat
      climate_id: living_room
      temperature_step: 1.0
    - name: Music
      type: media_player
      icon_type: music
      media_player_id: kitchen_speaker
    - name: Settings
      icon_type: settings
registry:
  switches: [hall_light, porch_light]
  covers: [front_gate]
  climates: [living_room]
  media_players: [kitchen_speaker]
  fonts: [roboto_14, roboto_18]
  time_sources: [sntp_time]
"##;

/// A menu referencing a climate entity missing from its registry.
pub const UNRESOLVED_MENU_YAML: &str = r##"
dial_menu:
  display_id: round_display
  apps:
    - name: Home
    - name: Heating
      type: climate
      climate_id: attic
registry:
  climates: [living_room]
"##;

/// A menu with out-of-range values and a missing app name.
pub const INVALID_MENU_YAML: &str = r##"
dial_menu:
  display_id: round_display
  radius: 200
  apps:
    - type: switch
      switch_id: hall_light
    - name: Blender
      icon_type: blender
registry:
  switches: [hall_light]
"##;

/// A menu whose only issue is an unknown app type.
pub const UNKNOWN_TYPE_MENU_YAML: &str = r##"
dial_menu:
  display_id: round_display
  apps:
    - name: Lamp
      type: light
"##;

/// Writes `content` to a temporary file named `menu.<extension>`.
///
/// # Returns
/// The file path and the temp directory guard (keep it alive for the test).
pub fn create_temp_config(content: &str, extension: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(format!("menu.{extension}"));
    fs::write(&path, content).expect("Failed to write config file");
    (path, temp_dir)
}

/// Writes a registry document next to an existing temp directory.
pub fn write_registry(temp_dir: &TempDir, content: &str) -> PathBuf {
    let path = temp_dir.path().join("entities.yaml");
    fs::write(&path, content).expect("Failed to write registry file");
    path
}

/// `count` generic apps named A, B, C, ...
pub fn generic_menu(count: usize) -> MenuDeclaration {
    let apps = (0..count)
        .map(|i| {
            let letter = char::from(b'A' + u8::try_from(i % 26).expect("index fits in u8"));
            AppDeclaration::new(letter.to_string(), "generic")
        })
        .collect();
    MenuDeclaration::new("round_display", apps)
}

/// Registry with the switches, covers and climates used by the fixtures.
pub fn test_registry() -> InMemoryRegistry {
    InMemoryRegistry::new()
        .with(EntityKind::Switch, "hall_light")
        .with(EntityKind::Switch, "porch_light")
        .with(EntityKind::Cover, "front_gate")
        .with(EntityKind::Climate, "living_room")
        .with(EntityKind::MediaPlayer, "kitchen_speaker")
}
