//! Setter-style output interface consumed by the on-device renderer.
//!
//! [`emit`] walks an assembled [`Controller`] and replays it as a sequence of
//! setter calls against a [`MenuRuntime`]. [`CallLog`] records those calls so
//! they can be printed or compared.

use serde::Serialize;
use std::fmt;

use crate::models::{
    App, AppKind, AppType, Controller, ControllerRef, EntityHandle, Icon, Language,
};

/// Receives the setters for one app under construction.
///
/// Variant setters default to no-ops so a sink only implements what its app
/// type uses.
pub trait AppSink {
    /// Sets the display name.
    fn set_name(&mut self, name: &str);
    /// Sets the declaration index.
    fn set_index(&mut self, index: usize);
    /// Sets the button color as packed `0xRRGGBB`.
    fn set_color(&mut self, color: u32);
    /// Sets the icon.
    fn set_icon(&mut self, icon: Icon);
    /// Sets the offset from the menu center.
    fn set_position(&mut self, x: i32, y: i32);

    /// Sets the small font.
    fn set_font_14(&mut self, _font: &EntityHandle) {}
    /// Sets the large font.
    fn set_font_18(&mut self, _font: &EntityHandle) {}
    /// Adds a switch binding.
    fn add_switch(&mut self, _switch: &EntityHandle, _name: &str, _color: u32) {}
    /// Adds a cover binding.
    fn add_cover(&mut self, _cover: &EntityHandle, _name: &str, _color: u32) {}
    /// Sets the thermostat.
    fn set_climate(&mut self, _climate: &EntityHandle) {}
    /// Sets the setpoint increment.
    fn set_temperature_step(&mut self, _step: f32) {}
    /// Sets the media player.
    fn set_media_player(&mut self, _media_player: &EntityHandle) {}
    /// Sets the volume increment.
    fn set_volume_step(&mut self, _step: f32) {}
    /// Sets the back-reference to the owning controller.
    fn set_controller(&mut self, _controller: &ControllerRef) {}
}

/// Receives the controller-wide setters and the finished apps.
pub trait MenuRuntime {
    /// App sink type created by this runtime.
    type App: AppSink;

    /// Starts a new app of the given type under the given identifier.
    fn create_app(&mut self, id: &str, app_type: AppType) -> Self::App;
    /// Appends a finished app to the render order.
    fn add_app(&mut self, app: Self::App);
    /// Sets the input group name.
    fn set_group_name(&mut self, name: &str);
    /// Sets the unfocused button diameter.
    fn set_button_size(&mut self, size: u16);
    /// Sets the focused button diameter.
    fn set_button_size_focused(&mut self, size: u16);
    /// Sets the idle timeout in milliseconds.
    fn set_idle_timeout(&mut self, millis: u32);
    /// Sets the idle clock source.
    fn set_time(&mut self, time_source: &EntityHandle);
    /// Sets the label language.
    fn set_language(&mut self, language: Language);
    /// Sets the small font.
    fn set_font_14(&mut self, font: &EntityHandle);
    /// Sets the large font.
    fn set_font_18(&mut self, font: &EntityHandle);
}

/// Replays `controller` against `runtime`.
///
/// Apps come first, in render order, each finished with `add_app`. The
/// controller settings follow.
pub fn emit<R: MenuRuntime>(controller: &Controller, runtime: &mut R) {
    for app in controller.apps() {
        let mut sink = runtime.create_app(&app.id, app.app_type());
        emit_app(app, &mut sink);
        runtime.add_app(sink);
    }

    let settings = &controller.settings;
    runtime.set_group_name(&controller.group_name);
    runtime.set_button_size(settings.button_size);
    runtime.set_button_size_focused(settings.button_size_focused);
    runtime.set_idle_timeout(settings.idle_timeout.as_millis());
    if let Some(time_source) = &settings.time_source {
        runtime.set_time(time_source);
    }
    runtime.set_language(settings.language);
    if let Some(font) = &settings.fonts.font_14 {
        runtime.set_font_14(font);
    }
    if let Some(font) = &settings.fonts.font_18 {
        runtime.set_font_18(font);
    }
}

fn emit_app<S: AppSink>(app: &App, sink: &mut S) {
    match &app.kind {
        AppKind::Generic => {}
        AppKind::Switch(payload) => {
            if let Some(font) = &payload.font_14 {
                sink.set_font_14(font);
            }
            for binding in &payload.bindings {
                sink.add_switch(&binding.entity, &binding.name, binding.color.to_packed());
            }
        }
        AppKind::Cover(payload) => {
            if let Some(font) = &payload.font_14 {
                sink.set_font_14(font);
            }
            for binding in &payload.bindings {
                sink.add_cover(&binding.entity, &binding.name, binding.color.to_packed());
            }
        }
        AppKind::Climate(payload) => {
            if let Some(font) = &payload.fonts.font_14 {
                sink.set_font_14(font);
            }
            if let Some(font) = &payload.fonts.font_18 {
                sink.set_font_18(font);
            }
            sink.set_climate(&payload.climate);
            sink.set_temperature_step(payload.temperature_step);
        }
        AppKind::MediaPlayer(payload) => {
            if let Some(controller) = &payload.controller {
                sink.set_controller(controller);
            }
            if let Some(font) = &payload.fonts.font_14 {
                sink.set_font_14(font);
            }
            if let Some(font) = &payload.fonts.font_18 {
                sink.set_font_18(font);
            }
            sink.set_media_player(&payload.media_player);
            sink.set_volume_step(payload.volume_step);
        }
    }

    sink.set_name(&app.name);
    sink.set_index(app.index);
    sink.set_color(app.color.to_packed());
    sink.set_icon(app.icon);
    sink.set_position(app.position.x, app.position.y);
}

/// One recorded setter call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum RuntimeCall {
    CreateApp { id: String, app_type: AppType },
    SetName { name: String },
    SetIndex { index: usize },
    SetColor { color: u32 },
    SetIcon { icon: Icon },
    SetPosition { x: i32, y: i32 },
    SetFont14 { font: String },
    SetFont18 { font: String },
    AddSwitch { switch: String, name: String, color: u32 },
    AddCover { cover: String, name: String, color: u32 },
    SetClimate { climate: String },
    SetTemperatureStep { step: f32 },
    SetMediaPlayer { media_player: String },
    SetVolumeStep { step: f32 },
    SetController { controller: String },
    AddApp,
    SetGroupName { name: String },
    SetButtonSize { size: u16 },
    SetButtonSizeFocused { size: u16 },
    SetIdleTimeout { millis: u32 },
    SetTime { time_source: String },
    SetLanguage { language: Language },
}

impl fmt::Display for RuntimeCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateApp { id, app_type } => write!(f, "create_app({id}, {app_type})"),
            Self::SetName { name } => write!(f, "  app.set_name({name:?})"),
            Self::SetIndex { index } => write!(f, "  app.set_index({index})"),
            Self::SetColor { color } => write!(f, "  app.set_color(0x{color:06X})"),
            Self::SetIcon { icon } => write!(f, "  app.set_icon({:?})", icon.key()),
            Self::SetPosition { x, y } => write!(f, "  app.set_position({x}, {y})"),
            Self::SetFont14 { font } => write!(f, "  app.set_font_14({font})"),
            Self::SetFont18 { font } => write!(f, "  app.set_font_18({font})"),
            Self::AddSwitch {
                switch,
                name,
                color,
            } => write!(f, "  app.add_switch({switch}, {name:?}, 0x{color:06X})"),
            Self::AddCover { cover, name, color } => {
                write!(f, "  app.add_cover({cover}, {name:?}, 0x{color:06X})")
            }
            Self::SetClimate { climate } => write!(f, "  app.set_climate({climate})"),
            Self::SetTemperatureStep { step } => write!(f, "  app.set_temperature_step({step})"),
            Self::SetMediaPlayer { media_player } => {
                write!(f, "  app.set_media_player({media_player})")
            }
            Self::SetVolumeStep { step } => write!(f, "  app.set_volume_step({step})"),
            Self::SetController { controller } => write!(f, "  app.set_controller({controller})"),
            Self::AddApp => write!(f, "add_app()"),
            Self::SetGroupName { name } => write!(f, "set_group_name({name:?})"),
            Self::SetButtonSize { size } => write!(f, "set_button_size({size})"),
            Self::SetButtonSizeFocused { size } => write!(f, "set_button_size_focused({size})"),
            Self::SetIdleTimeout { millis } => write!(f, "set_idle_timeout({millis})"),
            Self::SetTime { time_source } => write!(f, "set_time({time_source})"),
            Self::SetLanguage { language } => write!(f, "set_language({:?})", language.tag()),
        }
    }
}

/// Calls recorded for one app between `create_app` and `add_app`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppRecorder {
    calls: Vec<RuntimeCall>,
}

impl AppRecorder {
    fn push(&mut self, call: RuntimeCall) {
        self.calls.push(call);
    }
}

impl AppSink for AppRecorder {
    fn set_name(&mut self, name: &str) {
        self.push(RuntimeCall::SetName {
            name: name.to_string(),
        });
    }

    fn set_index(&mut self, index: usize) {
        self.push(RuntimeCall::SetIndex { index });
    }

    fn set_color(&mut self, color: u32) {
        self.push(RuntimeCall::SetColor { color });
    }

    fn set_icon(&mut self, icon: Icon) {
        self.push(RuntimeCall::SetIcon { icon });
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.push(RuntimeCall::SetPosition { x, y });
    }

    fn set_font_14(&mut self, font: &EntityHandle) {
        self.push(RuntimeCall::SetFont14 {
            font: font.id().to_string(),
        });
    }

    fn set_font_18(&mut self, font: &EntityHandle) {
        self.push(RuntimeCall::SetFont18 {
            font: font.id().to_string(),
        });
    }

    fn add_switch(&mut self, switch: &EntityHandle, name: &str, color: u32) {
        self.push(RuntimeCall::AddSwitch {
            switch: switch.id().to_string(),
            name: name.to_string(),
            color,
        });
    }

    fn add_cover(&mut self, cover: &EntityHandle, name: &str, color: u32) {
        self.push(RuntimeCall::AddCover {
            cover: cover.id().to_string(),
            name: name.to_string(),
            color,
        });
    }

    fn set_climate(&mut self, climate: &EntityHandle) {
        self.push(RuntimeCall::SetClimate {
            climate: climate.id().to_string(),
        });
    }

    fn set_temperature_step(&mut self, step: f32) {
        self.push(RuntimeCall::SetTemperatureStep { step });
    }

    fn set_media_player(&mut self, media_player: &EntityHandle) {
        self.push(RuntimeCall::SetMediaPlayer {
            media_player: media_player.id().to_string(),
        });
    }

    fn set_volume_step(&mut self, step: f32) {
        self.push(RuntimeCall::SetVolumeStep { step });
    }

    fn set_controller(&mut self, controller: &ControllerRef) {
        self.push(RuntimeCall::SetController {
            controller: controller.id().to_string(),
        });
    }
}

/// Runtime that records every call in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallLog {
    calls: Vec<RuntimeCall>,
}

impl CallLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a full emission of `controller`.
    #[must_use]
    pub fn record(controller: &Controller) -> Self {
        let mut log = Self::new();
        emit(controller, &mut log);
        log
    }

    /// Recorded calls in order.
    #[must_use]
    pub fn calls(&self) -> &[RuntimeCall] {
        &self.calls
    }
}

impl fmt::Display for CallLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for call in &self.calls {
            writeln!(f, "{call}")?;
        }
        Ok(())
    }
}

impl MenuRuntime for CallLog {
    type App = AppRecorder;

    fn create_app(&mut self, id: &str, app_type: AppType) -> AppRecorder {
        AppRecorder {
            calls: vec![RuntimeCall::CreateApp {
                id: id.to_string(),
                app_type,
            }],
        }
    }

    fn add_app(&mut self, app: AppRecorder) {
        self.calls.extend(app.calls);
        self.calls.push(RuntimeCall::AddApp);
    }

    fn set_group_name(&mut self, name: &str) {
        self.calls.push(RuntimeCall::SetGroupName {
            name: name.to_string(),
        });
    }

    fn set_button_size(&mut self, size: u16) {
        self.calls.push(RuntimeCall::SetButtonSize { size });
    }

    fn set_button_size_focused(&mut self, size: u16) {
        self.calls.push(RuntimeCall::SetButtonSizeFocused { size });
    }

    fn set_idle_timeout(&mut self, millis: u32) {
        self.calls.push(RuntimeCall::SetIdleTimeout { millis });
    }

    fn set_time(&mut self, time_source: &EntityHandle) {
        self.calls.push(RuntimeCall::SetTime {
            time_source: time_source.id().to_string(),
        });
    }

    fn set_language(&mut self, language: Language) {
        self.calls.push(RuntimeCall::SetLanguage { language });
    }

    fn set_font_14(&mut self, font: &EntityHandle) {
        self.calls.push(RuntimeCall::SetFont14 {
            font: font.id().to_string(),
        });
    }

    fn set_font_18(&mut self, font: &EntityHandle) {
        self.calls.push(RuntimeCall::SetFont18 {
            font: font.id().to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{Compiler, InMemoryRegistry};
    use crate::models::{AppDeclaration, EntityKind, MenuDeclaration};

    fn controller() -> Controller {
        let registry = InMemoryRegistry::new()
            .with(EntityKind::Switch, "hall")
            .with(EntityKind::MediaPlayer, "kitchen")
            .with(EntityKind::Font, "small")
            .with(EntityKind::TimeSource, "sntp");

        let mut switch = AppDeclaration::new("Hall", "switch");
        switch.switch_id = Some("hall".into());
        let mut media = AppDeclaration::new("Music", "media_player");
        media.id = Some("kitchen_player".into());
        media.media_player_id = Some("kitchen".into());

        let mut declaration = MenuDeclaration::new("round_display", vec![switch, media]);
        declaration.font_14 = Some("small".into());
        declaration.time_id = Some("sntp".into());

        Compiler::new(&registry)
            .compile(&declaration)
            .unwrap()
            .controller
    }

    #[test]
    fn test_app_calls_precede_settings() {
        let log = CallLog::record(&controller());
        let calls = log.calls();

        assert_eq!(
            calls[0],
            RuntimeCall::CreateApp {
                id: "dial_menu_app_0".to_string(),
                app_type: AppType::Switch
            }
        );
        assert_eq!(
            calls[1],
            RuntimeCall::SetFont14 {
                font: "small".to_string()
            }
        );
        assert!(matches!(calls[2], RuntimeCall::AddSwitch { .. }));
        assert!(matches!(calls[3], RuntimeCall::SetName { .. }));

        let group = calls
            .iter()
            .position(|c| matches!(c, RuntimeCall::SetGroupName { .. }))
            .unwrap();
        let last_add = calls
            .iter()
            .rposition(|c| *c == RuntimeCall::AddApp)
            .unwrap();
        assert!(last_add < group);
        assert_eq!(
            calls.last(),
            Some(&RuntimeCall::SetFont14 {
                font: "small".to_string()
            })
        );
    }

    #[test]
    fn test_media_player_sets_controller_first() {
        let log = CallLog::record(&controller());
        let start = log
            .calls()
            .iter()
            .position(|c| {
                matches!(
                    c,
                    RuntimeCall::CreateApp {
                        app_type: AppType::MediaPlayer,
                        ..
                    }
                )
            })
            .unwrap();
        assert_eq!(
            log.calls()[start + 1],
            RuntimeCall::SetController {
                controller: "dial_menu".to_string()
            }
        );
    }

    #[test]
    fn test_settings_calls() {
        let log = CallLog::record(&controller());
        let calls = log.calls();
        assert!(calls.contains(&RuntimeCall::SetIdleTimeout { millis: 30_000 }));
        assert!(calls.contains(&RuntimeCall::SetButtonSize { size: 50 }));
        assert!(calls.contains(&RuntimeCall::SetTime {
            time_source: "sntp".to_string()
        }));
        assert!(calls.contains(&RuntimeCall::SetLanguage {
            language: Language::En
        }));
    }

    #[test]
    fn test_display_renders_one_line_per_call() {
        let log = CallLog::record(&controller());
        let text = log.to_string();
        assert_eq!(text.lines().count(), log.calls().len());
        assert!(text.contains("set_group_name(\"dial_menu_group\")"));
        assert!(text.contains("create_app(dial_menu_app_0, switch)"));
        assert!(text.contains("create_app(kitchen_player, media_player)"));
        assert!(text.contains("app.set_color(0x"));
    }
}
