//! Controller assembly: settings, layout, fonts and back-references.

use super::builder::build_app;
use super::error::{CompileError, Diagnostic, DiagnosticKind};
use super::geometry::circle_positions;
use super::plan::{ResolvedMenu, SettingsPlan};
use crate::constants::GROUP_NAME;
use crate::models::{AppKind, Controller, EntityHandle, FontSet, MenuSettings};

/// Assembles a resolved plan into a controller.
///
/// Apps are added in declaration order. Controller fonts reach every app
/// that renders text, and media player apps receive a reference back to the
/// controller.
///
/// # Errors
///
/// Returns a geometry diagnostic if the layout does not produce one position
/// per app.
pub fn assemble(plan: ResolvedMenu) -> Result<Controller, CompileError> {
    let settings = menu_settings(plan.settings);
    let positions = circle_positions(plan.apps.len(), settings.radius);
    if positions.len() != plan.apps.len() {
        return Err(CompileError::single(Diagnostic::new(
            DiagnosticKind::Geometry,
            "apps",
            format!(
                "Layout produced {} positions for {} apps",
                positions.len(),
                plan.apps.len()
            ),
        )));
    }

    let fonts = settings.fonts.clone();
    let mut controller = Controller::new(settings, GROUP_NAME);
    let reference = controller.reference();

    for (app_plan, position) in plan.apps.into_iter().zip(positions) {
        let mut app = build_app(app_plan, position);
        match &mut app.kind {
            AppKind::Generic => {}
            AppKind::Switch(payload) | AppKind::Cover(payload) => {
                payload.font_14.clone_from(&fonts.font_14);
            }
            AppKind::Climate(payload) => payload.fonts = fonts.clone(),
            AppKind::MediaPlayer(payload) => {
                payload.fonts = fonts.clone();
                payload.controller = Some(reference.clone());
            }
        }
        controller.add_app(app);
    }

    Ok(controller)
}

fn menu_settings(plan: SettingsPlan<EntityHandle>) -> MenuSettings {
    MenuSettings {
        id: plan.id,
        peripherals: plan.peripherals,
        radius: plan.radius,
        button_size: plan.button_size,
        button_size_focused: plan.button_size_focused,
        idle_timeout: plan.idle_timeout,
        language: plan.language,
        fonts: FontSet {
            font_14: plan.font_14.map(|reference| reference.target),
            font_18: plan.font_18.map(|reference| reference.target),
        },
        time_source: plan.time_source.map(|reference| reference.target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::plan::{AppPlan, BindingForms, MenuPlan, PayloadPlan, Reference};
    use crate::models::{AppType, EntityKind, Icon, Language, Peripherals, Position, TimePeriod};

    fn reference(kind: EntityKind, id: &str) -> Reference<EntityHandle> {
        Reference::new(id, kind, EntityHandle::new(kind, id, 0))
    }

    fn settings(language: Language) -> SettingsPlan<EntityHandle> {
        SettingsPlan {
            id: "dial_menu".to_string(),
            peripherals: Peripherals {
                display: "round_display".to_string(),
                ..Peripherals::default()
            },
            radius: 85,
            button_size: 50,
            button_size_focused: 58,
            idle_timeout: TimePeriod::from_millis(30_000).unwrap(),
            language,
            font_14: Some(reference(EntityKind::Font, "small")),
            font_18: Some(reference(EntityKind::Font, "large")),
            time_source: None,
        }
    }

    fn app(
        index: usize,
        app_type: AppType,
        payload: PayloadPlan<EntityHandle>,
    ) -> AppPlan<EntityHandle> {
        AppPlan {
            index,
            id: format!("app_{index}"),
            name: format!("App {index}"),
            app_type,
            icon: Icon::None,
            color: None,
            payload,
            unused: Vec::new(),
        }
    }

    fn menu(language: Language) -> ResolvedMenu {
        MenuPlan {
            settings: settings(language),
            apps: vec![
                app(0, AppType::Generic, PayloadPlan::Generic),
                app(
                    1,
                    AppType::Switch,
                    PayloadPlan::Switch(BindingForms {
                        single: Some(reference(EntityKind::Switch, "hall")),
                        list: None,
                    }),
                ),
                app(
                    2,
                    AppType::Climate,
                    PayloadPlan::Climate {
                        climate: reference(EntityKind::Climate, "thermostat"),
                        temperature_step: 0.5,
                    },
                ),
                app(
                    3,
                    AppType::MediaPlayer,
                    PayloadPlan::MediaPlayer {
                        media_player: reference(EntityKind::MediaPlayer, "kitchen"),
                        volume_step: 0.05,
                    },
                ),
            ],
        }
    }

    #[test]
    fn test_apps_added_in_order_with_layout() {
        let controller = assemble(menu(Language::En)).unwrap();
        assert_eq!(controller.group_name, GROUP_NAME);
        assert_eq!(controller.app_count(), 4);
        for (index, app) in controller.apps().iter().enumerate() {
            assert_eq!(app.index, index);
        }
        assert_eq!(controller.apps()[0].position, Position::new(0, -85));
        assert_eq!(controller.apps()[2].position, Position::new(0, 85));
    }

    #[test]
    fn test_fonts_propagate_by_app_type() {
        let controller = assemble(menu(Language::En)).unwrap();
        match &controller.apps()[1].kind {
            AppKind::Switch(payload) => {
                let font = payload.font_14.as_ref().map(EntityHandle::id);
                assert_eq!(font, Some("small"));
            }
            other => panic!("unexpected kind {other:?}"),
        }
        match &controller.apps()[2].kind {
            AppKind::Climate(payload) => {
                let font = payload.fonts.font_18.as_ref().map(EntityHandle::id);
                assert_eq!(font, Some("large"));
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn test_media_player_reaches_controller_language() {
        let controller = assemble(menu(Language::Fr)).unwrap();
        let media = &controller.apps()[3];
        assert_eq!(controller.label_language(media), Some(Language::Fr));
        assert_eq!(controller.label_language(&controller.apps()[0]), None);
    }

    #[test]
    fn test_empty_menu_assembles() {
        let mut plan = menu(Language::En);
        plan.apps.clear();
        let controller = assemble(plan).unwrap();
        assert_eq!(controller.app_count(), 0);
        assert_eq!(controller.settings.idle_timeout.as_millis(), 30_000);
    }
}
