//! Construction of app records from resolved plans.

use super::palette::assign_color;
use super::plan::{AppPlan, BindingForms, PayloadPlan};
use crate::models::{
    App, AppKind, BindingKind, BindingsPayload, ClimatePayload, EntityBinding, EntityHandle,
    FontSet, MediaPlayerPayload, Position, RgbColor,
};

/// Builds the app record for one resolved plan.
///
/// Fonts and the controller reference stay empty here; the assembler fills
/// them in once the controller exists.
#[must_use]
pub fn build_app(plan: AppPlan<EntityHandle>, position: Position) -> App {
    let color = assign_color(plan.color, plan.index);

    let kind = match plan.payload {
        PayloadPlan::Generic => AppKind::Generic,
        PayloadPlan::Switch(forms) => AppKind::Switch(BindingsPayload {
            bindings: normalize_bindings(
                BindingKind::Switch,
                forms,
                &plan.name,
                color,
                plan.index,
            ),
            font_14: None,
        }),
        PayloadPlan::Cover(forms) => AppKind::Cover(BindingsPayload {
            bindings: normalize_bindings(
                BindingKind::Cover,
                forms,
                &plan.name,
                color,
                plan.index,
            ),
            font_14: None,
        }),
        PayloadPlan::Climate {
            climate,
            temperature_step,
        } => AppKind::Climate(ClimatePayload {
            climate: climate.target,
            temperature_step,
            fonts: FontSet::default(),
        }),
        PayloadPlan::MediaPlayer {
            media_player,
            volume_step,
        } => AppKind::MediaPlayer(MediaPlayerPayload {
            media_player: media_player.target,
            volume_step,
            fonts: FontSet::default(),
            controller: None,
        }),
    };

    tracing::debug!(
        "Built {} app '{}' ({}) at slot {} ({}, {})",
        kind.app_type(),
        plan.name,
        plan.id,
        plan.index,
        position.x,
        position.y
    );

    App {
        id: plan.id,
        name: plan.name,
        index: plan.index,
        color,
        icon: plan.icon,
        position,
        kind,
    }
}

/// Turns either declaration form into a single binding list.
///
/// The list form wins when both are present. A singular id becomes one
/// binding labelled with the app name and colored like the app; list items
/// without a color fall back to the palette entry for the app's index.
fn normalize_bindings(
    kind: BindingKind,
    forms: BindingForms<EntityHandle>,
    app_name: &str,
    app_color: RgbColor,
    index: usize,
) -> Vec<EntityBinding> {
    if let Some(list) = forms.list {
        return list
            .into_iter()
            .map(|item| EntityBinding {
                kind,
                entity: item.entity.target,
                name: item.name,
                color: assign_color(item.color, index),
            })
            .collect();
    }

    forms
        .single
        .map(|reference| EntityBinding {
            kind,
            entity: reference.target,
            name: app_name.to_string(),
            color: app_color,
        })
        .into_iter()
        .collect()
}
