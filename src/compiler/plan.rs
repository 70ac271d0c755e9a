//! Intermediate menu plans passed between pipeline stages.
//!
//! A plan is generic over how entity references are held: the schema
//! validator produces `MenuPlan<String>` (declared ids) and the resolver
//! turns it into `MenuPlan<EntityHandle>`.

use crate::models::{
    AppType, EntityHandle, EntityKind, Icon, Language, Peripherals, RgbColor, TimePeriod,
};

/// Plan with entity ids as declared.
pub type ValidatedMenu = MenuPlan<String>;

/// Plan with every entity id bound to a registry handle.
pub type ResolvedMenu = MenuPlan<EntityHandle>;

/// One referenced entity, with the field path it was declared under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference<R> {
    /// Field path, e.g. `apps[3].climate_id`
    pub field: String,
    /// Expected entity kind
    pub kind: EntityKind,
    /// Declared id or resolved handle
    pub target: R,
}

impl<R> Reference<R> {
    /// Creates a reference.
    pub fn new(field: impl Into<String>, kind: EntityKind, target: R) -> Self {
        Self {
            field: field.into(),
            kind,
            target,
        }
    }
}

/// One entry of a `switches:` / `covers:` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingPlan<R> {
    /// Bound entity
    pub entity: Reference<R>,
    /// Label for the entity
    pub name: String,
    /// Explicit color, if declared
    pub color: Option<RgbColor>,
}

/// Both declaration styles of switch/cover bindings, as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingForms<R> {
    /// `switch_id` / `cover_id`
    pub single: Option<Reference<R>>,
    /// `switches` / `covers`
    pub list: Option<Vec<BindingPlan<R>>>,
}

impl<R> Default for BindingForms<R> {
    fn default() -> Self {
        Self {
            single: None,
            list: None,
        }
    }
}

/// Type-specific part of an app plan.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadPlan<R> {
    /// No payload
    Generic,
    /// Switch bindings in either form
    Switch(BindingForms<R>),
    /// Cover bindings in either form
    Cover(BindingForms<R>),
    /// Thermostat
    Climate {
        /// Climate entity
        climate: Reference<R>,
        /// Validated setpoint increment
        temperature_step: f32,
    },
    /// Media player
    MediaPlayer {
        /// Media player entity
        media_player: Reference<R>,
        /// Validated volume increment
        volume_step: f32,
    },
}

/// A validated app declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppPlan<R> {
    /// Declaration index
    pub index: usize,
    /// App identifier, declared or generated
    pub id: String,
    /// Display name
    pub name: String,
    /// Effective app type
    pub app_type: AppType,
    /// Icon
    pub icon: Icon,
    /// Explicit color, if declared
    pub color: Option<RgbColor>,
    /// Type-specific payload
    pub payload: PayloadPlan<R>,
    /// References declared under keys this app type does not use; they must
    /// still resolve
    pub unused: Vec<Reference<R>>,
}

/// Validated controller-wide settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsPlan<R> {
    /// Controller identifier
    pub id: String,
    /// Attached hardware
    pub peripherals: Peripherals,
    /// Circle radius
    pub radius: u16,
    /// Unfocused button diameter
    pub button_size: u16,
    /// Focused button diameter
    pub button_size_focused: u16,
    /// Idle timeout
    pub idle_timeout: TimePeriod,
    /// Label language
    pub language: Language,
    /// Small font
    pub font_14: Option<Reference<R>>,
    /// Large font
    pub font_18: Option<Reference<R>>,
    /// Idle clock source
    pub time_source: Option<Reference<R>>,
}

/// Complete validated menu.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuPlan<R> {
    /// Controller-wide settings
    pub settings: SettingsPlan<R>,
    /// Apps in declaration order
    pub apps: Vec<AppPlan<R>>,
}
