//! Data models for menu declarations and the compiled menu.
//!
//! Declarations mirror the configuration document; the compiled types
//! (`App`, `Controller`) are what the rendering runtime consumes.
//! Models are independent of the compiler pipeline and the CLI.

pub mod app;
pub mod controller;
pub mod declaration;
pub mod entity;
pub mod icon;
pub mod period;
pub mod rgb;

// Re-export all model types
pub use app::{
    App, AppKind, AppType, BindingKind, BindingsPayload, ClimatePayload, EntityBinding, FontSet,
    MediaPlayerPayload, Position,
};
pub use controller::{Controller, ControllerRef, Language, MenuSettings, Peripherals};
pub use declaration::{
    describe_value, AppDeclaration, ColorValue, CoverItem, MenuDeclaration, Numeric, OneOrMany,
    PeriodValue, SwitchItem,
};
pub use entity::{EntityHandle, EntityKind};
pub use icon::Icon;
pub use period::TimePeriod;
pub use rgb::RgbColor;
