//! Handles into the external entity registry.

use serde::Serialize;
use std::fmt;

/// Kind of externally registered entity an id can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// On/off toggle
    Switch,
    /// Shade, blind, gate or garage door
    Cover,
    /// Thermostat
    Climate,
    /// Media player
    MediaPlayer,
    /// Rasterized font
    Font,
    /// Real-time clock
    TimeSource,
}

impl EntityKind {
    /// Every kind, in registry document order.
    pub const ALL: [Self; 6] = [
        Self::Switch,
        Self::Cover,
        Self::Climate,
        Self::MediaPlayer,
        Self::Font,
        Self::TimeSource,
    ];

    /// App declaration field that binds a single entity of this kind.
    #[must_use]
    pub const fn app_field(self) -> Option<&'static str> {
        match self {
            Self::Switch => Some("switch_id"),
            Self::Cover => Some("cover_id"),
            Self::Climate => Some("climate_id"),
            Self::MediaPlayer => Some("media_player_id"),
            Self::Font | Self::TimeSource => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Switch => "switch",
            Self::Cover => "cover",
            Self::Climate => "climate",
            Self::MediaPlayer => "media player",
            Self::Font => "font",
            Self::TimeSource => "time source",
        };
        f.write_str(name)
    }
}

/// Opaque reference to an already-registered entity.
///
/// Only a registry creates handles; the compiler copies them into the model
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EntityHandle {
    kind: EntityKind,
    id: String,
    slot: usize,
}

impl EntityHandle {
    /// Creates a handle. `slot` is the registry's own position for the entity.
    pub fn new(kind: EntityKind, id: impl Into<String>, slot: usize) -> Self {
        Self {
            kind,
            id: id.into(),
            slot,
        }
    }

    /// Entity kind.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Identifier the entity was registered under.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Registry slot.
    #[must_use]
    pub const fn slot(&self) -> usize {
        self.slot
    }
}

impl fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}
