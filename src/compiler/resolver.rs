//! Binding of declared entity ids to registry handles.

use std::collections::BTreeMap;

use super::error::{CompileError, Diagnostic, ValidationReport};
use super::plan::{
    AppPlan, BindingForms, BindingPlan, MenuPlan, PayloadPlan, Reference, ResolvedMenu,
    SettingsPlan, ValidatedMenu,
};
use crate::models::{EntityHandle, EntityKind};

/// Lookup of already-registered entities by opaque identifier.
pub trait EntityRegistry {
    /// Returns the handle registered under `id` for `kind`.
    fn lookup(&self, kind: EntityKind, id: &str) -> Option<EntityHandle>;

    /// Kinds `id` is registered under. Used only to improve error messages.
    fn kinds_of(&self, _id: &str) -> Vec<EntityKind> {
        Vec::new()
    }
}

/// Registry held in memory, populated from a registry document or by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryRegistry {
    entries: BTreeMap<EntityKind, Vec<String>>,
}

impl InMemoryRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `id` under `kind` and returns its handle. Registering the
    /// same id twice returns the original handle.
    pub fn register(&mut self, kind: EntityKind, id: impl Into<String>) -> EntityHandle {
        let id = id.into();
        let ids = self.entries.entry(kind).or_default();
        let slot = match ids.iter().position(|existing| *existing == id) {
            Some(slot) => slot,
            None => {
                ids.push(id.clone());
                ids.len() - 1
            }
        };
        EntityHandle::new(kind, id, slot)
    }

    /// Builder-style [`InMemoryRegistry::register`].
    #[must_use]
    pub fn with(mut self, kind: EntityKind, id: impl Into<String>) -> Self {
        self.register(kind, id);
        self
    }

    /// Registered ids of one kind, in registration order.
    #[must_use]
    pub fn ids(&self, kind: EntityKind) -> &[String] {
        self.entries.get(&kind).map_or(&[], Vec::as_slice)
    }

    /// Total number of registered entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EntityRegistry for InMemoryRegistry {
    fn lookup(&self, kind: EntityKind, id: &str) -> Option<EntityHandle> {
        self.ids(kind)
            .iter()
            .position(|existing| existing == id)
            .map(|slot| EntityHandle::new(kind, id, slot))
    }

    fn kinds_of(&self, id: &str) -> Vec<EntityKind> {
        self.entries
            .iter()
            .filter(|(_, ids)| ids.iter().any(|existing| existing == id))
            .map(|(kind, _)| *kind)
            .collect()
    }
}

/// Resolves every reference in a validated plan.
pub struct EntityResolver<'a> {
    registry: &'a dyn EntityRegistry,
}

impl<'a> EntityResolver<'a> {
    /// Creates a resolver over `registry`.
    #[must_use]
    pub fn new(registry: &'a dyn EntityRegistry) -> Self {
        Self { registry }
    }

    /// Resolves the plan, collecting every unresolved id.
    ///
    /// # Errors
    ///
    /// Returns a resolution diagnostic for each id the registry does not know.
    pub fn resolve(&self, plan: ValidatedMenu) -> Result<ResolvedMenu, CompileError> {
        let mut report = ValidationReport::new();

        let settings = self.resolve_settings(plan.settings, &mut report);
        let apps: Vec<_> = plan
            .apps
            .into_iter()
            .map(|app| self.resolve_app(app, &mut report))
            .collect();

        if !report.is_valid() {
            return Err(CompileError { report });
        }
        match (settings, apps.into_iter().collect::<Option<Vec<_>>>()) {
            (Some(settings), Some(apps)) => Ok(MenuPlan { settings, apps }),
            _ => Err(CompileError { report }),
        }
    }

    fn resolve_settings(
        &self,
        settings: SettingsPlan<String>,
        report: &mut ValidationReport,
    ) -> Option<SettingsPlan<EntityHandle>> {
        let font_14 = self.resolve_optional(settings.font_14, None, report);
        let font_18 = self.resolve_optional(settings.font_18, None, report);
        let time_source = self.resolve_optional(settings.time_source, None, report);

        Some(SettingsPlan {
            id: settings.id,
            peripherals: settings.peripherals,
            radius: settings.radius,
            button_size: settings.button_size,
            button_size_focused: settings.button_size_focused,
            idle_timeout: settings.idle_timeout,
            language: settings.language,
            font_14: font_14?,
            font_18: font_18?,
            time_source: time_source?,
        })
    }

    fn resolve_app(
        &self,
        app: AppPlan<String>,
        report: &mut ValidationReport,
    ) -> Option<AppPlan<EntityHandle>> {
        let index = Some(app.index);

        let payload = match app.payload {
            PayloadPlan::Generic => Some(PayloadPlan::Generic),
            PayloadPlan::Switch(forms) => self
                .resolve_forms(forms, index, report)
                .map(PayloadPlan::Switch),
            PayloadPlan::Cover(forms) => self
                .resolve_forms(forms, index, report)
                .map(PayloadPlan::Cover),
            PayloadPlan::Climate {
                climate,
                temperature_step,
            } => self
                .resolve_reference(climate, index, report)
                .map(|climate| PayloadPlan::Climate {
                    climate,
                    temperature_step,
                }),
            PayloadPlan::MediaPlayer {
                media_player,
                volume_step,
            } => self
                .resolve_reference(media_player, index, report)
                .map(|media_player| PayloadPlan::MediaPlayer {
                    media_player,
                    volume_step,
                }),
        };

        let unused: Vec<_> = app
            .unused
            .into_iter()
            .map(|reference| self.resolve_reference(reference, index, report))
            .collect();

        Some(AppPlan {
            index: app.index,
            id: app.id,
            name: app.name,
            app_type: app.app_type,
            icon: app.icon,
            color: app.color,
            payload: payload?,
            unused: unused.into_iter().collect::<Option<Vec<_>>>()?,
        })
    }

    fn resolve_forms(
        &self,
        forms: BindingForms<String>,
        index: Option<usize>,
        report: &mut ValidationReport,
    ) -> Option<BindingForms<EntityHandle>> {
        let single = self.resolve_optional(forms.single, index, report);
        let list = forms.list.map(|bindings| {
            bindings
                .into_iter()
                .map(|binding| {
                    let entity = self.resolve_reference(binding.entity, index, report)?;
                    Some(BindingPlan {
                        entity,
                        name: binding.name,
                        color: binding.color,
                    })
                })
                .collect::<Vec<_>>()
        });

        let list = match list {
            Some(bindings) => Some(bindings.into_iter().collect::<Option<Vec<_>>>()?),
            None => None,
        };
        Some(BindingForms {
            single: single?,
            list,
        })
    }

    /// Resolves an optional reference. The outer `Option` is `None` on failure.
    fn resolve_optional(
        &self,
        reference: Option<Reference<String>>,
        index: Option<usize>,
        report: &mut ValidationReport,
    ) -> Option<Option<Reference<EntityHandle>>> {
        match reference {
            Some(reference) => self.resolve_reference(reference, index, report).map(Some),
            None => Some(None),
        }
    }

    fn resolve_reference(
        &self,
        reference: Reference<String>,
        index: Option<usize>,
        report: &mut ValidationReport,
    ) -> Option<Reference<EntityHandle>> {
        if let Some(handle) = self.registry.lookup(reference.kind, &reference.target) {
            return Some(Reference::new(reference.field, reference.kind, handle));
        }

        let mut diagnostic = Diagnostic::resolution(
            reference.field.clone(),
            format!("Unknown {} '{}'", reference.kind, reference.target),
        );
        if let Some(index) = index {
            diagnostic = diagnostic.with_declaration(index);
        }

        let other_kinds = self.registry.kinds_of(&reference.target);
        diagnostic = match other_kinds.first() {
            Some(other) => match other.app_field() {
                Some(field) => diagnostic.with_suggestion(format!(
                    "'{}' is registered as a {other}; reference it with '{field}'",
                    reference.target
                )),
                None => diagnostic.with_suggestion(format!(
                    "'{}' is registered as a {other}, not a {}",
                    reference.target, reference.kind
                )),
            },
            None => diagnostic.with_suggestion(format!(
                "Register '{}' as a {} in the entity registry",
                reference.target, reference.kind
            )),
        };

        report.add_error(diagnostic);
        None
    }
}
