//! Compilation pipeline from menu declarations to a controller model.
//!
//! Stages run in order and each one only sees the previous stage's output:
//!
//! 1. [`schema::SchemaValidator`] checks structure, ranges and defaults
//! 2. [`resolver::EntityResolver`] binds ids to registry handles
//! 3. [`assembler::assemble`] lays apps out, builds them with
//!    [`builder::build_app`] and attaches them to the controller
//!
//! Nothing is built unless validation and resolution both succeed.

pub mod assembler;
pub mod builder;
pub mod error;
pub mod geometry;
pub mod palette;
pub mod plan;
pub mod resolver;
pub mod schema;

use serde::Serialize;

use crate::models::{Controller, MenuDeclaration};

pub use error::{CompileError, Diagnostic, DiagnosticKind, ValidationReport, Warning};
pub use plan::{ResolvedMenu, ValidatedMenu};
pub use resolver::{EntityRegistry, EntityResolver, InMemoryRegistry};
pub use schema::SchemaValidator;

/// Options that tighten compilation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Reject unknown app type tags instead of treating them as generic
    pub strict_types: bool,
}

/// Successful compilation output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Compilation {
    /// Assembled controller
    pub controller: Controller,
    /// Non-blocking issues found along the way
    pub warnings: Vec<Warning>,
}

/// Runs the full pipeline against one entity registry.
pub struct Compiler<'a> {
    registry: &'a dyn EntityRegistry,
    options: CompileOptions,
}

impl<'a> Compiler<'a> {
    /// Creates a compiler with default options.
    #[must_use]
    pub fn new(registry: &'a dyn EntityRegistry) -> Self {
        Self {
            registry,
            options: CompileOptions::default(),
        }
    }

    /// Replaces the compile options.
    #[must_use]
    pub const fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// Validates and resolves a declaration without building anything.
    ///
    /// # Errors
    ///
    /// Returns every schema error, or every resolution error if the schema
    /// is valid. Warnings collected before the failure travel with it.
    pub fn check(
        &self,
        declaration: &MenuDeclaration,
    ) -> Result<(ResolvedMenu, Vec<Warning>), CompileError> {
        let (validated, warnings) = SchemaValidator::new(self.options).validate(declaration)?;

        match EntityResolver::new(self.registry).resolve(validated) {
            Ok(resolved) => Ok((resolved, warnings)),
            Err(error) => {
                let mut report = ValidationReport {
                    errors: Vec::new(),
                    warnings,
                };
                report.absorb(error.report);
                Err(CompileError { report })
            }
        }
    }

    /// Compiles a declaration into a controller.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] holding every problem found. No partial
    /// controller is produced.
    pub fn compile(&self, declaration: &MenuDeclaration) -> Result<Compilation, CompileError> {
        let (resolved, warnings) = self.check(declaration)?;
        let controller = assembler::assemble(resolved)?;

        tracing::info!(
            "Compiled '{}' with {} apps, language {} ({} warnings)",
            controller.settings.id,
            controller.app_count(),
            controller.language(),
            warnings.len()
        );

        Ok(Compilation {
            controller,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppDeclaration, EntityKind};

    fn registry() -> InMemoryRegistry {
        InMemoryRegistry::new()
            .with(EntityKind::Switch, "hall")
            .with(EntityKind::Climate, "thermostat")
    }

    #[test]
    fn test_compile_builds_controller() {
        let mut switch = AppDeclaration::new("Hall", "switch");
        switch.switch_id = Some("hall".into());
        let declaration = MenuDeclaration::new("round_display", vec![switch]);

        let registry = registry();
        let compilation = Compiler::new(&registry).compile(&declaration).unwrap();
        assert_eq!(compilation.controller.app_count(), 1);
        assert!(compilation.warnings.is_empty());
    }

    #[test]
    fn test_schema_warnings_survive_resolution_failure() {
        let mut odd = AppDeclaration::new("Odd", "light");
        odd.switch_id = Some("hall".into());
        let mut climate = AppDeclaration::new("Heat", "climate");
        climate.climate_id = Some("attic".into());
        let declaration = MenuDeclaration::new("round_display", vec![odd, climate]);

        let registry = registry();
        let error = Compiler::new(&registry).compile(&declaration).unwrap_err();
        assert!(error.has_kind(DiagnosticKind::Resolution));
        assert!(!error.report.warnings.is_empty());
        assert!(error.report.warnings[0].message.contains("light"));
    }

    #[test]
    fn test_strict_types_rejects_unknown_tag() {
        let declaration =
            MenuDeclaration::new("round_display", vec![AppDeclaration::new("Odd", "light")]);

        let registry = registry();
        assert!(Compiler::new(&registry).compile(&declaration).is_ok());

        let strict = Compiler::new(&registry).with_options(CompileOptions { strict_types: true });
        let error = strict.compile(&declaration).unwrap_err();
        assert!(error.has_kind(DiagnosticKind::Schema));
    }
}
