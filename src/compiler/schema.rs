//! Structural and range validation of menu declarations.
//!
//! Every problem in the document is collected before returning, so a single
//! run reports all offending declarations.

use regex::Regex;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

use super::error::{CompileError, Diagnostic, ValidationReport, Warning};
use super::plan::{
    AppPlan, BindingForms, BindingPlan, PayloadPlan, Reference, SettingsPlan, ValidatedMenu,
};
use super::CompileOptions;
use crate::constants::DEFAULT_CONTROLLER_ID;
use crate::models::{
    describe_value, AppDeclaration, AppType, ColorValue, CoverItem, EntityKind, Icon, Language,
    MenuDeclaration, Numeric, Peripherals, RgbColor, SwitchItem, TimePeriod,
};

/// Accepted circle radius, in pixels.
pub const RADIUS_RANGE: RangeInclusive<i64> = 50..=110;
/// Default circle radius.
pub const DEFAULT_RADIUS: i64 = 85;
/// Accepted unfocused button diameter.
pub const BUTTON_SIZE_RANGE: RangeInclusive<i64> = 30..=80;
/// Default unfocused button diameter.
pub const DEFAULT_BUTTON_SIZE: i64 = 50;
/// Accepted focused button diameter.
pub const BUTTON_SIZE_FOCUSED_RANGE: RangeInclusive<i64> = 30..=90;
/// Default focused button diameter.
pub const DEFAULT_BUTTON_SIZE_FOCUSED: i64 = 58;
/// Accepted thermostat step.
pub const TEMPERATURE_STEP_RANGE: RangeInclusive<f64> = 0.1..=2.0;
/// Default thermostat step.
pub const DEFAULT_TEMPERATURE_STEP: f64 = 0.5;
/// Accepted volume step.
pub const VOLUME_STEP_RANGE: RangeInclusive<f64> = 0.01..=0.2;
/// Default volume step.
pub const DEFAULT_VOLUME_STEP: f64 = 0.05;
/// Default idle timeout.
pub const DEFAULT_IDLE_TIMEOUT_MS: u32 = 30_000;

const IDENTIFIER_HINT: &str = "Use letters, digits and underscores, not starting with a digit";

fn identifier_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").ok())
        .as_ref()
}

/// Returns `true` for ids made of letters, digits and underscores that do not
/// start with a digit.
#[must_use]
pub fn is_valid_identifier(id: &str) -> bool {
    identifier_pattern().is_some_and(|pattern| pattern.is_match(id))
}

/// Identifier of the app declared at `index`: the declared `id`, or
/// `<controller_id>_app_<index>`.
#[must_use]
pub fn app_id(controller_id: &str, index: usize, app: &AppDeclaration) -> String {
    app.id
        .clone()
        .unwrap_or_else(|| format!("{controller_id}_app_{index}"))
}

/// Validates a menu declaration against the type-conditional schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator {
    options: CompileOptions,
}

impl SchemaValidator {
    /// Creates a validator.
    #[must_use]
    pub const fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    /// Validates the whole declaration.
    ///
    /// # Errors
    ///
    /// Returns every schema error found. Warnings gathered so far travel
    /// with the error.
    pub fn validate(
        &self,
        declaration: &MenuDeclaration,
    ) -> Result<(ValidatedMenu, Vec<Warning>), CompileError> {
        let mut report = ValidationReport::new();

        let settings = validate_settings(declaration, &mut report);
        let controller_id = declaration.id.as_deref().unwrap_or(DEFAULT_CONTROLLER_ID);
        let ids: Vec<_> = declaration
            .apps
            .iter()
            .enumerate()
            .map(|(index, app)| app_id(controller_id, index, app))
            .collect();
        check_unique_ids(controller_id, &ids, &mut report);

        // Every app is checked before any failure short-circuits the list.
        let apps: Option<Vec<_>> = declaration
            .apps
            .iter()
            .zip(ids)
            .enumerate()
            .map(|(index, (app, id))| self.validate_app(index, id, app, &mut report))
            .collect::<Vec<_>>()
            .into_iter()
            .collect();

        match (settings, apps) {
            (Some(settings), Some(apps)) if report.is_valid() => {
                Ok((ValidatedMenu { settings, apps }, report.warnings))
            }
            _ => Err(CompileError { report }),
        }
    }

    /// Validates one app declaration.
    fn validate_app(
        &self,
        index: usize,
        id: String,
        app: &AppDeclaration,
        report: &mut ValidationReport,
    ) -> Option<AppPlan<String>> {
        let field = |key: &str| format!("apps[{index}].{key}");
        let errors_before = report.errors.len();

        if app.id.is_some() && !is_valid_identifier(&id) {
            report.add_error(
                Diagnostic::schema(field("id"), format!("Invalid app id '{id}'"))
                    .with_declaration(index)
                    .with_suggestion(IDENTIFIER_HINT),
            );
        }

        let name = app.name.clone();
        if name.is_none() {
            report.add_error(
                Diagnostic::schema(field("name"), "Missing required key 'name'")
                    .with_declaration(index),
            );
        }

        let tag = app.app_type.as_deref().unwrap_or("generic");
        let app_type = match AppType::from_tag(tag) {
            Some(app_type) => app_type,
            None if self.options.strict_types => {
                report.add_error(
                    Diagnostic::schema(field("type"), format!("Unknown app type '{tag}'"))
                        .with_declaration(index)
                        .with_suggestion(
                            "Use one of: generic, switch, cover, climate, media_player",
                        ),
                );
                AppType::Generic
            }
            None => {
                report.add_warning(Warning::for_app(
                    index,
                    format!("Unknown app type '{tag}', treated as generic"),
                ));
                AppType::Generic
            }
        };

        let icon = match app.icon_type.as_deref() {
            None => Icon::None,
            Some(key) => Icon::from_key(key).unwrap_or_else(|| {
                report.add_error(
                    Diagnostic::schema(field("icon_type"), format!("Unknown icon '{key}'"))
                        .with_declaration(index)
                        .with_suggestion(format!("Use one of: {}", Icon::key_list())),
                );
                Icon::None
            }),
        };

        let color = app
            .color
            .as_ref()
            .and_then(|value| check_color(value, field("color"), Some(index), report));

        // The key set is uniform, so steps are range-checked for every type.
        let temperature_step = check_float(
            app.temperature_step.as_ref(),
            DEFAULT_TEMPERATURE_STEP,
            &TEMPERATURE_STEP_RANGE,
            field("temperature_step"),
            Some(index),
            report,
        );
        let volume_step = check_float(
            app.volume_step.as_ref(),
            DEFAULT_VOLUME_STEP,
            &VOLUME_STEP_RANGE,
            field("volume_step"),
            Some(index),
            report,
        );

        let switches = switch_forms(index, app, report);
        let covers = cover_forms(index, app, report);
        let climate = app
            .climate_id
            .clone()
            .map(|id| Reference::new(field("climate_id"), EntityKind::Climate, id));
        let media_player = app
            .media_player_id
            .clone()
            .map(|id| Reference::new(field("media_player_id"), EntityKind::MediaPlayer, id));

        let mut unused = Vec::new();
        let payload = match app_type {
            AppType::Generic => {
                unused.extend(forms_into_references(switches));
                unused.extend(forms_into_references(covers));
                unused.extend(climate);
                unused.extend(media_player);
                PayloadPlan::Generic
            }
            AppType::Switch => {
                warn_if_both_forms(index, &switches, "switch_id", "switches", report);
                unused.extend(forms_into_references(covers));
                unused.extend(climate);
                unused.extend(media_player);
                PayloadPlan::Switch(switches)
            }
            AppType::Cover => {
                warn_if_both_forms(index, &covers, "cover_id", "covers", report);
                unused.extend(forms_into_references(switches));
                unused.extend(climate);
                unused.extend(media_player);
                PayloadPlan::Cover(covers)
            }
            AppType::Climate => {
                unused.extend(forms_into_references(switches));
                unused.extend(forms_into_references(covers));
                unused.extend(media_player);
                match climate {
                    Some(climate) => PayloadPlan::Climate {
                        climate,
                        temperature_step: temperature_step.unwrap_or_default(),
                    },
                    None => {
                        report.add_error(
                            Diagnostic::schema(
                                field("climate_id"),
                                "Climate apps require 'climate_id'",
                            )
                            .with_declaration(index),
                        );
                        PayloadPlan::Generic
                    }
                }
            }
            AppType::MediaPlayer => {
                unused.extend(forms_into_references(switches));
                unused.extend(forms_into_references(covers));
                unused.extend(climate);
                match media_player {
                    Some(media_player) => PayloadPlan::MediaPlayer {
                        media_player,
                        volume_step: volume_step.unwrap_or_default(),
                    },
                    None => {
                        report.add_error(
                            Diagnostic::schema(
                                field("media_player_id"),
                                "Media player apps require 'media_player_id'",
                            )
                            .with_declaration(index),
                        );
                        PayloadPlan::Generic
                    }
                }
            }
        };

        for reference in &unused {
            report.add_warning(Warning::for_app(
                index,
                format!("'{}' is ignored for {} apps", reference.field, app_type),
            ));
        }

        if report.errors.len() > errors_before {
            return None;
        }

        Some(AppPlan {
            index,
            id,
            name: name?,
            app_type,
            icon,
            color,
            payload,
            unused,
        })
    }
}

/// Validates controller-wide keys.
fn validate_settings(
    declaration: &MenuDeclaration,
    report: &mut ValidationReport,
) -> Option<SettingsPlan<String>> {
    let errors_before = report.errors.len();

    let invalid_id = declaration
        .id
        .as_deref()
        .filter(|id| !is_valid_identifier(id));
    if let Some(id) = invalid_id {
        report.add_error(
            Diagnostic::schema("id", format!("Invalid controller id '{id}'"))
                .with_suggestion(IDENTIFIER_HINT),
        );
    }

    let display = declaration.display_id.clone();
    if display.is_none() {
        report.add_error(Diagnostic::schema(
            "display_id",
            "Missing required key 'display_id'",
        ));
    }

    let radius = check_int(
        declaration.radius.as_ref(),
        DEFAULT_RADIUS,
        &RADIUS_RANGE,
        "radius",
        report,
    );
    let button_size = check_int(
        declaration.button_size.as_ref(),
        DEFAULT_BUTTON_SIZE,
        &BUTTON_SIZE_RANGE,
        "button_size",
        report,
    );
    let button_size_focused = check_int(
        declaration.button_size_focused.as_ref(),
        DEFAULT_BUTTON_SIZE_FOCUSED,
        &BUTTON_SIZE_FOCUSED_RANGE,
        "button_size_focused",
        report,
    );

    let idle_timeout = match &declaration.idle_timeout {
        None => TimePeriod::from_millis(DEFAULT_IDLE_TIMEOUT_MS).ok(),
        Some(value) => match TimePeriod::from_value(value) {
            Ok(period) => Some(period),
            Err(e) => {
                report.add_error(
                    Diagnostic::schema("idle_timeout", format!("{e:#}"))
                        .with_suggestion("Use a positive period such as \"30s\" or \"2min\""),
                );
                None
            }
        },
    };

    let language = match declaration.language.as_deref() {
        None => Some(Language::default()),
        Some(tag) => match Language::from_tag(tag) {
            Ok(language) => Some(language),
            Err(e) => {
                report.add_error(Diagnostic::schema("language", e.to_string()));
                None
            }
        },
    };

    let font_14 = declaration
        .font_14
        .clone()
        .map(|id| Reference::new("font_14", EntityKind::Font, id));
    let font_18 = declaration
        .font_18
        .clone()
        .map(|id| Reference::new("font_18", EntityKind::Font, id));
    let time_source = declaration
        .time_id
        .clone()
        .map(|id| Reference::new("time_id", EntityKind::TimeSource, id));

    if report.errors.len() > errors_before {
        return None;
    }

    Some(SettingsPlan {
        id: declaration
            .id
            .clone()
            .unwrap_or_else(|| DEFAULT_CONTROLLER_ID.to_string()),
        peripherals: Peripherals {
            display: display?,
            touchscreen: declaration.touchscreen.clone(),
            encoder: declaration.encoder.clone(),
            button: declaration.button.clone(),
        },
        radius: radius?,
        button_size: button_size?,
        button_size_focused: button_size_focused?,
        idle_timeout: idle_timeout?,
        language: language?,
        font_14,
        font_18,
        time_source,
    })
}

/// Rejects app ids used twice or equal to the controller id.
fn check_unique_ids(controller_id: &str, ids: &[String], report: &mut ValidationReport) {
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    for (index, id) in ids.iter().enumerate() {
        if id == controller_id {
            report.add_error(
                Diagnostic::schema(
                    format!("apps[{index}].id"),
                    format!("App id '{id}' is already the controller id"),
                )
                .with_declaration(index),
            );
            continue;
        }
        match seen.entry(id.as_str()) {
            Entry::Vacant(slot) => {
                slot.insert(index);
            }
            Entry::Occupied(first) => {
                report.add_error(
                    Diagnostic::schema(
                        format!("apps[{index}].id"),
                        format!("Duplicate app id '{id}', first used by apps[{}]", first.get()),
                    )
                    .with_declaration(index),
                );
            }
        }
    }
}

/// Collects both switch binding forms as written, validating each list item.
fn switch_forms(
    index: usize,
    app: &AppDeclaration,
    report: &mut ValidationReport,
) -> BindingForms<String> {
    let single = app.switch_id.clone().map(|id| {
        Reference::new(format!("apps[{index}].switch_id"), EntityKind::Switch, id)
    });
    let list = app.switches.clone().map(|items| {
        items
            .into_vec()
            .into_iter()
            .enumerate()
            .filter_map(|(item_index, SwitchItem { switch_id, name, color })| {
                let base = format!("apps[{index}].switches[{item_index}]");
                binding_item(
                    index,
                    &base,
                    "switch_id",
                    EntityKind::Switch,
                    switch_id,
                    name,
                    color,
                    report,
                )
            })
            .collect()
    });
    BindingForms { single, list }
}

/// Cover counterpart of [`switch_forms`].
fn cover_forms(
    index: usize,
    app: &AppDeclaration,
    report: &mut ValidationReport,
) -> BindingForms<String> {
    let single = app
        .cover_id
        .clone()
        .map(|id| Reference::new(format!("apps[{index}].cover_id"), EntityKind::Cover, id));
    let list = app.covers.clone().map(|items| {
        items
            .into_vec()
            .into_iter()
            .enumerate()
            .filter_map(|(item_index, CoverItem { cover_id, name, color })| {
                let base = format!("apps[{index}].covers[{item_index}]");
                binding_item(
                    index,
                    &base,
                    "cover_id",
                    EntityKind::Cover,
                    cover_id,
                    name,
                    color,
                    report,
                )
            })
            .collect()
    });
    BindingForms { single, list }
}

/// Validates one binding list item.
fn binding_item(
    index: usize,
    base: &str,
    id_key: &str,
    kind: EntityKind,
    entity_id: Option<String>,
    name: Option<String>,
    color: Option<ColorValue>,
    report: &mut ValidationReport,
) -> Option<BindingPlan<String>> {
    if entity_id.is_none() {
        report.add_error(
            Diagnostic::schema(
                format!("{base}.{id_key}"),
                format!("Missing required key '{id_key}'"),
            )
            .with_declaration(index),
        );
    }
    if name.is_none() {
        report.add_error(
            Diagnostic::schema(format!("{base}.name"), "Missing required key 'name'")
                .with_declaration(index),
        );
    }
    let color = color
        .and_then(|value| check_color(&value, format!("{base}.color"), Some(index), report));

    Some(BindingPlan {
        entity: Reference::new(format!("{base}.{id_key}"), kind, entity_id?),
        name: name?,
        color,
    })
}

/// Flattens both binding forms into plain references.
fn forms_into_references<R>(forms: BindingForms<R>) -> Vec<Reference<R>> {
    forms
        .single
        .into_iter()
        .chain(forms.list.into_iter().flatten().map(|binding| binding.entity))
        .collect()
}

/// Records that the singular form is ignored when both forms are declared.
fn warn_if_both_forms<R>(
    index: usize,
    forms: &BindingForms<R>,
    single_key: &str,
    list_key: &str,
    report: &mut ValidationReport,
) {
    if forms.single.is_some() && forms.list.is_some() {
        report.add_warning(Warning::for_app(
            index,
            format!("Both '{single_key}' and '{list_key}' are set; '{list_key}' takes precedence"),
        ));
    }
}

/// Parses a declared color.
fn check_color(
    value: &ColorValue,
    field: String,
    declaration: Option<usize>,
    report: &mut ValidationReport,
) -> Option<RgbColor> {
    let parsed = match value {
        ColorValue::Int(packed) => RgbColor::try_from_int(*packed),
        ColorValue::Hex(text) => RgbColor::from_hex(text),
        ColorValue::Other(raw) => Err(anyhow::anyhow!(
            "Invalid color '{}'. Expected an integer or a hex string",
            describe_value(raw)
        )),
    };
    match parsed {
        Ok(color) => Some(color),
        Err(e) => {
            let mut diagnostic = Diagnostic::schema(field, format!("{e:#}"))
                .with_suggestion("Use a 24-bit color such as 0xFD5C4C or \"#FD5C4C\"");
            if let Some(index) = declaration {
                diagnostic = diagnostic.with_declaration(index);
            }
            report.add_error(diagnostic);
            None
        }
    }
}

/// Reports a value of the wrong type and returns `None`.
fn expect_number<T: Copy>(
    value: Option<&Numeric<T>>,
    default: T,
    diagnostic: impl FnOnce(String) -> Diagnostic,
    report: &mut ValidationReport,
) -> Option<T> {
    match value {
        None => Some(default),
        Some(Numeric::Value(value)) => Some(*value),
        Some(Numeric::Other(raw)) => {
            report.add_error(diagnostic(format!(
                "Expected a number, got '{}'",
                describe_value(raw)
            )));
            None
        }
    }
}

/// Applies a default and checks an integer range.
fn check_int(
    value: Option<&Numeric<i64>>,
    default: i64,
    range: &RangeInclusive<i64>,
    field: &str,
    report: &mut ValidationReport,
) -> Option<u16> {
    let value = expect_number(
        value,
        default,
        |message| Diagnostic::schema(field, message),
        report,
    )?;
    if !range.contains(&value) {
        report.add_error(Diagnostic::schema(
            field,
            format!(
                "Value {value} out of range {}..={}",
                range.start(),
                range.end()
            ),
        ));
        return None;
    }
    u16::try_from(value).ok()
}

/// Applies a default and checks a float range.
fn check_float(
    value: Option<&Numeric<f64>>,
    default: f64,
    range: &RangeInclusive<f64>,
    field: String,
    declaration: Option<usize>,
    report: &mut ValidationReport,
) -> Option<f32> {
    let diagnostic = |message: String| {
        let diagnostic = Diagnostic::schema(field.clone(), message);
        match declaration {
            Some(index) => diagnostic.with_declaration(index),
            None => diagnostic,
        }
    };
    let value = expect_number(value, default, &diagnostic, report)?;
    if !range.contains(&value) {
        report.add_error(diagnostic(format!(
            "Value {value} out of range {}..={}",
            range.start(),
            range.end()
        )));
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let value = value as f32;
    Some(value)
}
