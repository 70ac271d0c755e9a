//! Application-wide constants.

/// The display name of the application.
pub const APP_NAME: &str = "Dial Menu Compiler";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "dialmenu";

/// Controller identifier used when a declaration does not name one.
pub const DEFAULT_CONTROLLER_ID: &str = "dial_menu";

/// Input group every app button is registered in.
pub const GROUP_NAME: &str = "dial_menu_group";
