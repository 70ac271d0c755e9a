//! Dial Menu Compiler Library
//!
//! Compiles declarative menu configurations for round rotary-dial displays
//! into a controller model: validated, entity-resolved, colored and laid out
//! on a circle, ready to be replayed against the rendering runtime.

// Module declarations
pub mod cli;
pub mod compiler;
pub mod config;
pub mod constants;
pub mod models;
pub mod runtime;
