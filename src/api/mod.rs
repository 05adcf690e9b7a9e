//! API Module - Terminal presentation
//!
//! - `commands` - CLI command handlers
//! - `form` - Interactive field-by-field form
//! - `render` - Text rendering of results, errors and service info

pub mod commands;
pub mod form;
pub mod render;
