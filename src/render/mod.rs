//! Rendering module for converting notebooks back to their file formats.

mod json;
mod script;

pub use json::{from_json, to_json, JsonFormat, RawCell};
pub use script::{to_script, ScriptRenderer};
