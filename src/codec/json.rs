//! Raw notebook JSON codec.

use crate::error::Result;
use crate::model::Notebook;
use crate::render::{from_json, to_json, JsonFormat};

use super::NotebookCodec;

/// Codec for raw notebook files (`.snb`).
///
/// Purely structural: cells are stored as a JSON array, so there is no line
/// scanning and no comment-style metadata on either side. Unreadable input
/// decodes to an empty notebook rather than an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    format: JsonFormat,
}

impl JsonCodec {
    /// Create a codec emitting compact JSON, the format's canonical form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec emitting pretty-printed JSON.
    pub fn pretty() -> Self {
        Self {
            format: JsonFormat::Pretty,
        }
    }
}

impl NotebookCodec for JsonCodec {
    fn name(&self) -> &str {
        "json"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["snb"]
    }

    fn decode(&self, data: &[u8]) -> Result<Notebook> {
        Ok(from_json(data))
    }

    fn encode(&self, notebook: &Notebook) -> Result<Vec<u8>> {
        Ok(to_json(notebook, self.format)?.into_bytes())
    }
}
