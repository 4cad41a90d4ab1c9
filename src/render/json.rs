//! Raw notebook JSON rendering and decoding.
//!
//! The raw format is a structural sibling of the script codecs: a JSON array
//! of `{kind, language, value}` records, no line-oriented parsing involved.
//! Both directions are plain serde passes, so they live together here.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Cell, CellKind, Notebook};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Compact JSON without extra whitespace, the raw format's canonical form
    #[default]
    Compact,
    /// Pretty-printed JSON with indentation
    Pretty,
}

/// One cell as stored in a raw notebook file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCell {
    /// Cell kind wire value: 1 = markup, 2 = code.
    pub kind: u8,
    /// Language tag of the cell.
    pub language: String,
    /// Joined cell text.
    pub value: String,
}

impl From<&Cell> for RawCell {
    fn from(cell: &Cell) -> Self {
        Self {
            kind: cell.kind.as_raw(),
            language: cell.language.clone(),
            value: cell.text(),
        }
    }
}

impl From<RawCell> for Cell {
    fn from(raw: RawCell) -> Self {
        Cell::from_text(CellKind::from_raw(raw.kind), &raw.value, raw.language)
    }
}

/// Decode a raw notebook JSON document.
///
/// Decoding never fails: bytes that do not parse as the expected array
/// yield an empty notebook, so a host always has something to show.
pub fn from_json(data: &[u8]) -> Notebook {
    let raw: Vec<RawCell> = match serde_json::from_slice(data) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("raw notebook did not parse, starting empty: {}", e);
            Vec::new()
        }
    };
    Notebook {
        cells: raw.into_iter().map(Cell::from).collect(),
        metadata: Default::default(),
    }
}

/// Convert a notebook to raw notebook JSON.
pub fn to_json(notebook: &Notebook, format: JsonFormat) -> Result<String> {
    let raw: Vec<RawCell> = notebook.cells.iter().map(RawCell::from).collect();
    let json = match format {
        JsonFormat::Compact => serde_json::to_string(&raw)?,
        JsonFormat::Pretty => serde_json::to_string_pretty(&raw)?,
    };
    Ok(json)
}
