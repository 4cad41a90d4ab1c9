//! Notebook-level types.

use serde::{Deserialize, Serialize};

use super::cell::{Cell, CellKind};
use crate::detect::LineEnding;

/// Document-level metadata preserved across a round trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookMetadata {
    /// Line-ending style of the backing file.
    pub line_ending: LineEnding,
}

/// An ordered sequence of cells decoded from one script file.
///
/// The notebook is the shared intermediate between every codec: the script
/// codecs fill it by scanning lines, the raw JSON codec by structural
/// deserialization. Cell order always equals document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    /// Cells in document order.
    pub cells: Vec<Cell>,

    /// Document-level metadata.
    pub metadata: NotebookMetadata,
}

impl Notebook {
    /// Create an empty notebook with default (LF) metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty notebook with the given line ending.
    pub fn with_line_ending(line_ending: LineEnding) -> Self {
        Self {
            cells: Vec::new(),
            metadata: NotebookMetadata { line_ending },
        }
    }

    /// Number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if the notebook has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Append a cell.
    pub fn push_cell(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// Cells of one kind, in document order.
    pub fn cells_of_kind(&self, kind: CellKind) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(move |c| c.kind == kind)
    }

    /// Code cells, in document order.
    pub fn code_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells_of_kind(CellKind::Code)
    }

    /// Markup cells, in document order.
    pub fn markup_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells_of_kind(CellKind::Markup)
    }

    /// Total decoded line count across all cells.
    pub fn line_count(&self) -> usize {
        self.cells.iter().map(|c| c.line_count()).sum()
    }
}
