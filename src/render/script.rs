//! Script rendering for notebooks.
//!
//! The exact inverse of the line scanner: re-add the comment markers the
//! scanner stripped, then join with the notebook's stored line ending.

use crate::dialect::Dialect;
use crate::model::{Cell, CellKind, CommentStyle, Notebook};

/// Convert a notebook to script text.
pub fn to_script(notebook: &Notebook, dialect: Dialect) -> String {
    let renderer = ScriptRenderer::new(dialect);
    renderer.render(notebook)
}

/// Script renderer.
pub struct ScriptRenderer {
    dialect: Dialect,
}

impl ScriptRenderer {
    /// Create a new script renderer for one dialect.
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Render a notebook to script text.
    ///
    /// Cells are emitted in order; the concatenated lines are joined with
    /// the ending stored on the notebook metadata. An empty notebook
    /// renders as the empty string.
    pub fn render(&self, notebook: &Notebook) -> String {
        let mut lines: Vec<String> = Vec::with_capacity(notebook.line_count() + 2);
        for cell in &notebook.cells {
            self.render_cell(&mut lines, cell);
        }
        lines.join(notebook.metadata.line_ending.as_str())
    }

    fn render_cell(&self, lines: &mut Vec<String>, cell: &Cell) {
        match cell.kind {
            CellKind::Code => lines.extend(cell.source.iter().cloned()),
            CellKind::Markup => self.render_markup(lines, cell),
        }
    }

    fn render_markup(&self, lines: &mut Vec<String>, cell: &Cell) {
        if self.dialect.supports_block_comments() {
            if let Some(CommentStyle::BlockComment {
                open_on_own_line,
                close_on_own_line,
            }) = cell.comment_style
            {
                self.render_block_comment(lines, cell, open_on_own_line, close_on_own_line);
                return;
            }
        }
        // Line comments are the fallback for every other (or missing) style.
        lines.extend(cell.source.iter().map(|line| format!("# {}", line)));
    }

    fn render_block_comment(
        &self,
        lines: &mut Vec<String>,
        cell: &Cell,
        open_on_own_line: bool,
        close_on_own_line: bool,
    ) {
        let mut text: Vec<String> = cell.source.clone();

        if open_on_own_line {
            lines.push("<#".to_string());
        } else if let Some(first) = text.first_mut() {
            *first = format!("<# {}", first);
        } else {
            // No content line to share with; give the marker its own line.
            lines.push("<#".to_string());
        }

        if close_on_own_line {
            lines.append(&mut text);
            lines.push("#>".to_string());
        } else if let Some(last) = text.last_mut() {
            last.push_str(" #>");
            lines.append(&mut text);
        } else {
            lines.push("#>".to_string());
        }
    }
}
