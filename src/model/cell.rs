//! Cell-level types.

use serde::{Deserialize, Serialize};

/// Language tag carried by markup (documentation) cells.
pub const MARKUP_LANGUAGE: &str = "markdown";

/// The kind of a notebook cell.
///
/// Discriminants match the raw notebook wire format: 1 = markup, 2 = code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    /// Documentation rendered as markdown.
    Markup = 1,
    /// Executable script code.
    Code = 2,
}

impl CellKind {
    /// Wire value used by the raw notebook JSON format.
    pub fn as_raw(self) -> u8 {
        self as u8
    }

    /// Map a wire value back to a kind.
    ///
    /// Anything that is not the markup value decodes as code, so unknown
    /// kinds degrade to runnable-but-visible rather than disappearing.
    pub fn from_raw(raw: u8) -> Self {
        if raw == CellKind::Markup as u8 {
            CellKind::Markup
        } else {
            CellKind::Code
        }
    }
}

/// How a markup cell was commented in the backing script.
///
/// Only `BlockComment` needs extra state: the two flags record whether the
/// `<#` and `#>` markers stood on lines of their own, which is exactly what
/// the encoder needs to reproduce the original layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum CommentStyle {
    /// Not a comment at all (code cells).
    Disabled,
    /// One `#` per line.
    LineComment,
    /// A `<# ... #>` span.
    BlockComment {
        /// The opening `<#` stood alone on its line.
        open_on_own_line: bool,
        /// The closing `#>` stood alone on its line.
        close_on_own_line: bool,
    },
}

/// A contiguous same-kind span of a script, with comment markers stripped.
///
/// `source` holds decoded lines rather than joined text so empty cells and
/// single-empty-line cells stay distinct across a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Code or markup.
    pub kind: CellKind,

    /// Decoded lines, in document order.
    pub source: Vec<String>,

    /// Language tag ("shellscript", "powershell", or "markdown").
    pub language: String,

    /// How the cell was commented in the source.
    ///
    /// `None` for cells that did not come through the PowerShell codec; the
    /// encoder falls back to line comments in that case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_style: Option<CommentStyle>,
}

impl Cell {
    /// Create a code cell.
    pub fn code(source: Vec<String>, language: impl Into<String>) -> Self {
        Self {
            kind: CellKind::Code,
            source,
            language: language.into(),
            comment_style: None,
        }
    }

    /// Create a markup cell.
    pub fn markup(source: Vec<String>) -> Self {
        Self {
            kind: CellKind::Markup,
            source,
            language: MARKUP_LANGUAGE.to_string(),
            comment_style: None,
        }
    }

    /// Attach a comment style.
    pub fn with_style(mut self, style: CommentStyle) -> Self {
        self.comment_style = Some(style);
        self
    }

    /// Build a cell from joined text, splitting on `\r\n` or `\n`.
    ///
    /// This is the inverse of [`text`](Self::text) and accepts either ending
    /// because raw notebook values may carry both.
    pub fn from_text(kind: CellKind, text: &str, language: impl Into<String>) -> Self {
        let source = text
            .split("\r\n")
            .flat_map(|chunk| chunk.split('\n'))
            .map(str::to_string)
            .collect();
        Self {
            kind,
            source,
            language: language.into(),
            comment_style: None,
        }
    }

    /// The cell's decoded text, lines joined with `\n`.
    ///
    /// This is what a host displays in an editor or sends to a shell. The
    /// backing file's own separators live on the notebook metadata, not here.
    pub fn text(&self) -> String {
        self.source.join("\n")
    }

    /// Number of decoded lines.
    pub fn line_count(&self) -> usize {
        self.source.len()
    }

    /// Check if this is a code cell.
    pub fn is_code(&self) -> bool {
        self.kind == CellKind::Code
    }

    /// Check if this is a markup cell.
    pub fn is_markup(&self) -> bool {
        self.kind == CellKind::Markup
    }

    /// Check if the cell has no lines at all.
    ///
    /// Distinct from a cell holding one empty line.
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}
