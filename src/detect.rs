//! Line-ending detection for script files.

use serde::{Deserialize, Serialize};

/// Line-ending style of a script file.
///
/// Detected once when a file is decoded and stored on the notebook, then
/// reused verbatim when the notebook is encoded back to text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineEnding {
    /// Unix-style `\n`.
    #[default]
    Lf,
    /// Windows-style `\r\n`.
    CrLf,
}

impl LineEnding {
    /// Detect the line-ending style of a document.
    ///
    /// A single `\r\n` anywhere in the text selects `CrLf` for the whole
    /// file; everything else is `Lf`. Files that mix both styles are
    /// treated as entirely `CrLf`, so a round trip normalizes them.
    ///
    /// # Example
    /// ```
    /// use scriptbook::detect::LineEnding;
    ///
    /// assert_eq!(LineEnding::detect("ls\npwd\n"), LineEnding::Lf);
    /// assert_eq!(LineEnding::detect("ls\r\npwd\r\n"), LineEnding::CrLf);
    /// ```
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    /// The separator string this style joins lines with.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

impl std::fmt::Display for LineEnding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineEnding::Lf => write!(f, "LF"),
            LineEnding::CrLf => write!(f, "CRLF"),
        }
    }
}

/// Split a document into lines on its detected ending.
///
/// Returns the ending together with the lines so the decoder and encoder
/// agree on one style for the whole file. Splitting is exact: no trimming,
/// and a trailing separator yields a final empty line.
pub fn split_lines(text: &str) -> (LineEnding, Vec<&str>) {
    let ending = LineEnding::detect(text);
    let lines = text.split(ending.as_str()).collect();
    (ending, lines)
}
