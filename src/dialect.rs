//! Script dialects understood by the line-oriented codecs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A script dialect.
///
/// The dialect fixes the comment syntax the scanner recognizes, the language
/// tag attached to code cells, and the default interactive shell used to run
/// them. Both dialects share one scanner; the block-comment rules only apply
/// where [`supports_block_comments`](Self::supports_block_comments) is true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    /// POSIX-style shell scripts: `#` line comments only.
    Shell,
    /// PowerShell scripts: `#` line comments plus `<# ... #>` block comments.
    PowerShell,
}

impl Dialect {
    /// Map a file extension (without the dot, any case) to a dialect.
    ///
    /// # Example
    /// ```
    /// use scriptbook::dialect::Dialect;
    ///
    /// assert_eq!(Dialect::from_extension("sh"), Some(Dialect::Shell));
    /// assert_eq!(Dialect::from_extension("PS1"), Some(Dialect::PowerShell));
    /// assert_eq!(Dialect::from_extension("txt"), None);
    /// ```
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "sh" | "bash" => Some(Dialect::Shell),
            "ps1" | "psm1" => Some(Dialect::PowerShell),
            _ => None,
        }
    }

    /// Detect the dialect from a file path's extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::MissingExtension(path.display().to_string()))?;
        Self::from_extension(ext).ok_or_else(|| Error::UnknownDialect(ext.to_string()))
    }

    /// Map a code-cell language tag back to its dialect.
    pub fn from_language(language: &str) -> Option<Self> {
        match language {
            "shellscript" => Some(Dialect::Shell),
            "powershell" => Some(Dialect::PowerShell),
            _ => None,
        }
    }

    /// File extensions this dialect claims, lowercase without the dot.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Dialect::Shell => &["sh", "bash"],
            Dialect::PowerShell => &["ps1", "psm1"],
        }
    }

    /// Language tag attached to code cells.
    pub fn code_language(&self) -> &'static str {
        match self {
            Dialect::Shell => "shellscript",
            Dialect::PowerShell => "powershell",
        }
    }

    /// Whether the dialect has `<# ... #>` block comments.
    pub fn supports_block_comments(&self) -> bool {
        matches!(self, Dialect::PowerShell)
    }

    /// Default interactive shell for running code cells.
    pub fn shell_program(&self) -> &'static str {
        match self {
            Dialect::Shell => "bash",
            Dialect::PowerShell => "pwsh",
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Shell => write!(f, "shell"),
            Dialect::PowerShell => write!(f, "powershell"),
        }
    }
}
