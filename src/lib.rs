//! # scriptbook
//!
//! Lossless conversion between flat script files and notebook cells.
//!
//! A shell or PowerShell script is an alternating sequence of executable
//! code and `#`-commented documentation. This library decodes such a file
//! into an ordered list of typed cells and encodes cells back into a
//! byte-identical file, preserving the original line endings and (for
//! PowerShell) the exact placement of `<# ... #>` block-comment markers.
//!
//! ## Quick Start
//!
//! ```
//! use scriptbook::{parse_str, render, Dialect};
//!
//! let notebook = parse_str("# count files\nls | wc -l\n", Dialect::Shell);
//! assert_eq!(notebook.cell_count(), 2);
//! assert_eq!(notebook.cells[0].text(), "count files");
//!
//! let script = render::to_script(&notebook, Dialect::Shell);
//! assert_eq!(script, "# count files\nls | wc -l\n");
//! ```
//!
//! ## Features
//!
//! - **Two script dialects**: shell (`#` line comments) and PowerShell
//!   (`#` plus `<# ... #>` block comments), served by one shared scanner
//! - **Exact round trip**: encoding a decoded file reproduces its bytes
//! - **Raw notebook JSON**: a structural `.snb` format for hosts that
//!   store cells directly
//! - **Codec registry**: extension-based dispatch for loads and saves
//! - **Shell sessions**: send code cells to an interactive shell

pub mod codec;
pub mod detect;
pub mod dialect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod session;

// Re-export commonly used types
pub use codec::{CodecRegistry, JsonCodec, NotebookCodec, ScriptCodec};
pub use detect::LineEnding;
pub use dialect::Dialect;
pub use error::{Error, Result};
pub use model::{Cell, CellKind, CommentStyle, Notebook, NotebookMetadata};
pub use parser::{parse_bytes, parse_str, CellScanner};
pub use render::{JsonFormat, RawCell};
pub use session::{send_code_cells, CellSink, ShellSession};

use std::path::Path;

/// Parse a script file into a notebook, detecting the dialect from the
/// file extension.
///
/// # Arguments
///
/// * `path` - Path to the script file (`.sh`, `.bash`, `.ps1`, `.psm1`)
///
/// # Example
///
/// ```no_run
/// use scriptbook::parse_file;
///
/// let notebook = parse_file("deploy.sh").unwrap();
/// println!("Cells: {}", notebook.cell_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Notebook> {
    let path = path.as_ref();
    let dialect = Dialect::from_path(path)?;
    let data = std::fs::read(path)?;
    Ok(parse_bytes(&data, dialect))
}

/// Load a notebook from any supported file, picking the codec by extension.
///
/// Script files go through the line scanner; `.snb` files through the raw
/// JSON codec.
///
/// # Example
///
/// ```no_run
/// use scriptbook::open;
///
/// let notebook = open("session.snb").unwrap();
/// ```
pub fn open<P: AsRef<Path>>(path: P) -> Result<Notebook> {
    CodecRegistry::with_defaults().open(path)
}

/// Save a notebook to any supported file, picking the codec by extension.
///
/// # Example
///
/// ```no_run
/// use scriptbook::{open, save};
///
/// let notebook = open("setup.ps1").unwrap();
/// save("setup.snb", &notebook).unwrap();
/// ```
pub fn save<P: AsRef<Path>>(path: P, notebook: &Notebook) -> Result<()> {
    CodecRegistry::with_defaults().save(path, notebook)
}

/// Convert a notebook to script text.
pub fn to_script(notebook: &Notebook, dialect: Dialect) -> String {
    render::to_script(notebook, dialect)
}

/// Convert a notebook to raw notebook JSON.
pub fn to_json(notebook: &Notebook, format: JsonFormat) -> Result<String> {
    render::to_json(notebook, format)
}
