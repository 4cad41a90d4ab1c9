//! Script parsing module.
//!
//! Turns raw script text into a [`Notebook`]: detect the line ending, split,
//! then let the [`CellScanner`] group contiguous same-kind lines into cells.

mod scanner;

pub use scanner::CellScanner;

use crate::detect::split_lines;
use crate::dialect::Dialect;
use crate::model::Notebook;

/// Parse script text into a notebook.
///
/// Parsing never fails: any text is a valid script, and an empty input
/// yields a notebook with zero cells.
///
/// # Example
/// ```
/// use scriptbook::{parse_str, Dialect};
///
/// let notebook = parse_str("# list files\nls -la\n", Dialect::Shell);
/// assert_eq!(notebook.cell_count(), 2);
/// assert_eq!(notebook.cells[0].text(), "list files");
/// ```
pub fn parse_str(text: &str, dialect: Dialect) -> Notebook {
    let (line_ending, lines) = split_lines(text);
    let mut notebook = Notebook::with_line_ending(line_ending);

    // Splitting "" still yields one empty line; an empty file has no cells.
    if text.is_empty() {
        return notebook;
    }

    let mut scanner = CellScanner::new(dialect);
    for line in &lines {
        scanner.push_line(line);
    }
    notebook.cells = scanner.finish();

    log::debug!(
        "parsed {} {} lines into {} cells",
        lines.len(),
        dialect,
        notebook.cell_count()
    );

    notebook
}

/// Parse raw script bytes into a notebook.
///
/// Bytes that are not valid UTF-8 are decoded lossily; the line-oriented
/// codecs have no failure path.
pub fn parse_bytes(data: &[u8], dialect: Dialect) -> Notebook {
    parse_str(&String::from_utf8_lossy(data), dialect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::LineEnding;
    use crate::model::CellKind;

    #[test]
    fn test_parse_empty_input_has_no_cells() {
        let notebook = parse_str("", Dialect::Shell);
        assert!(notebook.is_empty());
        assert_eq!(notebook.metadata.line_ending, LineEnding::Lf);
    }

    #[test]
    fn test_parse_records_line_ending() {
        let lf = parse_str("ls\n", Dialect::Shell);
        assert_eq!(lf.metadata.line_ending, LineEnding::Lf);

        let crlf = parse_str("ls\r\n", Dialect::Shell);
        assert_eq!(crlf.metadata.line_ending, LineEnding::CrLf);
    }

    #[test]
    fn test_parse_trailing_newline_becomes_empty_code_line() {
        let notebook = parse_str("# doc\n", Dialect::Shell);
        assert_eq!(notebook.cell_count(), 2);
        assert_eq!(notebook.cells[0].kind, CellKind::Markup);
        assert_eq!(notebook.cells[1].kind, CellKind::Code);
        assert_eq!(notebook.cells[1].source, vec![""]);
    }

    #[test]
    fn test_parse_single_newline() {
        let notebook = parse_str("\n", Dialect::Shell);
        assert_eq!(notebook.cell_count(), 1);
        assert_eq!(notebook.cells[0].source, vec!["", ""]);
    }

    #[test]
    fn test_parse_crlf_block_comment() {
        let notebook = parse_str("<#\r\ndoc line\r\n#>\r\n", Dialect::PowerShell);
        assert_eq!(notebook.metadata.line_ending, LineEnding::CrLf);
        assert_eq!(notebook.cell_count(), 2);
        assert_eq!(notebook.cells[0].source, vec!["doc line"]);
    }

    #[test]
    fn test_parse_bytes_lossy() {
        // Invalid UTF-8 decodes to replacement characters, never an error.
        let notebook = parse_bytes(b"echo \xff\n", Dialect::Shell);
        assert_eq!(notebook.cell_count(), 1);
        assert!(notebook.cells[0].source[0].starts_with("echo "));
    }

    #[test]
    fn test_parse_mixed_content() {
        let text = "#!/bin/bash\n# Greet the user\necho hello\necho world\n# Done\n";
        let notebook = parse_str(text, Dialect::Shell);
        let kinds: Vec<_> = notebook.cells.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                CellKind::Markup,
                CellKind::Code,
                CellKind::Markup,
                CellKind::Code,
            ]
        );
        // The shebang is a comment line like any other.
        assert_eq!(notebook.cells[0].source, vec!["!/bin/bash", "Greet the user"]);
    }
}
