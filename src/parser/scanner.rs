//! Line scanner that groups script lines into cells.

use regex::Regex;

use crate::dialect::Dialect;
use crate::model::{Cell, CellKind, CommentStyle};

/// Scanner state, advanced once per input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Nothing pending: start of input, or just after a block comment closed.
    Idle,
    /// Accumulating a run of same-kind lines.
    Run(CellKind),
    /// Between `<#` and `#>`, buffering lines verbatim.
    BlockComment {
        /// Whether the opening `<#` stood alone on its line.
        open_on_own_line: bool,
    },
}

/// Groups the lines of one script into cells.
///
/// One scanner handles one document: feed every line in order with
/// [`push_line`](Self::push_line), then call [`finish`](Self::finish).
/// The same machine serves both dialects; the block-comment transitions
/// only fire when the dialect has block comments.
///
/// Classification is per line: a `#` in column zero makes the line markup,
/// anything else (including blank lines) is code. Contiguous same-kind
/// lines form one cell, and entering or leaving a block comment always
/// starts a new cell.
pub struct CellScanner {
    dialect: Dialect,
    state: ScanState,
    buffer: Vec<String>,
    cells: Vec<Cell>,
    comment_prefix: Regex,
}

impl CellScanner {
    /// Create a scanner for one dialect.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            state: ScanState::Idle,
            buffer: Vec::new(),
            cells: Vec::new(),
            // One leading `#` plus the whitespace run after it.
            comment_prefix: Regex::new(r"^#\s*").unwrap(),
        }
    }

    /// Feed the next line of the document.
    pub fn push_line(&mut self, line: &str) {
        if let ScanState::BlockComment { open_on_own_line } = self.state {
            if let Some(stripped) = strip_block_close(line) {
                let close_on_own_line = stripped.is_empty();
                if !close_on_own_line {
                    self.buffer.push(stripped.to_string());
                }
                self.emit_block(open_on_own_line, close_on_own_line);
            } else {
                self.buffer.push(line.to_string());
            }
            return;
        }

        if self.dialect.supports_block_comments() {
            if let Some(rest) = line.strip_prefix("<#") {
                self.open_block(rest);
                return;
            }
        }

        let kind = classify_line(line);
        let decoded = if kind == CellKind::Markup {
            self.comment_prefix.replace(line, "").into_owned()
        } else {
            line.to_string()
        };

        match self.state {
            ScanState::Run(current) if current == kind => self.buffer.push(decoded),
            _ => {
                self.flush_run();
                self.state = ScanState::Run(kind);
                self.buffer.push(decoded);
            }
        }
    }

    /// Consume the scanner, flushing whatever is still pending.
    ///
    /// An unterminated block comment is not an error: its buffered lines
    /// flush as a block-comment cell with the close marker treated as
    /// standing on its own (missing) line, so re-encoding repairs the file.
    pub fn finish(mut self) -> Vec<Cell> {
        match self.state {
            ScanState::BlockComment { open_on_own_line } if !self.buffer.is_empty() => {
                log::warn!("unterminated block comment at end of input");
                self.emit_block(open_on_own_line, true);
            }
            _ => self.flush_run(),
        }
        self.cells
    }

    /// Handle a line starting with `<#`; `rest` is everything after the marker.
    fn open_block(&mut self, rest: &str) {
        self.flush_run();
        let rest = rest.trim_start();
        if rest.is_empty() {
            self.state = ScanState::BlockComment {
                open_on_own_line: true,
            };
            return;
        }
        if let Some(inner) = strip_block_close(rest) {
            // Open and close on one line: a complete single-line cell.
            self.cells.push(Cell::markup(vec![inner.to_string()]).with_style(
                CommentStyle::BlockComment {
                    open_on_own_line: false,
                    close_on_own_line: false,
                },
            ));
            self.state = ScanState::Idle;
            return;
        }
        self.buffer.push(rest.to_string());
        self.state = ScanState::BlockComment {
            open_on_own_line: false,
        };
    }

    /// Flush a pending same-kind run, if any.
    fn flush_run(&mut self) {
        if let ScanState::Run(kind) = self.state {
            if !self.buffer.is_empty() {
                let source = std::mem::take(&mut self.buffer);
                let mut cell = match kind {
                    CellKind::Markup => Cell::markup(source),
                    CellKind::Code => Cell::code(source, self.dialect.code_language()),
                };
                if self.dialect.supports_block_comments() {
                    cell = cell.with_style(match kind {
                        CellKind::Markup => CommentStyle::LineComment,
                        CellKind::Code => CommentStyle::Disabled,
                    });
                }
                self.cells.push(cell);
            }
        }
        self.state = ScanState::Idle;
        self.buffer.clear();
    }

    /// Emit the buffered block-comment lines as a markup cell.
    fn emit_block(&mut self, open_on_own_line: bool, close_on_own_line: bool) {
        let source = std::mem::take(&mut self.buffer);
        self.cells
            .push(
                Cell::markup(source).with_style(CommentStyle::BlockComment {
                    open_on_own_line,
                    close_on_own_line,
                }),
            );
        self.state = ScanState::Idle;
    }
}

/// Classify one line: `#` in column zero is markup, everything else code.
fn classify_line(line: &str) -> CellKind {
    if line.starts_with('#') {
        CellKind::Markup
    } else {
        CellKind::Code
    }
}

/// If `line` ends a block comment, return it without the `#>` marker and
/// the whitespace run before it.
fn strip_block_close(line: &str) -> Option<&str> {
    line.strip_suffix("#>").map(str::trim_end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(dialect: Dialect, lines: &[&str]) -> Vec<Cell> {
        let mut scanner = CellScanner::new(dialect);
        for line in lines {
            scanner.push_line(line);
        }
        scanner.finish()
    }

    #[test]
    fn test_alternating_runs() {
        let cells = scan(
            Dialect::Shell,
            &["# install deps", "# then build", "make deps", "make", "# done"],
        );
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0].kind, CellKind::Markup);
        assert_eq!(cells[0].source, vec!["install deps", "then build"]);
        assert_eq!(cells[1].kind, CellKind::Code);
        assert_eq!(cells[1].source, vec!["make deps", "make"]);
        assert_eq!(cells[2].kind, CellKind::Markup);
        assert_eq!(cells[2].source, vec!["done"]);
    }

    #[test]
    fn test_comment_prefix_stripping() {
        let cells = scan(Dialect::Shell, &["#", "# x", "#x", "#   spaced", "#\ttabbed"]);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].source, vec!["", "x", "x", "spaced", "tabbed"]);
    }

    #[test]
    fn test_blank_lines_are_code() {
        let cells = scan(Dialect::Shell, &["# doc", "", "ls"]);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[1].kind, CellKind::Code);
        assert_eq!(cells[1].source, vec!["", "ls"]);
    }

    #[test]
    fn test_shell_cells_carry_no_style() {
        let cells = scan(Dialect::Shell, &["# doc", "ls"]);
        assert!(cells.iter().all(|c| c.comment_style.is_none()));
    }

    #[test]
    fn test_powershell_run_styles() {
        let cells = scan(Dialect::PowerShell, &["# doc", "Get-Date"]);
        assert_eq!(cells[0].comment_style, Some(CommentStyle::LineComment));
        assert_eq!(cells[1].comment_style, Some(CommentStyle::Disabled));
        assert_eq!(cells[1].language, "powershell");
    }

    #[test]
    fn test_block_comment_both_markers_alone() {
        let cells = scan(Dialect::PowerShell, &["<#", "first", "second", "#>"]);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].source, vec!["first", "second"]);
        assert_eq!(
            cells[0].comment_style,
            Some(CommentStyle::BlockComment {
                open_on_own_line: true,
                close_on_own_line: true,
            })
        );
    }

    #[test]
    fn test_block_comment_open_shares_line() {
        let cells = scan(Dialect::PowerShell, &["<# first", "#>"]);
        assert_eq!(cells[0].source, vec!["first"]);
        assert_eq!(
            cells[0].comment_style,
            Some(CommentStyle::BlockComment {
                open_on_own_line: false,
                close_on_own_line: true,
            })
        );
    }

    #[test]
    fn test_block_comment_close_shares_line() {
        let cells = scan(Dialect::PowerShell, &["<#", "first", "last #>"]);
        assert_eq!(cells[0].source, vec!["first", "last"]);
        assert_eq!(
            cells[0].comment_style,
            Some(CommentStyle::BlockComment {
                open_on_own_line: true,
                close_on_own_line: false,
            })
        );
    }

    #[test]
    fn test_block_comment_both_markers_share_lines() {
        let cells = scan(Dialect::PowerShell, &["<# hello", "world #>", "Get-Item ."]);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].source, vec!["hello", "world"]);
        assert_eq!(
            cells[0].comment_style,
            Some(CommentStyle::BlockComment {
                open_on_own_line: false,
                close_on_own_line: false,
            })
        );
        assert_eq!(cells[1].kind, CellKind::Code);
        assert_eq!(cells[1].source, vec!["Get-Item ."]);
    }

    #[test]
    fn test_block_comment_single_line() {
        let cells = scan(Dialect::PowerShell, &["<# one liner #>"]);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].source, vec!["one liner"]);
        assert_eq!(
            cells[0].comment_style,
            Some(CommentStyle::BlockComment {
                open_on_own_line: false,
                close_on_own_line: false,
            })
        );
    }

    #[test]
    fn test_block_comment_single_line_empty() {
        // "<# #>" and "<##>" both decode to one empty markup line.
        for line in ["<# #>", "<##>"] {
            let cells = scan(Dialect::PowerShell, &[line]);
            assert_eq!(cells.len(), 1, "input: {line}");
            assert_eq!(cells[0].source, vec![""]);
            assert_eq!(
                cells[0].comment_style,
                Some(CommentStyle::BlockComment {
                    open_on_own_line: false,
                    close_on_own_line: false,
                })
            );
        }
    }

    #[test]
    fn test_empty_block_comment_markers_only() {
        let cells = scan(Dialect::PowerShell, &["<#", "#>"]);
        assert_eq!(cells.len(), 1);
        assert!(cells[0].source.is_empty());
        assert_eq!(
            cells[0].comment_style,
            Some(CommentStyle::BlockComment {
                open_on_own_line: true,
                close_on_own_line: true,
            })
        );
    }

    #[test]
    fn test_block_open_flushes_pending_run() {
        let cells = scan(Dialect::PowerShell, &["Get-Date", "<#", "doc", "#>"]);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].kind, CellKind::Code);
        assert_eq!(cells[1].kind, CellKind::Markup);
    }

    #[test]
    fn test_block_interior_lines_kept_verbatim() {
        // `#` and `<#` inside an open block are content, not markers.
        let cells = scan(Dialect::PowerShell, &["<#", "# not a heading", "<# nested?", "#>"]);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].source, vec!["# not a heading", "<# nested?"]);
    }

    #[test]
    fn test_block_close_needs_line_end() {
        // A `#>` in the middle of a line does not close the block.
        let cells = scan(Dialect::PowerShell, &["<#", "before #> after", "#>"]);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].source, vec!["before #> after"]);
    }

    #[test]
    fn test_block_close_with_leading_whitespace_is_own_line() {
        let cells = scan(Dialect::PowerShell, &["<#", "doc", "   #>"]);
        assert_eq!(cells[0].source, vec!["doc"]);
        assert_eq!(
            cells[0].comment_style,
            Some(CommentStyle::BlockComment {
                open_on_own_line: true,
                close_on_own_line: true,
            })
        );
    }

    #[test]
    fn test_unterminated_block_flushes_as_block() {
        let cells = scan(Dialect::PowerShell, &["<#", "dangling"]);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].source, vec!["dangling"]);
        assert_eq!(
            cells[0].comment_style,
            Some(CommentStyle::BlockComment {
                open_on_own_line: true,
                close_on_own_line: true,
            })
        );
    }

    #[test]
    fn test_unterminated_empty_block_emits_nothing() {
        let cells = scan(Dialect::PowerShell, &["ls", "<#"]);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].kind, CellKind::Code);
    }

    #[test]
    fn test_shell_treats_block_markers_as_code() {
        let cells = scan(Dialect::Shell, &["<#", "doc", "#>"]);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].kind, CellKind::Code);
        assert_eq!(cells[0].source, vec!["<#", "doc"]);
        // "#>" starts with `#`, so in shell it reads as a comment.
        assert_eq!(cells[1].kind, CellKind::Markup);
        assert_eq!(cells[1].source, vec![">"]);
    }

    #[test]
    fn test_trailing_run_flushes() {
        let cells = scan(Dialect::PowerShell, &["# only docs"]);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].comment_style, Some(CommentStyle::LineComment));
    }

    #[test]
    fn test_no_lines_no_cells() {
        let cells = scan(Dialect::PowerShell, &[]);
        assert!(cells.is_empty());
    }
}
