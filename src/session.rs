//! Sending code cells to an interactive shell.
//!
//! Execution is one-way: each code cell's decoded text goes to the shell
//! verbatim and nothing is read back. The shell's own stdout and stderr
//! reach the user directly.

use std::io::Write;
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::error::{Error, Result};
use crate::model::Notebook;

/// Anything code-cell text can be sent to.
///
/// The library ships [`ShellSession`]; hosts that capture output or talk to
/// a remote shell implement this themselves.
pub trait CellSink {
    /// Send one cell's text. No reply is modeled.
    fn send_text(&mut self, text: &str) -> Result<()>;
}

/// An interactive shell process with a piped stdin.
pub struct ShellSession {
    child: Child,
    stdin: ChildStdin,
}

impl ShellSession {
    /// Spawn an interactive shell.
    pub fn spawn(program: &str) -> Result<Self> {
        let mut child = Command::new(program)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Session(format!("failed to start '{}': {}", program, e)))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Session(format!("'{}' has no stdin pipe", program)))?;
        log::debug!("spawned shell '{}' (pid {})", program, child.id());
        Ok(Self { child, stdin })
    }

    /// Close stdin and wait for the shell to exit, returning its exit code.
    pub fn close(mut self) -> Result<i32> {
        drop(self.stdin);
        let status = self
            .child
            .wait()
            .map_err(|e| Error::Session(format!("shell did not exit cleanly: {}", e)))?;
        Ok(status.code().unwrap_or(-1))
    }
}

impl CellSink for ShellSession {
    fn send_text(&mut self, text: &str) -> Result<()> {
        self.stdin.write_all(text.as_bytes())?;
        self.stdin.write_all(b"\n")?;
        self.stdin.flush()?;
        Ok(())
    }
}

/// Send every code cell of the notebook to the sink, in document order.
///
/// Markup cells are skipped. The sink receives exactly what the cells
/// contain: no quoting, no rewriting, no prompt handling. Returns the
/// number of cells sent.
pub fn send_code_cells(notebook: &Notebook, sink: &mut dyn CellSink) -> Result<usize> {
    let mut sent = 0;
    for cell in notebook.code_cells() {
        sink.send_text(&cell.text())?;
        sent += 1;
    }
    log::debug!("sent {} code cells", sent);
    Ok(sent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cell;

    #[derive(Default)]
    struct RecordingSink {
        texts: Vec<String>,
    }

    impl CellSink for RecordingSink {
        fn send_text(&mut self, text: &str) -> Result<()> {
            self.texts.push(text.to_string());
            Ok(())
        }
    }

    fn mixed_notebook() -> Notebook {
        let mut nb = Notebook::new();
        nb.push_cell(Cell::markup(vec!["Setup".to_string()]));
        nb.push_cell(Cell::code(vec!["echo one".to_string()], "shellscript"));
        nb.push_cell(Cell::markup(vec!["Next".to_string()]));
        nb.push_cell(Cell::code(
            vec!["echo two".to_string(), "echo three".to_string()],
            "shellscript",
        ));
        nb
    }

    #[test]
    fn test_send_skips_markup() {
        let mut sink = RecordingSink::default();
        let sent = send_code_cells(&mixed_notebook(), &mut sink).unwrap();
        assert_eq!(sent, 2);
        assert_eq!(sink.texts, vec!["echo one", "echo two\necho three"]);
    }

    #[test]
    fn test_send_empty_notebook() {
        let mut sink = RecordingSink::default();
        let sent = send_code_cells(&Notebook::new(), &mut sink).unwrap();
        assert_eq!(sent, 0);
        assert!(sink.texts.is_empty());
    }

    #[test]
    fn test_spawn_missing_program_is_session_error() {
        let result = ShellSession::spawn("scriptbook-no-such-shell");
        assert!(matches!(result, Err(Error::Session(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_spawn_send_close() {
        let mut session = ShellSession::spawn("cat").unwrap();
        session.send_text("hello").unwrap();
        let code = session.close().unwrap();
        assert_eq!(code, 0);
    }
}
