//! Line-oriented script codec.

use crate::dialect::Dialect;
use crate::error::Result;
use crate::model::Notebook;
use crate::parser::parse_bytes;
use crate::render::to_script;

use super::NotebookCodec;

/// Codec for flat script files.
///
/// One instance per dialect; both share the scanner and renderer, the
/// dialect picks the comment syntax, language tags, and file extensions.
#[derive(Debug, Clone, Copy)]
pub struct ScriptCodec {
    dialect: Dialect,
}

impl ScriptCodec {
    /// Create a script codec for one dialect.
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// The codec's dialect.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }
}

impl NotebookCodec for ScriptCodec {
    fn name(&self) -> &str {
        match self.dialect {
            Dialect::Shell => "shell",
            Dialect::PowerShell => "powershell",
        }
    }

    fn supported_extensions(&self) -> &[&str] {
        self.dialect.extensions()
    }

    fn decode(&self, data: &[u8]) -> Result<Notebook> {
        Ok(parse_bytes(data, self.dialect))
    }

    fn encode(&self, notebook: &Notebook) -> Result<Vec<u8>> {
        Ok(to_script(notebook, self.dialect).into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellKind;

    #[test]
    fn test_names_and_extensions() {
        let shell = ScriptCodec::new(Dialect::Shell);
        assert_eq!(shell.name(), "shell");
        assert_eq!(shell.supported_extensions(), &["sh", "bash"]);
        assert!(shell.supports_extension("SH"));

        let pwsh = ScriptCodec::new(Dialect::PowerShell);
        assert_eq!(pwsh.name(), "powershell");
        assert_eq!(pwsh.supported_extensions(), &["ps1", "psm1"]);
    }

    #[test]
    fn test_decode_encode_identity() {
        let codec = ScriptCodec::new(Dialect::PowerShell);
        let input = b"<#\nSetup notes\n#>\nGet-Date\n";
        let notebook = codec.decode(input).unwrap();
        assert_eq!(codec.encode(&notebook).unwrap(), input);
    }

    #[test]
    fn test_decode_kinds() {
        let codec = ScriptCodec::new(Dialect::Shell);
        let notebook = codec.decode(b"# doc\nls\n").unwrap();
        assert_eq!(notebook.cells[0].kind, CellKind::Markup);
        assert_eq!(notebook.cells[1].kind, CellKind::Code);
    }
}
