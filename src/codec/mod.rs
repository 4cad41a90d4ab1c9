//! Notebook codec module providing a plugin architecture for file formats.
//!
//! This module defines a codec system that allows registering bidirectional
//! codecs for different notebook file formats and dispatching loads and
//! saves based on file extensions.
//!
//! # Example
//!
//! ```
//! use scriptbook::codec::CodecRegistry;
//!
//! let registry = CodecRegistry::with_defaults();
//! let notebook = registry.decode_bytes(b"# greet\necho hi\n", "sh").unwrap();
//! assert_eq!(notebook.cell_count(), 2);
//!
//! let bytes = registry.encode_bytes(&notebook, "sh").unwrap();
//! assert_eq!(bytes, b"# greet\necho hi\n");
//! ```

mod json;
mod script;

pub use json::JsonCodec;
pub use script::ScriptCodec;

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::model::Notebook;

/// Trait for bidirectional notebook codecs.
///
/// Implement this trait to add support for a new notebook file format.
/// Implementations must round-trip: re-encoding a notebook they decoded
/// reproduces the bytes they were given.
pub trait NotebookCodec: Send + Sync {
    /// Get the name of this codec (e.g. `"shell"`, `"powershell"`, `"json"`).
    fn name(&self) -> &str;

    /// Get the supported file extensions for this codec.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["sh"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Decode raw file bytes into a notebook.
    fn decode(&self, data: &[u8]) -> Result<Notebook>;

    /// Encode a notebook into file bytes.
    fn encode(&self, notebook: &Notebook) -> Result<Vec<u8>>;

    /// Check if this codec supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for notebook codecs.
///
/// The registry maps file extensions to codecs and provides the load/save
/// boundary a host builds on.
pub struct CodecRegistry {
    codecs: HashMap<String, Arc<dyn NotebookCodec>>,
    by_name: HashMap<String, Arc<dyn NotebookCodec>>,
}

impl CodecRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            codecs: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the default codecs: both script dialects plus
    /// the raw JSON notebook format.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(ScriptCodec::new(Dialect::Shell)));
        registry.register(Arc::new(ScriptCodec::new(Dialect::PowerShell)));
        registry.register(Arc::new(JsonCodec::new()));
        registry
    }

    /// Register a codec.
    ///
    /// The codec will be registered for all its supported extensions.
    pub fn register(&mut self, codec: Arc<dyn NotebookCodec>) {
        for ext in codec.supported_extensions() {
            self.codecs.insert(ext.to_lowercase(), codec.clone());
        }
        self.by_name.insert(codec.name().to_lowercase(), codec);
    }

    /// Get a codec by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn NotebookCodec>> {
        self.codecs.get(&ext.to_lowercase()).cloned()
    }

    /// Get a codec by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn NotebookCodec>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.codecs.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions.
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.codecs.keys().map(|s| s.as_str()).collect()
    }

    /// Load a notebook from a file, picking the codec by extension.
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<Notebook> {
        let path = path.as_ref();
        let codec = self.codec_for_path(path)?;
        let data = fs::read(path)?;
        log::debug!("opening {} with the {} codec", path.display(), codec.name());
        codec.decode(&data)
    }

    /// Save a notebook to a file, picking the codec by extension.
    pub fn save<P: AsRef<Path>>(&self, path: P, notebook: &Notebook) -> Result<()> {
        let path = path.as_ref();
        let codec = self.codec_for_path(path)?;
        let data = codec.encode(notebook)?;
        fs::write(path, data)?;
        Ok(())
    }

    /// Decode bytes using the codec registered for `ext`.
    pub fn decode_bytes(&self, data: &[u8], ext: &str) -> Result<Notebook> {
        let codec = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedExtension(ext.to_string()))?;
        codec.decode(data)
    }

    /// Encode a notebook using the codec registered for `ext`.
    pub fn encode_bytes(&self, notebook: &Notebook, ext: &str) -> Result<Vec<u8>> {
        let codec = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedExtension(ext.to_string()))?;
        codec.encode(notebook)
    }

    fn codec_for_path(&self, path: &Path) -> Result<Arc<dyn NotebookCodec>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::MissingExtension(path.display().to_string()))?;
        self.get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedExtension(ext.to_string()))
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
