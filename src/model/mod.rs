//! Notebook model types shared by every codec.
//!
//! This module defines the intermediate representation (IR) that bridges
//! script parsing and script rendering. The model is dialect-agnostic and
//! can represent content from any supported script format.

mod cell;
mod notebook;

pub use cell::{Cell, CellKind, CommentStyle, MARKUP_LANGUAGE};
pub use notebook::{Notebook, NotebookMetadata};
