//! chatfmt: chat entity styling for the terminal.
//! Features: UTF-16 entity offsets, overlapping span compositing to ANSI
//! truecolor, ANSI-aware word wrapping, half-block image rendering.

pub mod compose;
pub mod entity;
mod error;
pub mod halfblock;
pub mod offset;
pub mod span;
pub mod style;
pub mod wrap;

pub use compose::{render_multiline, render_single_line, render_styled_text, RenderOptions};
pub use entity::{Annotation, StyleKind};
pub use error::{DecodeError, ParseAnnotationError, Result};
pub use halfblock::{render_image_block, RenderedImage};

// Test utilities
pub mod test_support;
