//! File processing pipeline.
//!
//! A source file is split into lines and passed through the enabled style
//! modules in a fixed order:
//!
//! 1. **`sort_includes`** - each contiguous batch of `#include` lines is
//!    replaced by its sorted, sectioned form
//! 2. **`correct_spacing`** - every other line is run through the spacing rules
//!
//! The main entry point is [`stylify_source`], which returns both the original
//! and the stylified lines so callers can diff or write them back.

pub mod pipeline;

pub use pipeline::{stylify_lines, stylify_source, stylify_stream, Stylified};
