//! Line-level source formatting.
//!
//! - [`spacing`]: Ordered spacing rules (commas, braces, operators, comments)
//!   applied to one line at a time

pub mod spacing;

pub use spacing::{correct_spacing, SpacingRule, SPACING_RULES};
