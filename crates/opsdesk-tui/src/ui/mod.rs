//! Terminal UI module using ratatui.
//!
//! - `render`: frame rendering for the shell and the public pages
//! - `input`: keyboard event handling
//! - `styles`: color scheme and text styling
//! - `icons`: navigation icon lookup

pub mod icons;
pub mod input;
pub mod render;
pub mod styles;
