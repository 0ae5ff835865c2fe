//! Keyboard input model and terminal event conversion.

mod convert;
mod keys;

pub use keys::{Key, KeyCombo, Modifiers};
