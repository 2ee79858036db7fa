//! Reference widget kinds
//!
//! Each widget is an independent implementation of [`crate::MenuItem`]:
//! - [`Label`] - plain, unselectable text
//! - [`Button`] - runs a closure on Enter
//! - [`Toggle`] - boolean flipped by Left/Right/Enter
//! - [`Choice`] - one of a list of options, cycled with wrap-around
//! - [`Slider`] - integer stepped within a range, drawn with a bar
//! - [`TextField`] - free text edited in place with the line editor

mod button;
mod choice;
mod label;
mod slider;
mod text_field;
mod toggle;

pub use button::Button;
pub use choice::Choice;
pub use label::Label;
pub use slider::Slider;
pub use text_field::TextField;
pub use toggle::Toggle;
