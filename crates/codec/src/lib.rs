mod action;
mod decoder;
pub mod token;


pub use action::*;
pub use decoder::*;
