mod client;
mod error;
mod headers;
mod settings;
mod transfer;


pub use client::*;
pub use error::*;
pub use headers::*;
pub use settings::*;
pub use transfer::*;
