mod asset;
mod checksum;
mod name;
mod signature;
mod string_serde;
mod time;
mod types;


pub use asset::*;
pub use checksum::*;
pub use name::*;
pub use signature::*;
pub use time::*;
pub use types::*;
