mod model;
mod types;


pub use model::*;
pub use types::*;
