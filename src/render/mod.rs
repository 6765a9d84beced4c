pub mod backend;
pub mod markdown;

pub use backend::*;
pub use markdown::*;
