pub mod export;
pub mod input;
pub mod output;

pub use export::*;
pub use input::*;
pub use output::*;
