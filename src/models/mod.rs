pub mod document;
pub mod segment;
pub mod stats;

pub use document::*;
pub use segment::*;
pub use stats::*;
