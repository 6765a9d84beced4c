pub mod consolidate;
pub mod labels;
pub mod stats;
pub mod time;

pub use consolidate::*;
pub use labels::*;
pub use stats::*;
pub use time::*;
