pub mod client;
pub mod config;
pub mod meeting;
pub mod prompts;

pub use client::*;
pub use config::*;
pub use meeting::*;
pub use prompts::*;
