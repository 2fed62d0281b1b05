pub mod client;
pub mod core;
pub mod error;

pub use client::*;
pub use self::core::*;
pub use error::*;
