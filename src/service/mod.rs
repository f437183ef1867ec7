pub mod client;
pub mod manager;

pub use client::*;
pub use manager::*;
