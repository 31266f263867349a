mod client;
mod error;
mod types;

pub use client::ProfileClient;
pub use error::Error;
pub use types::*;
