mod client;
mod error;
mod events;
mod reconnect;

pub use client::*;
pub use error::*;
pub use events::*;
pub use reconnect::*;
