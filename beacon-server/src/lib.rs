pub mod config;
pub mod error;
pub mod http;
pub mod registry;
pub mod room;
pub mod server;
pub mod signaling;

pub use config::*;
pub use error::*;
pub use http::*;
pub use registry::*;
pub use room::*;
pub use server::*;
pub use signaling::*;
