mod relay;
mod relay_command;
mod relay_handle;
mod router;
mod ws_handler;

pub use relay::*;
pub use relay_command::*;
pub use relay_handle::*;
pub use router::*;
pub use ws_handler::*;
