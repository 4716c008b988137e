pub use beacon_core::model::{ClientId, RoomId};

pub mod model {
    pub use beacon_core::model::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use beacon_server::*;
}

#[cfg(feature = "client")]
pub mod client {
    pub use beacon_client::*;
}
