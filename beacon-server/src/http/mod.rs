mod app;
mod static_files;

pub use app::*;
pub use static_files::*;
