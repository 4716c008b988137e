mod id_generator;
mod registry;

pub use id_generator::*;
pub use registry::*;
