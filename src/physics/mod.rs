mod ground;
mod layers;
mod plugin;

pub use ground::*;
pub use layers::*;
pub use plugin::*;
