mod parameter;
mod triangle;

pub use parameter::*;
pub use triangle::*;
