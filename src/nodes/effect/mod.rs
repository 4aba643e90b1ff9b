mod envelope;
mod filter;
mod mixer;

pub use envelope::*;
pub use filter::*;
pub use mixer::*;
