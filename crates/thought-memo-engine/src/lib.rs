pub mod editing;
pub mod io;
pub mod models;
pub mod parsing;
pub mod store;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::*;
pub use io::*;
pub use models::*;
pub use parsing::{Block, BlockState, Marker, MarkerEncoding, parse_blocks};
pub use store::*;
