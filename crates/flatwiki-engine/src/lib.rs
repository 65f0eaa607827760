pub mod io;
pub mod models;
pub mod render;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use io::*;
pub use models::{page::*, title::*};
pub use render::{links::*, templates::*};
