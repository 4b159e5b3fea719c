//! Domain logic for the iconsmith backend.
//!
//! Pure, framework-free building blocks: generation parameters, prompt
//! composition, and the image normalization pipeline. Nothing in this crate
//! touches the network or the database.

pub mod error;
pub mod generation;
pub mod imaging;
pub mod prompt;
pub mod types;
