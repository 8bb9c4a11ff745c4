//! Serialization engine.
//!
//! # Overview
//!
//! ```text
//! ResourcePack ──write_pack──► FileTree ──read_pack──► ReadOutcome { pack, failures }
//! ```
//!
//! Writing is strict: a path produced twice is always an error. Reading can
//! be strict or lenient, see [`ReadOptions::lenient`].

mod options;
mod reader;
mod writer;

pub use options::{ReadOptions, WriteOptions};
pub use reader::{read_pack, ReadOutcome};
pub use writer::write_pack;
