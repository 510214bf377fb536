// Types - Primitives and codecs shared by the document model and the adapter

pub mod primitives;
pub mod quantity;
pub mod schedule;

pub use primitives::*;
pub use schedule::{BlockMap, Schedule};
