//! Reference persistence gateways
//!
//! Both stores apply the same server-side rules through [`PlayerRecord`]:
//!
//! - registration creates a record with zero points, zero FLX and a full move counter
//! - a save overwrites `points`, credits `floor(score / 10)` FLX and decrements
//!   the server move counter
//! - scores above 10 000 are rejected
//! - unknown players are rejected on load and save
//!
//! [`MemoryStore`] keeps records in process; [`JsonFileStore`] persists them to
//! a JSON file.

pub mod error;
pub mod file;
pub mod memory;
pub mod record;

pub use flx_match_core as core;
pub use flx_match_engine as engine;
pub use flx_match_types as types;

pub use error::StoreError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use record::{PlayerProfile, PlayerRecord};
