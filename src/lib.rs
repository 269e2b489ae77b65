//! FLX Match (workspace facade crate).
//!
//! Re-exports the member crates under `flx_match::{core,engine,store,types}` so
//! applications and tests depend on one package while the implementation lives
//! in dedicated crates under `crates/`.

pub use flx_match_core as core;
pub use flx_match_engine as engine;
pub use flx_match_store as store;
pub use flx_match_types as types;
