//! Match-3 for the terminal (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `match3_tui::{adapter,core,engine,input,term,types}`
//! and hosts the binaries.

pub use match3_adapter as adapter;
pub use match3_core as core;
pub use match3_engine as engine;
pub use match3_input as input;
pub use match3_term as term;
pub use match3_types as types;
