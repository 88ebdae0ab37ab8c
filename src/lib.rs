//! Symbol usage queries over SCIP code-intelligence indexes.
//!
//! Given a loaded [`types::Index`], [`report::build_report`] resolves a
//! possibly abbreviated symbol name, collects every matching occurrence, and
//! nests the call sites of any match that is itself a caller.

pub mod callers;
pub mod cli;
pub mod collector;
pub mod color;
pub mod config;
pub mod errors;
pub mod loader;
pub mod logging;
pub mod output;
pub mod report;
pub mod router;
pub mod symbol;
pub mod types;
