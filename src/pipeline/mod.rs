// src/pipeline/mod.rs

//! Pipeline entry points for watcher operations.
//!
//! - `new_posts`: diff a board's current posts against the baseline
//! - `run_watcher`: one full fetch → diff → notify → persist pass

pub mod diff;
pub mod run;

pub use diff::new_posts;
pub use run::run_watcher;
