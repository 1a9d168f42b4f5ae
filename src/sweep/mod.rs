//! Double-descent width sweep
//!
//! A [`SweepController`] trains one fresh model per hidden width, in ascending
//! order, and collects the final train/test errors into a [`SweepResult`].
//! Downstream stages (attribution, artifact filing) run through a per-width
//! hook; a failing width is recorded and the sweep moves on.

mod config;
mod controller;
mod result;

pub use config::{SweepConfig, DEFAULT_WIDTHS};
pub use controller::{SweepController, WidthOutcome};
pub use result::{FailureStage, SweepEntry, SweepFailure, SweepResult};
