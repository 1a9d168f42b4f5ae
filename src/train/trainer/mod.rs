//! Trainer abstraction for training loops
//!
//! This module provides a `Trainer` that runs the fixed-budget training of
//! one model:
//! - Single training steps
//! - Epoch-level training
//! - Full-split evaluation
//! - Multi-epoch training with a diagnostic history

mod core;
mod epoch;
mod result;
mod step;
mod train_loop;

pub use core::Trainer;
pub use epoch::Evaluation;
pub use result::{EpochRecord, TrainingRun};
