#![forbid(unsafe_code)]

//! Core domain model and business logic for the TB Guide reference tool.
//!
//! This crate provides:
//! - Domain types (age classes, formulations, dose lines, guide content)
//! - The antituberculosis dosage engine
//! - Weight/score band lookup tables
//! - The training quiz state machine
//! - Guide content catalog
//! - Viewer state persistence (last viewed section)

pub mod types;
pub mod error;
pub mod bands;
pub mod dosage;
pub mod quiz;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod state;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use bands::{lookup_band, lookup_band_or, Band};
pub use catalog::guide_content;
pub use config::Config;
pub use dosage::{compute_dosage, ADVISORY};
pub use quiz::{classify_score, QuizPhase, QuizSession, ResultTier};
