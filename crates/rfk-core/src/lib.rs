//! Shared types, validation, and configuration for the rfk workspace.
//!
//! This crate holds the error taxonomy, the size rules every transform
//! enforces, the strategy traits, and the TOML configuration.

pub mod config;
pub mod error;
pub mod frequency;
pub mod size;
pub mod spectrum;
pub mod traits;

pub use config::{FftConfig, Strategy};
pub use error::{FftError, SizeViolation};
pub use spectrum::{Direction, Spectrum, Transformed};
pub use traits::{ComplexFft, RealTransform};
