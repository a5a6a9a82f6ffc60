//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - configuration enums (`FitMethod`, `BasisKind`) and `BasisSpec`
//! - run configurations built from CLI flags (`FitConfig`, `SinusoidConfig`, ...)
//! - fit outputs (`FitQuality`, `FitDiagnostics`, `FitFile`)

pub mod types;

pub use types::*;
