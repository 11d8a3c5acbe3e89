// this_file: crates/platen-batch/src/error.rs

//! Fatal batch errors and recoverable per-region errors.

use platen_core::error::RenderError;
use platen_core::types::Bounds;

use crate::security::SecurityError;
use crate::ValidationError;

/// A problem that stops the batch before any row is rendered.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// Template missing or unparseable
    #[error("Cannot read template {path}: {reason}")]
    Template {
        /// Template location
        path: String,
        /// What went wrong
        reason: String,
    },

    /// Data source missing or unparseable
    #[error("Cannot read data {path}: {reason}")]
    Data {
        /// Data location
        path: String,
        /// What went wrong
        reason: String,
    },

    /// Mapping file missing or unparseable
    #[error("Cannot read mapping {path}: {reason}")]
    Mapping {
        /// Mapping location
        path: String,
        /// What went wrong
        reason: String,
    },

    /// Template parsed but holds no regions
    #[error("Template has no usable regions")]
    NoRegions,

    /// No region is mapped to any data column
    #[error("No regions are mapped to data columns")]
    NoMappings,

    /// Template structure is inconsistent
    #[error("Invalid template: {0}")]
    Validation(#[from] ValidationError),

    /// Output directory cannot be created
    #[error("Cannot prepare output directory {path}: {reason}")]
    Output {
        /// Directory location
        path: String,
        /// What went wrong
        reason: String,
    },
}

/// A mapped region that could not be rendered; its artwork is used instead.
#[derive(Debug, thiserror::Error)]
pub enum RegionError {
    /// The row has no value for the mapped column
    #[error("row has no column '{0}'")]
    MissingColumn(String),

    /// The row value was refused
    #[error("rejected value: {0}")]
    Rejected(#[from] SecurityError),

    /// Layout or painting failed
    #[error("render failed: {0}")]
    Render(#[from] RenderError),

    /// Replacement image could not be decoded
    #[error("cannot load image {path}: {reason}")]
    Image {
        /// Image location
        path: String,
        /// What went wrong
        reason: String,
    },

    /// The region has no area to draw into
    #[error("region has empty bounds {0}")]
    EmptyBounds(Bounds),

    /// The region is larger than any layer that can be allocated
    #[error(
        "region bounds {0} exceed {max} pixels per side",
        max = platen_render::MAX_SURFACE_SIDE
    )]
    Oversized(Bounds),
}
