// this_file: crates/platen-batch/src/lib.rs

#![deny(missing_docs)]

//! Batch template filling for Platen.
//!
//! A batch takes a [`Template`] (canvas plus named regions), a [`Table`] of
//! data rows and a [`RegionMapping`] saying which column feeds which
//! region, and writes one composed PNG per row. Text is fitted into its
//! box and drawn with whatever font the resolver can find; any region that
//! cannot be rendered keeps the designer's artwork.
//!
//! Each input sits behind a small trait ([`TemplateSource`], [`RowSource`],
//! [`MappingProvider`]) so callers can supply files, in-memory values or an
//! interactive prompt.

pub mod compositor;
pub mod error;
pub mod mapping;
pub mod rows;
pub mod run;
pub mod security;
pub mod style;
pub mod template;
pub mod types;

pub use compositor::{debug_file_name, Compositor, CompositorOptions, RenderedRow};
pub use error::{BatchError, RegionError};
pub use mapping::{ChannelMapping, FileMapping, MappingProvider, MappingRequest};
pub use rows::{parse_jsonl, JsonlRows, RowSource};
pub use run::{run_batch, BatchOptions};
pub use security::{sanitize_path, validate_text_input, SecurityError, MAX_TEXT_LENGTH};
pub use style::{name_alignment, resolve_style, DEFAULT_SIZE};
pub use template::{describe_region, parse_manifest, ManifestTemplate, TemplateSource};
pub use types::*;

impl Template {
    /// Checks canvas size and region name uniqueness.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.width == 0 || self.height == 0 {
            return Err(ValidationError::InvalidCanvas {
                width: self.width,
                height: self.height,
            });
        }

        let mut seen = std::collections::HashSet::new();
        for region in &self.regions {
            if region.name.trim().is_empty() {
                return Err(ValidationError::EmptyRegionName);
            }
            if !seen.insert(region.name.as_str()) {
                return Err(ValidationError::DuplicateRegion(region.name.clone()));
            }
        }

        Ok(())
    }
}

/// Structural problems in a template.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Canvas has no area
    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidCanvas {
        /// Canvas width in pixels
        width: u32,
        /// Canvas height in pixels
        height: u32,
    },

    /// Two regions share a name
    #[error("Duplicate region name: {0}")]
    DuplicateRegion(String),

    /// A region has a blank name
    #[error("Region name is empty")]
    EmptyRegionName,
}
