//! Where fonts come from: loading, discovery and the fallback chain
//!
//! Design files name fonts loosely ("微软雅黑", "ArialMT", or nothing at
//! all) and the host may or may not have them. [`FontResolver`] turns any
//! such request into a face that can measure and draw text, walking four
//! tiers until one works:
//!
//! 1. the explicit font file the operator picked
//! 2. a family name mapped to a file through [`names`]
//! 3. known system fonts, then project-local fallbacks
//! 4. the builtin bitmap font, which always works
//!
//! ## Memory Management
//!
//! Each font file is read once into a shared [`FontBlob`]. Faces at
//! different pixel sizes share the blob and create a `FontRef` on demand,
//! which keeps TTC collections working without leaking.

pub mod face;
pub mod host;
pub mod names;
pub mod resolver;

pub use face::{BuiltinFace, Face, FontBlob, OutlineFace, MAX_FONT_SIZE};
pub use host::{discover_font_files, FontDirListing, HostOs, ResolverConfig, FONT_ROOT_ENV};
pub use resolver::{FontResolver, ResolutionTier, ResolvedFont};
