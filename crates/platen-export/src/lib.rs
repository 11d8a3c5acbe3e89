//! Getting finished images onto disk
//!
//! Every output is an RGBA PNG. Debug runs also get a diagnostic sheet per
//! text region: the rendered layer on a grey card with notes underneath.

pub mod diagnostic;
pub mod png;

pub use diagnostic::diagnostic_sheet;
pub use png::{encode_png, write_png};
