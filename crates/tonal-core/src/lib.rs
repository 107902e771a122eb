//! Core engine for the tonal curve editor: parametric per-channel tone
//! curves, lookup-table pixel remapping, and the interactive editor's
//! coordinate mapping and drag handling. No GUI dependencies.

pub mod curve;
pub mod editor;
pub mod error;
pub mod filter;
pub mod lut;
pub mod pixel_buf;
pub mod throttle;

pub use curve::{CurveModel, quantize};
pub use editor::{CurveEditor, DragState, EditorFrame};
pub use error::{CoreError, CoreResult};
pub use lut::Lut;
pub use pixel_buf::PixelBuffer;
pub use throttle::RecomputeGate;
