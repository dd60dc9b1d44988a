//! Per-frame animation of level contents.

pub mod transcription;

pub use transcription::{StrandQueue, TranscriptionAnimator};
