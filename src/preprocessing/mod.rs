//! Image preprocessing ahead of OCR
//!
//! A fixed grayscale → adaptive threshold → median denoise pipeline that turns a
//! color raster into a clean 0/255 binary raster.

pub mod pipeline;
pub mod steps;

pub use pipeline::{Pipeline, StepTiming};
