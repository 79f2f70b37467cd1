//! Typed error surface for the core pipeline.
//!
//! The three variants here are the only *fatal* conditions the core
//! recognizes: everything else — empty silhouettes, all regions below the
//! noise floor, a fully blank canvas — is a valid success result with empty
//! layers, not an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("pixel buffer length {actual} does not match width*height*4 ({expected})")]
    InvalidBuffer { expected: usize, actual: usize },

    #[error("image dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    #[error("allocation failed while building a {width}x{height} mask")]
    OutOfMemory { width: u32, height: u32 },
}
