//! Test function implementations organized by category
//!
//! - `unimodal`: single-optimum functions (bowls, valleys)
//! - `multimodal`: functions with many local minima or several global ones

pub mod multimodal;
pub mod unimodal;

pub use multimodal::*;
pub use unimodal::*;
