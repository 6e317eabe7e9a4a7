//! Core data structures for isomesh
//!
//! This crate provides the shared mesh container, point type aliases,
//! mesh sanitation, and the error taxonomy used by the extraction and
//! simplification crates.

pub mod point;
pub mod mesh;
pub mod sanitize;
pub mod error;

pub use point::*;
pub use mesh::*;
pub use sanitize::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix4};
