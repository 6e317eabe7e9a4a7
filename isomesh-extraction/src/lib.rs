//! Isosurface extraction with marching cubes
//!
//! Turns a regular grid of scalar samples into a triangle mesh of the
//! level set at a chosen iso value. The welded walker shares vertices
//! across cell borders; [`extract_surface`] runs the whole pipeline
//! including sanitization, optional simplification, and normals.
//!
//! ```
//! use isomesh_core::Point3f;
//! use isomesh_extraction::{extract_surface, sphere_field, ExtractionConfig};
//!
//! let field = sphere_field(
//!     Point3f::new(3.0, 3.0, 3.0),
//!     2.0,
//!     [7, 7, 7],
//!     1.0,
//!     Point3f::origin(),
//! );
//! let mesh = extract_surface(&field, &ExtractionConfig::default()).unwrap();
//! assert!(!mesh.is_empty());
//! ```

pub mod cell;
pub mod field;
pub mod pipeline;
pub mod tables;
pub mod walker;

pub use cell::GridCell;
pub use field::{sphere_field, SampledField, ScalarField};
pub use pipeline::{extract_surface, ExtractionConfig};
pub use walker::{extract_triangle_soup, extract_welded};
