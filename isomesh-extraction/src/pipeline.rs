//! End-to-end extraction pipeline
//!
//! Chains the welded extractor with the mesh sanitizer, the optional
//! simplifier, and normal computation, so callers get a render-ready mesh
//! from a scalar field in one call.

use crate::field::ScalarField;
use crate::walker::extract_welded;
use isomesh_core::{sanitize, Result, SurfaceMesh};

/// Settings for [`extract_surface`]
#[derive(Debug, Clone, Copy)]
pub struct ExtractionConfig {
    /// Scalar value of the surface to extract
    pub iso_level: f32,
    /// Simplification tolerance; zero or negative skips simplification
    pub simplify_tolerance: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            iso_level: 0.0,
            simplify_tolerance: 0.0,
        }
    }
}

/// Extract, sanitize, optionally simplify, and shade the isosurface
pub fn extract_surface<F: ScalarField + ?Sized>(
    field: &F,
    config: &ExtractionConfig,
) -> Result<SurfaceMesh> {
    let mut mesh = extract_welded(field, config.iso_level);
    sanitize(&mut mesh)?;
    if config.simplify_tolerance > 0.0 {
        isomesh_simplification::simplify(&mut mesh, config.simplify_tolerance)?;
    }
    mesh.compute_default_normals();
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::sphere_field;
    use isomesh_core::Point3f;

    fn unit_sphere() -> crate::field::SampledField {
        sphere_field(
            Point3f::new(3.0, 3.0, 3.0),
            2.0,
            [7, 7, 7],
            1.0,
            Point3f::origin(),
        )
    }

    #[test]
    fn test_pipeline_produces_shaded_mesh() {
        let mesh = extract_surface(&unit_sphere(), &ExtractionConfig::default()).unwrap();
        assert!(!mesh.is_empty());
        assert_eq!(mesh.normals.len(), mesh.vertex_count());
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_simplification_reduces_vertex_count() {
        let field = unit_sphere();
        let plain = extract_surface(&field, &ExtractionConfig::default()).unwrap();
        let simplified = extract_surface(
            &field,
            &ExtractionConfig {
                iso_level: 0.0,
                simplify_tolerance: 0.5,
            },
        )
        .unwrap();
        assert!(simplified.vertex_count() < plain.vertex_count());
        assert_eq!(simplified.normals.len(), simplified.vertex_count());
    }

    #[test]
    fn test_sphere_normals_are_consistently_oriented() {
        // Whatever the winding convention, a closed sphere must not end up
        // with normals flipping between inward and outward.
        let center = Point3f::new(3.0, 3.0, 3.0);
        let mesh = extract_surface(&unit_sphere(), &ExtractionConfig::default()).unwrap();
        let mut outward = 0usize;
        for (v, n) in mesh.vertices.iter().zip(mesh.normals.iter()) {
            if (v - center).dot(n) > 0.0 {
                outward += 1;
            }
        }
        let inward = mesh.vertex_count() - outward;
        assert!(
            outward * 10 > mesh.vertex_count() * 9 || inward * 10 > mesh.vertex_count() * 9,
            "{outward} outward vs {inward} inward normals"
        );
    }
}
