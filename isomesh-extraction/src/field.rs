//! Scalar field input
//!
//! The extractor only needs two things from the volume: a scalar value and
//! a world position for every integer grid index. `ScalarField` is that
//! seam; `SampledField` is the owned regular-grid implementation used by
//! callers that have their data in memory.

use isomesh_core::Point3f;

/// A regular 3-D grid of scalar samples with world coordinates
pub trait ScalarField {
    /// Number of sample points along each axis
    fn dimensions(&self) -> [usize; 3];

    /// Scalar value at grid index `(i, j, k)`
    fn value(&self, i: usize, j: usize, k: usize) -> f32;

    /// World position of grid index `(i, j, k)`
    fn position(&self, i: usize, j: usize, k: usize) -> Point3f;
}

/// An owned scalar grid with uniform spacing
#[derive(Debug, Clone)]
pub struct SampledField {
    values: Vec<f32>,
    dimensions: [usize; 3],
    spacing: [f32; 3],
    origin: Point3f,
}

impl SampledField {
    /// Create a zero-filled grid
    pub fn new(dimensions: [usize; 3], spacing: [f32; 3], origin: Point3f) -> Self {
        Self {
            values: vec![0.0; dimensions[0] * dimensions[1] * dimensions[2]],
            dimensions,
            spacing,
            origin,
        }
    }

    /// Fill a grid by evaluating `f` at every sample position
    pub fn from_fn(
        dimensions: [usize; 3],
        spacing: [f32; 3],
        origin: Point3f,
        f: impl Fn(Point3f) -> f32,
    ) -> Self {
        let mut field = Self::new(dimensions, spacing, origin);
        for i in 0..dimensions[0] {
            for j in 0..dimensions[1] {
                for k in 0..dimensions[2] {
                    let p = field.position(i, j, k);
                    let idx = field.linear_index(i, j, k);
                    field.values[idx] = f(p);
                }
            }
        }
        field
    }

    fn linear_index(&self, i: usize, j: usize, k: usize) -> usize {
        (i * self.dimensions[1] + j) * self.dimensions[2] + k
    }

    /// Overwrite the sample at `(i, j, k)`
    pub fn set(&mut self, i: usize, j: usize, k: usize, value: f32) {
        let idx = self.linear_index(i, j, k);
        self.values[idx] = value;
    }
}

impl ScalarField for SampledField {
    fn dimensions(&self) -> [usize; 3] {
        self.dimensions
    }

    fn value(&self, i: usize, j: usize, k: usize) -> f32 {
        self.values[self.linear_index(i, j, k)]
    }

    fn position(&self, i: usize, j: usize, k: usize) -> Point3f {
        Point3f::new(
            self.origin.x + i as f32 * self.spacing[0],
            self.origin.y + j as f32 * self.spacing[1],
            self.origin.z + k as f32 * self.spacing[2],
        )
    }
}

/// Signed-distance-like sphere sample: positive inside, negative outside
pub fn sphere_field(
    center: Point3f,
    radius: f32,
    dimensions: [usize; 3],
    spacing: f32,
    origin: Point3f,
) -> SampledField {
    SampledField::from_fn(dimensions, [spacing; 3], origin, |p| {
        radius - (p - center).norm()
    })
}
