//! Math utilities and types
//!
//! Light descriptors are packed for the GPU in single precision, while scene
//! transforms arrive from the source in double precision. Both families of
//! aliases live here so the rest of the crate never names nalgebra directly.

pub use nalgebra::{Matrix4, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 double precision matrix, the precision scene transforms are authored in
pub type Mat4d = Matrix4<f64>;

/// 3D double precision vector
pub type Vec3d = Vector3<f64>;

/// Extract the translation column of an affine transform.
///
/// Matrices are column-vector convention, so the translation lives in the
/// last column (`m14`, `m24`, `m34`).
pub fn extract_translation(matrix: &Mat4d) -> Vec3d {
    Vec3d::new(matrix.m14, matrix.m24, matrix.m34)
}

/// Build a pure translation matrix
pub fn translation(x: f64, y: f64, z: f64) -> Mat4d {
    Mat4d::new_translation(&Vec3d::new(x, y, z))
}

/// Homogeneous point from a double precision position, narrowed for the GPU
#[allow(clippy::cast_possible_truncation)]
pub fn point_from_translation(position: &Vec3d) -> Vec4 {
    Vec4::new(position.x as f32, position.y as f32, position.z as f32, 1.0)
}

/// Math utility functions
pub mod utils {
    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min { min } else if value > max { max } else { value }
    }
}
