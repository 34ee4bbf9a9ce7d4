//! 2D affine transform with lazily cached derived matrices
//!
//! A [`Transform`] is an optional composition of translation, rotation, and
//! scale, or a raw 3x3 affine matrix. Derived forms (matrix, inverse matrix,
//! rotation-and-scale-sign "vector matrix") are computed once per instance and
//! cached. The API is copy-on-write: every setter returns a fresh value with
//! empty caches, so a transform can never be mutated after a derived form has
//! been observed.

use std::cell::OnceCell;

use super::math::{heading, Mat3, Point2, Vec2, Vec2Ext};

/// 2D affine transform: translation, rotation (radians), and non-uniform scale.
///
/// Derived matrices are cached on first access, which makes the type `!Sync`;
/// compute the caches before sharing across threads, or keep one instance per
/// thread.
#[derive(Debug, Clone)]
pub struct Transform {
    translation: Vec2,
    rotation: f32,
    scale: Vec2,
    /// Set when the transform was supplied as a raw matrix.
    explicit_matrix: Option<Mat3>,
    matrix: OnceCell<Mat3>,
    inverse: OnceCell<Mat3>,
    vector_matrix: OnceCell<Mat3>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// The identity transform
    pub fn identity() -> Self {
        Self::new(Vec2::zeros(), 0.0, Vec2::new(1.0, 1.0))
    }

    /// Create a transform from translation, rotation (radians), and scale
    pub fn new(translation: Vec2, rotation: f32, scale: Vec2) -> Self {
        Self {
            translation,
            rotation,
            scale,
            explicit_matrix: None,
            matrix: OnceCell::new(),
            inverse: OnceCell::new(),
            vector_matrix: OnceCell::new(),
        }
    }

    /// Create a transform with only translation
    pub fn from_translation(translation: Vec2) -> Self {
        Self::new(translation, 0.0, Vec2::new(1.0, 1.0))
    }

    /// Create a transform with only rotation (radians)
    pub fn from_rotation(rotation: f32) -> Self {
        Self::new(Vec2::zeros(), rotation, Vec2::new(1.0, 1.0))
    }

    /// Create a transform with only scale
    pub fn from_scale(scale: Vec2) -> Self {
        Self::new(Vec2::zeros(), 0.0, scale)
    }

    /// Create a transform directly from a 3x3 affine matrix.
    ///
    /// The component accessors report identity values for such a transform;
    /// all derived forms come from the supplied matrix.
    pub fn from_matrix(matrix: Mat3) -> Self {
        Self {
            translation: Vec2::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
            explicit_matrix: Some(matrix),
            matrix: OnceCell::new(),
            inverse: OnceCell::new(),
            vector_matrix: OnceCell::new(),
        }
    }

    /// Copy with a different translation (caches reset).
    ///
    /// Starts from the component fields; a raw-matrix transform is replaced by
    /// its components' interpretation, so prefer composing matrices directly in
    /// that case.
    pub fn with_translation(&self, translation: Vec2) -> Self {
        Self::new(translation, self.rotation, self.scale)
    }

    /// Copy with a different rotation in radians (caches reset)
    pub fn with_rotation(&self, rotation: f32) -> Self {
        Self::new(self.translation, rotation, self.scale)
    }

    /// Copy with a different scale (caches reset)
    pub fn with_scale(&self, scale: Vec2) -> Self {
        Self::new(self.translation, self.rotation, scale)
    }

    /// Translation component
    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    /// Rotation component in radians
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Scale component
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// The 3x3 affine matrix, computed once and cached
    pub fn matrix(&self) -> &Mat3 {
        self.matrix.get_or_init(|| {
            self.explicit_matrix.unwrap_or_else(|| {
                Mat3::new_translation(&self.translation)
                    * Mat3::new_rotation(self.rotation)
                    * Mat3::new_nonuniform_scaling(&self.scale)
            })
        })
    }

    /// The cached inverse matrix.
    ///
    /// A singular matrix (zero determinant, e.g. a zero scale axis) falls back
    /// to the identity matrix rather than failing.
    pub fn inverse_matrix(&self) -> &Mat3 {
        self.inverse.get_or_init(|| {
            self.matrix().try_inverse().unwrap_or_else(|| {
                log::debug!("singular transform matrix, inverse falls back to identity");
                Mat3::identity()
            })
        })
    }

    /// The cached vector matrix: rotation and scale sign only.
    ///
    /// Used for directions and normals, where translation must not apply and
    /// scale magnitude must not stretch the vector. Derived from the full
    /// matrix by normalizing its linear columns, which preserves mirroring
    /// from negative scale axes.
    pub fn vector_matrix(&self) -> &Mat3 {
        self.vector_matrix.get_or_init(|| {
            let m = self.matrix();
            let col_x = Vec2::new(m[(0, 0)], m[(1, 0)]).normalize_or_zero();
            let col_x = if col_x == Vec2::zeros() {
                Vec2::new(1.0, 0.0)
            } else {
                col_x
            };
            let col_y = Vec2::new(m[(0, 1)], m[(1, 1)]).normalize_or_zero();
            let col_y = if col_y == Vec2::zeros() {
                Vec2::new(0.0, 1.0)
            } else {
                col_y
            };
            Mat3::new(
                col_x.x, col_y.x, 0.0, //
                col_x.y, col_y.y, 0.0, //
                0.0, 0.0, 1.0,
            )
        })
    }

    /// Compose two transforms: the result applies `first`, then `second`
    pub fn compose(second: &Self, first: &Self) -> Self {
        Self::from_matrix(second.matrix() * first.matrix())
    }

    /// The inverse transform (identity when singular)
    pub fn inverse(&self) -> Self {
        Self::from_matrix(*self.inverse_matrix())
    }

    /// Apply the transform to a point
    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        self.matrix().transform_point(&Point2::from(point)).coords
    }

    /// Apply the inverse transform to a point
    pub fn inverse_transform_point(&self, point: Vec2) -> Vec2 {
        self.inverse_matrix()
            .transform_point(&Point2::from(point))
            .coords
    }

    /// Apply the rotation/mirror part to a direction vector
    pub fn transform_vector(&self, vector: Vec2) -> Vec2 {
        self.vector_matrix().transform_vector(&vector)
    }

    /// The turtle heading direction after this transform's rotation
    pub fn heading_vector(&self) -> Vec2 {
        heading(self.rotation)
    }
}

impl PartialEq for Transform {
    fn eq(&self, other: &Self) -> bool {
        self.matrix() == other.matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::{HALF_PI, PI};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_identity_matrix() {
        let transform = Transform::identity();
        assert_relative_eq!(*transform.matrix(), Mat3::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_transform_point_trs_order() {
        // Scale, then rotate, then translate
        let transform = Transform::new(Vec2::new(10.0, 0.0), HALF_PI, Vec2::new(2.0, 2.0));
        let p = transform.transform_point(Vec2::new(1.0, 0.0));
        assert_relative_eq!(p.x, 10.0, epsilon = EPSILON);
        assert_relative_eq!(p.y, 2.0, epsilon = EPSILON);
    }

    #[test]
    fn test_compose_applies_first_then_second() {
        let first = Transform::from_translation(Vec2::new(1.0, 0.0));
        let second = Transform::from_rotation(HALF_PI);
        let composed = Transform::compose(&second, &first);
        let p = composed.transform_point(Vec2::zeros());
        // Translate to (1, 0), then rotate to (0, 1)
        assert_relative_eq!(p.x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(p.y, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_compose_with_inverse_is_identity() {
        let transform = Transform::new(Vec2::new(3.0, -2.0), 0.7, Vec2::new(1.5, 0.5));
        let composed = Transform::compose(&transform, &transform.inverse());
        assert_relative_eq!(*composed.matrix(), Mat3::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_singular_inverse_falls_back_to_identity() {
        let transform = Transform::from_scale(Vec2::new(0.0, 1.0));
        assert_relative_eq!(*transform.inverse_matrix(), Mat3::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_vector_matrix_ignores_scale_magnitude() {
        let transform = Transform::new(Vec2::new(5.0, 5.0), PI, Vec2::new(3.0, 3.0));
        let v = transform.transform_vector(Vec2::new(1.0, 0.0));
        assert_relative_eq!(v.x, -1.0, epsilon = EPSILON);
        assert_relative_eq!(v.y, 0.0, epsilon = EPSILON);
        assert_relative_eq!(v.norm(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_vector_matrix_keeps_mirror() {
        let transform = Transform::from_scale(Vec2::new(-2.0, 2.0));
        let v = transform.transform_vector(Vec2::new(1.0, 0.0));
        assert_relative_eq!(v.x, -1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_from_matrix_roundtrip() {
        let source = Transform::new(Vec2::new(1.0, 2.0), 0.3, Vec2::new(2.0, 1.0));
        let copy = Transform::from_matrix(*source.matrix());
        let p = Vec2::new(-4.0, 2.5);
        assert_relative_eq!(
            source.transform_point(p),
            copy.transform_point(p),
            epsilon = EPSILON
        );
    }
}
