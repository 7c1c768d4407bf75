//! 3x3 matrix backing the fixed color transforms.
//!
//! # Convention
//!
//! Matrices are stored in **row-major** order and use **column vectors**:
//!
//! ```text
//! | m00 m01 m02 |   | x |   | m00*x + m01*y + m02*z |
//! | m10 m11 m12 | * | y | = | m10*x + m11*y + m12*z |
//! | m20 m21 m22 |   | z |   | m20*x + m21*y + m22*z |
//! ```

/// A 3x3 matrix for linear color transforms.
///
/// Stored in row-major order; construct with [`Mat3::from_rows`].
///
/// # Example
///
/// ```rust
/// use hazvis_color::Mat3;
///
/// let identity = Mat3::IDENTITY;
/// let v = [1.0, 2.0, 3.0];
/// assert_eq!(identity.transform(v), v);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat3 {
    /// Matrix elements in row-major order: [row0, row1, row2]
    pub m: [[f32; 3]; 3],
}

impl Mat3 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Creates a matrix from row arrays.
    #[inline]
    pub const fn from_rows(rows: [[f32; 3]; 3]) -> Self {
        Self { m: rows }
    }

    /// Returns a row as an array.
    #[inline]
    pub fn row(&self, i: usize) -> [f32; 3] {
        self.m[i]
    }

    /// Transforms a column vector.
    #[inline]
    pub fn transform(&self, v: [f32; 3]) -> [f32; 3] {
        [
            dot(self.m[0], v),
            dot(self.m[1], v),
            dot(self.m[2], v),
        ]
    }
}

#[inline]
fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_transform() {
        let v = [0.25, 0.5, 0.75];
        assert_eq!(Mat3::IDENTITY.transform(v), v);
    }

    #[test]
    fn test_transform_rows() {
        let m = Mat3::from_rows([
            [1.0, 0.0, 0.0],
            [0.0, 2.0, 0.0],
            [0.0, 0.0, 3.0],
        ]);
        assert_eq!(m.transform([1.0, 1.0, 1.0]), [1.0, 2.0, 3.0]);
        assert_eq!(m.row(1), [0.0, 2.0, 0.0]);
    }
}
