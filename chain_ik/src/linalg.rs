//! Small dense linear solve for the damped normal equations.

use nalgebra::{DMatrix, DVector};

/// Solve `a * x = b` by Gaussian elimination without row exchanges.
///
/// Any pivot smaller than machine epsilon in magnitude is replaced by a signed
/// epsilon (positive for an exact zero), so an exactly singular system still
/// yields a finite answer instead of dividing by zero. `a` must be square with
/// as many rows as `b`.
pub fn solve_linear(mut a: DMatrix<f64>, mut b: DVector<f64>) -> DVector<f64> {
    let n = a.nrows();
    debug_assert_eq!(a.ncols(), n);
    debug_assert_eq!(b.len(), n);

    let mut x = DVector::zeros(n);
    if n == 0 {
        return x;
    }

    for i in 0..n {
        let mut pivot = a[(i, i)];
        if pivot.abs() < f64::EPSILON {
            pivot = f64::EPSILON.copysign(if pivot == 0.0 { 1.0 } else { pivot });
            a[(i, i)] = pivot;
        }

        for j in i..n {
            a[(i, j)] /= pivot;
        }
        b[i] /= pivot;

        for r in (i + 1)..n {
            let factor = a[(r, i)];
            for c in i..n {
                a[(r, c)] -= factor * a[(i, c)];
            }
            b[r] -= factor * b[i];
        }
    }

    for i in (0..n).rev() {
        let mut accum = 0.0;
        for c in (i + 1)..n {
            accum += a[(i, c)] * x[c];
        }
        x[i] = b[i] - accum;
    }

    x
}
