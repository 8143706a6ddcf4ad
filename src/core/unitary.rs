// src/core/unitary.rs

use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::Mul;

/// A single-qubit operator as a 2x2 complex matrix, row-major.
///
/// Only ever built from the closed-form u1/u3 and Pauli matrices, so it is
/// unitary by construction; nothing here re-checks that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2 {
    entries: [[Complex<f64>; 2]; 2],
}

impl Matrix2 {
    /// Builds a matrix from row-major entries.
    pub fn new(entries: [[Complex<f64>; 2]; 2]) -> Self {
        Self { entries }
    }

    /// The 2x2 identity.
    pub fn identity() -> Self {
        Self::new([
            [Complex::one(), Complex::zero()],
            [Complex::zero(), Complex::one()],
        ])
    }

    /// General single-qubit rotation `u3(θ, φ, λ)`:
    ///
    /// ```text
    /// [ cos(θ/2)            -e^{iλ} sin(θ/2)      ]
    /// [ e^{iφ} sin(θ/2)      e^{i(φ+λ)} cos(θ/2)  ]
    /// ```
    pub fn u3(theta: f64, phi: f64, lambda: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new([
            [Complex::new(c, 0.0), -Complex::from_polar(s, lambda)],
            [Complex::from_polar(s, phi), Complex::from_polar(c, phi + lambda)],
        ])
    }

    /// Phase rotation `u1(λ) = diag(1, e^{iλ})`.
    pub fn u1(lambda: f64) -> Self {
        Self::new([
            [Complex::one(), Complex::zero()],
            [Complex::zero(), Complex::from_polar(1.0, lambda)],
        ])
    }

    /// Entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Complex<f64> {
        self.entries[row][col]
    }

    /// Returns `true` if `other = e^{iα}·self` for some global phase `α`,
    /// every entry compared within `tolerance`.
    pub fn approx_eq_up_to_phase(&self, other: &Matrix2, tolerance: f64) -> bool {
        // Anchor the phase on the largest entry of `self`.
        let mut anchor = (0, 0);
        let mut largest = 0.0;
        for r in 0..2 {
            for c in 0..2 {
                let n = self.entries[r][c].norm_sqr();
                if n > largest {
                    largest = n;
                    anchor = (r, c);
                }
            }
        }
        if largest < tolerance {
            return false;
        }

        let ratio = other.entries[anchor.0][anchor.1] / self.entries[anchor.0][anchor.1];
        if (ratio.norm() - 1.0).abs() > tolerance {
            return false;
        }

        (0..2).all(|r| {
            (0..2).all(|c| (other.entries[r][c] - ratio * self.entries[r][c]).norm() <= tolerance)
        })
    }
}

impl Mul for Matrix2 {
    type Output = Matrix2;

    fn mul(self, rhs: Matrix2) -> Matrix2 {
        let mut out = [[Complex::zero(); 2]; 2];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = self.entries[r][0] * rhs.entries[0][c] + self.entries[r][1] * rhs.entries[1][c];
            }
        }
        Matrix2::new(out)
    }
}

impl fmt::Display for Matrix2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[[{:.4}, {:.4}], [{:.4}, {:.4}]]",
            self.entries[0][0], self.entries[0][1], self.entries[1][0], self.entries[1][1]
        )
    }
}

/// Single-qubit Pauli operator, the logical alphabet of decoupling pulses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pauli {
    /// Identity
    I,
    /// Bit flip
    X,
    /// Bit and phase flip
    Y,
    /// Phase flip
    Z,
}

impl Pauli {
    /// All four Paulis, identity first.
    pub const ALL: [Pauli; 4] = [Pauli::I, Pauli::X, Pauli::Y, Pauli::Z];

    /// The Pauli's matrix.
    pub fn matrix(&self) -> Matrix2 {
        let o = Complex::zero();
        let l = Complex::one();
        let i = Complex::i();
        match self {
            Pauli::I => Matrix2::identity(),
            Pauli::X => Matrix2::new([[o, l], [l, o]]),
            Pauli::Y => Matrix2::new([[o, -i], [i, o]]),
            Pauli::Z => Matrix2::new([[l, o], [o, -l]]),
        }
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Pauli::I => "I",
            Pauli::X => "X",
            Pauli::Y => "Y",
            Pauli::Z => "Z",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::gadd_constants::{ANGLE_TOLERANCE, FRAC_PI_2, PI};

    #[test]
    fn test_u3_pi_0_pi_is_x() {
        let m = Matrix2::u3(PI, 0.0, PI);
        assert!(Pauli::X.matrix().approx_eq_up_to_phase(&m, ANGLE_TOLERANCE));
        assert!(!Pauli::Y.matrix().approx_eq_up_to_phase(&m, ANGLE_TOLERANCE));
    }

    #[test]
    fn test_u3_y_parameters_are_y() {
        let m = Matrix2::u3(PI, FRAC_PI_2, FRAC_PI_2);
        assert!(Pauli::Y.matrix().approx_eq_up_to_phase(&m, ANGLE_TOLERANCE));
    }

    #[test]
    fn test_u1_pi_and_3pi_are_z() {
        assert!(Pauli::Z.matrix().approx_eq_up_to_phase(&Matrix2::u1(PI), ANGLE_TOLERANCE));
        assert!(Pauli::Z.matrix().approx_eq_up_to_phase(&Matrix2::u1(3.0 * PI), ANGLE_TOLERANCE));
    }

    #[test]
    fn test_yx_squared_is_identity_up_to_phase() {
        let y = Pauli::Y.matrix();
        let x = Pauli::X.matrix();
        let block = y * x * y * x;
        assert!(Matrix2::identity().approx_eq_up_to_phase(&block, ANGLE_TOLERANCE));
        // (YX)^2 = -I, so the phase really is global and not trivial.
        assert!((block.get(0, 0) + Complex::one()).norm() < ANGLE_TOLERANCE);
    }

    #[test]
    fn test_phase_is_not_ignored_between_entries() {
        // diag(1, i) differs from I by a relative phase.
        assert!(!Matrix2::identity().approx_eq_up_to_phase(&Matrix2::u1(FRAC_PI_2), ANGLE_TOLERANCE));
    }
}
