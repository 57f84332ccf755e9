//! Complex sample type used by every frequency- and spatial-domain buffer.
//!
//! Arithmetic (`+`, `-`, `*`, `conj`) comes from `num_complex::Complex32`;
//! this module adds the handful of helpers the simulation needs on top.

use num_complex::Complex32;

/// One (real, imaginary) sample of a field.
pub type ComplexSample = Complex32;

pub const ZERO: ComplexSample = Complex32::new(0.0, 0.0);

/// Tolerance-based equality for complex samples.
pub trait ApproxEq {
    /// True when both components differ by at most `epsilon`.
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

impl ApproxEq for ComplexSample {
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.re - other.re).abs() <= epsilon && (self.im - other.im).abs() <= epsilon
    }
}

/// `cos(theta) + i sin(theta)`, evaluated in double precision.
pub fn cis(theta: f64) -> ComplexSample {
    let (sin, cos) = theta.sin_cos();
    Complex32::new(cos as f32, sin as f32)
}

/// Multiply by the imaginary number `i * scale`, the spectral form of a derivative.
#[inline]
pub fn mul_i(value: ComplexSample, scale: f32) -> ComplexSample {
    value * Complex32::new(0.0, scale)
}
