//! Multimodal test functions
//!
//! These functions have multiple local minima, or several global ones, and
//! exercise the exploration side of an optimizer.

use ndarray::Array1;
use std::f64::consts::{E, PI};

/// Gaussian dipole: f(x, y) = x * exp(-x^2 - y^2)
/// Global minimum: f(x) = -exp(-1/2)/sqrt(2) ≈ -0.428882 at x = (-1/sqrt(2), 0)
/// Bounds: x_i in [-2, 2]; far from the origin the surface is flat at 0
pub fn gaussian_dipole(x: &Array1<f64>) -> f64 {
    let x1 = x[0];
    let x2 = x[1];
    x1 * (-x1.powi(2) - x2.powi(2)).exp()
}

/// Rastrigin function - N-dimensional, highly multimodal
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-5.12, 5.12]
pub fn rastrigin(x: &Array1<f64>) -> f64 {
    let n = x.len() as f64;
    let sum: f64 = x.iter().map(|&xi| xi.powi(2) - 10.0 * (2.0 * PI * xi).cos()).sum();
    10.0 * n + sum
}

/// Ackley function - N-dimensional multimodal
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-32.768, 32.768]
pub fn ackley(x: &Array1<f64>) -> f64 {
    let n = x.len() as f64;
    let sum_sq: f64 = x.iter().map(|&xi| xi.powi(2)).sum();
    let sum_cos: f64 = x.iter().map(|&xi| (2.0 * PI * xi).cos()).sum();

    -20.0 * (-0.2 * (sum_sq / n).sqrt()).exp() - (sum_cos / n).exp() + 20.0 + E
}

/// Himmelblau function - 2D with four global minima
/// Global minimum: f(x) = 0 at (3, 2), (-2.805118, 3.131312),
/// (-3.779310, -3.283186), (3.584428, -1.848126)
/// Bounds: x_i in [-5, 5]
pub fn himmelblau(x: &Array1<f64>) -> f64 {
    let x1 = x[0];
    let x2 = x[1];
    (x1.powi(2) + x2 - 11.0).powi(2) + (x1 + x2.powi(2) - 7.0).powi(2)
}
