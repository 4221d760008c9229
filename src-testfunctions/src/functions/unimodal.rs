//! Unimodal test functions
//!
//! A single basin of attraction; useful for checking that an optimizer actually
//! converges and for measuring how fast.

use ndarray::Array1;

/// Sphere function
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-5.12, 5.12]
pub fn sphere(x: &Array1<f64>) -> f64 {
    x.iter().map(|&xi| xi * xi).sum()
}

/// Quadratic bowl, same surface as `sphere` with wider default bounds
/// f(x) = sum(x[i]^2)
pub fn quadratic(x: &Array1<f64>) -> f64 {
    x.iter().map(|&xi| xi * xi).sum()
}

/// Bowl centred away from the origin: f(x, y) = (x - 2)^2 + (y - 2)^2
/// Global minimum: f(x) = 0 at x = (2, 2)
/// Bounds: x_i in [-100, 100]
pub fn offset_quadratic(x: &Array1<f64>) -> f64 {
    (x[0] - 2.0).powi(2) + (x[1] - 2.0).powi(2)
}

/// Booth function - 2D, plate-shaped
/// Global minimum: f(x) = 0 at x = (1, 3)
/// Bounds: x_i in [-10, 10]
pub fn booth(x: &Array1<f64>) -> f64 {
    let x1 = x[0];
    let x2 = x[1];
    (x1 + 2.0 * x2 - 7.0).powi(2) + (2.0 * x1 + x2 - 5.0).powi(2)
}

/// Rosenbrock function - N-dimensional valley
/// Global minimum: f(x) = 0 at x = (1, 1, ..., 1)
/// Bounds: x_i in [-5, 10]
pub fn rosenbrock(x: &Array1<f64>) -> f64 {
    x.windows(2)
        .into_iter()
        .map(|w| 100.0 * (w[1] - w[0].powi(2)).powi(2) + (1.0 - w[0]).powi(2))
        .sum()
}
