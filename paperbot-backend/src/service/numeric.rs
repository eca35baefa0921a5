//! Numerical routines behind the service endpoints.
//!
//! Small, dependency-free implementations of the three computations the
//! endpoints expose. These are not design objects of the pipeline; they
//! exist so the service has something real to delegate to.

/// Minimize a smooth convex scalar function from an initial guess, by
/// damped Newton descent with central-difference derivatives.
pub fn minimize<F: Fn(f64) -> f64>(f: F, x0: f64) -> f64 {
    const H: f64 = 1e-5;
    const TOL: f64 = 1e-10;
    const MAX_STEP: f64 = 1e3;

    let mut x = x0;
    for _ in 0..200 {
        let d1 = (f(x + H) - f(x - H)) / (2.0 * H);
        let d2 = (f(x + H) - 2.0 * f(x) + f(x - H)) / (H * H);
        let step = if d2.abs() > f64::EPSILON {
            (d1 / d2).clamp(-MAX_STEP, MAX_STEP)
        } else {
            d1.signum() * H
        };
        x -= step;
        if step.abs() < TOL {
            break;
        }
    }
    x
}

/// Definite integral of `f` over `[a, b]` by adaptive Simpson quadrature.
/// Returns the area and an error estimate (Richardson |S2 - S1| / 15).
pub fn quad<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64) -> (f64, f64) {
    fn simpson<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64) -> f64 {
        let m = 0.5 * (a + b);
        (b - a) / 6.0 * (f(a) + 4.0 * f(m) + f(b))
    }

    fn adaptive<F: Fn(f64) -> f64>(
        f: &F,
        a: f64,
        b: f64,
        whole: f64,
        eps: f64,
        depth: u32,
    ) -> (f64, f64) {
        let m = 0.5 * (a + b);
        let left = simpson(f, a, m);
        let right = simpson(f, m, b);
        let delta = left + right - whole;
        if depth == 0 || delta.abs() <= 15.0 * eps {
            (left + right + delta / 15.0, delta.abs() / 15.0)
        } else {
            let (li, le) = adaptive(f, a, m, left, eps / 2.0, depth - 1);
            let (ri, re) = adaptive(f, m, b, right, eps / 2.0, depth - 1);
            (li + ri, le + re)
        }
    }

    let whole = simpson(f, a, b);
    adaptive(f, a, b, whole, 1e-10, 20)
}

/// Mean and variance of a data set. Variance uses the sample convention
/// (n - 1 divisor). Returns None for fewer than two points, where sample
/// variance is undefined.
pub fn describe(data: &[f64]) -> Option<(f64, f64)> {
    if data.len() < 2 {
        return None;
    }
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let ss = data.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>();
    Some((mean, ss / (n - 1.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimize_finds_parabola_minimum() {
        // f(x) = x^2 + 5x + 10 has its exact minimum at x = -2.5.
        let x = minimize(|x| x * x + 5.0 * x + 10.0, 0.0);
        assert!((x + 2.5).abs() < 1e-6, "got {}", x);
    }

    #[test]
    fn minimize_converges_from_a_far_guess() {
        let x = minimize(|x| x * x + 5.0 * x + 10.0, 500.0);
        assert!((x + 2.5).abs() < 1e-6, "got {}", x);
    }

    #[test]
    fn quad_integrates_x_squared() {
        let (area, err) = quad(&|x: f64| x * x, 0.0, 1.0);
        assert!((area - 1.0 / 3.0).abs() < 1e-8, "got {}", area);
        assert!(err < 1e-6);
    }

    #[test]
    fn quad_handles_reversed_limits() {
        let (area, _) = quad(&|x: f64| x * x, 1.0, 0.0);
        assert!((area + 1.0 / 3.0).abs() < 1e-8);
    }

    #[test]
    fn describe_uses_sample_variance() {
        let (mean, variance) = describe(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(mean, 3.0);
        assert_eq!(variance, 2.5);
    }

    #[test]
    fn describe_rejects_degenerate_input() {
        assert!(describe(&[]).is_none());
        assert!(describe(&[42.0]).is_none());
    }
}
