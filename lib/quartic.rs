//! Real roots of polynomials up to degree four.
//!
//! Quartics are solved with Ferrari's method via a resolvent cubic, cubics
//! with Cardano's formula or the trigonometric form when all three roots are
//! real. Complex roots are dropped.

use std::f64::consts::PI;

const EPS: f64 = 1e-12;

/// Solve `a*x^4 + b*x^3 + c*x^2 + d*x + e = 0`, coefficients highest degree
/// first. Returns the real roots in ascending order.
pub fn solve_quartic(coeffs: [f64; 5]) -> Vec<f64> {
    let [a, b, c, d, e] = coeffs;
    if a.abs() < EPS {
        return solve_cubic([b, c, d, e]);
    }

    // Normalize: x^4 + p*x^3 + q*x^2 + r*x + s = 0
    let p = b / a;
    let q = c / a;
    let r = d / a;
    let s = e / a;

    // Depressed quartic y^4 + a2*y^2 + a1*y + a0 = 0 with x = y - p/4
    let p2 = p * p;
    let a2 = q - 3.0 * p2 / 8.0;
    let a1 = r - p * q / 2.0 + p2 * p / 8.0;
    let a0 = s - p * r / 4.0 + p2 * q / 16.0 - 3.0 * p2 * p2 / 256.0;
    let shift = p / 4.0;

    let mut roots = Vec::with_capacity(4);

    if a1.abs() < EPS {
        // Biquadratic in z = y^2
        for z in solve_quadratic([1.0, a2, a0]) {
            if z >= 0.0 {
                let y = z.sqrt();
                roots.push(y - shift);
                roots.push(-y - shift);
            } else if z > -EPS {
                roots.push(-shift);
            }
        }
    } else {
        // Resolvent 8m^3 + 8*a2*m^2 + (2*a2^2 - 8*a0)*m - a1^2 = 0 always has a
        // positive root when a1 != 0; the largest is the best conditioned.
        let m = solve_cubic([8.0, 8.0 * a2, 2.0 * a2 * a2 - 8.0 * a0, -a1 * a1])
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max);
        if m <= 0.0 {
            return Vec::new();
        }

        let sqrt_2m = (2.0 * m).sqrt();
        let alpha = a2 + 2.0 * m;
        let beta = a1 / sqrt_2m;

        // y^2 - sqrt(2m)*y + (alpha + beta)/2 = 0
        for y in solve_quadratic([1.0, -sqrt_2m, (alpha + beta) / 2.0]) {
            roots.push(y - shift);
        }
        // y^2 + sqrt(2m)*y + (alpha - beta)/2 = 0
        for y in solve_quadratic([1.0, sqrt_2m, (alpha - beta) / 2.0]) {
            roots.push(y - shift);
        }
    }

    for x in roots.iter_mut() {
        *x = polish(coeffs, *x);
    }
    roots.sort_by(f64::total_cmp);
    return roots;
}

/// Solve `a*x^3 + b*x^2 + c*x + d = 0`.
pub fn solve_cubic(coeffs: [f64; 4]) -> Vec<f64> {
    let [a, b, c, d] = coeffs;
    if a.abs() < EPS {
        return solve_quadratic([b, c, d]);
    }

    let p = b / a;
    let q = c / a;
    let r = d / a;

    // Depressed cubic t^3 + aa*t + bb = 0 with x = t - p/3
    let p2 = p * p;
    let aa = q - p2 / 3.0;
    let bb = r - p * q / 3.0 + 2.0 * p2 * p / 27.0;
    let shift = p / 3.0;

    let delta = bb * bb / 4.0 + aa * aa * aa / 27.0;

    let mut roots = Vec::with_capacity(3);
    if delta > EPS {
        let sqrt_delta = delta.sqrt();
        let u = (-bb / 2.0 + sqrt_delta).cbrt();
        let v = (-bb / 2.0 - sqrt_delta).cbrt();
        roots.push(u + v - shift);
    } else if delta.abs() <= EPS {
        if aa.abs() < EPS && bb.abs() < EPS {
            roots.push(-shift);
        } else {
            let u = (-bb / 2.0).cbrt();
            roots.push(2.0 * u - shift);
            roots.push(-u - shift);
        }
    } else {
        let m = 2.0 * (-aa / 3.0).sqrt();
        let theta = (3.0 * bb / (aa * m)).clamp(-1.0, 1.0).acos() / 3.0;
        roots.push(m * theta.cos() - shift);
        roots.push(m * (theta - 2.0 * PI / 3.0).cos() - shift);
        roots.push(m * (theta + 2.0 * PI / 3.0).cos() - shift);
    }
    roots.sort_by(f64::total_cmp);
    return roots;
}

/// Solve `a*x^2 + b*x + c = 0`.
pub fn solve_quadratic(coeffs: [f64; 3]) -> Vec<f64> {
    let [a, b, c] = coeffs;
    if a.abs() < EPS {
        if b.abs() > EPS {
            return vec![-c / b];
        }
        return Vec::new();
    }

    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return Vec::new();
    }

    let sqrt_disc = disc.sqrt();
    let mut roots = vec![(-b - sqrt_disc) / (2.0 * a), (-b + sqrt_disc) / (2.0 * a)];
    roots.sort_by(f64::total_cmp);
    return roots;
}

/// A couple of Newton steps on the undepressed quartic to recover precision
/// lost in the resolvent.
fn polish(coeffs: [f64; 5], mut x: f64) -> f64 {
    let [a, b, c, d, e] = coeffs;
    for _ in 0..2 {
        let f = (((a * x + b) * x + c) * x + d) * x + e;
        let df = ((4.0 * a * x + 3.0 * b) * x + 2.0 * c) * x + d;
        if df.abs() < EPS {
            break;
        }
        let next = x - f / df;
        if !next.is_finite() {
            break;
        }
        x = next;
    }
    return x;
}
