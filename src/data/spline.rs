//! Uniform Catmull-Rom spline subdivision.
//!
//! Produces a smooth polyline through a sequence of control points. Each
//! segment between two adjacent control points is evaluated from a window of
//! 4 control points, clamped at the sequence boundaries by repeating the
//! first/last point.

/// Subdivide `points` into a polyline passing through every control point.
///
/// `subdivisions` is the number of steps per segment; the output has
/// `(n - 1) * subdivisions + 1` points for `n >= 2` control points. Fewer
/// than two control points are returned unchanged.
pub fn catmull_rom(points: &[[f64; 2]], subdivisions: usize) -> Vec<[f64; 2]> {
    let n = points.len();
    if n < 2 || subdivisions == 0 {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity((n - 1) * subdivisions + 1);
    for i in 0..n - 1 {
        // Window clamped at the ends: p0 and p3 repeat the boundary points.
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(n - 1)];

        for step in 0..subdivisions {
            let t = step as f64 / subdivisions as f64;
            out.push(eval_segment(p0, p1, p2, p3, t));
        }
    }
    // t = 1.0 of the final segment is exactly the last control point.
    out.push(points[n - 1]);
    out
}

/// Evaluate one uniform Catmull-Rom segment at `t` in `[0, 1)`.
///
/// At `t = 0` the result is exactly `p1`; the curve heads toward `p2`.
fn eval_segment(p0: [f64; 2], p1: [f64; 2], p2: [f64; 2], p3: [f64; 2], t: f64) -> [f64; 2] {
    let t2 = t * t;
    let t3 = t2 * t;
    let mut result = [0.0; 2];
    for axis in 0..2 {
        result[axis] = 0.5
            * (2.0 * p1[axis]
                + (-p0[axis] + p2[axis]) * t
                + (2.0 * p0[axis] - 5.0 * p1[axis] + 4.0 * p2[axis] - p3[axis]) * t2
                + (-p0[axis] + 3.0 * p1[axis] - 3.0 * p2[axis] + p3[axis]) * t3);
    }
    result
}
