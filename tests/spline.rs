use speedplot::data::spline::catmull_rom;

const SUB: usize = 16;

fn dist(a: [f64; 2], b: [f64; 2]) -> f64 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt()
}

#[test]
fn output_length_per_segment_is_exact() {
    let pts = vec![[0.0, 0.0], [1.0, 2.0], [2.0, 1.0], [3.0, 3.0]];
    let curve = catmull_rom(&pts, SUB);
    assert_eq!(curve.len(), (pts.len() - 1) * SUB + 1);
}

#[test]
fn curve_passes_through_control_points() {
    let pts = vec![[0.0, 5.0], [1.0, 1.0], [2.5, 4.0], [4.0, 0.0], [5.0, 2.0]];
    let curve = catmull_rom(&pts, SUB);
    for (i, p) in pts.iter().enumerate() {
        let on_curve = curve[i * SUB];
        assert!(
            dist(*p, on_curve) < 1e-9,
            "control point {} not on curve: {:?} vs {:?}",
            i,
            p,
            on_curve
        );
    }
    assert_eq!(curve.last().unwrap(), pts.last().unwrap());
}

#[test]
fn adjacent_steps_bounded_by_control_spacing() {
    let pts = vec![[0.0, 0.0], [1.0, 3.0], [2.0, -1.0], [3.0, 2.0], [4.0, 0.5]];
    let max_spacing = pts
        .windows(2)
        .map(|w| dist(w[0], w[1]))
        .fold(0.0f64, f64::max);
    let curve = catmull_rom(&pts, SUB);
    let max_step = curve
        .windows(2)
        .map(|w| dist(w[0], w[1]))
        .fold(0.0f64, f64::max);
    // Continuity: each subdivided step covers only a small slice of a
    // segment. Even with overshoot, one step never approaches a whole
    // control-point gap.
    assert!(
        max_step < max_spacing,
        "step {} vs spacing {}",
        max_step,
        max_spacing
    );
}

#[test]
fn collinear_input_stays_collinear() {
    let pts = vec![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0]];
    let curve = catmull_rom(&pts, SUB);
    for p in &curve {
        assert!((p[0] - p[1]).abs() < 1e-9, "point off the line: {:?}", p);
    }
}

#[test]
fn short_inputs_are_returned_unchanged() {
    assert!(catmull_rom(&[], SUB).is_empty());
    assert_eq!(catmull_rom(&[[1.0, 2.0]], SUB), vec![[1.0, 2.0]]);
    let two = vec![[0.0, 0.0], [1.0, 0.0]];
    assert_eq!(catmull_rom(&two, 0), two);
}

#[test]
fn two_points_interpolate_linearly() {
    let curve = catmull_rom(&[[0.0, 0.0], [2.0, 4.0]], 4);
    assert_eq!(curve.len(), 5);
    for p in &curve {
        assert!((p[1] - 2.0 * p[0]).abs() < 1e-9);
    }
}
