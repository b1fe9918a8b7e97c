//! Circular arcs built only from cubic Bézier segments.
//!
//! Native arc primitives of some backends show seams at certain scale
//! factors, so every arc the picker draws goes through [`add_arc_segment`]
//! and is split by [`append_arc_radians`] when the sweep gets too long for a
//! single cubic to follow the circle.

pub use kurbo::{BezPath, PathEl, Point};
use serde::Serialize;
use std::f64::consts::TAU;

/// Split threshold of 45°.
pub const DEFAULT_POINTS_ON_CIRCLE: u32 = 8;

// Absorbs the rounding of repeated threshold multiples.
const ANGLE_EPSILON: f64 = 1e-9;

/// How an arc longer than the split threshold is cut into segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitMode {
    /// Cut on every multiple of the threshold, so stacked arcs share boundary points.
    GridAligned,
    /// Cut into equal parts, each no longer than the threshold.
    #[default]
    Equal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcOptions {
    /// The threshold is `360° / points_on_circle`; 0 disables splitting.
    pub points_on_circle: u32,
    pub split: SplitMode,
}

impl Default for ArcOptions {
    fn default() -> Self {
        Self {
            points_on_circle: DEFAULT_POINTS_ON_CIRCLE,
            split: SplitMode::default(),
        }
    }
}

impl ArcOptions {
    pub fn unsplit() -> Self {
        Self {
            points_on_circle: 0,
            split: SplitMode::default(),
        }
    }

    pub fn grid_aligned(points_on_circle: u32) -> Self {
        Self {
            points_on_circle,
            split: SplitMode::GridAligned,
        }
    }

    pub fn equal(points_on_circle: u32) -> Self {
        Self {
            points_on_circle,
            split: SplitMode::Equal,
        }
    }

    fn threshold(&self) -> Option<f64> {
        (self.points_on_circle >= 1).then(|| TAU / f64::from(self.points_on_circle))
    }
}

/// What a backend should draw for an arc: a lone point when the sweep is zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArcShape {
    Dot(Point),
    Path(BezPath),
}

pub fn normalize_radians(radians: f64) -> f64 {
    wrap(radians, TAU)
}

pub fn normalize_degrees(degrees: f64) -> f64 {
    wrap(degrees, 360.0)
}

fn wrap(angle: f64, full_turn: f64) -> f64 {
    let mut wrapped = angle % full_turn;
    if wrapped < 0.0 {
        wrapped += full_turn;
    }
    // tiny negative inputs round up to the full turn
    if wrapped >= full_turn {
        wrapped = 0.0;
    }
    wrapped
}

pub fn point_from_radians(center: Point, radius: f64, radians: f64) -> Point {
    let (sin, cos) = radians.sin_cos();
    Point::new(center.x + radius * cos, center.y + radius * sin)
}

pub fn point_from_degrees(center: Point, radius: f64, degrees: f64) -> Point {
    point_from_radians(center, radius, degrees.to_radians())
}

/// Appends a single cubic approximating the circular arc from `start` to `end`.
///
/// Accurate up to roughly a quarter turn; longer arcs should go through
/// [`append_arc_radians`]. A zero-length arc appends no curve, though the
/// move-to is still honored.
pub fn add_arc_segment(path: &mut BezPath, center: Point, start: Point, end: Point, move_to_start: bool) {
    if move_to_start {
        path.move_to(start);
    }
    if start == end {
        return;
    }

    let (ax, ay) = (start.x - center.x, start.y - center.y);
    let (bx, by) = (end.x - center.x, end.y - center.y);
    let q1 = ax * ax + ay * ay;
    let q2 = q1 + ax * bx + ay * by;
    let k2 = 4.0 / 3.0 * ((2.0 * q1 * q2).sqrt() - q2) / (ax * by - ay * bx);

    let ctrl1 = Point::new(center.x + ax - k2 * ay, center.y + ay + k2 * ax);
    let ctrl2 = Point::new(center.x + bx + k2 * by, center.y + by - k2 * bx);
    path.curve_to(ctrl1, ctrl2, end);
}

/// Appends a circular arc to `path`, split according to `options`.
///
/// Positive sweeps run clockwise on a y-down screen. A zero sweep, or a
/// non-finite angle, leaves the path untouched.
pub fn append_arc_radians(
    path: &mut BezPath,
    center: Point,
    radius: f64,
    start: f64,
    sweep: f64,
    options: ArcOptions,
) {
    if sweep == 0.0 || !sweep.is_finite() || !start.is_finite() {
        return;
    }

    if let Some(threshold) = options.threshold()
        && sweep.abs() > threshold + ANGLE_EPSILON
    {
        let angle = normalize_radians(start);
        let first = point_from_radians(center, radius, angle);
        path.move_to(first);
        match options.split {
            SplitMode::GridAligned => {
                split_on_grid(path, center, radius, angle, sweep, threshold, first)
            }
            SplitMode::Equal => split_equally(path, center, radius, angle, sweep, threshold, first),
        }
        return;
    }

    let from = point_from_radians(center, radius, start);
    let to = point_from_radians(center, radius, start + sweep);
    add_arc_segment(path, center, from, to, true);
}

pub fn append_arc_degrees(
    path: &mut BezPath,
    center: Point,
    radius: f64,
    start: f64,
    sweep: f64,
    options: ArcOptions,
) {
    append_arc_radians(path, center, radius, start.to_radians(), sweep.to_radians(), options);
}

/// Builds a fresh path holding one arc. Angles in degrees.
pub fn build_arc(center: Point, radius: f64, start: f64, sweep: f64, options: ArcOptions) -> BezPath {
    let mut path = BezPath::new();
    append_arc_degrees(&mut path, center, radius, start, sweep, options);
    path
}

/// Like [`build_arc`], but a zero sweep yields the start point instead of an empty path.
pub fn draw_arc(center: Point, radius: f64, start: f64, sweep: f64, options: ArcOptions) -> ArcShape {
    if sweep == 0.0 {
        ArcShape::Dot(point_from_degrees(center, radius, start))
    } else {
        ArcShape::Path(build_arc(center, radius, start, sweep, options))
    }
}

fn split_on_grid(
    path: &mut BezPath,
    center: Point,
    radius: f64,
    mut angle: f64,
    sweep: f64,
    threshold: f64,
    mut start: Point,
) {
    let clockwise = sweep > 0.0;
    let direction = if clockwise { 1.0 } else { -1.0 };
    let end_angle = angle + sweep;

    loop {
        let ratio = angle / threshold;
        let mut next = if clockwise { ratio.ceil() } else { ratio.floor() } * threshold;
        if (next - angle).abs() < ANGLE_EPSILON {
            next += threshold * direction;
        }

        let is_end = if clockwise {
            end_angle <= next + ANGLE_EPSILON
        } else {
            end_angle >= next - ANGLE_EPSILON
        };
        let end = point_from_radians(center, radius, if is_end { end_angle } else { next });
        add_arc_segment(path, center, start, end, false);
        if is_end {
            break;
        }
        angle = next;
        start = end;
    }
}

fn split_equally(
    path: &mut BezPath,
    center: Point,
    radius: f64,
    angle: f64,
    sweep: f64,
    threshold: f64,
    mut start: Point,
) {
    let count = ((sweep.abs() / threshold) - ANGLE_EPSILON).ceil().max(1.0) as usize;
    let part = sweep / count as f64;

    for i in 1..=count {
        let end = point_from_radians(center, radius, angle + part * i as f64);
        add_arc_segment(path, center, start, end, false);
        start = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn curve_ends(path: &BezPath) -> Vec<Point> {
        path.elements()
            .iter()
            .filter_map(|el| match el {
                PathEl::CurveTo(_, _, to) => Some(*to),
                _ => None,
            })
            .collect()
    }

    fn boundary_degrees(path: &BezPath) -> Vec<f64> {
        curve_ends(path)
            .into_iter()
            .map(|p| normalize_degrees(p.y.atan2(p.x).to_degrees()))
            .collect()
    }

    fn move_count(path: &BezPath) -> usize {
        path.elements()
            .iter()
            .filter(|el| matches!(el, PathEl::MoveTo(_)))
            .count()
    }

    fn assert_angles(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-6, "{actual:?} vs {expected:?}");
        }
    }

    fn cubic_at(p0: Point, c1: Point, c2: Point, p3: Point, t: f64) -> Point {
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        Point::new(
            a * p0.x + b * c1.x + c * c2.x + d * p3.x,
            a * p0.y + b * c1.y + c * c2.y + d * p3.y,
        )
    }

    #[test]
    fn test_normalize_stays_in_range() {
        for raw in [-1000.5, -360.0, -0.0, -1e-18, 0.0, 1.0, 359.999, 360.0, 720.25, 1e6] {
            let n = normalize_degrees(raw);
            assert!((0.0..360.0).contains(&n), "{raw} -> {n}");
            let r = normalize_radians(raw.to_radians());
            assert!((0.0..TAU).contains(&r), "{raw} -> {r}");
        }
        assert_eq!(normalize_radians(TAU), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
    }

    #[test]
    fn test_normalize_is_periodic() {
        for k in -3..=3 {
            let shifted = 42.5 + 360.0 * f64::from(k);
            assert!((normalize_degrees(shifted) - 42.5).abs() < EPS);
        }
        assert!((normalize_degrees(-90.0) - 270.0).abs() < EPS);
    }

    #[test]
    fn test_point_on_circle_is_periodic() {
        let center = Point::new(10.0, -4.0);
        for theta in [-7.0, -1.0, 0.5, 3.0, 12.0] {
            let a = point_from_radians(center, 5.0, theta);
            let b = point_from_radians(center, 5.0, normalize_radians(theta));
            assert!((a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS);
        }
        let top = point_from_degrees(Point::ORIGIN, 2.0, -90.0);
        assert!(top.x.abs() < EPS && (top.y + 2.0).abs() < EPS);
    }

    #[test]
    fn test_quarter_arc_control_points() {
        let mut path = BezPath::new();
        let r = 10.0;
        add_arc_segment(
            &mut path,
            Point::ORIGIN,
            Point::new(r, 0.0),
            Point::new(0.0, r),
            true,
        );
        let kappa = 4.0 / 3.0 * (2f64.sqrt() - 1.0);
        match path.elements() {
            [PathEl::MoveTo(_), PathEl::CurveTo(ctrl1, ctrl2, to)] => {
                assert!((ctrl1.x - r).abs() < EPS && (ctrl1.y - kappa * r).abs() < EPS);
                assert!((ctrl2.x - kappa * r).abs() < EPS && (ctrl2.y - r).abs() < EPS);
                assert_eq!(*to, Point::new(0.0, r));
            }
            other => panic!("unexpected verbs {other:?}"),
        }
    }

    #[test]
    fn test_segment_stays_close_to_circle() {
        let center = Point::new(3.0, 4.0);
        let r = 100.0;
        let start = point_from_degrees(center, r, 10.0);
        let end = point_from_degrees(center, r, 55.0);
        let mut path = BezPath::new();
        add_arc_segment(&mut path, center, start, end, true);
        let PathEl::CurveTo(ctrl1, ctrl2, to) = path.elements()[1] else {
            panic!("expected a cubic");
        };
        for i in 0..=10 {
            let p = cubic_at(start, ctrl1, ctrl2, to, f64::from(i) / 10.0);
            let dist = (p.x - center.x).hypot(p.y - center.y);
            assert!((dist - r).abs() < 0.01, "t={i} dist={dist}");
        }
    }

    #[test]
    fn test_degenerate_segment_adds_no_curve() {
        let mut path = BezPath::new();
        let p = Point::new(1.0, 0.0);
        add_arc_segment(&mut path, Point::ORIGIN, p, p, false);
        assert!(path.elements().is_empty());

        add_arc_segment(&mut path, Point::ORIGIN, p, p, true);
        assert_eq!(path.elements(), &[PathEl::MoveTo(p)]);
    }

    #[test]
    fn test_zero_sweep_leaves_path_untouched() {
        let mut path = BezPath::new();
        path.move_to(Point::new(1.0, 1.0));
        let before = path.clone();
        append_arc_degrees(&mut path, Point::ORIGIN, 5.0, 30.0, 0.0, ArcOptions::default());
        assert_eq!(path, before);

        assert!(build_arc(Point::ORIGIN, 5.0, 30.0, 0.0, ArcOptions::default())
            .elements()
            .is_empty());
    }

    #[test]
    fn test_non_finite_angles_leave_path_untouched() {
        for sweep in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            for options in [ArcOptions::grid_aligned(12), ArcOptions::equal(12), ArcOptions::unsplit()] {
                let path = build_arc(Point::ORIGIN, 5.0, 30.0, sweep, options);
                assert!(path.elements().is_empty(), "{sweep} {options:?}");
            }
        }
        let path = build_arc(Point::ORIGIN, 5.0, f64::NAN, 100.0, ArcOptions::grid_aligned(12));
        assert!(path.elements().is_empty());
    }

    #[test]
    fn test_draw_arc_zero_sweep_is_a_dot() {
        match draw_arc(Point::ORIGIN, 10.0, 0.0, 0.0, ArcOptions::default()) {
            ArcShape::Dot(p) => assert!((p.x - 10.0).abs() < EPS && p.y.abs() < EPS),
            ArcShape::Path(_) => panic!("expected a dot"),
        }
        assert!(matches!(
            draw_arc(Point::ORIGIN, 10.0, 0.0, 1.0, ArcOptions::default()),
            ArcShape::Path(_)
        ));
    }

    #[test]
    fn test_grid_aligned_split() {
        let path = build_arc(Point::ORIGIN, 50.0, 0.0, 100.0, ArcOptions::grid_aligned(12));
        assert_eq!(curve_ends(&path).len(), 4);
        assert_angles(&boundary_degrees(&path), &[30.0, 60.0, 90.0, 100.0]);
        assert!(matches!(path.elements()[0], PathEl::MoveTo(_)));
        assert_eq!(move_count(&path), 1);
    }

    #[test]
    fn test_equal_split() {
        let path = build_arc(Point::ORIGIN, 50.0, 0.0, 100.0, ArcOptions::equal(12));
        assert_eq!(curve_ends(&path).len(), 4);
        assert_angles(&boundary_degrees(&path), &[25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn test_grid_aligned_split_from_off_grid_start() {
        let path = build_arc(Point::ORIGIN, 50.0, 20.0, 50.0, ArcOptions::grid_aligned(12));
        assert_angles(&boundary_degrees(&path), &[30.0, 60.0, 70.0]);
    }

    #[test]
    fn test_grid_aligned_split_counter_clockwise() {
        let path = build_arc(Point::ORIGIN, 50.0, 100.0, -100.0, ArcOptions::grid_aligned(12));
        assert_angles(&boundary_degrees(&path), &[90.0, 60.0, 30.0, 0.0]);
    }

    #[test]
    fn test_grid_aligned_split_ending_on_grid() {
        let path = build_arc(Point::ORIGIN, 50.0, 0.0, 90.0, ArcOptions::grid_aligned(12));
        assert_angles(&boundary_degrees(&path), &[30.0, 60.0, 90.0]);
    }

    #[test]
    fn test_equal_split_counter_clockwise() {
        let path = build_arc(Point::ORIGIN, 50.0, 0.0, -100.0, ArcOptions::equal(12));
        assert_angles(&boundary_degrees(&path), &[335.0, 310.0, 285.0, 260.0]);
    }

    #[test]
    fn test_sweep_within_threshold_is_single_segment() {
        let path = build_arc(Point::ORIGIN, 50.0, 0.0, 45.0, ArcOptions::default());
        assert_eq!(curve_ends(&path).len(), 1);

        let full = build_arc(Point::ORIGIN, 50.0, -90.0, 360.0, ArcOptions::default());
        assert_eq!(curve_ends(&full).len(), 8);
    }

    #[test]
    fn test_unsplit_ignores_sweep_size() {
        let path = build_arc(Point::ORIGIN, 50.0, 0.0, 120.0, ArcOptions::unsplit());
        assert_eq!(curve_ends(&path).len(), 1);
        assert_angles(&boundary_degrees(&path), &[120.0]);
    }
}
