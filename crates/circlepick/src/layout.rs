use crate::geometry::Point;
use serde::Serialize;

/// Where the wheel sits inside the widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Layout {
    pub center: Point,
    pub radius: f64,
    /// Size the widget asks for.
    pub width: f64,
    pub height: f64,
}

impl Layout {
    /// A `configured_radius` of zero fills the available space. `extent` is
    /// what the pointer needs beyond the wheel radius.
    pub fn measure(
        available_width: f64,
        available_height: f64,
        configured_radius: f64,
        extent: f64,
    ) -> Self {
        let available = available_width.min(available_height).max(0.0);

        if configured_radius <= 0.0 {
            let radius = (available / 2.0 - extent).max(0.0);
            log::debug!("Automatic wheel radius {radius:.1} for {available_width}x{available_height}");
            return Self {
                center: Point::new(available_width / 2.0, available_height / 2.0),
                radius,
                width: available_width,
                height: available_height,
            };
        }

        let radius = if available > 0.0 {
            available.min(configured_radius)
        } else {
            configured_radius
        };
        let side = 2.0 * (radius + extent);
        Self {
            center: Point::new(side / 2.0, side / 2.0),
            radius,
            width: side,
            height: side,
        }
    }

    /// Widget coordinates to coordinates relative to the wheel center.
    pub fn to_local(&self, point: Point) -> Point {
        point - self.center.to_vec2()
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::measure(0.0, 0.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_automatic_radius() {
        let layout = Layout::measure(300.0, 200.0, 0.0, 18.0);
        assert_eq!(layout.radius, 82.0);
        assert_eq!(layout.center, Point::new(150.0, 100.0));
        assert_eq!((layout.width, layout.height), (300.0, 200.0));
    }

    #[test]
    fn test_automatic_radius_never_negative() {
        let layout = Layout::measure(20.0, 20.0, 0.0, 18.0);
        assert_eq!(layout.radius, 0.0);
    }

    #[test]
    fn test_configured_radius() {
        let layout = Layout::measure(400.0, 400.0, 100.0, 18.0);
        assert_eq!(layout.radius, 100.0);
        assert_eq!(layout.width, 236.0);
        assert_eq!(layout.center, Point::new(118.0, 118.0));

        let squeezed = Layout::measure(60.0, 80.0, 100.0, 18.0);
        assert_eq!(squeezed.radius, 60.0);

        let unconstrained = Layout::measure(0.0, 0.0, 100.0, 18.0);
        assert_eq!(unconstrained.radius, 100.0);
    }

    #[test]
    fn test_coordinate_translation() {
        let layout = Layout::measure(200.0, 200.0, 0.0, 0.0);
        let p = Point::new(150.0, 20.0);
        assert_eq!(layout.to_local(p), Point::new(50.0, -80.0));
    }
}
