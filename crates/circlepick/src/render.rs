//! Picker state to backend-neutral draw commands.
//!
//! Wheel angles here are the mapper's (0 at 12 o'clock). Geometry angles are
//! the arc builder's (0 at 3 o'clock), hence the `-90°` in [`WHEEL_START`].

use crate::geometry::{ArcOptions, ArcShape, Point, draw_arc, point_from_degrees};
use crate::layout::Layout;
use crate::style::{LabelPosition, Paint, Style, TextStyle};
use serde::Serialize;

/// Geometry angle of a zero value.
pub const WHEEL_START: f64 = -90.0;

// Divider ticks reach this far past half the active stroke.
const DIVIDER_OVERHANG: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Arc { shape: ArcShape, paint: Paint },
    Line { from: Point, to: Point, paint: Paint },
    Circle { center: Point, radius: f64, paint: Paint },
    /// `origin` is the left end of the baseline.
    Text { text: String, origin: Point, style: TextStyle },
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
    /// Part of `height` below the baseline.
    pub descent: f64,
}

impl TextExtent {
    fn ascent(&self) -> f64 {
        self.height - self.descent
    }
}

pub trait TextMeasure {
    fn measure(&self, text: &str, size: f64) -> TextExtent;
}

/// Fixed glyph proportions, for hosts without font metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxTextMeasure;

impl TextMeasure for ApproxTextMeasure {
    fn measure(&self, text: &str, size: f64) -> TextExtent {
        if text.is_empty() {
            return TextExtent::default();
        }
        TextExtent {
            width: text.chars().count() as f64 * size * 0.6,
            height: size,
            descent: size * 0.2,
        }
    }
}

/// The mapper-derived numbers one frame needs.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelState<'a> {
    pub angle: f64,
    pub value: f64,
    pub wheel_rotation: f64,
    pub degree_per_step: f64,
    /// `None` when the value text is hidden.
    pub value_text: Option<String>,
    pub label: &'a str,
    pub label_position: LabelPosition,
}

/// Sweep of the colored part of the wheel, in `[0, 360]`.
pub fn colored_sweep(angle: f64, value: f64) -> f64 {
    let sweep = angle % 360.0;
    if sweep < 0.0 {
        sweep + 360.0
    } else if value > 0.0 && sweep == 0.0 {
        360.0
    } else {
        sweep
    }
}

pub struct WheelRenderer<'a> {
    style: &'a Style,
    layout: &'a Layout,
    state: WheelState<'a>,
    commands: Vec<DrawCommand>,
}

impl<'a> WheelRenderer<'a> {
    pub fn new(style: &'a Style, layout: &'a Layout, state: WheelState<'a>) -> Self {
        Self {
            style,
            layout,
            state,
            commands: Vec::new(),
        }
    }

    pub fn render(mut self, measure: &dyn TextMeasure) -> Vec<DrawCommand> {
        let sweep = colored_sweep(self.state.angle, self.state.value);
        let color_start = WHEEL_START + self.state.wheel_rotation;
        let background_start = color_start + sweep;

        self.draw_wheel(color_start, sweep);
        if self.style.show_divider {
            self.draw_dividers();
        }
        if self.style.show_pointer {
            self.draw_pointer(background_start);
        }
        self.draw_text(measure);
        self.commands
    }

    fn draw_wheel(&mut self, color_start: f64, sweep: f64) {
        let center = self.layout.center;
        let radius = self.layout.radius;
        let background_start = color_start + sweep;
        let background_sweep = 360.0 - sweep;

        if self.state.value == 0.0 {
            self.arc(color_start, 360.0, self.style.wheel_background);
            return;
        }

        let (remainder, colored) = if self.state.value > 0.0 {
            (self.style.wheel_background, self.style.wheel_active)
        } else {
            (self.style.wheel_active, self.style.wheel_background)
        };
        self.arc(background_start, background_sweep, remainder);
        self.arc(color_start, sweep, colored);
        log::trace!("Wheel at {center:?} r={radius}: colored {sweep:.1}° from {color_start:.1}°");
    }

    fn arc(&mut self, start: f64, sweep: f64, paint: Paint) {
        let shape = draw_arc(self.layout.center, self.layout.radius, start, sweep, ArcOptions::default());
        self.commands.push(DrawCommand::Arc { shape, paint });
    }

    fn draw_dividers(&mut self) {
        let step = self.state.degree_per_step;
        if !(step > 0.0 && step.is_finite()) {
            return;
        }
        let length = self.style.wheel_active.width / 2.0 + DIVIDER_OVERHANG;
        let inner = self.layout.radius - length;
        let outer = self.layout.radius + length;

        let mut i = 0.0;
        while i < 360.0 - step / 2.0 {
            let angle = WHEEL_START + self.state.wheel_rotation + i;
            self.commands.push(DrawCommand::Line {
                from: point_from_degrees(self.layout.center, inner, angle),
                to: point_from_degrees(self.layout.center, outer, angle),
                paint: self.style.divider,
            });
            i += step;
        }
    }

    fn draw_pointer(&mut self, angle: f64) {
        let center = point_from_degrees(self.layout.center, self.layout.radius, angle);
        let radius = self.style.pointer_radius;
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            paint: self.style.pointer_halo,
        });
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            paint: self.style.pointer,
        });
    }

    fn draw_text(&mut self, measure: &dyn TextMeasure) {
        let label_visible = self.state.label_position != LabelPosition::Hidden;
        let value_text = self.state.value_text.take();
        if value_text.is_none() && !label_visible {
            return;
        }

        let text = value_text.unwrap_or_default();
        let text_style = self.style.value_text;
        let label_style = self.style.label_text;
        let text_ext = measure.measure(&text, text_style.size);
        let label_ext = if label_visible {
            measure.measure(self.state.label, label_style.size)
        } else {
            TextExtent::default()
        };

        let Point { x: cx, y: cy } = self.layout.center;
        let (text_origin, label_origin) = match self.state.label_position {
            LabelPosition::Hidden => (centered(cx, cy, &text_ext), centered(cx, cy, &label_ext)),
            LabelPosition::Above | LabelPosition::Below => {
                let (first, second) = if self.state.label_position == LabelPosition::Above {
                    (&label_ext, &text_ext)
                } else {
                    (&text_ext, &label_ext)
                };
                let top = cy - (first.height + second.height) / 2.0;
                let first_origin = Point::new(cx - first.width / 2.0, top + first.ascent());
                let second_origin =
                    Point::new(cx - second.width / 2.0, top + first.height + second.ascent());
                if self.state.label_position == LabelPosition::Above {
                    (second_origin, first_origin)
                } else {
                    (first_origin, second_origin)
                }
            }
            LabelPosition::Start | LabelPosition::End => {
                let left = cx - (label_ext.width + text_ext.width) / 2.0;
                let (text_x, label_x) = if self.state.label_position == LabelPosition::Start {
                    (left + label_ext.width, left)
                } else {
                    (left, left + text_ext.width)
                };
                (
                    Point::new(text_x, centered(cx, cy, &text_ext).y),
                    Point::new(label_x, centered(cx, cy, &label_ext).y),
                )
            }
        };

        if !text.is_empty() {
            self.commands.push(DrawCommand::Text {
                text,
                origin: text_origin,
                style: text_style,
            });
        }
        if label_visible && !self.state.label.is_empty() {
            self.commands.push(DrawCommand::Text {
                text: self.state.label.to_string(),
                origin: label_origin,
                style: label_style,
            });
        }
    }
}

fn centered(cx: f64, cy: f64, extent: &TextExtent) -> Point {
    Point::new(cx - extent.width / 2.0, cy - extent.height / 2.0 + extent.ascent())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PathEl;

    const EPS: f64 = 1e-9;

    fn layout() -> Layout {
        Layout {
            center: Point::new(100.0, 100.0),
            radius: 50.0,
            width: 200.0,
            height: 200.0,
        }
    }

    fn state(angle: f64, value: f64) -> WheelState<'static> {
        WheelState {
            angle,
            value,
            wheel_rotation: 0.0,
            degree_per_step: 36.0,
            value_text: None,
            label: "",
            label_position: LabelPosition::Hidden,
        }
    }

    fn arcs(commands: &[DrawCommand]) -> Vec<(&ArcShape, Paint)> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Arc { shape, paint } => Some((shape, *paint)),
                _ => None,
            })
            .collect()
    }

    fn start_of(shape: &ArcShape) -> Point {
        match shape {
            ArcShape::Dot(p) => *p,
            ArcShape::Path(path) => match path.elements()[0] {
                PathEl::MoveTo(to) => to,
                other => panic!("path starts with {other:?}"),
            },
        }
    }

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6
    }

    #[test]
    fn test_colored_sweep() {
        assert_eq!(colored_sweep(90.0, 25.0), 90.0);
        assert_eq!(colored_sweep(450.0, 125.0), 90.0);
        assert_eq!(colored_sweep(-90.0, -25.0), 270.0);
        assert_eq!(colored_sweep(360.0, 100.0), 360.0);
        assert_eq!(colored_sweep(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_zero_value_draws_only_background_ring() {
        let style = Style::default();
        let commands = WheelRenderer::new(&style, &layout(), state(0.0, 0.0)).render(&ApproxTextMeasure);
        let arcs = arcs(&commands);
        assert_eq!(arcs.len(), 1);
        assert_eq!(arcs[0].1, style.wheel_background);
        let ArcShape::Path(path) = arcs[0].0 else {
            panic!("expected a full ring");
        };
        let curves = path
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::CurveTo(..)))
            .count();
        assert_eq!(curves, 8);
    }

    #[test]
    fn test_positive_value_draws_background_then_active() {
        let style = Style::default();
        let layout = layout();
        let commands = WheelRenderer::new(&style, &layout, state(90.0, 25.0)).render(&ApproxTextMeasure);
        let arcs = arcs(&commands);
        assert_eq!(arcs.len(), 2);
        assert_eq!(arcs[0].1, style.wheel_background);
        assert_eq!(arcs[1].1, style.wheel_active);

        // colored arc starts at 12 o'clock, the rest starts at 3 o'clock
        assert!(close(start_of(arcs[1].0), Point::new(100.0, 50.0)));
        assert!(close(start_of(arcs[0].0), Point::new(150.0, 100.0)));
    }

    #[test]
    fn test_negative_value_swaps_paints() {
        let style = Style::default();
        let commands =
            WheelRenderer::new(&style, &layout(), state(-90.0, -25.0)).render(&ApproxTextMeasure);
        let arcs = arcs(&commands);
        assert_eq!(arcs[0].1, style.wheel_active);
        assert_eq!(arcs[1].1, style.wheel_background);
    }

    #[test]
    fn test_pointer_sits_at_end_of_colored_arc() {
        let style = Style::default();
        let commands = WheelRenderer::new(&style, &layout(), state(90.0, 25.0)).render(&ApproxTextMeasure);
        let circles: Vec<_> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Circle { center, radius, paint } => Some((*center, *radius, *paint)),
                _ => None,
            })
            .collect();
        assert_eq!(circles.len(), 2);
        assert_eq!(circles[0].2, style.pointer_halo);
        assert_eq!(circles[1].2, style.pointer);
        assert!(close(circles[1].0, Point::new(150.0, 100.0)));
        assert_eq!(circles[1].1, style.pointer_radius);
    }

    #[test]
    fn test_wheel_rotation_moves_pointer() {
        let style = Style::default();
        let mut rotated = state(0.0, 0.0);
        rotated.wheel_rotation = 180.0;
        let commands = WheelRenderer::new(&style, &layout(), rotated).render(&ApproxTextMeasure);
        let pointer = commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Circle { center, .. } => Some(*center),
                _ => None,
            })
            .unwrap();
        assert!(close(pointer, Point::new(100.0, 150.0)));
    }

    #[test]
    fn test_dividers() {
        let style = Style {
            show_divider: true,
            ..Style::default()
        };
        let commands = WheelRenderer::new(&style, &layout(), state(0.0, 0.0)).render(&ApproxTextMeasure);
        let lines: Vec<_> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect();
        assert_eq!(lines.len(), 10);

        // stroke 8 -> ticks reach 6 past the wheel on both sides
        let (from, to) = lines[0];
        assert!((from.x - 100.0).abs() < EPS && (from.y - 56.0).abs() < EPS);
        assert!((to.x - 100.0).abs() < EPS && (to.y - 44.0).abs() < EPS);
    }

    #[test]
    fn test_hidden_label_centers_value_text() {
        let style = Style::default();
        let mut s = state(90.0, 25.0);
        s.value_text = Some("25.0".to_string());
        let commands = WheelRenderer::new(&style, &layout(), s).render(&ApproxTextMeasure);
        let texts: Vec<_> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, origin, .. } => Some((text.as_str(), *origin)),
                _ => None,
            })
            .collect();
        assert_eq!(texts.len(), 1);
        let (text, origin) = texts[0];
        assert_eq!(text, "25.0");
        // 4 glyphs * 25 * 0.6 = 60 wide, ascent 20 of a 25 line
        assert!((origin.x - 70.0).abs() < EPS);
        assert!((origin.y - 107.5).abs() < EPS);
    }

    #[test]
    fn test_label_above_value() {
        let style = Style::default();
        let mut s = state(90.0, 25.0);
        s.value_text = Some("25".to_string());
        s.label = "Volume";
        s.label_position = LabelPosition::Above;
        let commands = WheelRenderer::new(&style, &layout(), s).render(&ApproxTextMeasure);
        let texts: Vec<_> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, origin, .. } => Some((text.clone(), *origin)),
                _ => None,
            })
            .collect();
        assert_eq!(texts.len(), 2);
        let value_y = texts[0].1.y;
        let label_y = texts[1].1.y;
        assert_eq!(texts[1].0, "Volume");
        assert!(label_y < value_y);
        assert!((value_y - label_y - 25.0).abs() < EPS);
    }

    #[test]
    fn test_label_at_start_is_left_of_value() {
        let style = Style::default();
        let mut s = state(90.0, 25.0);
        s.value_text = Some("25".to_string());
        s.label = "x";
        s.label_position = LabelPosition::Start;
        let commands = WheelRenderer::new(&style, &layout(), s).render(&ApproxTextMeasure);
        let origins: Vec<_> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { origin, .. } => Some(*origin),
                _ => None,
            })
            .collect();
        let (value, label) = (origins[0], origins[1]);
        // label 15 wide, value 30 wide, centered as one line
        assert!((label.x - 77.5).abs() < EPS);
        assert!((value.x - 92.5).abs() < EPS);
        assert!((value.y - label.y).abs() < EPS);
    }

    #[test]
    fn test_no_text_when_everything_hidden() {
        let style = Style::default();
        let commands = WheelRenderer::new(&style, &layout(), state(90.0, 25.0)).render(&ApproxTextMeasure);
        assert!(!commands.iter().any(|c| matches!(c, DrawCommand::Text { .. })));
    }
}
