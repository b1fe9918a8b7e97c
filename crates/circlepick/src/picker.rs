//! The widget around a mapper: hit testing, clicks and long presses,
//! measurement and drawing.

use crate::events::PointerEvent;
use crate::format::{SimpleFormatter, ValueFormatter};
use crate::geometry::Point;
use crate::layout::Layout;
use crate::mapper::{AngleValueMapper, ValueListener};
use crate::render::{DrawCommand, TextMeasure, WheelRenderer, WheelState};
use crate::style::{Label, LabelPosition, Style};
use std::fmt;

const INNER_RATIO: f64 = 0.6;
const OUTER_RATIO: f64 = 1.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchRegion {
    /// The center of the wheel: clicks and long presses.
    Inside,
    OnWheel,
    Outside,
}

impl TouchRegion {
    /// `point` is relative to the wheel center.
    pub fn classify(point: Point, wheel_radius: f64) -> Self {
        let distance = point.to_vec2().hypot();
        if distance < wheel_radius * INNER_RATIO {
            TouchRegion::Inside
        } else if distance > wheel_radius * OUTER_RATIO {
            TouchRegion::Outside
        } else {
            TouchRegion::OnWheel
        }
    }
}

/// What the host should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerAction {
    pub should_redraw: bool,
    pub clicked: bool,
    /// Arm a long-press timer and call [`CirclePicker::long_press_elapsed`] when it fires.
    pub long_press_pending: bool,
    pub long_pressed: bool,
}

impl PointerAction {
    fn redraw() -> Self {
        Self {
            should_redraw: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Press {
    #[default]
    Released,
    Pressed,
    LongPressed,
}

pub struct CirclePicker {
    mapper: AngleValueMapper,
    style: Style,
    layout: Layout,
    configured_radius: f64,
    formatter: Box<dyn ValueFormatter>,
    label: Label,
    label_position: LabelPosition,
    interactive: bool,
    press: Press,
}

impl fmt::Debug for CirclePicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CirclePicker")
            .field("mapper", &self.mapper)
            .field("layout", &self.layout)
            .field("label", &self.label)
            .field("label_position", &self.label_position)
            .field("interactive", &self.interactive)
            .field("press", &self.press)
            .finish_non_exhaustive()
    }
}

impl CirclePicker {
    pub fn new(mapper: AngleValueMapper, style: Style) -> Self {
        let configured_radius = mapper.wheel_radius();
        Self {
            mapper,
            style,
            layout: Layout::default(),
            configured_radius,
            formatter: Box::new(SimpleFormatter::default()),
            label: Label::default(),
            label_position: LabelPosition::Hidden,
            interactive: true,
            press: Press::Released,
        }
    }

    pub fn with_formatter(mut self, formatter: Box<dyn ValueFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn with_label(mut self, label: Label, position: LabelPosition) -> Self {
        self.label = label;
        self.label_position = position;
        self
    }

    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn mapper(&self) -> &AngleValueMapper {
        &self.mapper
    }

    pub fn mapper_mut(&mut self) -> &mut AngleValueMapper {
        &mut self.mapper
    }

    pub fn set_listener(&mut self, listener: impl ValueListener + 'static) {
        self.mapper.set_listener(listener);
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn set_label(&mut self, label: Label) {
        self.label = label;
    }

    pub fn label_position(&self) -> LabelPosition {
        self.label_position
    }

    pub fn set_label_position(&mut self, position: LabelPosition) {
        self.label_position = position;
    }

    pub fn set_formatter(&mut self, formatter: Box<dyn ValueFormatter>) {
        self.formatter = formatter;
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Turning interaction off drops any gesture in progress.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
        if !interactive {
            self.reset();
        }
    }

    pub fn value(&self) -> f64 {
        self.mapper.value()
    }

    pub fn set_value(&mut self, value: f64) -> f64 {
        self.mapper.set_value(value)
    }

    pub fn formatted_value(&self) -> String {
        self.formatter.format(self.value())
    }

    /// Zero goes back to fitting the wheel into the available space.
    pub fn set_wheel_radius(&mut self, radius: f64) {
        self.configured_radius = radius.max(0.0);
        self.mapper.set_wheel_radius(self.configured_radius);
    }

    /// Lays the wheel out in the available space and returns the size it wants.
    pub fn measure(&mut self, available_width: f64, available_height: f64) -> (f64, f64) {
        self.layout = Layout::measure(
            available_width,
            available_height,
            self.configured_radius,
            self.style.pointer_extent(),
        );
        self.mapper.set_wheel_radius(self.layout.radius);
        (self.layout.width, self.layout.height)
    }

    pub fn handle(&mut self, event: PointerEvent) -> PointerAction {
        if !self.interactive {
            return PointerAction::default();
        }

        match event {
            PointerEvent::Down(position) => self.pointer_down(self.layout.to_local(position)),
            PointerEvent::Move(position) => {
                match self.mapper.drag_to(self.layout.to_local(position)) {
                    Some(_) => PointerAction::redraw(),
                    None => PointerAction::default(),
                }
            }
            PointerEvent::Up => self.pointer_up(),
            PointerEvent::Cancel => {
                let was_dragging = self.reset();
                PointerAction {
                    should_redraw: was_dragging,
                    ..PointerAction::default()
                }
            }
        }
    }

    /// The host's long-press timer fired. True if it counts as a long press.
    pub fn long_press_elapsed(&mut self) -> bool {
        if self.press == Press::Pressed {
            log::debug!("Long press on {}", self.label);
            self.press = Press::LongPressed;
            true
        } else {
            false
        }
    }

    pub fn render(&self, measure: &dyn TextMeasure) -> Vec<DrawCommand> {
        let state = WheelState {
            angle: self.mapper.angle(),
            value: self.mapper.value(),
            wheel_rotation: self.mapper.wheel_rotation(),
            degree_per_step: self.mapper.degree_per_step(),
            value_text: self.style.show_value_text.then(|| self.formatted_value()),
            label: self.label.as_str(),
            label_position: self.label_position,
        };
        WheelRenderer::new(&self.style, &self.layout, state).render(measure)
    }

    fn pointer_down(&mut self, local: Point) -> PointerAction {
        self.reset();
        match TouchRegion::classify(local, self.layout.radius) {
            TouchRegion::OnWheel => {
                self.mapper.touch_down(local);
                PointerAction::redraw()
            }
            TouchRegion::Inside => {
                self.press = Press::Pressed;
                PointerAction {
                    long_press_pending: true,
                    ..PointerAction::default()
                }
            }
            TouchRegion::Outside => PointerAction::default(),
        }
    }

    fn pointer_up(&mut self) -> PointerAction {
        let press = std::mem::take(&mut self.press);
        if self.mapper.release().is_some() {
            return PointerAction::redraw();
        }
        PointerAction {
            clicked: press == Press::Pressed,
            long_pressed: press == Press::LongPressed,
            ..PointerAction::default()
        }
    }

    fn reset(&mut self) -> bool {
        self.press = Press::Released;
        self.mapper.cancel()
    }
}
