//! Value <-> angle mapping and the touch/drag gesture state machine.
//!
//! Angles are in degrees, 0 at 12 o'clock and growing clockwise. A value maps
//! to `value * degree_per_value`, so several turns of the wheel are several
//! cycles of the value. The stored angle is not clamped; reading it back
//! through [`AngleValueMapper::angle`] or [`AngleValueMapper::value`] is.

use crate::geometry::{Point, normalize_degrees};
use std::fmt;
use thiserror::Error;

pub const DEFAULT_STEP: f64 = 0.1;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MapperError {
    #[error("Either both limits or an explicit cycle value must be set")]
    IndeterminateCycle,
    #[error("Cycle value must be positive, got {0}")]
    NonPositiveCycle(f64),
    #[error("Step must be a positive finite number, got {0}")]
    InvalidStep(f64),
    #[error("Minimum value {min} is greater than maximum value {max}")]
    InvertedBounds { min: f64, max: f64 },
    #[error("Value limits must be numbers or unset, got NaN")]
    NanBound,
}

/// Receives the mapper's notifications. Every method defaults to doing nothing.
pub trait ValueListener {
    /// A touch or drag moved the value. Never fired outside a gesture.
    fn value_changing(&mut self, _value: f64) {}

    /// A gesture ended with a release. Fired once per gesture.
    fn value_changed(&mut self, _value: f64) {}

    /// Something visible changed.
    fn redraw_requested(&mut self) {}
}

impl ValueListener for () {}

/// Closure-backed [`ValueListener`].
#[derive(Default)]
pub struct Callbacks {
    changing: Option<Box<dyn FnMut(f64)>>,
    changed: Option<Box<dyn FnMut(f64)>>,
    redraw: Option<Box<dyn FnMut()>>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_changing(mut self, f: impl FnMut(f64) + 'static) -> Self {
        self.changing = Some(Box::new(f));
        self
    }

    pub fn on_changed(mut self, f: impl FnMut(f64) + 'static) -> Self {
        self.changed = Some(Box::new(f));
        self
    }

    pub fn on_redraw(mut self, f: impl FnMut() + 'static) -> Self {
        self.redraw = Some(Box::new(f));
        self
    }
}

impl ValueListener for Callbacks {
    fn value_changing(&mut self, value: f64) {
        if let Some(f) = self.changing.as_mut() {
            f(value);
        }
    }

    fn value_changed(&mut self, value: f64) {
        if let Some(f) = self.changed.as_mut() {
            f(value);
        }
    }

    fn redraw_requested(&mut self) {
        if let Some(f) = self.redraw.as_mut() {
            f();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// `last_angle` is the unwrapped pointer angle of the previous event.
    Dragging { last_angle: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapperSettings {
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub step: f64,
    /// Value span of one full turn. `None` derives it from the limits.
    pub cycle_value: Option<f64>,
    pub wheel_rotation: f64,
    pub wheel_radius: f64,
}

impl MapperSettings {
    pub fn bounded(min_value: f64, max_value: f64) -> Self {
        Self {
            min_value: Some(min_value),
            max_value: Some(max_value),
            step: DEFAULT_STEP,
            cycle_value: None,
            wheel_rotation: 0.0,
            wheel_radius: 0.0,
        }
    }

    /// Unbounded on both sides; the value keeps growing turn after turn.
    pub fn cyclic(cycle_value: f64) -> Self {
        Self {
            min_value: None,
            max_value: None,
            step: DEFAULT_STEP,
            cycle_value: Some(cycle_value),
            wheel_rotation: 0.0,
            wheel_radius: 0.0,
        }
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn with_cycle_value(mut self, cycle_value: f64) -> Self {
        self.cycle_value = Some(cycle_value);
        self
    }

    pub fn with_wheel_rotation(mut self, degrees: f64) -> Self {
        self.wheel_rotation = degrees;
        self
    }
}

pub struct AngleValueMapper {
    min_value: Option<f64>,
    max_value: Option<f64>,
    step: f64,
    cycle_value: Option<f64>,
    degree_per_value: f64,
    wheel_rotation: f64,
    wheel_radius: f64,
    angle: f64,
    gesture: Gesture,
    listener: Box<dyn ValueListener>,
}

impl fmt::Debug for AngleValueMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AngleValueMapper")
            .field("min_value", &self.min_value)
            .field("max_value", &self.max_value)
            .field("step", &self.step)
            .field("cycle_value", &self.cycle_value)
            .field("degree_per_value", &self.degree_per_value)
            .field("wheel_rotation", &self.wheel_rotation)
            .field("angle", &self.angle)
            .field("gesture", &self.gesture)
            .finish_non_exhaustive()
    }
}

impl AngleValueMapper {
    pub fn new(
        settings: MapperSettings,
        listener: impl ValueListener + 'static,
    ) -> Result<Self, MapperError> {
        check_step(settings.step)?;
        check_bounds(settings.min_value, settings.max_value)?;
        let cycle_value = explicit_cycle(settings.cycle_value);
        let degree_per_value =
            degree_per_value(settings.min_value, settings.max_value, cycle_value)?;

        Ok(Self {
            min_value: settings.min_value,
            max_value: settings.max_value,
            step: settings.step,
            cycle_value,
            degree_per_value,
            wheel_rotation: settings.wheel_rotation,
            wheel_radius: settings.wheel_radius,
            angle: 0.0,
            gesture: Gesture::Idle,
            listener: Box::new(listener),
        })
    }

    pub fn set_listener(&mut self, listener: impl ValueListener + 'static) {
        self.listener = Box::new(listener);
    }

    pub fn min_value(&self) -> Option<f64> {
        self.min_value
    }

    pub fn max_value(&self) -> Option<f64> {
        self.max_value
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// The explicitly configured cycle value, if any.
    pub fn explicit_cycle_value(&self) -> Option<f64> {
        self.cycle_value
    }

    /// The cycle value in effect, explicit or derived from the limits.
    pub fn cycle_value(&self) -> f64 {
        360.0 / self.degree_per_value
    }

    pub fn degree_per_value(&self) -> f64 {
        self.degree_per_value
    }

    pub fn degree_per_step(&self) -> f64 {
        self.step * self.degree_per_value
    }

    pub fn wheel_rotation(&self) -> f64 {
        self.wheel_rotation
    }

    pub fn wheel_radius(&self) -> f64 {
        self.wheel_radius
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    pub fn set_bounds(
        &mut self,
        min_value: Option<f64>,
        max_value: Option<f64>,
    ) -> Result<(), MapperError> {
        check_bounds(min_value, max_value)?;
        self.degree_per_value = degree_per_value(min_value, max_value, self.cycle_value)?;
        self.min_value = min_value;
        self.max_value = max_value;
        self.listener.redraw_requested();
        Ok(())
    }

    pub fn set_min_value(&mut self, min_value: Option<f64>) -> Result<(), MapperError> {
        self.set_bounds(min_value, self.max_value)
    }

    pub fn set_max_value(&mut self, max_value: Option<f64>) -> Result<(), MapperError> {
        self.set_bounds(self.min_value, max_value)
    }

    /// `None` (or zero) goes back to deriving the cycle from the limits.
    pub fn set_cycle_value(&mut self, cycle_value: Option<f64>) -> Result<(), MapperError> {
        let cycle_value = explicit_cycle(cycle_value);
        self.degree_per_value = degree_per_value(self.min_value, self.max_value, cycle_value)?;
        self.cycle_value = cycle_value;
        self.listener.redraw_requested();
        Ok(())
    }

    /// Re-snaps the current angle to the new step.
    pub fn set_step(&mut self, step: f64) -> Result<(), MapperError> {
        check_step(step)?;
        self.step = step;
        self.degree_per_value = degree_per_value(self.min_value, self.max_value, self.cycle_value)?;
        self.set_angle(self.angle);
        Ok(())
    }

    pub fn set_wheel_rotation(&mut self, degrees: f64) {
        self.wheel_rotation = degrees;
        self.listener.redraw_requested();
    }

    pub fn set_wheel_radius(&mut self, radius: f64) {
        self.wheel_radius = radius;
    }

    /// Snaps to the step, stores the matching angle and returns the clamped value.
    ///
    /// The stored angle belongs to the unclamped value, so a drag that
    /// overshoots a limit keeps tracking the pointer on its way back.
    pub fn set_value(&mut self, value: f64) -> f64 {
        let snapped = self.closest_value(value);
        self.angle = self.value_to_degree(snapped);
        let clamped = snapped.clamp(self.lower_value(), self.upper_value());

        if self.is_dragging() {
            self.listener.value_changing(clamped);
        }
        self.listener.redraw_requested();
        clamped
    }

    pub fn value(&self) -> f64 {
        self.degree_to_value(self.angle())
    }

    /// The current angle, clamped to the limits. This is the snapshot to persist.
    pub fn angle(&self) -> f64 {
        self.angle.clamp(self.min_angle(), self.max_angle())
    }

    /// Re-injects a snapshot verbatim, without clamping or snapping.
    pub fn restore_angle(&mut self, angle: f64) {
        self.angle = angle;
        self.listener.redraw_requested();
    }

    /// Angle of a point given relative to the wheel center, with the rotation compensated.
    pub fn pointer_angle(&self, point: Point) -> f64 {
        point.y.atan2(point.x).to_degrees() + 90.0 - self.wheel_rotation
    }

    /// Starts a gesture: jumps along the shortest way to the touched angle.
    pub fn touch_down(&mut self, point: Point) -> f64 {
        let pointer = self.pointer_angle(point);
        let target = self.angle_for_touch(pointer);
        log::debug!("Touch down at {pointer:.2}°, moving to {target:.2}°");
        self.set_angle(target)
    }

    /// Continues a gesture. Returns `None` when no gesture is in progress.
    pub fn drag_to(&mut self, point: Point) -> Option<f64> {
        let Gesture::Dragging { last_angle } = self.gesture else {
            return None;
        };
        let target = self.angle_for_move(last_angle, self.pointer_angle(point));
        Some(self.set_angle(target))
    }

    /// Ends the gesture and reports the committed value.
    pub fn release(&mut self) -> Option<f64> {
        if !self.is_dragging() {
            return None;
        }
        self.gesture = Gesture::Idle;
        let value = self.value();
        log::debug!("Gesture released at {value}");
        self.listener.value_changed(value);
        Some(value)
    }

    /// Drops the gesture without committing anything.
    pub fn cancel(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.gesture = Gesture::Idle;
        was_dragging
    }

    fn angle_for_touch(&mut self, angle: f64) -> f64 {
        let mut diff = normalize_degrees(angle) - normalize_degrees(self.angle);

        // on touch, the opposite point separates increasing from decreasing
        if diff <= -180.0 {
            diff += 360.0;
        } else if diff > 180.0 {
            diff -= 360.0;
        }

        self.gesture = Gesture::Dragging {
            last_angle: self.angle + diff,
        };
        (self.angle + diff).clamp(self.min_angle(), self.max_angle())
    }

    fn angle_for_move(&mut self, last_angle: f64, angle: f64) -> f64 {
        let mut diff = normalize_degrees(angle) - normalize_degrees(last_angle);

        // biased towards clockwise so slow moves across 0° don't flip direction
        if diff <= -90.0 {
            diff += 360.0;
        } else if diff > 270.0 {
            diff -= 360.0;
        }

        let mut last_angle = last_angle + diff;
        if last_angle > self.angle + 360.0 {
            last_angle -= 360.0;
        } else if last_angle < self.angle - 360.0 {
            last_angle += 360.0;
        }

        self.gesture = Gesture::Dragging { last_angle };
        last_angle.clamp(self.min_angle(), self.max_angle())
    }

    fn set_angle(&mut self, angle: f64) -> f64 {
        self.set_value(self.degree_to_value(angle))
    }

    fn closest_value(&self, value: f64) -> f64 {
        (value / self.step).round() * self.step
    }

    fn value_to_degree(&self, value: f64) -> f64 {
        value * self.degree_per_value
    }

    fn degree_to_value(&self, angle: f64) -> f64 {
        angle / self.degree_per_value
    }

    fn lower_value(&self) -> f64 {
        self.min_value.unwrap_or(f64::NEG_INFINITY)
    }

    fn upper_value(&self) -> f64 {
        self.max_value.unwrap_or(f64::INFINITY)
    }

    fn min_angle(&self) -> f64 {
        self.value_to_degree(self.lower_value())
    }

    fn max_angle(&self) -> f64 {
        self.value_to_degree(self.upper_value())
    }
}

fn explicit_cycle(cycle_value: Option<f64>) -> Option<f64> {
    cycle_value.filter(|c| *c != 0.0)
}

fn cycle_from_bounds(min: f64, max: f64) -> f64 {
    if min < 0.0 && max > 0.0 {
        max - min + 1.0
    } else {
        (max + min).abs()
    }
}

fn degree_per_value(
    min_value: Option<f64>,
    max_value: Option<f64>,
    cycle_value: Option<f64>,
) -> Result<f64, MapperError> {
    let cycle = match (cycle_value, min_value, max_value) {
        (Some(cycle), _, _) => cycle,
        (None, Some(min), Some(max)) => cycle_from_bounds(min, max),
        _ => return Err(MapperError::IndeterminateCycle),
    };

    if cycle > 0.0 && cycle.is_finite() {
        Ok(360.0 / cycle)
    } else {
        Err(MapperError::NonPositiveCycle(cycle))
    }
}

fn check_step(step: f64) -> Result<(), MapperError> {
    if step > 0.0 && step.is_finite() {
        Ok(())
    } else {
        Err(MapperError::InvalidStep(step))
    }
}

fn check_bounds(min_value: Option<f64>, max_value: Option<f64>) -> Result<(), MapperError> {
    if min_value.is_some_and(f64::is_nan) || max_value.is_some_and(f64::is_nan) {
        return Err(MapperError::NanBound);
    }
    match (min_value, max_value) {
        (Some(min), Some(max)) if min > max => Err(MapperError::InvertedBounds { min, max }),
        _ => Ok(()),
    }
}
