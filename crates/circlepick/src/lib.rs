//! A circular value picker: a wheel that maps a bounded or cyclic range
//! onto angles, follows touch and drag gestures across several turns and
//! describes itself as backend-neutral draw commands.

pub mod config;
pub mod events;
pub mod format;
pub mod geometry;
pub mod layout;
pub mod mapper;
pub mod picker;
pub mod render;
pub mod style;
pub mod svg;

pub use mapper::{AngleValueMapper, Callbacks, MapperError, MapperSettings, ValueListener};
pub use picker::{CirclePicker, PointerAction, TouchRegion};
