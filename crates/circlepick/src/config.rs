use crate::format::FormatterKind;
use crate::mapper::{AngleValueMapper, DEFAULT_STEP, MapperError, MapperSettings, ValueListener};
use crate::picker::CirclePicker;
use crate::style::{Color, Label, LabelPosition, Paint, Style, TextStyle};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_PREFIX: &str = "CIRCLEPICK";

/// One picker, as read from `config.toml` and `CIRCLEPICK_*` variables.
///
/// Limits accept `inf` / `-inf` for an unbounded side, in which case
/// `cycle_value` has to be set. A `cycle_value` of 0 derives it from the limits.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PickerConfig {
    pub min_value: f64,
    pub max_value: f64,
    pub step: f64,
    pub cycle_value: f64,
    pub wheel_rotation: f64,
    pub wheel_radius: f64,
    pub value: f64,
    pub interactive: bool,

    pub wheel_stroke_width: f64,
    pub divider_width: f64,
    pub pointer_radius: f64,
    pub pointer_halo_width: f64,
    pub text_size: f64,
    /// Defaults to `text_size`.
    pub label_size: Option<f64>,

    pub active_color: Color,
    pub background_color: Color,
    pub divider_color: Option<Color>,
    pub pointer_color: Option<Color>,
    pub pointer_halo_color: Option<Color>,
    pub text_color: Option<Color>,
    pub label_color: Option<Color>,

    pub show_divider: bool,
    pub show_pointer: bool,
    pub show_value_text: bool,

    pub label: Label,
    /// Defaults to `above` when there is a label, `none` otherwise.
    pub label_position: Option<LabelPosition>,
    pub formatter: FormatterKind,
    pub precision: usize,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            min_value: 0.0,
            max_value: 100.0,
            step: DEFAULT_STEP,
            cycle_value: 0.0,
            wheel_rotation: 0.0,
            wheel_radius: 0.0,
            value: 0.0,
            interactive: true,
            wheel_stroke_width: 8.0,
            divider_width: 2.0,
            pointer_radius: 8.0,
            pointer_halo_width: 10.0,
            text_size: 25.0,
            label_size: None,
            active_color: Color::cyan(),
            background_color: Color::dark_gray(),
            divider_color: None,
            pointer_color: None,
            pointer_halo_color: None,
            text_color: None,
            label_color: None,
            show_divider: false,
            show_pointer: true,
            show_value_text: true,
            label: Label::default(),
            label_position: None,
            formatter: FormatterKind::default(),
            precision: 1,
        }
    }
}

impl PickerConfig {
    pub fn mapper_settings(&self) -> MapperSettings {
        MapperSettings {
            min_value: Some(self.min_value).filter(|v| v.is_finite()),
            max_value: Some(self.max_value).filter(|v| v.is_finite()),
            step: self.step,
            cycle_value: Some(self.cycle_value).filter(|c| *c != 0.0),
            wheel_rotation: self.wheel_rotation,
            wheel_radius: self.wheel_radius.max(0.0),
        }
    }

    pub fn style(&self) -> Style {
        let text_color = self.text_color.unwrap_or(self.active_color);
        Style {
            wheel_background: Paint::stroke(self.background_color, self.wheel_stroke_width),
            wheel_active: Paint::stroke(self.active_color, self.wheel_stroke_width),
            divider: Paint::stroke(
                self.divider_color.unwrap_or(self.background_color),
                self.divider_width,
            ),
            pointer: Paint::fill(self.pointer_color.unwrap_or(self.active_color)),
            pointer_halo: Paint::stroke(
                self.pointer_halo_color.unwrap_or(self.background_color),
                self.pointer_halo_width,
            ),
            pointer_radius: self.pointer_radius,
            value_text: TextStyle {
                color: text_color,
                size: self.text_size,
            },
            label_text: TextStyle {
                color: self.label_color.unwrap_or(text_color),
                size: self.label_size.unwrap_or(self.text_size),
            },
            show_divider: self.show_divider,
            show_pointer: self.show_pointer,
            show_value_text: self.show_value_text,
        }
    }

    pub fn effective_label_position(&self) -> LabelPosition {
        self.label_position.unwrap_or(if self.label.is_empty() {
            LabelPosition::Hidden
        } else {
            LabelPosition::Above
        })
    }

    pub fn build_picker(
        &self,
        listener: impl ValueListener + 'static,
    ) -> Result<CirclePicker, ConfigError> {
        let mut mapper = AngleValueMapper::new(self.mapper_settings(), listener)?;
        mapper.set_value(self.value);

        Ok(CirclePicker::new(mapper, self.style())
            .with_formatter(self.formatter.build(self.precision))
            .with_label(self.label.clone(), self.effective_label_position())
            .with_interactive(self.interactive))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid picker settings: {0}")]
    Picker(#[from] MapperError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "circlepick", "circlepick")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// An explicit path wins over the per-user location.
pub fn resolve_config_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match path {
        Some(p) => Ok(p.to_path_buf()),
        None => get_config_path(),
    }
}

pub fn load_config(path: Option<&Path>) -> Result<PickerConfig, ConfigError> {
    let config_path = resolve_config_path(path)?;
    log::debug!("Loading config from {}", config_path.display());

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Falls back to the defaults when the file is broken, so a typo never leaves
/// the user without a picker.
pub fn load_or_default(path: Option<&Path>) -> PickerConfig {
    match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default config: {e}");
            PickerConfig::default()
        }
    }
}

pub fn load_from_str(toml: &str) -> Result<PickerConfig, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;
    Ok(s.try_deserialize()?)
}

/// Writes the commented default config unless a file is already there.
pub fn write_default_config(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let path = resolve_config_path(path)?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
        log::info!("Wrote default config to {}", path.display());
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");
