use crate::events::AppEvent;
use crate::gui::area;
use crate::gui::canvas::{self, CairoTextMeasure};
use crate::gui::theme::{self, AREA_CSS_CLASS, ThemeColors};
use circlepick::config::{self, PickerConfig};
use circlepick::events::PointerEvent;
use circlepick::style::{Label, LabelPosition, Style};
use circlepick::{AngleValueMapper, Callbacks, CirclePicker, MapperError, MapperSettings};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

const LONG_PRESS: Duration = Duration::from_millis(500);
const DEFAULT_AREA_SIZE: i32 = 320;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerId {
    Main,
    Rotation,
}

impl fmt::Display for PickerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickerId::Main => f.write_str("Value"),
            PickerId::Rotation => f.write_str("Rotation"),
        }
    }
}

/// The picker that turns the main wheel: one step per degree, wrapping at 360.
pub fn rotation_picker(initial_rotation: f64) -> Result<CirclePicker, MapperError> {
    let settings = MapperSettings::bounded(0.0, 359.0)
        .with_step(1.0)
        .with_cycle_value(360.0);
    let mut mapper = AngleValueMapper::new(settings, ())?;
    mapper.set_value(initial_rotation.rem_euclid(360.0));

    Ok(CirclePicker::new(mapper, Style::default())
        .with_formatter(Box::new(|v: f64| format!("{v:.0}°")))
        .with_label(Label::new("Rotation"), LabelPosition::Below))
}

pub struct AppInit {
    pub main: CirclePicker,
    pub rotation: CirclePicker,
    pub config_path: PathBuf,
    pub rx: async_channel::Receiver<AppEvent>,
}

pub struct AppModel {
    pub main: Rc<RefCell<CirclePicker>>,
    pub rotation: Rc<RefCell<CirclePicker>>,
    pub config_path: PathBuf,
    pub status: String,
    pub main_area: gtk::DrawingArea,
    pub rotation_area: gtk::DrawingArea,
    /// Bumped on every press and release so stale long-press timers are ignored.
    press_generation: u64,
}

#[derive(Debug)]
pub enum AppMsg {
    Pointer(PickerId, PointerEvent),
    LongPress(PickerId, u64),
    RotationChanging(f64),
    ValueChanged(PickerId, f64),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("circlepick"),
            set_default_size: (2 * DEFAULT_AREA_SIZE, DEFAULT_AREA_SIZE + 40),

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 8,

                gtk::Box {
                    set_orientation: gtk::Orientation::Horizontal,
                    set_homogeneous: true,
                    set_vexpand: true,

                    #[name = "main_area"]
                    gtk::DrawingArea {
                        set_hexpand: true,
                        set_vexpand: true,
                        set_content_width: DEFAULT_AREA_SIZE,
                        set_content_height: DEFAULT_AREA_SIZE,
                        add_css_class: AREA_CSS_CLASS,
                    },

                    #[name = "rotation_area"]
                    gtk::DrawingArea {
                        set_hexpand: true,
                        set_vexpand: true,
                        set_content_width: DEFAULT_AREA_SIZE,
                        set_content_height: DEFAULT_AREA_SIZE,
                        add_css_class: AREA_CSS_CLASS,
                    },
                },

                gtk::Label {
                    set_margin_bottom: 8,
                    #[watch]
                    set_label: &model.status,
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            mut main,
            mut rotation,
            config_path,
            rx,
        } = init;

        theme::load_css();

        main.set_listener(main_listener(sender.input_sender()));
        rotation.set_listener(rotation_listener(sender.input_sender()));

        let status = main.formatted_value();
        let model = AppModel {
            main: Rc::new(RefCell::new(main)),
            rotation: Rc::new(RefCell::new(rotation)),
            config_path,
            status,
            main_area: gtk::DrawingArea::default(),
            rotation_area: gtk::DrawingArea::default(),
            press_generation: 0,
        };

        let widgets = view_output!();

        let mut model = model;
        model.main_area = widgets.main_area.clone();
        model.rotation_area = widgets.rotation_area.clone();

        // a fixed radius asks for its own size
        let (w, h) = model.main.borrow_mut().measure(0.0, 0.0);
        if w > 0.0 && h > 0.0 {
            model.main_area.set_content_width(w.ceil() as i32);
            model.main_area.set_content_height(h.ceil() as i32);
        }

        install_draw_func(&model.main_area, model.main.clone());
        install_draw_func(&model.rotation_area, model.rotation.clone());
        area::attach_pointer_gesture(&model.main_area, PickerId::Main, sender.input_sender());
        area::attach_pointer_gesture(
            &model.rotation_area,
            PickerId::Rotation,
            sender.input_sender(),
        );

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Pointer(id, event) => {
                let action = self.picker(id).borrow_mut().handle(event);

                if action.long_press_pending {
                    self.arm_long_press(id, &sender);
                }
                if matches!(event, PointerEvent::Up | PointerEvent::Cancel) {
                    self.press_generation += 1;
                }
                if action.clicked {
                    let value = self.picker(id).borrow().formatted_value();
                    self.status = format!("{id}: {value}");
                }
                if action.should_redraw {
                    self.area(id).queue_draw();
                }
            }
            AppMsg::LongPress(id, generation) => {
                if generation != self.press_generation {
                    return;
                }
                let picker = self.picker(id).clone();
                if picker.borrow_mut().long_press_elapsed() {
                    let value = {
                        let mut picker = picker.borrow_mut();
                        picker.set_value(0.0);
                        picker.formatted_value()
                    };
                    self.status = format!("{id} reset to {value}");
                    if id == PickerId::Rotation {
                        self.main.borrow_mut().mapper_mut().set_wheel_rotation(0.0);
                        self.main_area.queue_draw();
                    }
                    self.area(id).queue_draw();
                }
            }
            AppMsg::RotationChanging(degrees) => {
                self.main
                    .borrow_mut()
                    .mapper_mut()
                    .set_wheel_rotation(degrees);
                self.main_area.queue_draw();
            }
            AppMsg::ValueChanged(id, _) => {
                let value = self.picker(id).borrow().formatted_value();
                self.status = format!("{id}: {value}");
                log::info!("{}", self.status);
            }
            AppMsg::ConfigReload => self.reload_config(&sender),
        }
    }
}

impl AppModel {
    fn picker(&self, id: PickerId) -> &Rc<RefCell<CirclePicker>> {
        match id {
            PickerId::Main => &self.main,
            PickerId::Rotation => &self.rotation,
        }
    }

    fn area(&self, id: PickerId) -> &gtk::DrawingArea {
        match id {
            PickerId::Main => &self.main_area,
            PickerId::Rotation => &self.rotation_area,
        }
    }

    fn arm_long_press(&mut self, id: PickerId, sender: &ComponentSender<Self>) {
        self.press_generation += 1;
        let generation = self.press_generation;
        let sender = sender.clone();
        // fires once; a release in between makes the generation stale
        let _ = glib::timeout_add_local_once(LONG_PRESS, move || {
            sender.input(AppMsg::LongPress(id, generation));
        });
    }

    /// Rebuilds the main picker from the config file, keeping its angle and rotation.
    fn reload_config(&mut self, sender: &ComponentSender<Self>) {
        let new_config = match config::load_config(Some(&self.config_path)) {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to reload config: {}", e);
                return;
            }
        };

        match new_config.build_picker(main_listener(sender.input_sender())) {
            Ok(mut picker) => {
                let old = self.main.borrow();
                picker.mapper_mut().restore_angle(old.mapper().angle());
                picker
                    .mapper_mut()
                    .set_wheel_rotation(old.mapper().wheel_rotation());
                drop(old);

                self.status = picker.formatted_value();
                *self.main.borrow_mut() = picker;
                self.main_area.queue_draw();
                log::info!("Configuration reloaded");
            }
            Err(e) => log::error!("Ignoring reloaded config: {}", e),
        }
    }
}

fn main_listener(sender: &relm4::Sender<AppMsg>) -> Callbacks {
    let sender = sender.clone();
    Callbacks::new().on_changed(move |v| sender.emit(AppMsg::ValueChanged(PickerId::Main, v)))
}

fn rotation_listener(sender: &relm4::Sender<AppMsg>) -> Callbacks {
    let changing = sender.clone();
    let changed = sender.clone();
    Callbacks::new()
        .on_changing(move |v| changing.emit(AppMsg::RotationChanging(v)))
        .on_changed(move |v| changed.emit(AppMsg::ValueChanged(PickerId::Rotation, v)))
}

fn install_draw_func(area: &gtk::DrawingArea, picker: Rc<RefCell<CirclePicker>>) {
    area.set_draw_func(move |area, cr, width, height| {
        let colors = ThemeColors::from_context(&area.style_context());
        let mut picker = picker.borrow_mut();
        picker.measure(f64::from(width), f64::from(height));
        let commands = picker.render(&CairoTextMeasure::new(cr));
        if let Err(e) = canvas::draw(cr, &colors, &commands) {
            log::error!("Drawing error: {}", e);
        }
    });
}

/// Falls back to the built-in defaults when the configured picker is invalid.
pub fn build_main_picker(config: &PickerConfig) -> Result<CirclePicker, config::ConfigError> {
    config.build_picker(()).or_else(|e| {
        log::error!("Invalid picker config, using defaults: {}", e);
        PickerConfig::default().build_picker(())
    })
}
