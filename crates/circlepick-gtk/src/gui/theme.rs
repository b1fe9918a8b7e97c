use circlepick::style::Color;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub const AREA_CSS_CLASS: &str = "circlepick-area";

/// Colors the host takes from the GTK theme. The wheels use their own config.
pub struct ThemeColors {
    pub background: Color,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            background: Self::lookup_color(
                context,
                "theme_bg_color",
                Srgba::new(0.12, 0.12, 0.12, 1.0),
            ),
        }
    }

    fn lookup_color(context: &gtk::StyleContext, name: &str, fallback: Srgba<f64>) -> Color {
        context
            .lookup_color(name)
            .map(|c| {
                Srgba::new(
                    f64::from(c.red()),
                    f64::from(c.green()),
                    f64::from(c.blue()),
                    f64::from(c.alpha()),
                )
            })
            .unwrap_or(fallback)
            .into()
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = format!(
        "
.{AREA_CSS_CLASS} {{
    background: none;
    background-color: transparent;
}}
"
    );
    provider.load_from_data(&css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
