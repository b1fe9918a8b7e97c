use crate::gui::theme::ThemeColors;
use cairo::Context;
use circlepick::geometry::{ArcShape, BezPath, PathEl};
use circlepick::render::{ApproxTextMeasure, DrawCommand, TextExtent, TextMeasure};
use circlepick::style::{Color, Paint, PaintStyle};
use std::f64::consts::PI;

const FONT_FACE: &str = "Sans";

/// Font metrics from the cairo context the picker is about to be drawn on.
pub struct CairoTextMeasure<'a> {
    cr: &'a Context,
}

impl<'a> CairoTextMeasure<'a> {
    pub fn new(cr: &'a Context) -> Self {
        Self { cr }
    }

    fn try_measure(&self, text: &str, size: f64) -> Result<TextExtent, cairo::Error> {
        self.cr.save()?;
        select_font(self.cr, size);
        let text_extents = self.cr.text_extents(text);
        let font_extents = self.cr.font_extents();
        self.cr.restore()?;

        let (text_extents, font_extents) = (text_extents?, font_extents?);
        Ok(TextExtent {
            width: text_extents.x_advance(),
            height: font_extents.ascent() + font_extents.descent(),
            descent: font_extents.descent(),
        })
    }
}

impl TextMeasure for CairoTextMeasure<'_> {
    fn measure(&self, text: &str, size: f64) -> TextExtent {
        if text.is_empty() {
            return TextExtent::default();
        }
        self.try_measure(text, size).unwrap_or_else(|e| {
            log::warn!("Text measurement failed, estimating: {e}");
            ApproxTextMeasure.measure(text, size)
        })
    }
}

pub fn draw(cr: &Context, colors: &ThemeColors, commands: &[DrawCommand]) -> Result<(), cairo::Error> {
    set_color(cr, colors.background);
    cr.paint()?;

    for command in commands {
        match command {
            DrawCommand::Arc {
                shape: ArcShape::Path(path),
                paint,
            } => {
                trace_path(cr, path);
                finish(cr, paint)?;
            }
            DrawCommand::Arc {
                shape: ArcShape::Dot(p),
                paint,
            } => {
                cr.save()?;
                cr.set_line_cap(cairo::LineCap::Round);
                cr.move_to(p.x, p.y);
                cr.line_to(p.x, p.y);
                finish(cr, paint)?;
                cr.restore()?;
            }
            DrawCommand::Line { from, to, paint } => {
                cr.move_to(from.x, from.y);
                cr.line_to(to.x, to.y);
                finish(cr, paint)?;
            }
            DrawCommand::Circle {
                center,
                radius,
                paint,
            } => {
                cr.new_sub_path();
                cr.arc(center.x, center.y, *radius, 0.0, 2.0 * PI);
                finish(cr, paint)?;
            }
            DrawCommand::Text {
                text,
                origin,
                style,
            } => {
                set_color(cr, style.color);
                select_font(cr, style.size);
                cr.move_to(origin.x, origin.y);
                cr.show_text(text)?;
                cr.new_path();
            }
        }
    }
    Ok(())
}

fn trace_path(cr: &Context, path: &BezPath) {
    cr.new_path();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => cr.move_to(p.x, p.y),
            PathEl::LineTo(p) => cr.line_to(p.x, p.y),
            PathEl::QuadTo(c, p) => {
                // cairo has no quadratic verb; raise it to a cubic
                let (x0, y0) = cr.current_point().unwrap_or((p.x, p.y));
                cr.curve_to(
                    x0 + 2.0 / 3.0 * (c.x - x0),
                    y0 + 2.0 / 3.0 * (c.y - y0),
                    p.x + 2.0 / 3.0 * (c.x - p.x),
                    p.y + 2.0 / 3.0 * (c.y - p.y),
                    p.x,
                    p.y,
                )
            }
            PathEl::CurveTo(c1, c2, p) => cr.curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
            PathEl::ClosePath => cr.close_path(),
        }
    }
}

fn finish(cr: &Context, paint: &Paint) -> Result<(), cairo::Error> {
    set_color(cr, paint.color);
    match paint.style {
        PaintStyle::Stroke => {
            cr.set_line_width(paint.width);
            cr.stroke()
        }
        PaintStyle::Fill => cr.fill(),
    }
}

fn set_color(cr: &Context, color: Color) {
    let (r, g, b, a) = color.components();
    cr.set_source_rgba(r, g, b, a);
}

fn select_font(cr: &Context, size: f64) {
    cr.select_font_face(FONT_FACE, cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    cr.set_font_size(size);
}
