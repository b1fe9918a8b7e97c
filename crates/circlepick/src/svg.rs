//! Draw commands to a standalone SVG document.

use crate::geometry::ArcShape;
use crate::render::DrawCommand;
use crate::style::{Color, Paint, PaintStyle};
use std::fmt::Write;

pub fn to_svg(commands: &[DrawCommand], width: f64, height: f64) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );

    for command in commands {
        let _ = match command {
            DrawCommand::Arc {
                shape: ArcShape::Path(path),
                paint,
            } => writeln!(out, r#"  <path d="{}" {}/>"#, path.to_svg(), paint_attrs(paint)),
            // a zero sweep still shows the stroke cap, like a zero-length line
            DrawCommand::Arc {
                shape: ArcShape::Dot(p),
                paint,
            } => writeln!(
                out,
                r#"  <path d="M{} {} Z" stroke-linecap="round" {}/>"#,
                p.x,
                p.y,
                paint_attrs(paint)
            ),
            DrawCommand::Line { from, to, paint } => writeln!(
                out,
                r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
                from.x,
                from.y,
                to.x,
                to.y,
                paint_attrs(paint)
            ),
            DrawCommand::Circle {
                center,
                radius,
                paint,
            } => writeln!(
                out,
                r#"  <circle cx="{}" cy="{}" r="{}" {}/>"#,
                center.x,
                center.y,
                radius,
                paint_attrs(paint)
            ),
            DrawCommand::Text {
                text,
                origin,
                style,
            } => writeln!(
                out,
                r#"  <text x="{}" y="{}" font-family="sans-serif" font-size="{}" {}>{}</text>"#,
                origin.x,
                origin.y,
                style.size,
                fill_attrs(style.color),
                escape(text)
            ),
        };
    }

    out.push_str("</svg>\n");
    out
}

fn paint_attrs(paint: &Paint) -> String {
    match paint.style {
        PaintStyle::Stroke => {
            let (r, g, b, a) = paint.color.components();
            format!(
                r#"fill="none" stroke="{}" stroke-opacity="{}" stroke-width="{}""#,
                Color::rgb(r, g, b),
                a,
                paint.width
            )
        }
        PaintStyle::Fill => fill_attrs(paint.color),
    }
}

fn fill_attrs(color: Color) -> String {
    let (r, g, b, a) = color.components();
    format!(r#"fill="{}" fill-opacity="{}""#, Color::rgb(r, g, b), a)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
