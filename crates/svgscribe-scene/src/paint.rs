//! Pen and brush to style translation, and the paint-server definitions brushes need.

use crate::api::{Argb, HatchBrush, LineCap, LineJoin, LinearGradientBrush, Pen};
use crate::error::Result;
use crate::hatch::{HatchPrimitive, TILE_SIZE, hatch_tile};
use svgscribe_core::types::{FmtNumber, Number, NumberList};
use svgscribe_core::{Document, ElementKind, NodeId, Style};

/// Fill used for brushes that have no SVG paint server.
pub const FALLBACK_FILL: Argb = Argb::GRAY;

/// Sets `key` to the color and `opacity_key` to its alpha when it is not opaque.
pub fn set_color(style: &mut Style, key: &str, opacity_key: &str, color: Argb) {
    style.set(key, color.to_color());
    if !color.is_opaque() {
        style.set(opacity_key, color.opacity());
    }
}

pub fn line_cap(cap: LineCap) -> &'static str {
    match cap.plain_equivalent() {
        LineCap::Round => "round",
        LineCap::Square => "square",
        _ => "butt",
    }
}

pub fn line_join(join: LineJoin) -> &'static str {
    match join {
        LineJoin::Bevel => "bevel",
        LineJoin::Round => "round",
        LineJoin::Miter | LineJoin::MiterClipped => "miter",
    }
}

/// The single cap `stroke-linecap` can carry for a pen with two.
///
/// A non-flat cap beats a flat one; when both ends are non-flat the end cap wins.
fn stroke_cap(pen: &Pen) -> LineCap {
    match pen.end_cap.plain_equivalent() {
        LineCap::Flat => pen.start_cap,
        _ => pen.end_cap,
    }
}

/// Stroke properties for `pen` with `fill:none`.
///
/// Non-plain caps are written as their nearest plain cap.
pub fn pen_style(pen: &Pen) -> Style {
    let mut style = Style::new();
    set_color(&mut style, "stroke", "stroke-opacity", pen.color);
    style.set("stroke-width", pen.width);
    let cap = line_cap(stroke_cap(pen));
    if cap != "butt" {
        style.set("stroke-linecap", cap);
    }
    let join = line_join(pen.line_join);
    if join != "miter" {
        style.set("stroke-linejoin", join);
    } else if pen.miter_limit != 4.0 {
        style.set("stroke-miterlimit", pen.miter_limit);
    }
    let dashes = pen.dash_array();
    if !dashes.is_empty() {
        style.set("stroke-dasharray", NumberList(dashes));
    }
    style.set("fill", "none");
    style
}

fn color_key(c: Argb) -> String {
    format!("{:08x}", c.to_u32())
}

/// Cache key for a gradient definition.
pub fn gradient_key(g: &LinearGradientBrush) -> String {
    let mut key = format!(
        "lg:{},{},{},{}:{}",
        FmtNumber(g.start.0),
        FmtNumber(g.start.1),
        FmtNumber(g.end.0),
        FmtNumber(g.end.1),
        g.wrap_mode.spread_method()
    );
    for stop in &g.stops {
        key.push_str(&format!(":{}@{}", color_key(stop.color), FmtNumber(stop.offset)));
    }
    key
}

/// Cache key for a hatch pattern.
pub fn hatch_key(h: &HatchBrush) -> String {
    format!("hatch:{:?}:{}:{}", h.style, color_key(h.fore), color_key(h.back))
}

/// Appends a `<linearGradient>` with `id` under `defs`.
pub fn write_linear_gradient(
    doc: &mut Document,
    defs: NodeId,
    id: &str,
    g: &LinearGradientBrush,
) -> Result<NodeId> {
    let node = doc.create_element_with_id(ElementKind::LinearGradient, id);
    doc.set_attr(node, "gradientUnits", "userSpaceOnUse")?;
    doc.set_attr(node, "x1", g.start.0)?;
    doc.set_attr(node, "y1", g.start.1)?;
    doc.set_attr(node, "x2", g.end.0)?;
    doc.set_attr(node, "y2", g.end.1)?;
    doc.set_attr(node, "spreadMethod", g.wrap_mode.spread_method())?;
    for stop in &g.stops {
        let s = doc.create_element(ElementKind::Stop);
        doc.set_attr(s, "offset", Number(stop.offset.clamp(0.0, 1.0)))?;
        doc.set_attr(s, "stop-color", stop.color.to_color())?;
        if !stop.color.is_opaque() {
            doc.set_attr(s, "stop-opacity", Number(stop.color.opacity()))?;
        }
        doc.append_child(node, s)?;
    }
    doc.append_child(defs, node)?;
    Ok(node)
}

fn tile_rect(
    doc: &mut Document,
    parent: NodeId,
    (x, y, w, h): (u32, u32, u32, u32),
    color: Argb,
) -> Result<()> {
    let r = doc.create_element(ElementKind::Rect);
    doc.set_attr(r, "x", f64::from(x))?;
    doc.set_attr(r, "y", f64::from(y))?;
    doc.set_attr(r, "width", f64::from(w))?;
    doc.set_attr(r, "height", f64::from(h))?;
    let mut style = Style::new();
    set_color(&mut style, "fill", "fill-opacity", color);
    doc.set_style(r, style)?;
    doc.append_child(parent, r)?;
    Ok(())
}

/// Appends an 8x8 `<pattern>` with `id` under `defs`.
pub fn write_hatch_pattern(
    doc: &mut Document,
    defs: NodeId,
    id: &str,
    h: &HatchBrush,
) -> Result<NodeId> {
    let tile = hatch_tile(h.style);
    let size = f64::from(TILE_SIZE);
    let node = doc.create_element_with_id(ElementKind::Pattern, id);
    doc.set_attr(node, "patternUnits", "userSpaceOnUse")?;
    doc.set_attr(node, "x", 0.0)?;
    doc.set_attr(node, "y", 0.0)?;
    doc.set_attr(node, "width", size)?;
    doc.set_attr(node, "height", size)?;

    let (base, ink) = if tile.inverted {
        (h.fore, h.back)
    } else {
        (h.back, h.fore)
    };
    tile_rect(doc, node, (0, 0, TILE_SIZE, TILE_SIZE), base)?;
    for prim in tile.primitives {
        let (HatchPrimitive::Rect { x, y, w, h } | HatchPrimitive::Hole { x, y, w, h }) = prim;
        tile_rect(doc, node, (x, y, w, h), ink)?;
    }
    doc.append_child(defs, node)?;
    Ok(node)
}
