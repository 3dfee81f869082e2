use image::{Rgba, RgbaImage};
use std::sync::Arc;
use svgscribe_core::geom::{point, rect};
use svgscribe_core::{Document, ElementKind, NodeId, WriteOptions};
use svgscribe_emf::MetafileWriter;
use svgscribe_emf::records::BS_SOLID;
use svgscribe_scene::api::{
    Argb, Brush, FillMode, Font, GraphicsPath, GraphicsUnit, HatchBrush, HatchStyle, LineCap,
    LinearGradientBrush, MatrixOrder, Pen, PointF, SizeF, SmoothingMode, StringFormat,
    TextLayout, TextureBrush, WrapMode,
};
use svgscribe_scene::{
    Graphics, SceneBuilder, SceneError, SceneOptions, StrokeRenderError, StrokeRenderer,
    UnsupportedOperationError,
};

fn builder() -> SceneBuilder {
    SceneBuilder::new(SceneOptions::default()).expect("builder")
}

fn attr(doc: &Document, node: NodeId, name: &str) -> Option<String> {
    doc.attr(node, name).map(ToString::to_string)
}

fn style(doc: &Document, node: NodeId) -> String {
    doc.style(node).map(ToString::to_string).unwrap_or_default()
}

fn red() -> Brush {
    Brush::solid(Argb::rgb(255, 0, 0))
}

#[test]
fn shapes_are_appended_to_the_top_group_in_order() {
    let mut g = builder();
    g.fill_rectangle(&red(), rect(5.0, 5.0, 5.0, 5.0)).expect("fill");
    g.draw_ellipse(&Pen::new(Argb::BLACK, 2.0), rect(0.0, 0.0, 10.0, 20.0))
        .expect("ellipse");

    let doc = g.document();
    let root_children = doc.children(g.root());
    assert_eq!(root_children.len(), 2);
    assert_eq!(doc.kind(root_children[0]), Some(&ElementKind::Defs));
    assert_eq!(root_children[1], g.current_group());

    let shapes = doc.children(g.current_group());
    assert_eq!(shapes.len(), 2);
    assert_eq!(doc.kind(shapes[0]), Some(&ElementKind::Rect));
    assert_eq!(style(doc, shapes[0]), "fill:#ff0000");
    assert_eq!(attr(doc, shapes[0], "width").as_deref(), Some("5"));
    assert!(doc.attr(shapes[0], "transform").is_none());

    assert_eq!(doc.kind(shapes[1]), Some(&ElementKind::Ellipse));
    assert_eq!(attr(doc, shapes[1], "cy").as_deref(), Some("10"));
    assert_eq!(
        style(doc, shapes[1]),
        "stroke:#000000;stroke-width:2;stroke-miterlimit:10;fill:none"
    );
}

#[test]
fn transforms_compose_by_matrix_order() {
    let mut g = builder();
    g.translate_transform(10.0, 0.0, MatrixOrder::Prepend);
    g.scale_transform(2.0, 2.0, MatrixOrder::Prepend);
    g.fill_rectangle(&red(), rect(0.0, 0.0, 1.0, 1.0)).expect("fill");

    g.reset_transform();
    g.translate_transform(10.0, 0.0, MatrixOrder::Prepend);
    g.scale_transform(2.0, 2.0, MatrixOrder::Append);
    g.fill_rectangle(&red(), rect(0.0, 0.0, 1.0, 1.0)).expect("fill");

    let mut pts = [point(1.0, 1.0)];
    g.transform_points(&mut pts);
    assert_eq!(pts[0], point(22.0, 2.0));

    let doc = g.document();
    let shapes = doc.children(g.current_group());
    assert_eq!(
        attr(doc, shapes[0], "transform").as_deref(),
        Some("matrix(2,0,0,2,10,0)")
    );
    assert_eq!(
        attr(doc, shapes[1], "transform").as_deref(),
        Some("matrix(2,0,0,2,20,0)")
    );
}

#[test]
fn containers_nest_groups_and_inherit_on_reset() {
    let mut g = builder();
    let top = g.current_group();
    g.translate_transform(5.0, 5.0, MatrixOrder::Prepend);
    let c = g.begin_container().expect("begin");
    let inner = g.current_group();
    assert_ne!(inner, top);
    assert_eq!(g.document().parent(inner), Some(top));

    g.fill_rectangle(&red(), rect(0.0, 0.0, 1.0, 1.0)).expect("fill");
    g.reset_transform();
    g.fill_rectangle(&red(), rect(0.0, 0.0, 1.0, 1.0)).expect("fill");

    let doc = g.document();
    let shapes = doc.children(inner);
    assert_eq!(
        attr(doc, shapes[0], "transform").as_deref(),
        Some("matrix(1,0,0,1,5,5)")
    );
    // Reset copies the enclosing transform, which then applies on top of itself.
    assert_eq!(
        attr(doc, shapes[1], "transform").as_deref(),
        Some("matrix(1,0,0,1,10,10)")
    );

    g.end_container(c).expect("end");
    assert_eq!(g.current_group(), top);
    assert_eq!(g.matrix_stack().len(), 2);
    // Ending at the document level is a no-op.
    g.end_container(c).expect("end again");
    assert_eq!(g.current_group(), top);
}

#[test]
fn clip_rectangles_open_clip_groups() {
    let mut g = builder();
    let top = g.current_group();
    g.set_clip(rect(0.0, 0.0, 50.0, 50.0)).expect("clip");
    let clipped = g.current_group();
    assert_ne!(clipped, top);
    g.fill_rectangle(&red(), rect(1.0, 1.0, 2.0, 2.0)).expect("fill");

    {
        let doc = g.document();
        assert_eq!(doc.parent(clipped), Some(top));
        let clip_id = doc.children(g.defs())[0];
        assert_eq!(doc.kind(clip_id), Some(&ElementKind::ClipPath));
        let id = doc.node(clip_id).expect("node").id().to_string();
        assert_eq!(
            attr(doc, clipped, "clip-path"),
            Some(format!("url(#{id})"))
        );
        assert_eq!(doc.children(clipped).len(), 1);
    }

    g.intersect_clip(rect(25.0, 25.0, 50.0, 50.0)).expect("intersect");
    assert_eq!(g.document().parent(g.current_group()), Some(clipped));
    assert_eq!(g.clip_bounds(), Some(rect(25.0, 25.0, 25.0, 25.0)));

    g.translate_clip(5.0, 0.0).expect("translate");
    assert_eq!(g.clip_bounds(), Some(rect(30.0, 25.0, 25.0, 25.0)));
    assert_eq!(g.document().parent(g.current_group()), Some(top));

    g.reset_clip();
    assert_eq!(g.current_group(), top);
    assert_eq!(g.clip_bounds(), None);
    assert!(!g.is_clip_empty());
}

#[test]
fn intersecting_clips_across_a_transform_change_uses_one_space() {
    let mut g = builder();
    g.set_clip(rect(0.0, 0.0, 50.0, 50.0)).expect("clip");
    g.scale_transform(2.0, 2.0, MatrixOrder::Prepend);
    g.intersect_clip(rect(10.0, 10.0, 100.0, 100.0)).expect("intersect");
    // The outer clip covers 0..25 in the scaled space.
    assert_eq!(g.clip_bounds(), Some(rect(10.0, 10.0, 15.0, 15.0)));
    assert!(!g.is_clip_empty());

    g.reset_clip();
    g.set_clip(rect(0.0, 0.0, 50.0, 50.0)).expect("clip");
    g.translate_transform(60.0, 0.0, MatrixOrder::Prepend);
    g.intersect_clip(rect(0.0, 0.0, 10.0, 10.0)).expect("intersect");
    assert!(g.is_clip_empty());
}

#[test]
fn paint_definitions_are_shared_between_fills() {
    let mut g = SceneBuilder::new(SceneOptions::default().with_id_prefix("p"))
        .expect("builder");
    let hatch: Brush = HatchBrush::new(HatchStyle::DiagonalCross, Argb::BLACK, Argb::WHITE).into();
    g.fill_rectangle(&hatch, rect(0.0, 0.0, 10.0, 10.0)).expect("fill");
    g.fill_ellipse(&hatch, rect(0.0, 0.0, 10.0, 10.0)).expect("fill");
    let gradient: Brush = LinearGradientBrush::new(
        point(0.0, 0.0),
        point(10.0, 0.0),
        Argb::BLACK,
        Argb::WHITE,
    )
    .with_wrap_mode(WrapMode::Clamp)
    .into();
    g.fill_polygon(
        &gradient,
        &[point(0.0, 0.0), point(5.0, 5.0), point(0.0, 5.0)],
        FillMode::Winding,
    )
    .expect("fill");

    let doc = g.document();
    let defs = doc.children(g.defs());
    assert_eq!(defs.len(), 2);
    assert_eq!(doc.kind(defs[0]), Some(&ElementKind::Pattern));
    assert_eq!(doc.kind(defs[1]), Some(&ElementKind::LinearGradient));
    assert_eq!(attr(doc, defs[1], "spreadMethod").as_deref(), Some("pad"));

    let pattern_id = doc.node(defs[0]).expect("node").id().to_string();
    assert!(pattern_id.starts_with('p'));
    let shapes = doc.children(g.current_group());
    let url = format!("fill:url(#{pattern_id})");
    assert_eq!(style(doc, shapes[0]), url);
    assert_eq!(style(doc, shapes[1]), url);
    assert!(style(doc, shapes[2]).ends_with(";fill-rule:nonzero"));
}

#[test]
fn brushes_without_svg_paint_use_the_fallback_fill() {
    let mut g = builder();
    let texture = Brush::Texture(TextureBrush {
        image: RgbaImage::new(2, 2),
        wrap_mode: WrapMode::Tile,
    });
    g.fill_rectangle(&texture, rect(0.0, 0.0, 4.0, 4.0)).expect("fill");

    let mut g2 = SceneBuilder::new(SceneOptions::default().with_fallback_fill(Argb::rgb(1, 2, 3)))
        .expect("builder");
    g2.fill_rectangle(&texture, rect(0.0, 0.0, 4.0, 4.0)).expect("fill");

    let doc = g.document();
    let shape = doc.children(g.current_group())[0];
    assert_eq!(style(doc, shape), "fill:#808080");
    assert!(doc.children(g.defs()).is_empty());
    let doc2 = g2.document();
    assert_eq!(style(doc2, doc2.children(g2.current_group())[0]), "fill:#010203");
}

#[test]
fn arcs_curves_and_paths_become_path_data() {
    let mut g = builder();
    let pen = Pen::default();
    g.draw_pie(&pen, rect(0.0, 0.0, 10.0, 10.0), 0.0, -90.0).expect("pie");
    g.draw_bezier(
        &pen,
        point(0.0, 0.0),
        point(1.0, 1.0),
        point(2.0, 1.0),
        point(3.0, 0.0),
    )
    .expect("bezier");
    g.draw_curve(
        &pen,
        &[point(0.0, 0.0), point(10.0, 10.0), point(20.0, 0.0)],
        0,
        2,
        0.5,
    )
    .expect("curve");
    let mut path = GraphicsPath::new(FillMode::Alternate);
    path.add_polygon(&[point(0.0, 0.0), point(4.0, 0.0), point(4.0, 4.0)]);
    g.fill_path(&red(), &path).expect("path");
    g.draw_path(&pen, &GraphicsPath::default()).expect("empty path");

    let doc = g.document();
    let shapes = doc.children(g.current_group());
    assert_eq!(shapes.len(), 4);
    assert!(shapes
        .iter()
        .all(|s| doc.kind(*s) == Some(&ElementKind::Path)));
    assert_eq!(
        attr(doc, shapes[0], "d").as_deref(),
        Some("M 10 5 A 5 5 0 0 0 5 0 L 5 5 L 10 5 Z")
    );
    assert_eq!(attr(doc, shapes[1], "d").as_deref(), Some("M 0 0 C 1 1 2 1 3 0"));
    let curve = attr(doc, shapes[2], "d").expect("d");
    assert_eq!(curve.matches('C').count(), 2);
    assert_eq!(
        attr(doc, shapes[3], "d").as_deref(),
        Some("M 0 0 L 4 0 L 4 4 Z")
    );
    assert_eq!(style(doc, shapes[3]), "fill:#ff0000;fill-rule:evenodd");
}

#[test]
fn text_is_placed_at_its_baseline() {
    let mut g = builder();
    let font = Font::new("Arial", 12.0).with_unit(GraphicsUnit::Pixel).bold();
    g.draw_string(
        "hi",
        &font,
        &Brush::solid(Argb::BLACK),
        TextLayout::At(point(10.0, 20.0)),
        &StringFormat::default(),
    )
    .expect("text");

    let doc = g.document();
    let text = doc.children(g.current_group())[0];
    assert_eq!(doc.kind(text), Some(&ElementKind::Text));
    assert_eq!(doc.text(text), Some("hi"));
    assert_eq!(attr(doc, text, "x").as_deref(), Some("10"));
    assert_eq!(attr(doc, text, "y").as_deref(), Some("29.6"));
    assert_eq!(
        style(doc, text),
        "fill:#000000;font-family:Arial;font-size:12px;font-weight:bold"
    );
}

#[test]
fn multi_line_text_is_centered_in_its_layout_rect() {
    let mut g = builder();
    let font = Font::new("Sans", 10.0).with_unit(GraphicsUnit::Pixel);
    g.draw_string(
        "one\ntwo",
        &font,
        &Brush::solid(Argb::BLACK),
        TextLayout::In(rect(0.0, 0.0, 100.0, 100.0)),
        &StringFormat::centered(),
    )
    .expect("text");

    let doc = g.document();
    let text = doc.children(g.current_group())[0];
    assert!(style(doc, text).contains("text-anchor:middle"));
    let spans = doc.children(text);
    assert_eq!(spans.len(), 2);
    assert_eq!(attr(doc, spans[0], "x").as_deref(), Some("50"));
    assert_eq!(attr(doc, spans[0], "y").as_deref(), Some("46"));
    assert_eq!(attr(doc, spans[1], "y").as_deref(), Some("58"));
    assert_eq!(doc.text(spans[1]), Some("two"));

    let size = g.measure_string("one two", &font, Some(30.0), &StringFormat::default());
    assert_eq!(size, SizeF::new(18.0, 24.0));
}

#[test]
fn bitmaps_decompose_into_scaled_runs() {
    let mut img = RgbaImage::new(3, 1);
    img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
    img.put_pixel(1, 0, Rgba([255, 0, 0, 255]));
    img.put_pixel(2, 0, Rgba([0, 0, 0, 0]));

    let mut g = builder();
    g.draw_image_rect(&img, rect(10.0, 10.0, 6.0, 2.0)).expect("image");
    g.draw_image_points(&img, [point(0.0, 0.0), point(0.0, 3.0), point(-1.0, 0.0)])
        .expect("image");

    let doc = g.document();
    let groups = doc.children(g.current_group());
    assert_eq!(groups.len(), 2);
    let runs = doc.children(groups[0]);
    assert_eq!(runs.len(), 1);
    assert_eq!(attr(doc, runs[0], "x").as_deref(), Some("10"));
    assert_eq!(attr(doc, runs[0], "width").as_deref(), Some("4"));
    assert_eq!(attr(doc, runs[0], "height").as_deref(), Some("2"));
    assert_eq!(style(doc, runs[0]), "fill:#ff0000");
    assert_eq!(
        attr(doc, groups[1], "transform").as_deref(),
        Some("matrix(0,1,-1,0,0,0)")
    );
}

struct CannedCaps;

impl StrokeRenderer for CannedCaps {
    fn render_stroke_to_metafile(
        &self,
        _pen: &Pen,
        points: &[PointF],
        _size: SizeF,
    ) -> Result<Vec<u8>, StrokeRenderError> {
        let [a, b] = points else {
            return Err(StrokeRenderError::new("expected a single segment"));
        };
        let (ax, ay, bx, by) = (a.x as i16, a.y as i16, b.x as i16, b.y as i16);
        let mut w = MetafileWriter::new();
        w.polyline16(&[(ax, ay), (bx, by)])
            .create_brush(1, BS_SOLID, &svgscribe_core::Color::rgb(255, 0, 0), 0)
            .select_object(1)
            .polygon16(&[(bx, by - 2), (bx + 3, by), (bx, by + 2)]);
        Ok(w.finish())
    }
}

#[test]
fn custom_caps_are_recovered_through_the_stroke_renderer() {
    let options = SceneOptions::default().with_stroke_renderer(Arc::new(CannedCaps));
    let mut g = SceneBuilder::new(options).expect("builder");
    let pen = Pen::default().with_caps(LineCap::Flat, LineCap::ArrowAnchor);
    g.draw_line(&pen, point(100.0, 100.0), point(120.0, 100.0))
        .expect("line");

    let doc = g.document();
    let shapes = doc.children(g.current_group());
    assert!(shapes.iter().all(|s| doc.kind(*s) != Some(&ElementKind::Line)));
    let polyline = shapes
        .iter()
        .find(|s| doc.kind(**s) == Some(&ElementKind::Polyline))
        .expect("stroke");
    assert_eq!(
        attr(doc, *polyline, "points").as_deref(),
        Some("100,100 120,100")
    );
    assert!(shapes
        .iter()
        .any(|s| style(doc, *s) == "fill:#ff0000;stroke:none"));
}

#[test]
fn custom_caps_without_a_renderer_fall_back_to_plain_caps() {
    let mut g = builder();
    let pen = Pen::default().with_caps(LineCap::RoundAnchor, LineCap::ArrowAnchor);
    g.draw_line(&pen, point(0.0, 0.0), point(10.0, 0.0)).expect("line");

    let doc = g.document();
    let line = doc.children(g.current_group())[0];
    assert_eq!(doc.kind(line), Some(&ElementKind::Line));
    assert!(style(doc, line).contains("stroke-linecap:round"));
}

#[test]
fn smoothing_hint_maps_to_shape_rendering() {
    let mut g = builder();
    g.hints_mut().smoothing = SmoothingMode::AntiAlias;
    g.fill_rectangle(&red(), rect(0.0, 0.0, 1.0, 1.0)).expect("fill");
    let doc = g.document();
    let shape = doc.children(g.current_group())[0];
    assert_eq!(
        style(doc, shape),
        "fill:#ff0000;shape-rendering:geometricPrecision"
    );
}

#[test]
fn device_and_state_queries_are_rejected() {
    let mut g = builder();
    assert!(matches!(
        g.save(),
        Err(SceneError::Unsupported(UnsupportedOperationError { operation: "save" }))
    ));
    assert!(g.is_visible_point(point(0.0, 0.0)).is_err());
    assert!(g.dpi_x().is_err());
    assert!(g.get_hdc().is_err());
    assert!(g.exclude_clip(rect(0.0, 0.0, 1.0, 1.0)).is_err());
    let err = g.add_metafile_comment(&[1, 2]).unwrap_err();
    assert_eq!(err.to_string(), "unsupported operation: add_metafile_comment");
    g.flush();
    assert_eq!(g.get_nearest_color(Argb::GRAY), Argb::GRAY);
}

#[test]
fn written_scene_is_well_formed() {
    let mut g = builder();
    g.set_size(200.0, 100.0).expect("size");
    g.set_clip(rect(0.0, 0.0, 100.0, 100.0)).expect("clip");
    g.fill_rectangle(
        &HatchBrush::new(HatchStyle::Weave, Argb::BLACK, Argb::WHITE).into(),
        rect(0.0, 0.0, 100.0, 100.0),
    )
    .expect("fill");
    g.draw_string(
        "a < b & c",
        &Font::new("Serif", 9.0),
        &red(),
        TextLayout::At(point(0.0, 0.0)),
        &StringFormat::default(),
    )
    .expect("text");

    let svg = g.to_svg(&WriteOptions::compressed());
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let xml = roxmltree::Document::parse_with_options(&svg, options).expect("well-formed");
    let root = xml.root_element();
    assert_eq!(root.tag_name().name(), "svg");
    assert_eq!(root.attribute("viewBox"), Some("0 0 200 100"));
    assert!(svg.contains("a &lt; b &amp; c"));
}
