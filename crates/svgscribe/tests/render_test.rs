use svgscribe::scene::{
    Argb, Brush, Font, Graphics, MatrixOrder, Pen, SceneError, SceneOptions, SceneRenderer,
    ScribeError, StringFormat, TextLayout, load_svg, render_svg,
};
use svgscribe::{ElementKind, WriteOptions, emf};
use svgscribe::geom::{point, rect};

#[test]
fn rendered_scene_reloads_with_the_same_shapes() {
    let renderer = SceneRenderer::new().with_size(120.0, 80.0);
    let doc = renderer
        .render_document(|g| {
            g.fill_rectangle(&Brush::solid(Argb::rgb(255, 255, 0)), rect(5.0, 5.0, 5.0, 5.0))?;
            g.translate_transform(20.0, 20.0, MatrixOrder::Prepend);
            g.draw_ellipse(&Pen::new(Argb::rgb(255, 0, 0), 1.0), rect(-8.0, -12.0, 16.0, 24.0))?;
            Ok(())
        })
        .expect("render");

    let root = doc.root().expect("root");
    assert_eq!(doc.kind(root), Some(&ElementKind::Svg));
    let top = doc
        .children(root)
        .iter()
        .copied()
        .find(|n| doc.kind(*n) == Some(&ElementKind::G))
        .expect("top group");
    let shapes = doc.children(top);
    assert_eq!(shapes.len(), 2);
    assert_eq!(doc.kind(shapes[0]), Some(&ElementKind::Rect));
    assert_eq!(doc.kind(shapes[1]), Some(&ElementKind::Ellipse));
    assert_eq!(
        doc.attr(shapes[1], "rx").map(ToString::to_string).as_deref(),
        Some("8")
    );
    assert_eq!(
        doc.attr(shapes[1], "transform").map(ToString::to_string).as_deref(),
        Some("matrix(1,0,0,1,20,20)")
    );
}

#[test]
fn compressed_output_is_well_formed() {
    let svg = render_svg(
        SceneOptions::default(),
        Some((100.0, 100.0)),
        &WriteOptions::compressed(),
        |g| {
            let font = Font::new("Some Long Font Family Name, sans-serif", 10.0);
            for i in 0..4 {
                g.draw_string(
                    "label",
                    &font,
                    &Brush::solid(Argb::BLACK),
                    TextLayout::At(point(0.0, f64::from(i) * 12.0)),
                    &StringFormat::default(),
                )?;
            }
            Ok(())
        },
    )
    .expect("render");

    assert!(svg.contains("<!ENTITY"));
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let xml = roxmltree::Document::parse_with_options(&svg, options).expect("well-formed");
    assert_eq!(
        xml.descendants()
            .filter(|n| n.tag_name().name() == "text")
            .count(),
        4
    );
    assert!(load_svg(&svg).is_ok());
}

#[test]
fn errors_keep_their_origin() {
    let err = render_svg(
        SceneOptions::default(),
        None,
        &WriteOptions::default(),
        |g| g.save().map(|_| ()),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ScribeError::Scene(SceneError::Unsupported(_))
    ));

    let err = load_svg("<svg><g></svg>").unwrap_err();
    assert!(matches!(err, ScribeError::Load(_)));

    let err: ScribeError = emf::parse_shapes(&[], &emf::ParseOptions::default())
        .unwrap_err()
        .into();
    assert!(matches!(err, ScribeError::Metafile(_)));
}
