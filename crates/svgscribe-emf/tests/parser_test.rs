use svgscribe_core::Color;
use svgscribe_core::geom::point;
use svgscribe_emf::records::*;
use svgscribe_emf::{
    MetafileParseError, MetafileShape, MetafileWriter, ParseOptions, parse, parse_shapes,
};

fn opts() -> ParseOptions {
    ParseOptions::default()
        .with_line_width(2.0)
        .with_point_epsilon(1.5)
}

#[test]
fn adjacent_runs_merge_and_near_points_average() {
    let mut w = MetafileWriter::new();
    w.polyline16(&[(0, 0), (10, 0)])
        // Starts one unit away from the previous end: same visual point, same polyline.
        .polyline16(&[(11, 0), (20, 0)])
        // Far away: starts a new polyline.
        .polyline16(&[(100, 100), (110, 100)]);
    let shapes = parse_shapes(&w.finish(), &opts()).unwrap();

    let lines: Vec<_> = shapes.polylines().collect();
    assert_eq!(lines.len(), 2);
    let (first, closed) = lines[0];
    assert!(!closed);
    assert_eq!(
        first,
        &[point(0.0, 0.0), point(10.5, 0.0), point(20.0, 0.0)][..]
    );
    assert_eq!(lines[1].0, &[point(100.0, 100.0), point(110.0, 100.0)][..]);
}

#[test]
fn polygons_fill_with_selected_brush_unless_hollow() {
    let red = Color::rgb(255, 0, 0);
    let mut w = MetafileWriter::new();
    w.create_brush(1, BS_SOLID, &red, 0)
        .select_object(1)
        .polygon16(&[(0, 0), (10, 0), (5, 8)])
        .select_object(stock_object(NULL_BRUSH))
        .polygon16(&[(20, 0), (30, 0), (25, 8)]);
    let shapes = parse_shapes(&w.finish(), &ParseOptions::default()).unwrap();

    let fills: Vec<_> = shapes.fills().collect();
    assert_eq!(fills.len(), 1);
    assert_eq!(fills[0].1, &red);
    // Both polygons are still outlined with the default pen.
    assert_eq!(shapes.polylines().filter(|(_, closed)| *closed).count(), 2);
}

#[test]
fn stock_gray_brush_and_null_pen() {
    let mut w = MetafileWriter::new();
    w.select_object(stock_object(LTGRAY_BRUSH))
        .select_object(stock_object(NULL_PEN))
        .polygon(&[(0, 0), (40, 0), (40, 40)]);
    let shapes = parse_shapes(&w.finish(), &ParseOptions::default()).unwrap();
    assert_eq!(
        shapes.shapes,
        vec![MetafileShape::Fill {
            points: vec![point(0.0, 0.0), point(40.0, 0.0), point(40.0, 40.0)],
            color: Color::rgb(0xC0, 0xC0, 0xC0),
        }]
    );
}

#[test]
fn path_brackets_report_figures_on_stroke_and_fill() {
    let mut w = MetafileWriter::new();
    w.begin_path()
        .move_to(0, 0)
        .line_to(50, 0)
        .line_to(50, 50)
        .close_figure()
        .end_path()
        .stroke_and_fill_path();
    let shapes = parse_shapes(&w.finish(), &opts()).unwrap();
    assert_eq!(shapes.shapes.len(), 2);
    match &shapes.shapes[0] {
        MetafileShape::Fill { points, color } => {
            assert_eq!(points.len(), 3);
            assert_eq!(color, &Color::WHITE);
        }
        other => panic!("expected fill, got {other:?}"),
    }
    match &shapes.shapes[1] {
        MetafileShape::Polyline { points, closed } => {
            assert!(*closed);
            assert_eq!(points[2], point(50.0, 50.0));
        }
        other => panic!("expected polyline, got {other:?}"),
    }
}

#[test]
fn world_transform_applies_to_coordinates() {
    let mut w = MetafileWriter::new();
    w.set_world_transform([1.0, 0.0, 0.0, 1.0, 100.0, 0.0])
        .modify_world_transform([2.0, 0.0, 0.0, 2.0, 0.0, 0.0], MWT_LEFTMULTIPLY)
        .polyline16(&[(1, 1), (2, 1)]);
    let shapes = parse_shapes(&w.finish(), &ParseOptions::default().with_point_epsilon(0.0)).unwrap();
    let (pts, _) = shapes.polylines().next().unwrap();
    // Scale first, then translate.
    assert_eq!(pts, &[point(102.0, 2.0), point(104.0, 2.0)][..]);
}

#[test]
fn beziers_are_flattened() {
    let mut w = MetafileWriter::new();
    w.polybezier16(&[(0, 0), (0, 10), (10, 10), (10, 0)]);
    let options = ParseOptions {
        point_epsilon: 0.0,
        ..ParseOptions::default()
    };
    let shapes = parse_shapes(&w.finish(), &options).unwrap();
    let (pts, _) = shapes.polylines().next().unwrap();
    assert_eq!(pts.len(), options.bezier_steps + 1);
    assert_eq!(pts[options.bezier_steps / 2], point(5.0, 7.5));
    assert_eq!(pts.last(), Some(&point(10.0, 0.0)));
}

#[test]
fn unknown_records_are_skipped() {
    let mut w = MetafileWriter::new();
    w.record(70, &[1, 2, 3, 4]).polyline16(&[(0, 0), (5, 5)]);
    let mut shapes = svgscribe_emf::MetafileShapes::default();
    let stats = parse(&w.finish(), &ParseOptions::default(), &mut shapes).unwrap();
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.shapes, 1);
}

#[test]
fn malformed_streams_are_rejected() {
    assert!(matches!(
        parse_shapes(&[], &ParseOptions::default()),
        Err(MetafileParseError::MissingHeader)
    ));

    let mut not_header = MetafileWriter::new().finish();
    not_header[0] = EMR_EOF as u8;
    assert!(matches!(
        parse_shapes(&not_header, &ParseOptions::default()),
        Err(MetafileParseError::MissingHeader)
    ));

    let mut w = MetafileWriter::new();
    w.record(EMR_LINETO, &[0; 4]);
    assert!(matches!(
        parse_shapes(&w.finish(), &ParseOptions::default()),
        Err(MetafileParseError::FieldOverrun {
            record_type: EMR_LINETO,
            ..
        })
    ));

    let mut tiny = MetafileWriter::new().finish();
    let at = HEADER_SIZE as usize + 4;
    tiny[at..at + 4].copy_from_slice(&4u32.to_le_bytes());
    assert!(matches!(
        parse_shapes(&tiny, &ParseOptions::default()),
        Err(MetafileParseError::RecordTooSmall { size: 4, .. })
    ));

    let full = {
        let mut w = MetafileWriter::new();
        w.polyline16(&[(0, 0), (1, 1)]);
        w.finish()
    };
    let cut = &full[..full.len() - 22];
    assert!(matches!(
        parse_shapes(cut, &ParseOptions::default()),
        Err(MetafileParseError::Truncated { .. })
    ));
}
