use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use svgscribe::WriteOptions;
use svgscribe::geom::{point, rect};
use svgscribe::scene::{
    Argb, Brush, FillMode, Font, Graphics, HatchBrush, HatchStyle, MatrixOrder, Pen, SceneBuilder,
    SceneOptions, StringFormat, TextLayout,
};

fn draw_grid(g: &mut SceneBuilder, cells: usize) {
    let pen = Pen::new(Argb::BLACK, 1.0);
    let hatch: Brush = HatchBrush::new(HatchStyle::DiagonalCross, Argb::BLACK, Argb::WHITE).into();
    let font = Font::new("Arial", 9.0);
    for i in 0..cells {
        let x = (i % 20) as f64 * 12.0;
        let y = (i / 20) as f64 * 12.0;
        let c = g.begin_container().unwrap();
        g.translate_transform(x, y, MatrixOrder::Prepend);
        g.fill_rectangle(&hatch, rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        g.draw_pie(&pen, rect(0.0, 0.0, 10.0, 10.0), 30.0, 120.0)
            .unwrap();
        g.fill_polygon(
            &Brush::solid(Argb::rgb(0, 128, 255)),
            &[point(0.0, 0.0), point(5.0, 10.0), point(10.0, 0.0)],
            FillMode::Alternate,
        )
        .unwrap();
        g.draw_string(
            "cell",
            &font,
            &Brush::solid(Argb::BLACK),
            TextLayout::At(point(0.0, 0.0)),
            &StringFormat::default(),
        )
        .unwrap();
        g.end_container(c).unwrap();
    }
}

fn bench_build_and_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene");
    for cells in [20usize, 200] {
        group.bench_function(format!("build_{cells}"), |b| {
            b.iter_batched(
                || SceneBuilder::new(SceneOptions::default()).unwrap(),
                |mut g| {
                    draw_grid(&mut g, cells);
                    g
                },
                BatchSize::SmallInput,
            )
        });

        let mut g = SceneBuilder::new(SceneOptions::default()).unwrap();
        draw_grid(&mut g, cells);
        group.bench_function(format!("write_compressed_{cells}"), |b| {
            b.iter(|| g.to_svg(&WriteOptions::compressed()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build_and_write);
criterion_main!(benches);
