use crate::*;

const LONG_D: &str = "M 0 0 L 100 100 L 200 0 L 300 100 Z";
const LONG_STYLE: &str = "fill:cornflowerblue;stroke:black;stroke-width:2";

fn sample() -> Document {
    let mut doc = Document::new();
    let svg = doc.create_element(ElementKind::Svg);
    doc.set_root(svg).unwrap();
    let single = doc.create_element(ElementKind::Rect);
    doc.set_style(single, Style::parse(LONG_STYLE).unwrap()).unwrap();
    doc.append_child(svg, single).unwrap();
    for _ in 0..2 {
        let p = doc.create_element(ElementKind::Path);
        doc.set_attr(p, "d", Path::parse(LONG_D).unwrap()).unwrap();
        doc.append_child(svg, p).unwrap();
    }
    doc
}

#[test]
fn duplicates_become_entities_and_singletons_stay_inline() {
    let out = sample().to_svg(&WriteOptions::compressed());
    // The singleton took E1 at first sight and was inlined back.
    assert!(!out.contains("<!ENTITY E1"));
    assert!(out.contains(&format!("<!ENTITY E2 \"{LONG_D}\">")));
    assert_eq!(out.matches("d=\"&E2;\"").count(), 2);
    assert!(out.contains(&format!("style=\"{LONG_STYLE}\"")));
}

#[test]
fn compressed_output_reads_back_identically() {
    let doc = sample();
    let plain = doc.to_svg(&WriteOptions::default());
    let packed = doc.to_svg(&WriteOptions::compressed());
    assert_ne!(plain, packed);

    let reloaded = load(&packed).unwrap();
    assert_eq!(reloaded.to_svg(&WriteOptions::default()), plain);
}

#[test]
fn short_and_unsafe_values_are_never_compressed() {
    let mut doc = Document::new();
    let svg = doc.create_element(ElementKind::Svg);
    doc.set_root(svg).unwrap();
    let unsafe_value = "url(#pattern-with-a-long-name) & more text";
    for _ in 0..3 {
        let g = doc.create_element(ElementKind::G);
        doc.set_attr(g, "fill", "red").unwrap();
        doc.set_attr(g, "data-note", unsafe_value).unwrap();
        doc.append_child(svg, g).unwrap();
    }
    let out = doc.to_svg(&WriteOptions::compressed());
    assert!(!out.contains("<!ENTITY"));
    assert!(out.contains("&amp; more text"));
    let opts = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    roxmltree::Document::parse_with_options(&out, opts).unwrap();
}

#[test]
fn plain_output_has_prolog_doctype_and_namespaces() {
    let out = sample().to_svg(&WriteOptions::default());
    assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE svg PUBLIC"));
    assert!(out.contains(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" id=\"e1\">"
    ));
}
