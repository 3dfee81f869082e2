use rustc_hash::FxHashMap;
use std::sync::OnceLock;

/// Element tag of a document node.
///
/// Known SVG elements get their own variant; anything else is carried through as
/// [`ElementKind::Unknown`] with its local name so loaded documents write back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Svg,
    G,
    Defs,
    Desc,
    Title,
    Symbol,
    Use,
    Image,
    Switch,
    A,
    Rect,
    Circle,
    Ellipse,
    Line,
    Polyline,
    Polygon,
    Path,
    Text,
    Tspan,
    TextPath,
    LinearGradient,
    RadialGradient,
    Stop,
    Pattern,
    ClipPath,
    Mask,
    Marker,
    Style,
    Filter,
    Unknown(String),
    /// Character data between tags.
    CharacterData,
}

impl ElementKind {
    /// Every known element kind, in registry order.
    pub const ALL: [ElementKind; 29] = [
        ElementKind::Svg,
        ElementKind::G,
        ElementKind::Defs,
        ElementKind::Desc,
        ElementKind::Title,
        ElementKind::Symbol,
        ElementKind::Use,
        ElementKind::Image,
        ElementKind::Switch,
        ElementKind::A,
        ElementKind::Rect,
        ElementKind::Circle,
        ElementKind::Ellipse,
        ElementKind::Line,
        ElementKind::Polyline,
        ElementKind::Polygon,
        ElementKind::Path,
        ElementKind::Text,
        ElementKind::Tspan,
        ElementKind::TextPath,
        ElementKind::LinearGradient,
        ElementKind::RadialGradient,
        ElementKind::Stop,
        ElementKind::Pattern,
        ElementKind::ClipPath,
        ElementKind::Mask,
        ElementKind::Marker,
        ElementKind::Style,
        ElementKind::Filter,
    ];

    pub fn tag(&self) -> &str {
        match self {
            ElementKind::Unknown(tag) => tag,
            other => other.known_tag().unwrap_or_default(),
        }
    }

    fn known_tag(&self) -> Option<&'static str> {
        let tag = match self {
            ElementKind::Svg => "svg",
            ElementKind::G => "g",
            ElementKind::Defs => "defs",
            ElementKind::Desc => "desc",
            ElementKind::Title => "title",
            ElementKind::Symbol => "symbol",
            ElementKind::Use => "use",
            ElementKind::Image => "image",
            ElementKind::Switch => "switch",
            ElementKind::A => "a",
            ElementKind::Rect => "rect",
            ElementKind::Circle => "circle",
            ElementKind::Ellipse => "ellipse",
            ElementKind::Line => "line",
            ElementKind::Polyline => "polyline",
            ElementKind::Polygon => "polygon",
            ElementKind::Path => "path",
            ElementKind::Text => "text",
            ElementKind::Tspan => "tspan",
            ElementKind::TextPath => "textPath",
            ElementKind::LinearGradient => "linearGradient",
            ElementKind::RadialGradient => "radialGradient",
            ElementKind::Stop => "stop",
            ElementKind::Pattern => "pattern",
            ElementKind::ClipPath => "clipPath",
            ElementKind::Mask => "mask",
            ElementKind::Marker => "marker",
            ElementKind::Style => "style",
            ElementKind::Filter => "filter",
            ElementKind::Unknown(_) | ElementKind::CharacterData => return None,
        };
        Some(tag)
    }

    /// Looks `tag` up in the registry; unregistered tags become [`ElementKind::Unknown`].
    pub fn from_tag(tag: &str) -> ElementKind {
        ElementRegistry::global()
            .lookup(tag)
            .cloned()
            .unwrap_or_else(|| ElementKind::Unknown(tag.to_string()))
    }

    pub fn is_text_content(&self) -> bool {
        matches!(
            self,
            ElementKind::Text | ElementKind::Tspan | ElementKind::TextPath
        )
    }
}

/// Tag name to element kind table, built once per process.
#[derive(Debug)]
pub struct ElementRegistry {
    by_tag: FxHashMap<&'static str, ElementKind>,
}

static REGISTRY: OnceLock<ElementRegistry> = OnceLock::new();

impl ElementRegistry {
    pub fn global() -> &'static ElementRegistry {
        REGISTRY.get_or_init(|| {
            let mut by_tag = FxHashMap::default();
            for kind in &ElementKind::ALL {
                if let Some(tag) = kind.known_tag() {
                    by_tag.insert(tag, kind.clone());
                }
            }
            ElementRegistry { by_tag }
        })
    }

    pub fn lookup(&self, tag: &str) -> Option<&ElementKind> {
        self.by_tag.get(tag)
    }

    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }
}
