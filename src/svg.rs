//! SVG and HTML markup construction for the map overlay: marker circles,
//! labels, ripple rings, and the decorative starfield

use rand::Rng;

use crate::error::{CachebumpError, Result};
use crate::markers::MarkerRecord;

/// Concentric ripple rings rendered per marker
pub const RIPPLE_RINGS: usize = 3;

/// Stagger between successive ripple rings, in milliseconds
pub const RIPPLE_STAGGER_MS: u64 = 200;

/// Stars rendered once at startup when no count override is given
pub const DEFAULT_STAR_COUNT: usize = 30;

const STAR_COLOR: &str = "#FFD700";
const STAR_OPACITY_MAX: f64 = 0.3;
const STAR_TWINKLE_MIN_SECS: f64 = 3.0;
const STAR_TWINKLE_SPAN_SECS: f64 = 5.0;

/// Escape text for embedding in SVG/HTML content and attribute values
pub fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// The circle and two text labels for one marker. When the record carries a
/// URL the circle is wrapped in an anchor opening a new browsing context.
pub fn marker_markup(marker: &MarkerRecord) -> String {
    let circle = format!(
        "<circle class=\"city-circle\" cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"2\"/>",
        fmt_num(marker.cx),
        fmt_num(marker.cy),
        fmt_num(marker.r),
        xml_escape(&marker.fill),
        xml_escape(&marker.color),
    );

    let circle = if marker.url.is_empty() {
        circle
    } else {
        format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
            xml_escape(&marker.url),
            circle
        )
    };

    format!(
        "{}\n<text class=\"city-text\" x=\"{}\" y=\"{}\">{}</text>\n<text class=\"bioregion-text\" x=\"{}\" y=\"{}\">{}</text>",
        circle,
        fmt_num(marker.cx),
        fmt_num(marker.cy - 7.0),
        xml_escape(&marker.name),
        fmt_num(marker.cx),
        fmt_num(marker.cy + 8.0),
        xml_escape(&marker.bioregion),
    )
}

/// Three concentric ripple rings for one marker, with staggered starts
pub fn ripple_markup(marker: &MarkerRecord) -> String {
    (0..RIPPLE_RINGS)
        .map(|ring| {
            format!(
                "<circle class=\"city-ripple\" cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1\" style=\"animation-delay: {}ms\"/>",
                fmt_num(marker.cx),
                fmt_num(marker.cy),
                fmt_num(marker.r),
                xml_escape(&marker.color),
                ring as u64 * RIPPLE_STAGGER_MS,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Markup for the whole marker set: circle, labels, and ripple rings per
/// marker, in record order
pub fn markers_markup(markers: &[MarkerRecord]) -> String {
    markers
        .iter()
        .map(|m| format!("{}\n{}", marker_markup(m), ripple_markup(m)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One decorative star: a fixed-position 1px point with a randomized
/// twinkle
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub left_vw: f64,
    pub top_vh: f64,
    pub opacity: f64,
    pub twinkle_secs: f64,
}

/// Place `count` stars at random viewport positions with random opacity and
/// twinkle period
pub fn scatter_stars<R: Rng>(count: usize, rng: &mut R) -> Vec<Star> {
    (0..count)
        .map(|_| Star {
            left_vw: rng.gen_range(0.0..100.0),
            top_vh: rng.gen_range(0.0..100.0),
            opacity: rng.gen_range(0.0..STAR_OPACITY_MAX),
            twinkle_secs: STAR_TWINKLE_MIN_SECS + rng.gen_range(0.0..STAR_TWINKLE_SPAN_SECS),
        })
        .collect()
}

/// Markup for one star
pub fn star_markup(star: &Star) -> String {
    format!(
        "<div class=\"star\" style=\"position: fixed; width: 1px; height: 1px; background-color: {}; left: {:.2}vw; top: {:.2}vh; opacity: {:.3}; animation: twinkle {:.2}s ease-in-out infinite; pointer-events: none;\"></div>",
        STAR_COLOR, star.left_vw, star.top_vh, star.opacity, star.twinkle_secs,
    )
}

/// Markup for a freshly scattered starfield
pub fn starfield_markup<R: Rng>(count: usize, rng: &mut R) -> String {
    scatter_stars(count, rng)
        .iter()
        .map(star_markup)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Inject marker markup into the page's `infinity-svg` element, just before
/// its closing tag. Fails with [`CachebumpError::ContainerNotFound`] when
/// the container is missing.
pub fn inject_markers(page: &str, markup: &str) -> Result<String> {
    let container = page
        .find("class=\"infinity-svg\"")
        .ok_or_else(|| CachebumpError::ContainerNotFound("infinity-svg".to_string()))?;
    let close = page[container..]
        .find("</svg>")
        .map(|at| container + at)
        .ok_or_else(|| CachebumpError::ContainerNotFound("infinity-svg".to_string()))?;

    let mut injected = String::with_capacity(page.len() + markup.len() + 1);
    injected.push_str(&page[..close]);
    injected.push_str(markup);
    injected.push('\n');
    injected.push_str(&page[close..]);
    Ok(injected)
}

/// Inject starfield markup just before `</body>`, or append it when the
/// page has no body close tag
pub fn inject_stars(page: &str, markup: &str) -> String {
    match page.rfind("</body>") {
        Some(close) => {
            let mut injected = String::with_capacity(page.len() + markup.len() + 1);
            injected.push_str(&page[..close]);
            injected.push_str(markup);
            injected.push('\n');
            injected.push_str(&page[close..]);
            injected
        }
        None => format!("{page}\n{markup}\n"),
    }
}
