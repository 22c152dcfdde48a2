//! Integration tests for the marker overlay rendering flow

use std::fs;

use cachebump::error::CachebumpError;
use cachebump::markers;
use cachebump::schedule::CycleSchedule;
use cachebump::svg;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
<svg class="infinity-svg" viewBox="0 0 400 300">
  <path d="M 0 0"/>
</svg>
</body>
</html>
"#;

const CENTERS: &str = r##"[
    {"cx": 120, "cy": 80, "r": 14, "color": "#dc2626",
     "name": "Wellington", "bioregion": "Cook Strait",
     "url": "https://example.org/wellington"},
    {"cx": 40, "cy": 200, "r": 10, "color": "#2563eb",
     "name": "Hobart", "bioregion": "Tasmania"}
]"##;

#[test]
fn test_render_pipeline_injects_markers_and_stars() {
    let dir = tempfile::tempdir().unwrap();
    let centers = dir.path().join("centers.json");
    fs::write(&centers, CENTERS).unwrap();

    let list = markers::load_markers(&centers).unwrap();
    let markup = svg::markers_markup(&list);
    let page = svg::inject_markers(PAGE, &markup).unwrap();

    let mut rng = StdRng::seed_from_u64(1);
    let page = svg::inject_stars(&page, &svg::starfield_markup(5, &mut rng));

    // Markers landed inside the svg element, stars inside the body
    let svg_close = page.find("</svg>").unwrap();
    let wellington = page.find(">Wellington</text>").unwrap();
    assert!(wellington < svg_close);
    assert_eq!(page.matches("city-circle").count(), 2);
    assert_eq!(page.matches("city-ripple").count(), 2 * svg::RIPPLE_RINGS);

    let body_close = page.rfind("</body>").unwrap();
    let first_star = page.find("class=\"star\"").unwrap();
    assert!(first_star > svg_close);
    assert!(first_star < body_close);
    assert_eq!(page.matches("class=\"star\"").count(), 5);
}

#[test]
fn test_missing_container_reports_without_touching_stars() {
    // The starfield does not depend on the marker container
    let bare = "<html><body></body></html>";
    let err = svg::inject_markers(bare, "<circle/>").unwrap_err();
    assert!(matches!(err, CachebumpError::ContainerNotFound(_)));

    let mut rng = StdRng::seed_from_u64(1);
    let page = svg::inject_stars(bare, &svg::starfield_markup(3, &mut rng));
    assert_eq!(page.matches("class=\"star\"").count(), 3);
}

#[test]
fn test_schedule_windows_cover_the_marker_set() {
    let list = markers::parse_markers(CENTERS).unwrap();
    let schedule = CycleSchedule::evenly_divided(Duration::from_secs(12), list.len());

    assert_eq!(schedule.entries().len(), list.len());
    assert_eq!(schedule.entries()[0].offset, Duration::ZERO);
    assert_eq!(schedule.entries()[1].offset, Duration::from_secs(6));
    // Every window stays inside the cycle
    for entry in schedule.entries() {
        assert!(entry.offset < schedule.cycle());
    }
}
