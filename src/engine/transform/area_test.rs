use crate::engine::osm::Tags;
use crate::engine::transform::area::{has_interesting_tags, is_area};

fn tags(pairs: &[(&str, &str)]) -> Tags {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn explicit_area_tag_wins() {
    assert!(!is_area(&tags(&[("building", "yes"), ("area", "no")])));
    assert!(is_area(&tags(&[("highway", "pedestrian"), ("area", "yes")])));
}

#[test]
fn key_rules_cover_any_except_and_only() {
    assert!(is_area(&tags(&[("building", "house")])));
    assert!(is_area(&tags(&[("natural", "wood")])));
    assert!(!is_area(&tags(&[("natural", "coastline")])));
    assert!(is_area(&tags(&[("waterway", "riverbank")])));
    assert!(!is_area(&tags(&[("waterway", "river")])));
    assert!(!is_area(&tags(&[("highway", "residential")])));
    assert!(!is_area(&tags(&[("building", "no")])));
    assert!(!is_area(&Tags::new()));
}

#[test]
fn metadata_only_tags_are_not_interesting() {
    assert!(!has_interesting_tags(&tags(&[
        ("created_by", "JOSM"),
        ("source", "survey"),
        ("tiger:county", "Allegheny, PA"),
    ])));
    assert!(has_interesting_tags(&tags(&[("source", "survey"), ("name", "Cafe")])));
}
