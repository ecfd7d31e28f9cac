use crate::engine::osm::Tags;

/// Tags that carry no mapping meaning on their own.
const UNINTERESTING_TAGS: &[&str] = &[
    "source",
    "source_ref",
    "source:ref",
    "history",
    "attribution",
    "created_by",
    "converted_by",
    "fixme",
    "FIXME",
];

pub fn is_interesting_tag(key: &str) -> bool {
    !UNINTERESTING_TAGS.contains(&key) && !key.starts_with("tiger:")
}

pub fn has_interesting_tags(tags: &Tags) -> bool {
    tags.keys().any(|key| is_interesting_tag(key))
}

/// Keys whose presence on a closed way means "area", optionally except for
/// the listed values (`Except`) or only for them (`Only`).
enum AreaRule {
    Any,
    Except(&'static [&'static str]),
    Only(&'static [&'static str]),
}

const AREA_KEYS: &[(&str, AreaRule)] = &[
    ("building", AreaRule::Any),
    ("building:part", AreaRule::Any),
    ("landuse", AreaRule::Any),
    ("amenity", AreaRule::Any),
    ("leisure", AreaRule::Any),
    ("shop", AreaRule::Any),
    ("tourism", AreaRule::Any),
    ("historic", AreaRule::Any),
    ("military", AreaRule::Any),
    ("office", AreaRule::Any),
    ("craft", AreaRule::Any),
    ("place", AreaRule::Any),
    ("boundary", AreaRule::Any),
    ("public_transport", AreaRule::Any),
    ("indoor", AreaRule::Any),
    ("ruins", AreaRule::Any),
    ("water", AreaRule::Any),
    ("area:highway", AreaRule::Any),
    (
        "natural",
        AreaRule::Except(&["coastline", "cliff", "ridge", "arete", "tree_row"]),
    ),
    (
        "man_made",
        AreaRule::Except(&["cutline", "embankment", "pipeline"]),
    ),
    ("aeroway", AreaRule::Except(&["taxiway"])),
    (
        "waterway",
        AreaRule::Only(&["riverbank", "dock", "boatyard", "dam"]),
    ),
    ("railway", AreaRule::Only(&["platform", "station"])),
    (
        "power",
        AreaRule::Only(&["plant", "substation", "generator", "transformer"]),
    ),
    (
        "barrier",
        AreaRule::Only(&[
            "city_wall",
            "ditch",
            "hedge",
            "retaining_wall",
            "wall",
            "spikes",
        ]),
    ),
    (
        "highway",
        AreaRule::Only(&["services", "rest_area", "escape", "elevator"]),
    ),
];

/// Whether a closed way with these tags renders as a polygon rather than a
/// closed line.
pub fn is_area(tags: &Tags) -> bool {
    match tags.get("area").map(String::as_str) {
        Some("no") => return false,
        Some(_) => return true,
        None => {}
    }

    AREA_KEYS.iter().any(|(key, rule)| match tags.get(*key) {
        None => false,
        Some(value) if value == "no" => false,
        Some(value) => match rule {
            AreaRule::Any => true,
            AreaRule::Except(values) => !values.contains(&value.as_str()),
            AreaRule::Only(values) => values.contains(&value.as_str()),
        },
    })
}
