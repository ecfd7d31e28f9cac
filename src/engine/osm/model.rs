use geo::Coord;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

pub type OsmId = i64;

pub type Tags = BTreeMap<String, String>;

/// Decoded Overpass JSON document (`[out:json]`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawResponse {
    #[serde(default)]
    pub version: Option<f64>,
    #[serde(default)]
    pub generator: Option<String>,
    /// Set by Overpass for runtime errors and warnings.
    #[serde(default)]
    pub remark: Option<String>,
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Node(Node),
    Way(Way),
    Relation(Relation),
    /// `area`, `count`, `timeline` and other derived outputs.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Node,
    Way,
    Relation,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Node => "node",
            ElementKind::Way => "way",
            ElementKind::Relation => "relation",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Edit metadata present with `out meta;`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub version: Option<u64>,
    #[serde(default)]
    pub changeset: Option<u64>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub uid: Option<u64>,
}

impl Meta {
    pub fn is_empty(&self) -> bool {
        self.timestamp.is_none()
            && self.version.is_none()
            && self.changeset.is_none()
            && self.user.is_none()
            && self.uid.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl From<LatLon> for Coord<f64> {
    fn from(point: LatLon) -> Self {
        Coord {
            x: point.lon,
            y: point.lat,
        }
    }
}

/// Envelope from `out bb;`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Bounds {
    pub minlat: f64,
    pub minlon: f64,
    pub maxlat: f64,
    pub maxlon: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Node {
    pub id: OsmId,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub tags: Tags,
    #[serde(flatten)]
    pub meta: Meta,
}

impl Node {
    pub fn coord(&self) -> Option<Coord<f64>> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coord { x: lon, y: lat }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Way {
    pub id: OsmId,
    #[serde(default)]
    pub nodes: Vec<OsmId>,
    /// Inline coordinates from `out geom;`. Entries are `null` for nodes
    /// outside the query bbox.
    #[serde(default)]
    pub geometry: Option<Vec<Option<LatLon>>>,
    /// Present with `out center;`.
    #[serde(default)]
    pub center: Option<LatLon>,
    /// Present with `out bb;`.
    #[serde(default)]
    pub bounds: Option<Bounds>,
    #[serde(default)]
    pub tags: Tags,
    #[serde(flatten)]
    pub meta: Meta,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Relation {
    pub id: OsmId,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub center: Option<LatLon>,
    #[serde(default)]
    pub bounds: Option<Bounds>,
    #[serde(default)]
    pub tags: Tags,
    #[serde(flatten)]
    pub meta: Meta,
}

impl Relation {
    pub fn relation_type(&self) -> Option<&str> {
        self.tags.get("type").map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Member {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    #[serde(rename = "ref")]
    pub reference: OsmId,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub geometry: Option<Vec<Option<LatLon>>>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

impl Member {
    pub fn inline_coord(&self) -> Option<Coord<f64>> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coord { x: lon, y: lat }),
            _ => None,
        }
    }
}

impl Element {
    pub fn key(&self) -> Option<(ElementKind, OsmId)> {
        match self {
            Element::Node(n) => Some((ElementKind::Node, n.id)),
            Element::Way(w) => Some((ElementKind::Way, w.id)),
            Element::Relation(r) => Some((ElementKind::Relation, r.id)),
            Element::Other => None,
        }
    }

    /// Feature identifier, e.g. `way/1`.
    pub fn feature_id(&self) -> Option<String> {
        self.key().map(|(kind, id)| format!("{kind}/{id}"))
    }
}
