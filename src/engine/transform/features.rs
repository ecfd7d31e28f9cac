use geo::{
    Contains, Coord, Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon, Rect,
};
use geojson::{Feature, FeatureCollection, JsonObject, feature::Id};
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::area::{has_interesting_tags, is_area};
use super::rings::{is_closed, join_rings, join_segments};
use crate::engine::osm::{
    Bounds, Element, ElementKind, LatLon, Member, Meta, Node, OsmId, RawResponse, Relation, Tags,
    Way, dedup_elements,
};

const LOG_TARGET: &str = "engine::transform::features";

/// Convert an Overpass document into a GeoJSON feature collection.
///
/// One feature per element that resolves to geometry; identifiers are
/// `type/id`. Unresolvable elements are skipped.
pub fn to_feature_collection(raw: RawResponse) -> FeatureCollection {
    let elements = dedup_elements(raw.elements);
    let index = ElementIndex::build(&elements);

    // Relations first so that outline ways consumed by a multipolygon can be
    // suppressed in the element-order pass below.
    let mut relation_geometries: HashMap<OsmId, Geometry<f64>> = HashMap::new();
    let mut outline_ways: HashSet<OsmId> = HashSet::new();
    for element in &elements {
        if let Element::Relation(relation) = element {
            if let Some(geometry) = index.relation_geometry(relation, &mut outline_ways) {
                relation_geometries.insert(relation.id, geometry);
            }
        }
    }

    let mut features = Vec::with_capacity(elements.len());
    let mut dropped = 0usize;

    for element in &elements {
        let Some(parts) = ElementParts::of(element) else {
            continue;
        };
        let resolved = match element {
            Element::Node(node) => index.node_geometry(node),
            Element::Way(way) => {
                if outline_ways.contains(&way.id) && !has_interesting_tags(&way.tags) {
                    continue;
                }
                index.way_geometry(way)
            }
            Element::Relation(relation) => relation_geometries.remove(&relation.id),
            Element::Other => continue,
        };

        match resolved {
            Some(geometry) => features.push(index.feature(parts, geometry)),
            None => {
                if !is_skippable_node(element, &index) {
                    dropped += 1;
                }
            }
        }
    }

    if dropped > 0 {
        debug!(target: LOG_TARGET, dropped, "Dropped elements without resolvable geometry");
    }
    debug!(target: LOG_TARGET, features = features.len(), "Converted elements to features");

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Untagged way vertices are expected to vanish; they are not drops.
fn is_skippable_node(element: &Element, index: &ElementIndex<'_>) -> bool {
    match element {
        Element::Node(node) => {
            node.coord().is_some() && index.way_vertices.contains(&node.id)
        }
        _ => false,
    }
}

#[derive(Clone, Copy)]
struct ElementParts<'e> {
    kind: ElementKind,
    id: OsmId,
    tags: &'e Tags,
    meta: &'e Meta,
}

impl<'e> ElementParts<'e> {
    fn of(element: &'e Element) -> Option<Self> {
        let (kind, id, tags, meta) = match element {
            Element::Node(n) => (ElementKind::Node, n.id, &n.tags, &n.meta),
            Element::Way(w) => (ElementKind::Way, w.id, &w.tags, &w.meta),
            Element::Relation(r) => (ElementKind::Relation, r.id, &r.tags, &r.meta),
            Element::Other => return None,
        };
        Some(Self {
            kind,
            id,
            tags,
            meta,
        })
    }
}

struct ElementIndex<'a> {
    nodes: HashMap<OsmId, &'a Node>,
    ways: HashMap<OsmId, &'a Way>,
    way_vertices: HashSet<OsmId>,
    memberships: HashMap<(ElementKind, OsmId), Vec<(OsmId, &'a str)>>,
}

impl<'a> ElementIndex<'a> {
    fn build(elements: &'a [Element]) -> Self {
        let mut nodes = HashMap::new();
        let mut ways = HashMap::new();
        let mut way_vertices = HashSet::new();
        let mut memberships: HashMap<(ElementKind, OsmId), Vec<(OsmId, &'a str)>> =
            HashMap::new();

        for element in elements {
            match element {
                Element::Node(node) => {
                    nodes.insert(node.id, node);
                }
                Element::Way(way) => {
                    ways.insert(way.id, way);
                    way_vertices.extend(way.nodes.iter().copied());
                }
                Element::Relation(relation) => {
                    for member in &relation.members {
                        memberships
                            .entry((member.kind, member.reference))
                            .or_default()
                            .push((relation.id, member.role.as_str()));
                    }
                }
                Element::Other => {}
            }
        }

        Self {
            nodes,
            ways,
            way_vertices,
            memberships,
        }
    }

    fn node_geometry(&self, node: &Node) -> Option<Geometry<f64>> {
        let coord = node.coord()?;
        if has_interesting_tags(&node.tags) || !self.way_vertices.contains(&node.id) {
            Some(Geometry::Point(Point::from(coord)))
        } else {
            None
        }
    }

    fn way_geometry(&self, way: &Way) -> Option<Geometry<f64>> {
        let coords = self.way_coords(way);
        if coords.len() >= 4 && is_closed(&coords) && is_area(&way.tags) {
            return Some(Geometry::Polygon(Polygon::new(LineString::new(coords), vec![])));
        }
        if coords.len() >= 2 {
            return Some(Geometry::LineString(LineString::new(coords)));
        }
        fallback_geometry(way.center, way.bounds)
    }

    fn way_coords(&self, way: &Way) -> Vec<Coord<f64>> {
        match &way.geometry {
            Some(inline) => flatten_inline(inline),
            None => way
                .nodes
                .iter()
                .filter_map(|id| self.nodes.get(id).and_then(|node| node.coord()))
                .collect(),
        }
    }

    fn member_way_coords(&self, member: &Member) -> Vec<Coord<f64>> {
        match &member.geometry {
            Some(inline) => flatten_inline(inline),
            None => self
                .ways
                .get(&member.reference)
                .map(|way| self.way_coords(way))
                .unwrap_or_default(),
        }
    }

    fn member_node_coord(&self, member: &Member) -> Option<Coord<f64>> {
        member.inline_coord().or_else(|| {
            self.nodes
                .get(&member.reference)
                .and_then(|node| node.coord())
        })
    }

    fn relation_geometry(
        &self,
        relation: &Relation,
        outline_ways: &mut HashSet<OsmId>,
    ) -> Option<Geometry<f64>> {
        let resolved = match relation.relation_type() {
            Some("multipolygon") | Some("boundary") => {
                let geometry = self.area_relation_geometry(relation);
                if geometry.is_some() {
                    outline_ways.extend(
                        relation
                            .members
                            .iter()
                            .filter(|m| m.kind == ElementKind::Way && is_ring_role(&m.role))
                            .map(|m| m.reference),
                    );
                }
                geometry
            }
            _ => self.collection_relation_geometry(relation),
        };
        resolved.or_else(|| fallback_geometry(relation.center, relation.bounds))
    }

    fn area_relation_geometry(&self, relation: &Relation) -> Option<Geometry<f64>> {
        let mut outer_segments = Vec::new();
        let mut inner_segments = Vec::new();
        for member in relation.members.iter().filter(|m| m.kind == ElementKind::Way) {
            match member.role.as_str() {
                "inner" => inner_segments.push(self.member_way_coords(member)),
                "outer" | "" => outer_segments.push(self.member_way_coords(member)),
                _ => {}
            }
        }

        let outers = join_rings(outer_segments);
        if outers.is_empty() {
            return None;
        }

        let mut holes: Vec<Vec<LineString<f64>>> = vec![Vec::new(); outers.len()];
        for inner in join_rings(inner_segments) {
            let Some(probe) = inner.0.first().copied() else {
                continue;
            };
            let owner = outers.iter().position(|outer| {
                Polygon::new(outer.clone(), vec![]).contains(&Point::from(probe))
            });
            if let Some(owner) = owner {
                holes[owner].push(inner);
            }
        }

        let mut polygons: Vec<Polygon<f64>> = outers
            .into_iter()
            .zip(holes)
            .map(|(outer, inners)| Polygon::new(outer, inners))
            .collect();

        if polygons.len() == 1 {
            polygons.pop().map(Geometry::Polygon)
        } else {
            Some(Geometry::MultiPolygon(MultiPolygon::new(polygons)))
        }
    }

    /// Routes, waterways and other relations: member ways as lines, or
    /// member nodes as points when there are no usable ways.
    fn collection_relation_geometry(&self, relation: &Relation) -> Option<Geometry<f64>> {
        let segments: Vec<Vec<Coord<f64>>> = relation
            .members
            .iter()
            .filter(|m| m.kind == ElementKind::Way)
            .map(|m| self.member_way_coords(m))
            .collect();

        let mut lines: Vec<LineString<f64>> = join_segments(segments)
            .into_iter()
            .map(LineString::new)
            .collect();
        if lines.len() == 1 {
            return lines.pop().map(Geometry::LineString);
        }
        if !lines.is_empty() {
            return Some(Geometry::MultiLineString(MultiLineString::new(lines)));
        }

        let mut points: Vec<Point<f64>> = relation
            .members
            .iter()
            .filter(|m| m.kind == ElementKind::Node)
            .filter_map(|m| self.member_node_coord(m))
            .map(Point::from)
            .collect();
        match points.len() {
            0 => None,
            1 => points.pop().map(Geometry::Point),
            _ => Some(Geometry::MultiPoint(MultiPoint::new(points))),
        }
    }

    fn feature(&self, parts: ElementParts<'_>, geometry: Geometry<f64>) -> Feature {
        let feature_id = format!("{}/{}", parts.kind, parts.id);
        let properties = build_properties(
            &feature_id,
            parts.tags,
            parts.meta,
            self.memberships
                .get(&(parts.kind, parts.id))
                .map(Vec::as_slice),
        );

        Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::from(&geometry))),
            id: Some(Id::String(feature_id)),
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

fn is_ring_role(role: &str) -> bool {
    matches!(role, "outer" | "inner" | "")
}

fn flatten_inline(inline: &[Option<LatLon>]) -> Vec<Coord<f64>> {
    inline.iter().flatten().map(|p| Coord::from(*p)).collect()
}

/// `out center;` and `out bb;` outputs carry no member geometry.
fn fallback_geometry(center: Option<LatLon>, bounds: Option<Bounds>) -> Option<Geometry<f64>> {
    if let Some(center) = center {
        return Some(Geometry::Point(Point::from(Coord::from(center))));
    }
    bounds.map(|b| {
        let rect = Rect::new(
            Coord {
                x: b.minlon,
                y: b.minlat,
            },
            Coord {
                x: b.maxlon,
                y: b.maxlat,
            },
        );
        Geometry::Polygon(rect.to_polygon())
    })
}

fn build_properties(
    feature_id: &str,
    tags: &Tags,
    meta: &Meta,
    memberships: Option<&[(OsmId, &str)]>,
) -> JsonObject {
    let mut properties = JsonObject::new();
    for (key, value) in tags {
        properties.insert(key.clone(), Value::String(value.clone()));
    }
    properties.insert("@id".to_string(), json!(feature_id));

    if let Some(timestamp) = &meta.timestamp {
        properties.insert("@timestamp".to_string(), json!(timestamp));
    }
    if let Some(version) = meta.version {
        properties.insert("@version".to_string(), json!(version));
    }
    if let Some(changeset) = meta.changeset {
        properties.insert("@changeset".to_string(), json!(changeset));
    }
    if let Some(user) = &meta.user {
        properties.insert("@user".to_string(), json!(user));
    }
    if let Some(uid) = meta.uid {
        properties.insert("@uid".to_string(), json!(uid));
    }

    if let Some(memberships) = memberships.filter(|m| !m.is_empty()) {
        let relations: Vec<Value> = memberships
            .iter()
            .map(|(rel, role)| json!({ "rel": rel, "role": role }))
            .collect();
        properties.insert("@relations".to_string(), Value::Array(relations));
    }

    properties
}
