use std::collections::HashMap;

use super::model::{Element, ElementKind, Meta, Node, OsmId, Relation, Way};

/// Collapse repeated `(type, id)` elements into one, keeping the position of
/// the first copy. Fields the first copy lacks are filled from later copies,
/// so `out ids;` followed by `out geom;` still yields full geometry.
pub fn dedup_elements(elements: Vec<Element>) -> Vec<Element> {
    let mut index: HashMap<(ElementKind, OsmId), usize> = HashMap::with_capacity(elements.len());
    let mut out: Vec<Element> = Vec::with_capacity(elements.len());

    for element in elements {
        let Some(key) = element.key() else {
            continue;
        };
        match index.get(&key) {
            Some(&pos) => absorb(&mut out[pos], element),
            None => {
                index.insert(key, out.len());
                out.push(element);
            }
        }
    }

    out
}

fn absorb(existing: &mut Element, later: Element) {
    match (existing, later) {
        (Element::Node(a), Element::Node(b)) => absorb_node(a, b),
        (Element::Way(a), Element::Way(b)) => absorb_way(a, b),
        (Element::Relation(a), Element::Relation(b)) => absorb_relation(a, b),
        _ => {}
    }
}

fn absorb_node(a: &mut Node, b: Node) {
    if a.coord().is_none() {
        a.lat = b.lat;
        a.lon = b.lon;
    }
    if a.tags.is_empty() {
        a.tags = b.tags;
    }
    absorb_meta(&mut a.meta, b.meta);
}

fn absorb_way(a: &mut Way, b: Way) {
    if a.nodes.is_empty() {
        a.nodes = b.nodes;
    }
    if a.geometry.is_none() {
        a.geometry = b.geometry;
    }
    a.center = a.center.or(b.center);
    a.bounds = a.bounds.or(b.bounds);
    if a.tags.is_empty() {
        a.tags = b.tags;
    }
    absorb_meta(&mut a.meta, b.meta);
}

fn absorb_relation(a: &mut Relation, b: Relation) {
    if a.members.is_empty() {
        a.members = b.members;
    } else if a.members.len() == b.members.len() {
        // Same member list; pick up inline geometry from `out geom;`.
        for (mine, theirs) in a.members.iter_mut().zip(b.members) {
            if mine.geometry.is_none() {
                mine.geometry = theirs.geometry;
            }
            if mine.inline_coord().is_none() {
                mine.lat = theirs.lat;
                mine.lon = theirs.lon;
            }
        }
    }
    a.center = a.center.or(b.center);
    a.bounds = a.bounds.or(b.bounds);
    if a.tags.is_empty() {
        a.tags = b.tags;
    }
    absorb_meta(&mut a.meta, b.meta);
}

fn absorb_meta(a: &mut Meta, b: Meta) {
    if a.is_empty() {
        *a = b;
    }
}
