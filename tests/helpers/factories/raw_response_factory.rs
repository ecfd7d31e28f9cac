use crate::engine::osm::RawResponse;
use serde_json::{Map, Value, json};

pub struct RawResponseFactory {
    elements: Vec<Value>,
    remark: Option<String>,
}

fn tag_map(tags: &[(&str, &str)]) -> Value {
    let map: Map<String, Value> = tags
        .iter()
        .map(|(k, v)| (k.to_string(), json!(v)))
        .collect();
    Value::Object(map)
}

fn inline_geometry(coords: &[(f64, f64)]) -> Value {
    Value::Array(
        coords
            .iter()
            .map(|(lon, lat)| json!({ "lat": lat, "lon": lon }))
            .collect(),
    )
}

impl RawResponseFactory {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            remark: None,
        }
    }

    pub fn with_node(mut self, id: i64, lon: f64, lat: f64, tags: &[(&str, &str)]) -> Self {
        self.elements.push(json!({
            "type": "node", "id": id, "lat": lat, "lon": lon, "tags": tag_map(tags)
        }));
        self
    }

    pub fn with_way(mut self, id: i64, nodes: &[i64], tags: &[(&str, &str)]) -> Self {
        self.elements.push(json!({
            "type": "way", "id": id, "nodes": nodes, "tags": tag_map(tags)
        }));
        self
    }

    /// Way with `out geom;` style inline coordinates given as `(lon, lat)`.
    pub fn with_inline_way(mut self, id: i64, coords: &[(f64, f64)], tags: &[(&str, &str)]) -> Self {
        let nodes: Vec<i64> = (0..coords.len() as i64).map(|i| id * 1000 + i).collect();
        self.elements.push(json!({
            "type": "way", "id": id, "nodes": nodes,
            "geometry": inline_geometry(coords), "tags": tag_map(tags)
        }));
        self
    }

    /// Closed square way tagged `building=yes`, lower-left corner at `(lon, lat)`.
    pub fn with_building(self, id: i64, lon: f64, lat: f64, size: f64) -> Self {
        let ring = square_ring(lon, lat, size);
        self.with_inline_way(id, &ring, &[("building", "yes")])
    }

    /// Members are `(type, ref, role)`.
    pub fn with_relation(
        mut self,
        id: i64,
        members: &[(&str, i64, &str)],
        tags: &[(&str, &str)],
    ) -> Self {
        let members: Vec<Value> = members
            .iter()
            .map(|(kind, reference, role)| json!({ "type": kind, "ref": reference, "role": role }))
            .collect();
        self.elements.push(json!({
            "type": "relation", "id": id, "members": members, "tags": tag_map(tags)
        }));
        self
    }

    pub fn with_element(mut self, element: Value) -> Self {
        self.elements.push(element);
        self
    }

    pub fn with_remark(mut self, remark: &str) -> Self {
        self.remark = Some(remark.to_string());
        self
    }

    pub fn to_json(&self) -> Value {
        let mut doc = json!({
            "version": 0.6,
            "generator": "Overpass API 0.7.62.1",
            "elements": self.elements,
        });
        if let Some(remark) = &self.remark {
            doc["remark"] = json!(remark);
        }
        doc
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(&self.to_json()).unwrap()
    }

    pub fn create(self) -> RawResponse {
        serde_json::from_value(self.to_json()).unwrap()
    }
}

pub fn square_ring(lon: f64, lat: f64, size: f64) -> Vec<(f64, f64)> {
    vec![
        (lon, lat),
        (lon + size, lat),
        (lon + size, lat + size),
        (lon, lat + size),
        (lon, lat),
    ]
}
