use geo::{CoordsIter, Geometry, InteriorPoint, Point};
use geojson::{Feature, FeatureCollection};

/// A point on or inside `geometry`.
///
/// Uses the interior point algorithm rather than the centroid, which can fall
/// outside concave polygons and off curved lines. Degenerate inputs fall back
/// to the first vertex.
pub fn representative_point(geometry: &Geometry<f64>) -> Option<Point<f64>> {
    geometry
        .interior_point()
        .or_else(|| geometry.coords_iter().next().map(Point::from))
}

/// Replace every feature's geometry with its representative point. Ids,
/// order and properties are kept, so the result pairs 1:1 with the input.
pub fn representative_points(collection: &FeatureCollection) -> FeatureCollection {
    let features = collection
        .features
        .iter()
        .map(|feature| Feature {
            bbox: None,
            geometry: feature
                .geometry
                .as_ref()
                .and_then(|g| Geometry::<f64>::try_from(g.value.clone()).ok())
                .and_then(|g| representative_point(&g))
                .map(|p| geojson::Geometry::new(geojson::Value::from(&p))),
            id: feature.id.clone(),
            properties: feature.properties.clone(),
            foreign_members: None,
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
