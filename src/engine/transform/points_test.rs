use crate::engine::transform::{representative_point, representative_points, to_feature_collection};
use crate::test_helpers::factory::Factory;
use geo::{
    Centroid, Contains, Coord, Geometry, Intersects, LineString, MultiPoint, MultiPolygon, Polygon,
    coord,
};
use proptest::prelude::*;
use std::f64::consts::TAU;

/// Simple polygon, star-shaped around `(cx, cy)`; concave whenever the radii
/// differ.
fn star_polygon(cx: f64, cy: f64) -> impl Strategy<Value = Polygon<f64>> {
    prop::collection::vec((0.2f64..1.0, 0.0f64..0.8), 3..16).prop_map(move |spokes| {
        let n = spokes.len() as f64;
        let coords: Vec<Coord<f64>> = spokes
            .iter()
            .enumerate()
            .map(|(i, (radius, jitter))| {
                let angle = (i as f64 + jitter) * TAU / n;
                coord! { x: cx + radius * angle.cos(), y: cy + radius * angle.sin() }
            })
            .collect();
        Polygon::new(LineString::from(coords), vec![])
    })
}

fn anchored_star() -> impl Strategy<Value = Polygon<f64>> {
    (-170.0f64..170.0, -80.0f64..80.0).prop_flat_map(|(cx, cy)| star_polygon(cx, cy))
}

/// At least one interior vertex.
fn polyline() -> impl Strategy<Value = LineString<f64>> {
    prop::collection::vec((-180.0f64..180.0, -90.0f64..90.0), 3..12).prop_map(LineString::from)
}

proptest! {
    #[test]
    fn polygon_point_lies_inside(polygon in anchored_star()) {
        let geometry = Geometry::Polygon(polygon);
        let point = representative_point(&geometry).expect("point");
        prop_assert!(geometry.intersects(&point));
    }

    #[test]
    fn line_point_lies_on_the_line(line in polyline()) {
        let geometry = Geometry::LineString(line);
        let point = representative_point(&geometry).expect("point");
        prop_assert!(geometry.intersects(&point));
    }

    #[test]
    fn multipolygon_point_lies_in_a_member(
        left in star_polygon(-10.0, 0.0),
        right in star_polygon(10.0, 0.0),
    ) {
        let geometry = Geometry::MultiPolygon(MultiPolygon::new(vec![left, right]));
        let point = representative_point(&geometry).expect("point");
        prop_assert!(geometry.intersects(&point));
    }

    #[test]
    fn multipoint_point_is_a_member(
        points in prop::collection::vec((-180.0f64..180.0, -90.0f64..90.0), 1..8),
    ) {
        let multi = MultiPoint::from(points);
        let point = representative_point(&Geometry::MultiPoint(multi.clone())).expect("point");
        prop_assert!(multi.0.contains(&point));
    }
}

#[test]
fn concave_polygon_point_is_inside_where_centroid_is_not() {
    // U shape opening upwards; its centroid sits in the gap.
    let u_shape = Polygon::new(
        LineString::from(vec![
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 3.0),
            (2.0, 3.0),
            (2.0, 0.5),
            (1.0, 0.5),
            (1.0, 3.0),
            (0.0, 3.0),
            (0.0, 0.0),
        ]),
        vec![],
    );
    let centroid = u_shape.centroid().expect("centroid");
    assert!(!u_shape.contains(&centroid));

    let point = representative_point(&Geometry::Polygon(u_shape.clone())).expect("point");
    assert!(u_shape.contains(&point));
}

#[test]
fn degenerate_geometries_fall_back_to_first_vertex() {
    let collapsed = Geometry::LineString(LineString::from(vec![(2.0, 3.0), (2.0, 3.0)]));
    let point = representative_point(&collapsed).expect("point");
    assert_eq!(point.x_y(), (2.0, 3.0));

    let empty = Geometry::MultiPoint(MultiPoint::<f64>::new(vec![]));
    assert!(representative_point(&empty).is_none());
}

#[test]
fn point_collection_pairs_with_source_features() {
    let collection = to_feature_collection(
        Factory::raw_response()
            .with_node(1, 0.0, 0.0, &[("amenity", "cafe")])
            .with_building(2, 1.0, 1.0, 0.1)
            .with_inline_way(3, &[(5.0, 5.0), (6.0, 6.0)], &[("highway", "path")])
            .create(),
    );

    let points = representative_points(&collection);

    assert_eq!(points.features.len(), collection.features.len());
    for (source, point) in collection.features.iter().zip(&points.features) {
        assert_eq!(source.id, point.id);
        assert_eq!(source.properties, point.properties);
        assert!(matches!(
            point.geometry.as_ref().map(|g| &g.value),
            Some(geojson::Value::Point(_))
        ));
    }
}
