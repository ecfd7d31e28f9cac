use geo::{BoundingRect, Geometry};
use geojson::FeatureCollection;

use crate::engine::errors::PipelineError;
use crate::shared::protocol::BoundingBox;

/// Tight axis-aligned box over every coordinate in the collection.
pub fn bounding_box(collection: &FeatureCollection) -> Result<BoundingBox, PipelineError> {
    let mut bbox: Option<BoundingBox> = None;

    for geometry in collection
        .features
        .iter()
        .filter_map(|f| f.geometry.as_ref())
        .filter_map(|g| Geometry::<f64>::try_from(g.value.clone()).ok())
    {
        let Some(rect) = geometry.bounding_rect() else {
            continue;
        };
        match bbox.as_mut() {
            Some(b) => b.expand(&rect),
            None => bbox = Some(BoundingBox::from(rect)),
        }
    }

    bbox.ok_or(PipelineError::EmptyResult)
}
