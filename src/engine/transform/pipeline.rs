use tracing::info;

use super::bounds::bounding_box;
use super::features::to_feature_collection;
use super::points::representative_points;
use crate::engine::errors::PipelineError;
use crate::engine::osm::RawResponse;
use crate::engine::progress::ProgressSink;
use crate::shared::protocol::QueryPayload;

const LOG_TARGET: &str = "engine::transform";

/// Run the full geometry stage on a decoded response. Synchronous; consumes
/// the response.
pub fn transform(raw: RawResponse, sink: &dyn ProgressSink) -> Result<QueryPayload, PipelineError> {
    sink.report("converting to geojson".to_string());
    let feature_collection = to_feature_collection(raw);
    let count = feature_collection.features.len();
    if count == 0 {
        return Err(PipelineError::EmptyResult);
    }
    sink.report(format!("converted {count} features"));

    sink.report("finding representative points".to_string());
    let centroid_collection = representative_points(&feature_collection);

    let bounding_box = bounding_box(&feature_collection)?;
    info!(
        target: LOG_TARGET,
        features = count,
        bbox = ?bounding_box.to_array(),
        "Transform complete"
    );

    Ok(QueryPayload {
        feature_collection,
        centroid_collection,
        bounding_box,
    })
}
