pub mod dedup;
pub mod model;

pub use dedup::dedup_elements;
pub use model::{
    Bounds, Element, ElementKind, LatLon, Member, Meta, Node, OsmId, RawResponse, Relation, Tags,
    Way,
};
