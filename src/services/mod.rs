pub mod exam_aggregator;
pub mod scoring;
pub mod variant_resolver;

pub use scoring::score;
pub use variant_resolver::{resolve_slot_id, VariantPolicy};
