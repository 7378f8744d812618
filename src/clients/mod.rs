pub mod exam_client;

pub use exam_client::{HttpSlotFetcher, SlotFetcher};
