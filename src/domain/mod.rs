pub mod record;
pub mod title;

pub use record::{Cover, MetadataRecord};
