pub mod types;
pub mod classification;

pub use types::VultesterError;
pub use classification::{Disposition, ErrorClassification};
