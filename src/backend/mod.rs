pub mod rest;
pub mod traits;
pub mod types;

pub use rest::BackendClient;
pub use traits::{DocumentSink, TaxonomySource};
pub use types::{Area, Interest, NewDocument, NewPlanningCard};
