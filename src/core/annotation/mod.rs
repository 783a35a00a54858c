mod export;
mod label;
mod store;

pub use export::{load_prior_annotations, write_export};
pub use label::{Label, Verdict};
pub use store::{AnnotationRecord, AnnotationStore};
