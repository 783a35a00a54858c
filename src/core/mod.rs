//! UI-free labeling logic: dataset loading, the annotation store, media
//! lookup and the labeling session that ties them together.

pub mod annotation;
pub mod dataset;
pub mod error;
pub mod media;
pub mod session;

pub use error::LoadError;
