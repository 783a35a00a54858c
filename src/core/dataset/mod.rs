mod columns;
mod loader;

pub use columns::{ColumnPatterns, ImageGroup};
pub use loader::{load_dataset, Dataset, SongRow};

pub(crate) use loader::strip_bom;
