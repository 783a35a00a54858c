mod commit;
mod labeling;
mod page;
mod pager;

pub use labeling::{LabelingSession, NavigationOutcome};
pub use page::{ImageSlot, Page, PageSection, PageStatus, SlotKey};
