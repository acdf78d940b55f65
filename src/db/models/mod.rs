pub mod events;

pub use events::{StoredDwellEvent, StoredPageView, StoredScrollEvent};
