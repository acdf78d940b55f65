pub mod event;
pub mod visit;

pub use event::{
    DwellEvent, EventKind, NavigationEvent, OutboundEvent, ScrollEvent, TrackingEvent,
};
pub use visit::Visit;
