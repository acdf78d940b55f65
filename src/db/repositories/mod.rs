mod events;
mod stats;
