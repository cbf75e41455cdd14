//! Flow-graph construction: receivers, donors, ordering, accumulation.
//!
//! These stages turn an elevation field into a traversable flow forest.
//! They run in a fixed sequence each step; each one is embarrassingly
//! parallel over cells except the ordering, which is sequential across
//! levels by nature.

mod accumulation;
mod donors;
mod ordering;
mod receivers;

pub use accumulation::accumulate;
pub use donors::compute_donors;
pub use ordering::FlowOrder;
pub use receivers::compute_receivers;
