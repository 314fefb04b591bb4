//! The card-play phase: choosing, placing, and casting from hand.
//!
//! [`PlayDirector`] owns the whole cycle; [`best_slot`] is the placement
//! heuristic it uses for monsters, exposed for hosts that want to show
//! placement hints.

mod director;
mod placement;

pub use director::{PlayAction, PlayDirector, PlayReport, PlayedCard};
pub use placement::best_slot;
