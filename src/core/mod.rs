//! Core battle types: cards, units, keywords, effects, RNG.
//!
//! Everything here is plain data shared between the engine and its host.
//! Hosts construct these values; the engine only reads them (apart from
//! [`DecisionRng`], which the engine owns).

pub mod card;
pub mod effect;
pub mod keyword;
pub mod rng;
pub mod unit;

pub use card::{Card, CardId, CardKind};
pub use effect::{ActiveEffect, Effect, EffectKind};
pub use keyword::{Keyword, KeywordSet};
pub use rng::DecisionRng;
pub use unit::{FieldUnit, HealthIcon, Phase, Side, TargetRef, Unit, UnitId};
