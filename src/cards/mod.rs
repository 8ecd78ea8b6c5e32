//! Entity model: prizes, abilities, special units, multiplier tables.
//!
//! ## Key Types
//!
//! - `Prize`: immutable VP unit with optional category and abilities
//! - `PrizeClass`: closed category enumeration
//! - `PrizeAbility`: declarative ability (kind tag + opaque params)
//! - `SpecialUnit`: one-shot battle asset with a special ability
//! - `MultiplierTable`: per-category scoring multipliers (corporation)
//!
//! Nothing here interprets abilities. The battle engine fires on-claim and
//! battle-time effects; the scoring engine evaluates at-scoring effects.

pub mod ability;
pub mod multiplier;
pub mod params;
pub mod prize;
pub mod special;

pub use ability::{PrizeAbility, PrizeAbilityKind, SetBonus};
pub use multiplier::{resolve_multiplier, MultiplierTable};
pub use params::{ParamKey, ParamValue, Params};
pub use prize::{total_vp, Prize, PrizeClass};
pub use special::{SpecialAbilityKind, SpecialUnit};
