//! Alembic Core -- substance inventory and crafting resolution.
//!
//! A [`Laboratory`] tracks how much of each named substance is on hand and
//! knows a set of reactions that turn measured amounts of ingredients into a
//! product. It answers two questions: how much of a substance exists, and how
//! much of a product can be made right now.
//!
//! ```rust
//! use alembic_core::{Laboratory, ReactionDef};
//!
//! let mut lab = Laboratory::with_reactions(
//!     ["water"],
//!     vec![ReactionDef::new("steam", [(1.0, "water")])],
//! )?;
//! lab.add("water", 3.0)?;
//! assert_eq!(lab.make("steam", 2.0)?, 2.0);
//! assert_eq!(lab.quantity("water")?, 1.0);
//! # Ok::<(), alembic_core::LabError>(())
//! ```
//!
//! # Key Types
//!
//! - [`laboratory::Laboratory`] -- Name-based facade; owns everything below.
//! - [`registry::SubstanceRegistry`] -- Validated names, in registration order.
//! - [`reaction::ReactionGraph`] -- Product -> recipe, built in two passes so
//!   products may reference each other in any order. Cycles are allowed.
//! - [`ledger::Ledger`] -- Non-negative quantity per substance.
//! - [`resolver::Resolver`] -- The `make` algorithm: replenish scarce
//!   ingredients through nested resolutions on a work stack, then produce
//!   what stock allows.
//!
//! A laboratory is single-threaded state. Share it across threads behind a
//! lock.

pub mod error;
pub mod id;
pub mod laboratory;
pub mod ledger;
pub mod reaction;
pub mod registry;
pub mod resolver;
pub mod validate;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{LabError, NameRole};
pub use id::SubstanceId;
pub use laboratory::{Laboratory, LaboratoryBuilder};
pub use reaction::{IngredientDef, ReactionDef};
