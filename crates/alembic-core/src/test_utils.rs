//! Shared fixtures for unit tests, integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use crate::laboratory::Laboratory;
use crate::reaction::ReactionDef;

/// Install a `fmt` subscriber honouring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ===========================================================================
// Laboratory constructors
// ===========================================================================

/// `water` -> `steam`, one to one.
pub fn steam_lab() -> Laboratory {
    Laboratory::with_reactions(["water"], vec![ReactionDef::new("steam", [(1.0, "water")])])
        .expect("steam lab is valid")
}

/// `a` needs 2 `b`; `b` needs 3 `c`.
pub fn abc_lab() -> Laboratory {
    Laboratory::with_reactions(
        ["c"],
        vec![
            ReactionDef::new("a", [(2.0, "b")]),
            ReactionDef::new("b", [(3.0, "c")]),
        ],
    )
    .expect("abc lab is valid")
}

/// `a` and `b` each need the other plus one `water`.
pub fn cycle_lab() -> Laboratory {
    Laboratory::with_reactions(
        ["water"],
        vec![
            ReactionDef::new("a", [(1.0, "b"), (1.0, "water")]),
            ReactionDef::new("b", [(1.0, "a"), (1.0, "water")]),
        ],
    )
    .expect("cycle lab is valid")
}

/// Name of link `i` in [`chain_lab`]. Link 0 is the raw material.
pub fn chain_link(i: usize) -> String {
    format!("link_{i}")
}

/// A linear chain `link_depth <- ... <- link_1 <- link_0`, each step one to
/// one. Only `link_0` is a raw material.
pub fn chain_lab(depth: usize) -> Laboratory {
    let reactions = (1..=depth)
        .map(|i| ReactionDef::new(&chain_link(i), [(1.0, chain_link(i - 1))]))
        .collect();
    Laboratory::with_reactions([chain_link(0)], reactions).expect("chain lab is valid")
}

/// `product` needs one of each of `width` raw materials `raw_0..raw_{width-1}`.
pub fn fan_in_lab(width: usize) -> Laboratory {
    let raws: Vec<String> = (0..width).map(|i| format!("raw_{i}")).collect();
    let reaction = ReactionDef::new("product", raws.iter().map(|name| (1.0, name.clone())));
    Laboratory::with_reactions(&raws, vec![reaction]).expect("fan-in lab is valid")
}
