//! Crafting resolution: produce as much of a product as current stock allows,
//! first topping up scarce ingredients through their own recipes.
//!
//! For each request the resolver:
//!
//! 1. Returns 0 if the product is already being resolved further up the
//!    chain (cycle guard) or has no recipe (raw material).
//! 2. Replenishes, in declaration order, every ingredient whose stock is
//!    below `amount * requested` and which has a recipe, by requesting the
//!    shortfall as a nested resolution.
//! 3. Recomputes the feasible amount from the stock left after
//!    replenishment, since nested scarcity may have capped it.
//! 4. Consumes ingredients for `min(requested, feasible)` units and adds
//!    them to the product.
//!
//! Nested resolutions run on an explicit work stack rather than the call
//! stack, so chain depth is limited by memory only.
//!
//! Scarcity is never an error; it shows up as a smaller return value.

use crate::id::SubstanceId;
use crate::ledger::Ledger;
use crate::reaction::{Reaction, ReactionGraph};
use std::collections::HashSet;
use tracing::trace;

/// One pending resolution: a reaction, the amount requested from it and the
/// next ingredient line to replenish.
struct Frame<'a> {
    reaction: &'a Reaction,
    quantity: f64,
    next_line: usize,
}

/// Per-call resolution state. Create one per top-level `make`.
pub struct Resolver<'a> {
    graph: &'a ReactionGraph,
    ledger: &'a mut Ledger,
    /// Products with a frame on the stack. An entry is inserted when its
    /// frame is pushed and removed when that frame is popped; frames leave
    /// the stack only through `finish`.
    in_progress: HashSet<SubstanceId>,
    stack: Vec<Frame<'a>>,
}

impl<'a> Resolver<'a> {
    pub fn new(graph: &'a ReactionGraph, ledger: &'a mut Ledger) -> Self {
        Self {
            graph,
            ledger,
            in_progress: HashSet::new(),
            stack: Vec::new(),
        }
    }

    /// Produce up to `quantity` of `product`. Returns the amount produced,
    /// in `[0, quantity]`.
    pub fn make(&mut self, product: SubstanceId, quantity: f64) -> f64 {
        let base = self.stack.len();
        if !self.push(product, quantity) {
            return 0.0;
        }

        loop {
            let Some(frame) = self.stack.last_mut() else {
                return 0.0;
            };
            let (reaction, quantity) = (frame.reaction, frame.quantity);

            if let Some(line) = reaction.lines.get(frame.next_line) {
                frame.next_line += 1;
                let required = line.amount * quantity;
                let available = self.ledger.get(line.substance);
                if available < required && self.graph.has_reaction(line.substance) {
                    let shortfall = (required - available).min(f64::MAX);
                    trace!(ingredient = ?line.substance, shortfall, "replenishing");
                    // The nested amount is read back from the ledger, not
                    // from a return value.
                    self.push(line.substance, shortfall);
                }
                continue;
            }

            let produced = self.finish();
            if self.stack.len() == base {
                return produced;
            }
        }
    }

    /// Start resolving `product`. Returns `false` (nothing pushed) for raw
    /// materials and for products already in progress.
    fn push(&mut self, product: SubstanceId, quantity: f64) -> bool {
        if self.in_progress.contains(&product) {
            trace!(?product, "cycle guard: product already in progress");
            return false;
        }
        let graph = self.graph;
        let Some(reaction) = graph.get(product) else {
            return false;
        };
        self.in_progress.insert(product);
        self.stack.push(Frame {
            reaction,
            quantity,
            next_line: 0,
        });
        true
    }

    /// Pop the top frame, whose ingredients have all been replenished, and
    /// apply its reaction.
    fn finish(&mut self) -> f64 {
        let Some(Frame {
            reaction, quantity, ..
        }) = self.stack.pop()
        else {
            return 0.0;
        };
        self.in_progress.remove(&reaction.product);
        self.react(reaction, quantity)
    }

    fn react(&mut self, reaction: &Reaction, quantity: f64) -> f64 {
        let feasible = self.feasible(reaction);
        let actual = quantity.min(feasible);
        trace!(product = ?reaction.product, quantity, feasible, actual, "reaction resolved");
        if actual.is_nan() || actual <= 0.0 {
            return 0.0;
        }

        for line in &reaction.lines {
            self.ledger.withdraw(line.substance, line.amount * actual);
        }
        self.ledger.deposit(reaction.product, actual);
        actual
    }

    /// Largest batch the current stock supports. Zero-amount lines and
    /// empty recipes impose no limit. Lines name distinct ingredients (the
    /// graph merges repeats), so each ratio bounds its own withdrawal.
    fn feasible(&self, reaction: &Reaction) -> f64 {
        reaction
            .lines
            .iter()
            .filter(|line| line.amount > 0.0)
            .map(|line| self.ledger.get(line.substance) / line.amount)
            .fold(f64::INFINITY, f64::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reaction::ReactionDef;
    use crate::registry::SubstanceRegistry;

    struct Fixture {
        registry: SubstanceRegistry,
        graph: ReactionGraph,
        ledger: Ledger,
    }

    impl Fixture {
        fn new(raw: &[&str], defs: &[ReactionDef]) -> Self {
            let mut registry = SubstanceRegistry::from_names(raw).unwrap();
            let graph = ReactionGraph::build(&mut registry, defs).unwrap();
            let ledger = Ledger::zeroed(registry.len());
            Self {
                registry,
                graph,
                ledger,
            }
        }

        fn id(&self, name: &str) -> SubstanceId {
            self.registry.id(name).unwrap()
        }

        fn stock(&mut self, name: &str, quantity: f64) {
            let id = self.id(name);
            self.ledger.deposit(id, quantity);
        }

        fn qty(&self, name: &str) -> f64 {
            self.ledger.get(self.id(name))
        }

        fn make(&mut self, name: &str, quantity: f64) -> f64 {
            let id = self.id(name);
            Resolver::new(&self.graph, &mut self.ledger).make(id, quantity)
        }
    }

    #[test]
    fn raw_material_cannot_be_made() {
        let mut f = Fixture::new(&["water"], &[]);
        f.stock("water", 5.0);
        assert_eq!(f.make("water", 1.0), 0.0);
        assert_eq!(f.qty("water"), 5.0);
    }

    #[test]
    fn single_step_consumes_ingredients() {
        let mut f = Fixture::new(&["water"], &[ReactionDef::new("steam", [(1.0, "water")])]);
        f.stock("water", 3.0);
        assert_eq!(f.make("steam", 2.0), 2.0);
        assert_eq!(f.qty("water"), 1.0);
        assert_eq!(f.qty("steam"), 2.0);
    }

    #[test]
    fn partial_fulfilment_under_scarcity() {
        let mut f = Fixture::new(&["water"], &[ReactionDef::new("steam", [(2.0, "water")])]);
        f.stock("water", 3.0);
        assert_eq!(f.make("steam", 5.0), 1.5);
        assert_eq!(f.qty("water"), 0.0);
        assert_eq!(f.qty("steam"), 1.5);
    }

    #[test]
    fn limiting_ingredient_caps_batch() {
        let mut f = Fixture::new(
            &["sodium", "chlorine"],
            &[ReactionDef::new("salt", [(1.0, "sodium"), (1.0, "chlorine")])],
        );
        f.stock("sodium", 4.0);
        f.stock("chlorine", 1.0);
        assert_eq!(f.make("salt", 3.0), 1.0);
        assert_eq!(f.qty("sodium"), 3.0);
        assert_eq!(f.qty("chlorine"), 0.0);
    }

    #[test]
    fn chained_replenishment() {
        let mut f = Fixture::new(
            &["c"],
            &[
                ReactionDef::new("a", [(2.0, "b")]),
                ReactionDef::new("b", [(3.0, "c")]),
            ],
        );
        f.stock("c", 9.0);
        assert_eq!(f.make("a", 1.0), 1.0);
        assert_eq!(f.qty("a"), 1.0);
        assert_eq!(f.qty("b"), 0.0);
        assert_eq!(f.qty("c"), 3.0);
    }

    #[test]
    fn existing_intermediate_stock_is_used_first() {
        let mut f = Fixture::new(
            &["c"],
            &[
                ReactionDef::new("a", [(2.0, "b")]),
                ReactionDef::new("b", [(3.0, "c")]),
            ],
        );
        f.stock("b", 1.0);
        f.stock("c", 9.0);
        assert_eq!(f.make("a", 1.0), 1.0);
        assert_eq!(f.qty("b"), 0.0);
        assert_eq!(f.qty("c"), 6.0);
    }

    #[test]
    fn two_cycle_yields_nothing() {
        let mut f = Fixture::new(
            &["water"],
            &[
                ReactionDef::new("a", [(1.0, "b"), (1.0, "water")]),
                ReactionDef::new("b", [(1.0, "a"), (1.0, "water")]),
            ],
        );
        f.stock("water", 10.0);
        let before = f.ledger.clone();
        assert_eq!(f.make("a", 1.0), 0.0);
        assert_eq!(f.ledger, before);
    }

    #[test]
    fn self_referencing_recipe_terminates() {
        let mut f = Fixture::new(&["seed"], &[ReactionDef::new("seed", [(1.0, "seed")])]);
        f.stock("seed", 2.0);
        assert_eq!(f.make("seed", 5.0), 2.0);
        assert_eq!(f.qty("seed"), 2.0);
    }

    #[test]
    fn empty_recipe_is_unbounded() {
        let mut f = Fixture::new(&["water"], &[ReactionDef::new("light", Vec::<(f64, &str)>::new())]);
        assert_eq!(f.make("light", 7.5), 7.5);
        assert_eq!(f.qty("light"), 7.5);
    }

    #[test]
    fn zero_amount_line_is_a_catalyst() {
        let mut f = Fixture::new(
            &["water", "platinum"],
            &[ReactionDef::new("steam", [(1.0, "water"), (0.0, "platinum")])],
        );
        f.stock("water", 2.0);
        assert_eq!(f.make("steam", 2.0), 2.0);
        assert_eq!(f.qty("platinum"), 0.0);
    }

    #[test]
    fn zero_request_changes_nothing() {
        let mut f = Fixture::new(&["water"], &[ReactionDef::new("steam", [(1.0, "water")])]);
        f.stock("water", 2.0);
        assert_eq!(f.make("steam", 0.0), 0.0);
        assert_eq!(f.qty("water"), 2.0);
        assert_eq!(f.qty("steam"), 0.0);
    }

    #[test]
    fn in_progress_set_is_cleared_between_siblings() {
        // "mix" needs "b" twice via two paths; the guard must not block the
        // second, independent replenishment of "b".
        let mut f = Fixture::new(
            &["c"],
            &[
                ReactionDef::new("mix", [(1.0, "left"), (1.0, "right")]),
                ReactionDef::new("left", [(1.0, "b")]),
                ReactionDef::new("right", [(1.0, "b")]),
                ReactionDef::new("b", [(1.0, "c")]),
            ],
        );
        f.stock("c", 2.0);
        assert_eq!(f.make("mix", 1.0), 1.0);
        assert_eq!(f.qty("c"), 0.0);
        assert_eq!(f.qty("mix"), 1.0);
    }

    #[test]
    fn repeated_ingredient_lines_are_charged_together() {
        let mut f = Fixture::new(
            &["water"],
            &[ReactionDef::new("steam", [(1.0, "water"), (1.0, "water")])],
        );
        f.stock("water", 2.0);
        assert_eq!(f.make("steam", 2.0), 1.0);
        assert_eq!(f.qty("water"), 0.0);
        assert_eq!(f.qty("steam"), 1.0);
    }

    #[test]
    fn resolver_state_is_empty_after_every_call() {
        let mut f = Fixture::new(
            &["water"],
            &[
                ReactionDef::new("a", [(1.0, "b"), (1.0, "water")]),
                ReactionDef::new("b", [(1.0, "a"), (1.0, "water")]),
                ReactionDef::new("steam", [(1.0, "water")]),
            ],
        );
        f.stock("water", 3.0);
        let mut resolver = Resolver::new(&f.graph, &mut f.ledger);
        let a = f.registry.id("a").unwrap();
        let steam = f.registry.id("steam").unwrap();

        assert_eq!(resolver.make(a, 1.0), 0.0);
        assert!(resolver.in_progress.is_empty());
        assert!(resolver.stack.is_empty());

        // The same resolver keeps working once a cycle has been cut.
        assert_eq!(resolver.make(a, 1.0), 0.0);
        assert_eq!(resolver.make(steam, 2.0), 2.0);
        assert!(resolver.in_progress.is_empty());
        assert!(resolver.stack.is_empty());
    }

    #[test]
    fn very_deep_chain_does_not_grow_the_call_stack() {
        let depth = 50_000;
        let handle = std::thread::Builder::new()
            .stack_size(256 * 1024)
            .spawn(move || {
                let link = |i: usize| format!("link_{i}");
                let defs: Vec<ReactionDef> = (1..=depth)
                    .map(|i| ReactionDef::new(&link(i), [(1.0, link(i - 1))]))
                    .collect();
                let mut f = Fixture::new(&["link_0"], &defs);
                f.stock("link_0", 4.0);
                let produced = f.make(&link(depth), 3.0);
                (produced, f.qty("link_0"), f.qty(&link(depth)))
            })
            .unwrap();
        assert_eq!(handle.join().unwrap(), (3.0, 1.0, 3.0));
    }
}
