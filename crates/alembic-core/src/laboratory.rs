//! The [`Laboratory`] facade: registry, reaction graph and ledger behind a
//! name-based API.

use crate::error::LabError;
use crate::id::SubstanceId;
use crate::ledger::Ledger;
use crate::reaction::{IngredientLine, ReactionDef, ReactionGraph};
use crate::registry::SubstanceRegistry;
use crate::resolver::Resolver;
use crate::validate::validate_quantity;
use tracing::debug;

/// A bounded inventory of named substances plus the recipes that convert
/// them into one another.
///
/// The registry and reaction graph are fixed at construction; only
/// quantities change afterwards, through [`add`](Self::add) and
/// [`make`](Self::make).
#[derive(Debug, Clone)]
pub struct Laboratory {
    registry: SubstanceRegistry,
    reactions: ReactionGraph,
    ledger: Ledger,
}

impl Laboratory {
    /// A laboratory with no reactions.
    pub fn new<I, S>(substances: I) -> Result<Self, LabError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_reactions(substances, Vec::new())
    }

    /// A laboratory with the given reactions. Products that are not in
    /// `substances` become known substances with zero stock.
    pub fn with_reactions<I, S>(substances: I, reactions: Vec<ReactionDef>) -> Result<Self, LabError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = SubstanceRegistry::from_names(substances)?;
        let reactions = ReactionGraph::build(&mut registry, &reactions)?;
        let ledger = Ledger::zeroed(registry.len());
        debug!(
            substances = registry.len(),
            reactions = reactions.len(),
            "laboratory constructed"
        );
        Ok(Self {
            registry,
            reactions,
            ledger,
        })
    }

    pub fn builder() -> LaboratoryBuilder {
        LaboratoryBuilder::new()
    }

    /// Current quantity of `substance`.
    pub fn quantity(&self, substance: &str) -> Result<f64, LabError> {
        let id = self.registry.resolve(substance)?;
        Ok(self.ledger.get(id))
    }

    /// Increase the stock of `substance` by `quantity`.
    pub fn add(&mut self, substance: &str, quantity: f64) -> Result<(), LabError> {
        let id = self.registry.resolve(substance)?;
        validate_quantity(quantity)?;
        self.ledger.deposit(id, quantity);
        Ok(())
    }

    /// Produce up to `quantity` of `product`, replenishing scarce
    /// ingredients through their own recipes and consuming what is used.
    ///
    /// Returns the amount actually produced, between 0 and `quantity`.
    /// Raw materials and cyclic recipes yield 0. Replenishment runs on a
    /// heap-allocated work stack, so deep recipe chains do not overflow the
    /// call stack.
    pub fn make(&mut self, product: &str, quantity: f64) -> Result<f64, LabError> {
        let id = self.registry.resolve(product)?;
        validate_quantity(quantity)?;
        let produced = Resolver::new(&self.reactions, &mut self.ledger).make(id, quantity);
        debug!(product, requested = quantity, produced, "make");
        Ok(produced)
    }

    // -- Query API --

    /// Known substance names in registration order: the initial list, then
    /// products introduced by reactions.
    pub fn substances(&self) -> impl Iterator<Item = &str> {
        self.registry.iter().map(|(_, name)| name)
    }

    /// Every substance with its current quantity, in registration order.
    pub fn inventory(&self) -> impl Iterator<Item = (&str, f64)> {
        self.registry
            .iter()
            .map(|(id, name)| (name, self.ledger.get(id)))
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    pub fn is_product(&self, name: &str) -> bool {
        self.registry
            .id(name)
            .is_some_and(|id| self.reactions.has_reaction(id))
    }

    /// The recipe for `product` as `(amount, ingredient)` pairs, or `None`
    /// for a raw material.
    pub fn reaction(&self, product: &str) -> Result<Option<Vec<(f64, &str)>>, LabError> {
        let id = self.registry.resolve(product)?;
        Ok(self
            .reactions
            .get(id)
            .map(|reaction| reaction.lines.iter().map(|line| self.line(line)).collect()))
    }

    fn line(&self, line: &IngredientLine) -> (f64, &str) {
        (
            line.amount,
            self.registry.name(line.substance).unwrap_or_default(),
        )
    }

    pub fn substance_id(&self, name: &str) -> Option<SubstanceId> {
        self.registry.id(name)
    }

    pub fn substance_count(&self) -> usize {
        self.registry.len()
    }

    pub fn reaction_count(&self) -> usize {
        self.reactions.len()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Collects substances and reactions, then validates them all at once in
/// [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct LaboratoryBuilder {
    substances: Vec<String>,
    reactions: Vec<ReactionDef>,
}

impl LaboratoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn substance(mut self, name: &str) -> Self {
        self.substances.push(name.to_string());
        self
    }

    pub fn substances<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.substances.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn reaction<I, S>(mut self, product: &str, ingredients: I) -> Self
    where
        I: IntoIterator<Item = (f64, S)>,
        S: Into<String>,
    {
        self.reactions.push(ReactionDef::new(product, ingredients));
        self
    }

    pub fn reaction_def(mut self, def: ReactionDef) -> Self {
        self.reactions.push(def);
        self
    }

    /// Edit a reaction declared earlier on this builder.
    pub fn mutate_reaction<F>(&mut self, product: &str, f: F) -> Result<(), LabError>
    where
        F: FnOnce(&mut ReactionDef),
    {
        let def = self
            .reactions
            .iter_mut()
            .find(|def| def.product == product)
            .ok_or_else(|| LabError::UnknownProduct(product.to_string()))?;
        f(def);
        Ok(())
    }

    pub fn build(self) -> Result<Laboratory, LabError> {
        Laboratory::with_reactions(self.substances, self.reactions)
    }
}
