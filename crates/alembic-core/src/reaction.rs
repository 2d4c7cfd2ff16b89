//! Reaction definitions and the validated reaction graph.
//!
//! A [`ReactionDef`] is the unvalidated, name-based form accepted by
//! constructors and data files. [`ReactionGraph::build`] checks it in two
//! passes and resolves every name to a [`SubstanceId`]:
//!
//! 1. Every product name is validated and registered (if new).
//! 2. Every ingredient line is checked: amount, name, then existence.
//!    Lines naming the same ingredient are merged into one.
//!
//! Because all products are registered before any ingredient is resolved, a
//! recipe may reference a product declared later in the same input.

use crate::error::{LabError, NameRole};
use crate::id::SubstanceId;
use crate::registry::SubstanceRegistry;
use crate::validate::{validate_name, validate_quantity};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// ---------------------------------------------------------------------------
// Definitions (name-based input)
// ---------------------------------------------------------------------------

/// One `(amount, substance)` line of a recipe, by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientDef {
    pub amount: f64,
    pub substance: String,
}

/// A recipe for `product`, by name. One unit of product consumes `amount`
/// of each listed ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionDef {
    pub product: String,
    #[serde(default)]
    pub ingredients: Vec<IngredientDef>,
}

impl ReactionDef {
    pub fn new<I, S>(product: &str, ingredients: I) -> Self
    where
        I: IntoIterator<Item = (f64, S)>,
        S: Into<String>,
    {
        Self {
            product: product.to_string(),
            ingredients: ingredients
                .into_iter()
                .map(|(amount, substance)| IngredientDef {
                    amount,
                    substance: substance.into(),
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validated graph
// ---------------------------------------------------------------------------

/// A resolved recipe line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IngredientLine {
    pub amount: f64,
    pub substance: SubstanceId,
}

/// A resolved recipe. Lines keep their declaration order and name distinct
/// ingredients.
#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    pub product: SubstanceId,
    pub lines: Vec<IngredientLine>,
}

/// Product -> recipe. Fixed after construction; may contain cycles.
#[derive(Debug, Clone, Default)]
pub struct ReactionGraph {
    reactions: HashMap<SubstanceId, Reaction>,
    /// Products in declaration order.
    order: Vec<SubstanceId>,
}

impl ReactionGraph {
    /// Validate `defs` against `registry`, registering new products into it.
    pub fn build(registry: &mut SubstanceRegistry, defs: &[ReactionDef]) -> Result<Self, LabError> {
        // Pass 1: products.
        let mut order = Vec::with_capacity(defs.len());
        let mut declared = HashSet::with_capacity(defs.len());
        for def in defs {
            validate_name(&def.product, NameRole::Product)?;
            let (id, _) = registry.get_or_register(&def.product);
            if !declared.insert(id) {
                return Err(LabError::DuplicateReaction(def.product.clone()));
            }
            order.push(id);
        }

        // Pass 2: ingredient lines, now that every product is known.
        let mut reactions = HashMap::with_capacity(defs.len());
        for (def, &product) in defs.iter().zip(&order) {
            let mut lines: Vec<IngredientLine> = Vec::with_capacity(def.ingredients.len());
            for ingredient in &def.ingredients {
                validate_quantity(ingredient.amount)?;
                validate_name(&ingredient.substance, NameRole::Ingredient)?;
                let substance = registry
                    .id(&ingredient.substance)
                    .ok_or_else(|| LabError::UnknownIngredient(ingredient.substance.clone()))?;
                // A repeated ingredient becomes one line with the summed
                // amount, at the position of its first occurrence.
                match lines.iter_mut().find(|line| line.substance == substance) {
                    Some(line) => line.amount = (line.amount + ingredient.amount).min(f64::MAX),
                    None => lines.push(IngredientLine {
                        amount: ingredient.amount,
                        substance,
                    }),
                }
            }
            reactions.insert(product, Reaction { product, lines });
        }

        Ok(Self { reactions, order })
    }

    pub fn get(&self, product: SubstanceId) -> Option<&Reaction> {
        self.reactions.get(&product)
    }

    pub fn has_reaction(&self, product: SubstanceId) -> bool {
        self.reactions.contains_key(&product)
    }

    /// Reactions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Reaction> {
        self.order.iter().filter_map(|id| self.reactions.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
