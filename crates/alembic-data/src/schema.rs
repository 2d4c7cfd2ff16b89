use alembic_core::{LabError, Laboratory, ReactionDef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// On-disk description of a laboratory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabDefinition {
    /// Raw substances, in order. Must be non-empty and free of repeats.
    pub substances: Vec<String>,
    #[serde(default)]
    pub reactions: Vec<ReactionDef>,
    /// Starting quantities, applied with `add` after construction.
    #[serde(default)]
    pub stock: BTreeMap<String, f64>,
}

impl LabDefinition {
    /// Construct the laboratory and apply the starting stock.
    ///
    /// Stock entries may name reaction products as well as raw substances.
    pub fn build(&self) -> Result<Laboratory, LabError> {
        let mut lab = Laboratory::with_reactions(&self.substances, self.reactions.clone())?;
        for (name, &quantity) in &self.stock {
            lab.add(name, quantity)?;
        }
        Ok(lab)
    }
}
