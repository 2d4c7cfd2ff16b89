use crate::id::SubstanceId;

/// Current quantity of every known substance, indexed by [`SubstanceId`].
///
/// Stored quantities are always finite and non-negative. Callers validate
/// amounts before reaching the ledger; the ledger itself only guards the
/// lower bound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    quantities: Vec<f64>,
}

impl Ledger {
    /// A ledger with `len` zeroed entries.
    pub fn zeroed(len: usize) -> Self {
        Self {
            quantities: vec![0.0; len],
        }
    }

    /// Quantity on hand. Unregistered ids read as zero.
    pub fn get(&self, id: SubstanceId) -> f64 {
        self.quantities.get(id.index()).copied().unwrap_or(0.0)
    }

    /// Add `quantity`, saturating at `f64::MAX`.
    pub fn deposit(&mut self, id: SubstanceId, quantity: f64) {
        if let Some(slot) = self.quantities.get_mut(id.index()) {
            *slot = (*slot + quantity).min(f64::MAX);
        }
    }

    /// Remove up to `quantity`, clamping at zero so rounding never leaves a
    /// negative balance.
    pub fn withdraw(&mut self, id: SubstanceId, quantity: f64) {
        if let Some(slot) = self.quantities.get_mut(id.index()) {
            *slot = (*slot - quantity).max(0.0);
        }
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.quantities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let ledger = Ledger::zeroed(3);
        assert_eq!(ledger.len(), 3);
        assert!(ledger.as_slice().iter().all(|&q| q == 0.0));
    }

    #[test]
    fn deposit_accumulates() {
        let mut ledger = Ledger::zeroed(1);
        ledger.deposit(SubstanceId(0), 1.5);
        ledger.deposit(SubstanceId(0), 0.5);
        assert_eq!(ledger.get(SubstanceId(0)), 2.0);
    }

    #[test]
    fn deposit_saturates() {
        let mut ledger = Ledger::zeroed(1);
        ledger.deposit(SubstanceId(0), f64::MAX);
        ledger.deposit(SubstanceId(0), f64::MAX);
        assert!(ledger.get(SubstanceId(0)).is_finite());
    }

    #[test]
    fn withdraw_clamps_at_zero() {
        let mut ledger = Ledger::zeroed(1);
        ledger.deposit(SubstanceId(0), 0.3);
        ledger.withdraw(SubstanceId(0), 0.1 + 0.2);
        assert_eq!(ledger.get(SubstanceId(0)), 0.0);
    }

    #[test]
    fn out_of_range_ids_are_ignored() {
        let mut ledger = Ledger::zeroed(1);
        ledger.deposit(SubstanceId(9), 4.0);
        ledger.withdraw(SubstanceId(9), 4.0);
        assert_eq!(ledger.get(SubstanceId(9)), 0.0);
        assert_eq!(ledger.as_slice(), &[0.0]);
    }
}
