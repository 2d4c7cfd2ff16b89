/// Identifies a substance in the registry. Cheap to copy and compare.
///
/// The same id indexes the substance's ledger entry and, for products, its
/// reaction in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubstanceId(pub u32);

impl SubstanceId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
