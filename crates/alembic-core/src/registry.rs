use crate::error::{LabError, NameRole};
use crate::id::SubstanceId;
use crate::validate::validate_name;
use std::collections::HashMap;

/// The set of known substance names, in registration order.
///
/// Raw materials are registered from the initial list; reaction products
/// are appended while the reaction graph is validated.
#[derive(Debug, Clone, Default)]
pub struct SubstanceRegistry {
    names: Vec<String>,
    name_to_id: HashMap<String, SubstanceId>,
}

impl SubstanceRegistry {
    /// Register the initial substance list.
    ///
    /// Fails on an empty list, on any invalid name and on repeats.
    pub fn from_names<I, S>(names: I) -> Result<Self, LabError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::default();
        for name in names {
            let name = name.as_ref();
            validate_name(name, NameRole::Substance)?;
            if registry.name_to_id.contains_key(name) {
                return Err(LabError::DuplicateSubstance(name.to_string()));
            }
            registry.push(name);
        }
        if registry.is_empty() {
            return Err(LabError::NoSubstancesProvided);
        }
        Ok(registry)
    }

    /// Return the id for `name`, registering it if it is new.
    /// The second element is `true` when the name was newly added.
    pub fn get_or_register(&mut self, name: &str) -> (SubstanceId, bool) {
        match self.name_to_id.get(name) {
            Some(&id) => (id, false),
            None => (self.push(name), true),
        }
    }

    fn push(&mut self, name: &str) -> SubstanceId {
        let id = SubstanceId(self.names.len() as u32);
        self.names.push(name.to_string());
        self.name_to_id.insert(name.to_string(), id);
        id
    }

    pub fn id(&self, name: &str) -> Option<SubstanceId> {
        self.name_to_id.get(name).copied()
    }

    pub fn name(&self, id: SubstanceId) -> Option<&str> {
        self.names.get(id.index()).map(String::as_str)
    }

    /// Validate `name` and resolve it to a known substance.
    pub fn resolve(&self, name: &str) -> Result<SubstanceId, LabError> {
        validate_name(name, NameRole::Substance)?;
        self.id(name)
            .ok_or_else(|| LabError::UnknownSubstance(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.name_to_id.contains_key(name)
    }

    /// Names paired with their ids, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (SubstanceId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (SubstanceId(i as u32), name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
