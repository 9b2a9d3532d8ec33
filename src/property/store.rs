use super::{PropertyId, PropertyValue};
use rustc_hash::FxHashMap;

/// Locally set values of one element. Unset properties resolve through
/// inheritance or the registered default.
#[derive(Debug, Clone, Default)]
pub struct PropertyStore {
    values: FxHashMap<PropertyId, PropertyValue>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: PropertyId) -> Option<&PropertyValue> {
        self.values.get(&id)
    }

    pub fn contains(&self, id: PropertyId) -> bool {
        self.values.contains_key(&id)
    }

    pub fn set(&mut self, id: PropertyId, value: PropertyValue) -> Option<PropertyValue> {
        self.values.insert(id, value)
    }

    pub fn remove(&mut self, id: PropertyId) -> Option<PropertyValue> {
        self.values.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PropertyId, &PropertyValue)> {
        self.values.iter().map(|(id, value)| (*id, value))
    }
}
