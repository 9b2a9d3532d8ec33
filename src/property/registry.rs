use super::builtin::builtin_definitions;
use super::{MetadataOptions, OwnerKind, PropertyType, PropertyValue};
use crate::error::{LayoutError, LayoutResult};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId(pub(crate) u32);

impl PropertyId {
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Typed handle to a registered property.
pub struct Property<T> {
    id: PropertyId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Property<T> {
    pub(crate) const fn from_raw(id: PropertyId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    pub const fn id(&self) -> PropertyId {
        self.id
    }
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Property<T> {}

impl<T> PartialEq for Property<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Property<T> {}

impl<T> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match definition(self.id) {
            Some(def) => write!(f, "Property({}.{})", def.owner, def.name),
            None => write!(f, "Property(#{})", self.id.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDefinition {
    pub id: PropertyId,
    pub owner: OwnerKind,
    pub name: SmolStr,
    pub default: PropertyValue,
    pub options: MetadataOptions,
}

impl PropertyDefinition {
    pub(crate) fn new(
        id: PropertyId,
        owner: OwnerKind,
        name: SmolStr,
        default: PropertyValue,
        options: MetadataOptions,
    ) -> Self {
        Self {
            id,
            owner,
            name,
            default,
            options,
        }
    }

    pub fn inherits(&self) -> bool {
        self.options.inherits()
    }

    pub fn value_type(&self) -> &'static str {
        self.default.type_name()
    }
}

/// All registered property definitions, indexed by id and by
/// (owner kind, name).
#[derive(Debug, Default)]
pub struct PropertyRegistry {
    definitions: Vec<Arc<PropertyDefinition>>,
    by_key: FxHashMap<(OwnerKind, SmolStr), PropertyId>,
}

impl PropertyRegistry {
    fn with_builtins() -> Self {
        let mut registry = Self::default();
        for def in builtin_definitions() {
            debug_assert_eq!(def.id.0 as usize, registry.definitions.len());
            registry.by_key.insert((def.owner, def.name.clone()), def.id);
            registry.definitions.push(Arc::new(def));
        }
        registry
    }

    pub fn register_value(
        &mut self,
        owner: OwnerKind,
        name: SmolStr,
        default: PropertyValue,
        options: MetadataOptions,
    ) -> LayoutResult<PropertyId> {
        options.validate(owner, &name)?;
        let key = (owner, name);
        if self.by_key.contains_key(&key) {
            let (owner, name) = key;
            return Err(LayoutError::DuplicateRegistration { owner, name });
        }

        let id = PropertyId(self.definitions.len() as u32);
        let def = PropertyDefinition::new(id, key.0, key.1.clone(), default, options);
        tracing::debug!(
            owner = %def.owner,
            name = %def.name,
            value_type = def.value_type(),
            "registered property"
        );
        self.definitions.push(Arc::new(def));
        self.by_key.insert(key, id);
        Ok(id)
    }

    pub fn get(&self, id: PropertyId) -> Option<&Arc<PropertyDefinition>> {
        self.definitions.get(id.0 as usize)
    }

    pub fn lookup(&self, owner: OwnerKind, name: &str) -> Option<PropertyId> {
        self.by_key.get(&(owner, SmolStr::new(name))).copied()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

static REGISTRY: Lazy<RwLock<PropertyRegistry>> =
    Lazy::new(|| RwLock::new(PropertyRegistry::with_builtins()));

/// Registers a property in the process-wide registry.
///
/// Registering the same (owner, name) pair twice fails with
/// `DuplicateRegistration` and leaves the first definition in place.
pub fn register<T: PropertyType>(
    owner: OwnerKind,
    name: impl Into<SmolStr>,
    default: T,
    options: MetadataOptions,
) -> LayoutResult<Property<T>> {
    let mut registry = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    registry
        .register_value(owner, name.into(), default.into_value(), options)
        .map(Property::from_raw)
}

pub fn definition(id: PropertyId) -> Option<Arc<PropertyDefinition>> {
    let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    registry.get(id).cloned()
}

pub fn lookup(owner: OwnerKind, name: &str) -> Option<PropertyId> {
    let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    registry.lookup(owner, name)
}

pub fn registered_count() -> usize {
    REGISTRY.read().unwrap_or_else(PoisonError::into_inner).len()
}
