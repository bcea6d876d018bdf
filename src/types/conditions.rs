use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::associations::AssociationTree;
use super::value::Value;

/// Right-hand side of a condition entry: either a plain value or a nested
/// mapping describing conditions on an associated record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ConditionValue {
    Value(Value),
    Map(ConditionMap),
}

macro_rules! condition_value_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ConditionValue {
                fn from(v: $ty) -> Self {
                    ConditionValue::Value(v.into())
                }
            }
        )*
    };
}

condition_value_from!(Value, i64, f64, bool, &str, String);

impl<T: Into<Value>> From<Vec<T>> for ConditionValue {
    fn from(items: Vec<T>) -> Self {
        ConditionValue::Value(Value::from(items))
    }
}

impl From<ConditionMap> for ConditionValue {
    fn from(map: ConditionMap) -> Self {
        ConditionValue::Map(map)
    }
}

/// Attribute to value mapping.
///
/// Keys are kept sorted, so two maps built in a different insertion order
/// are the same condition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ConditionMap(BTreeMap<String, ConditionValue>);

impl ConditionMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. A later entry for the same attribute replaces the earlier one.
    #[must_use]
    pub fn with(mut self, attribute: &str, value: impl Into<ConditionValue>) -> Self {
        self.insert(attribute, value);
        self
    }

    pub fn insert(&mut self, attribute: &str, value: impl Into<ConditionValue>) {
        self.0.insert(attribute.to_owned(), value.into());
    }

    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&ConditionValue> {
        self.0.get(attribute)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConditionValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn has_nested(&self) -> bool {
        self.0.values().any(|v| matches!(v, ConditionValue::Map(_)))
    }

    fn associations(&self) -> AssociationTree {
        let mut tree = AssociationTree::new();
        for (key, value) in &self.0 {
            if let ConditionValue::Map(nested) = value {
                tree.insert(key, nested.associations());
            }
        }
        tree
    }
}

impl<K: Into<String>, V: Into<ConditionValue>> FromIterator<(K, V)> for ConditionMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Handle to a matcher defined outside this crate, such as a prebuilt
/// query scope.
///
/// The handle is never evaluated here. Two handles are equal only when they
/// point at the same allocation; cloning a handle keeps that identity.
#[derive(Clone)]
pub struct MatcherHandle(Arc<dyn Any + Send + Sync>);

impl MatcherHandle {
    pub fn new<T: Any + Send + Sync>(matcher: T) -> Self {
        Self(Arc::new(matcher))
    }

    #[must_use]
    pub fn from_arc(matcher: Arc<dyn Any + Send + Sync>) -> Self {
        Self(matcher)
    }

    /// Recover the concrete matcher. Intended for the evaluation layer that
    /// created the handle.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &MatcherHandle) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }

    fn addr(&self) -> usize {
        Arc::as_ptr(&self.0).cast::<()>() as usize
    }
}

impl PartialEq for MatcherHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for MatcherHandle {}

impl Hash for MatcherHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Debug for MatcherHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MatcherHandle({:#x})", self.addr())
    }
}

macro_rules! classified_map {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(ConditionMap);

        impl $name {
            #[must_use]
            pub fn into_inner(self) -> ConditionMap {
                self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = ConditionMap;

            fn deref(&self) -> &ConditionMap {
                &self.0
            }
        }
    };
}

classified_map!(
    /// A non-empty mapping with no nested entries. Only
    /// [`Conditions::from_map`] builds one.
    FlatMap
);

classified_map!(
    /// A mapping with at least one nested entry. Only
    /// [`Conditions::from_map`] builds one.
    NestedMap
);

/// Which instances of a subject a rule applies to.
///
/// Comparison never evaluates anything: maps and raw fragments compare
/// structurally, opaque matchers by handle identity.
///
/// Mapping variants only come out of [`Conditions::from_map`], so a map is
/// never filed under the wrong variant:
///
/// ```compile_fail
/// use lastmatch::{ConditionMap, Conditions};
///
/// let conditions = Conditions::Flat(ConditionMap::new());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case", from = "ConditionsRepr"))]
pub enum Conditions {
    /// Matches every instance.
    #[default]
    None,
    /// Attribute equality checks on the subject itself.
    Flat(FlatMap),
    /// At least one entry constrains an associated record.
    Nested(NestedMap),
    /// A raw query fragment with its bind values.
    Raw { fragment: String, binds: Vec<Value> },
    #[cfg_attr(feature = "serde", serde(skip))]
    Opaque(MatcherHandle),
}

impl Conditions {
    /// Classify a mapping. An empty mapping is [`Conditions::None`].
    #[must_use]
    pub fn from_map(map: ConditionMap) -> Self {
        if map.is_empty() {
            Conditions::None
        } else if map.has_nested() {
            Conditions::Nested(NestedMap(map))
        } else {
            Conditions::Flat(FlatMap(map))
        }
    }

    #[must_use]
    pub fn raw(fragment: &str, binds: Vec<Value>) -> Self {
        Conditions::Raw {
            fragment: fragment.to_owned(),
            binds,
        }
    }

    pub fn opaque<T: Any + Send + Sync>(matcher: T) -> Self {
        Conditions::Opaque(MatcherHandle::new(matcher))
    }

    /// `true` for the canonical always-matches value.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Conditions::None)
    }

    #[must_use]
    pub fn is_opaque(&self) -> bool {
        matches!(self, Conditions::Opaque(_))
    }

    /// The mapping behind `Flat` and `Nested` conditions.
    #[must_use]
    pub fn as_map(&self) -> Option<&ConditionMap> {
        match self {
            Conditions::Flat(map) => Some(&map.0),
            Conditions::Nested(map) => Some(&map.0),
            _ => None,
        }
    }

    /// Keys whose values are themselves mappings, recursively.
    ///
    /// Anything that is not a nested mapping yields an empty tree.
    #[must_use]
    pub fn associations(&self) -> AssociationTree {
        match self {
            Conditions::Nested(map) => map.associations(),
            Conditions::None
            | Conditions::Flat(_)
            | Conditions::Raw { .. }
            | Conditions::Opaque(_) => AssociationTree::new(),
        }
    }
}

impl From<ConditionMap> for Conditions {
    fn from(map: ConditionMap) -> Self {
        Conditions::from_map(map)
    }
}

impl From<MatcherHandle> for Conditions {
    fn from(handle: MatcherHandle) -> Self {
        Conditions::Opaque(handle)
    }
}

impl<T: Into<Conditions>> From<Option<T>> for Conditions {
    fn from(conditions: Option<T>) -> Self {
        conditions.map_or(Conditions::None, Into::into)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(rename_all = "snake_case")]
enum ConditionsRepr {
    None,
    Flat(ConditionMap),
    Nested(ConditionMap),
    Raw { fragment: String, binds: Vec<Value> },
}

#[cfg(feature = "serde")]
impl From<ConditionsRepr> for Conditions {
    fn from(repr: ConditionsRepr) -> Self {
        match repr {
            ConditionsRepr::None => Conditions::None,
            ConditionsRepr::Flat(map) | ConditionsRepr::Nested(map) => Conditions::from_map(map),
            ConditionsRepr::Raw { fragment, binds } => Conditions::Raw { fragment, binds },
        }
    }
}

/// Decides whether a rule's conditions hold for a concrete subject instance.
///
/// Implemented by the evaluation layer. Rule compression never calls it.
pub trait ConditionsMatcher<T: ?Sized> {
    fn matches(&self, conditions: &Conditions, instance: &T) -> bool;
}

impl<T: ?Sized, F> ConditionsMatcher<T> for F
where
    F: Fn(&Conditions, &T) -> bool,
{
    fn matches(&self, conditions: &Conditions, instance: &T) -> bool {
        self(conditions, instance)
    }
}
