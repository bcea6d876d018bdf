use std::collections::BTreeMap;
use std::fmt;

/// Relations that must be joined to evaluate a rule's conditions.
///
/// Each key names an association; its subtree lists the associations
/// reached through it. Leaves are empty trees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct AssociationTree(BTreeMap<String, AssociationTree>);

impl AssociationTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an association. Used when building expected trees by hand.
    pub fn with(mut self, association: &str, subtree: AssociationTree) -> Self {
        self.insert(association, subtree);
        self
    }

    pub(crate) fn insert(&mut self, association: &str, subtree: AssociationTree) {
        self.0.insert(association.to_owned(), subtree);
    }

    #[must_use]
    pub fn get(&self, association: &str) -> Option<&AssociationTree> {
        self.0.get(association)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AssociationTree)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Every association path in the tree, depth first, as dotted names.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_paths("", &mut out);
        out
    }

    fn collect_paths(&self, prefix: &str, out: &mut Vec<String>) {
        for (name, subtree) in &self.0 {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}.{name}")
            };
            subtree.collect_paths(&path, out);
            out.push(path);
        }
    }
}

impl fmt::Display for AssociationTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, subtree)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {subtree}")?;
        }
        write!(f, "}}")
    }
}
