//! Ordered, duplicate-free set of CSS class names.

use serde::Serialize;

/// Accumulates class contributions in first-insertion order.
///
/// Order is kept so serialized markup is deterministic; duplicates are
/// dropped on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClassSet(Vec<String>);

impl ClassSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class. Returns `false` if it was already present.
    ///
    /// Whitespace-separated input adds each name individually.
    pub fn insert(&mut self, class: &str) -> bool {
        let mut added = false;
        for name in class.split_whitespace() {
            if !self.contains(name) {
                self.0.push(name.to_owned());
                added = true;
            }
        }
        added
    }

    /// Add a class only when `condition` holds.
    pub fn insert_if(&mut self, condition: bool, class: &str) -> bool {
        condition && self.insert(class)
    }

    /// Remove a class. Returns `false` if it was absent.
    pub fn remove(&mut self, class: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|c| c != class);
        before != self.0.len()
    }

    /// Add if absent, remove if present. Returns whether the class is now set.
    pub fn toggle(&mut self, class: &str) -> bool {
        if self.remove(class) {
            false
        } else {
            self.insert(class)
        }
    }

    /// Whether the class is present.
    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    /// Merge another set, keeping this set's order first.
    pub fn extend(&mut self, other: &ClassSet) {
        for class in &other.0 {
            self.insert(class);
        }
    }

    /// Iterate class names in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Space-joined value for a `class` attribute.
    pub fn to_attribute(&self) -> String {
        self.0.join(" ")
    }
}

impl<'a> FromIterator<&'a str> for ClassSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = ClassSet::new();
        for class in iter {
            set.insert(class);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_dedups_and_keeps_order() {
        let mut set = ClassSet::new();
        assert!(set.insert("btn"));
        assert!(set.insert("primary"));
        assert!(!set.insert("btn"));
        assert_eq!(set.to_attribute(), "btn primary");
    }

    #[test]
    fn insert_splits_whitespace() {
        let mut set = ClassSet::new();
        set.insert("a  b\tc");
        assert_eq!(set.len(), 3);
        assert!(set.contains("b"));
    }

    #[test]
    fn insert_if_false_is_noop() {
        let mut set = ClassSet::new();
        assert!(!set.insert_if(false, "dark"));
        assert!(set.is_empty());
        assert!(set.insert_if(true, "dark"));
    }

    #[test]
    fn remove_and_toggle() {
        let mut set: ClassSet = ["a", "b"].into_iter().collect();
        assert!(set.remove("a"));
        assert!(!set.remove("a"));
        assert!(set.toggle("a"));
        assert!(!set.toggle("a"));
        assert_eq!(set.to_attribute(), "b");
    }

    #[test]
    fn extend_merges_without_duplicates() {
        let mut base: ClassSet = ["x", "y"].into_iter().collect();
        let extra: ClassSet = ["y", "z"].into_iter().collect();
        base.extend(&extra);
        assert_eq!(base.iter().collect::<Vec<_>>(), vec!["x", "y", "z"]);
    }
}
