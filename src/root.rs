//! Root bindings: which component owns which host container.

use crate::error::LifecycleError;
use crate::tree::{ComponentId, Tree};

/// A component mounted into a named host container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root {
    container: String,
    component: ComponentId,
}

impl Root {
    pub(crate) fn new(container: impl Into<String>, component: ComponentId) -> Self {
        Self {
            container: container.into(),
            component,
        }
    }

    /// Id of the container element this root renders into.
    pub fn container(&self) -> &str {
        &self.container
    }

    /// The top-level component.
    pub fn component(&self) -> ComponentId {
        self.component
    }
}

/// Check that `id` can become the top of a root: it must exist, be
/// unattached and have no parent.
pub(crate) fn check_mountable(tree: &Tree, id: ComponentId) -> Result<(), LifecycleError> {
    let state = tree
        .state(id)
        .ok_or(LifecycleError::UnknownComponent(id))?;
    if state.is_detached() {
        return Err(LifecycleError::Detached(id));
    }
    if let Some(parent) = tree.parent(id) {
        return Err(LifecycleError::AlreadyParented { child: id, parent });
    }
    if state.is_attached() {
        return Err(LifecycleError::AlreadyAttached(id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::Container;

    #[test]
    fn fresh_component_is_mountable() {
        let mut tree = Tree::new();
        let id = tree.insert(Container::new());
        assert_eq!(check_mountable(&tree, id), Ok(()));
    }

    #[test]
    fn children_cannot_be_roots() {
        let mut tree = Tree::new();
        let parent = tree.insert(Container::new());
        let child = tree.insert(Container::new());
        tree.append_child(parent, child).unwrap();
        assert_eq!(
            check_mountable(&tree, child),
            Err(LifecycleError::AlreadyParented { child, parent })
        );
    }

    #[test]
    fn attached_and_detached_are_rejected() {
        let mut tree = Tree::new();
        let a = tree.insert(Container::new());
        let b = tree.insert(Container::new());
        tree.attach(a);
        tree.detach(b).unwrap();
        assert_eq!(check_mountable(&tree, a), Err(LifecycleError::AlreadyAttached(a)));
        assert_eq!(check_mountable(&tree, b), Err(LifecycleError::Detached(b)));
    }

    #[test]
    fn root_accessors() {
        let mut tree = Tree::new();
        let id = tree.insert(Container::new());
        let root = Root::new("app", id);
        assert_eq!(root.container(), "app");
        assert_eq!(root.component(), id);
    }
}
