//! Observable properties owned by a component.
//!
//! A [`Property`] is a shared cell. Writing a value that differs from the
//! stored one (under the property's [`Equality`]) stores it immediately and
//! queues the owning component for re-render. Equal writes do nothing.
//!
//! Properties are created through the owner's construction context
//! ([`Cx::property`](crate::component::Cx::property)), which fixes the owner.
//!
//! ```ignore
//! let label = tree.create(|cx| Label::new(cx, "a"));
//! let text = tree.widget::<Label>(label).unwrap().text().clone();
//! text.set("b".into());   // queues `label`
//! text.set("b".into());   // no-op
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use tracing::trace;

use super::scheduler::Scheduler;
use crate::tree::ComponentId;

// ---------------------------------------------------------------------------
// Equality
// ---------------------------------------------------------------------------

/// Decides whether a write is a change.
pub struct Equality<T: ?Sized>(fn(&T, &T) -> bool);

impl<T: ?Sized> Clone for Equality<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Equality<T> {}

impl<T: PartialEq + ?Sized> Equality<T> {
    /// Compare with `PartialEq`. The default.
    pub fn value() -> Self {
        Self(<T as PartialEq>::eq)
    }
}

impl<T: ?Sized> Equality<T> {
    /// Compare with a custom function.
    pub fn custom(eq: fn(&T, &T) -> bool) -> Self {
        Self(eq)
    }

    /// Treat every write as a change.
    pub fn never() -> Self {
        Self(|_, _| false)
    }

    /// Whether `a` and `b` are the same under this policy.
    pub fn same(&self, a: &T, b: &T) -> bool {
        (self.0)(a, b)
    }
}

impl<U: ?Sized> Equality<Rc<U>> {
    /// Compare shared handles by pointer identity.
    pub fn identity() -> Self {
        Self(Rc::ptr_eq)
    }
}

impl<U: ?Sized> Equality<Arc<U>> {
    /// Compare shared handles by pointer identity.
    pub fn arc_identity() -> Self {
        Self(Arc::ptr_eq)
    }
}

// ---------------------------------------------------------------------------
// Property
// ---------------------------------------------------------------------------

struct Inner<T> {
    value: RefCell<T>,
    owner: ComponentId,
    scheduler: Scheduler,
    equality: Equality<T>,
}

/// A value owned by one component. Cloning yields another handle to the same
/// cell.
pub struct Property<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("owner", &self.inner.owner)
            .field("value", &*self.inner.value.borrow())
            .finish()
    }
}

impl<T: 'static> Property<T> {
    pub(crate) fn new(
        owner: ComponentId,
        scheduler: Scheduler,
        value: T,
        equality: Equality<T>,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                owner,
                scheduler,
                equality,
            }),
        }
    }

    /// The component this property belongs to.
    pub fn owner(&self) -> ComponentId {
        self.inner.owner
    }

    /// Clone out the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner.value.borrow().clone()
    }

    /// Borrow the current value.
    ///
    /// Writing to the same property from inside `f` panics.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Store `value` if it differs from the current one and queue the owner.
    /// Returns whether a change happened.
    pub fn set(&self, value: T) -> bool {
        let unchanged = self
            .inner
            .equality
            .same(&self.inner.value.borrow(), &value);
        if unchanged {
            trace!(owner = ?self.inner.owner, "property write unchanged");
            return false;
        }
        *self.inner.value.borrow_mut() = value;
        self.inner.scheduler.mark_dirty(self.inner.owner);
        true
    }

    /// Mutate in place; queues the owner only if the result differs from the
    /// value before `f` ran.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool
    where
        T: Clone,
    {
        let changed = {
            let mut value = self.inner.value.borrow_mut();
            let before = value.clone();
            f(&mut value);
            !self.inner.equality.same(&before, &value)
        };
        if changed {
            self.inner.scheduler.mark_dirty(self.inner.owner);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn owner() -> ComponentId {
        let mut sm: SlotMap<ComponentId, ()> = SlotMap::with_key();
        sm.insert(())
    }

    fn prop<T: PartialEq + 'static>(value: T) -> (Property<T>, Scheduler) {
        let scheduler = Scheduler::new();
        let p = Property::new(owner(), scheduler.clone(), value, Equality::value());
        (p, scheduler)
    }

    #[test]
    fn read_after_write_is_immediate() {
        let (p, _s) = prop(1);
        p.set(2);
        assert_eq!(p.get(), 2);
    }

    #[test]
    fn changed_write_queues_owner() {
        let (p, s) = prop(String::from("a"));
        assert!(p.set("b".into()));
        assert!(s.is_dirty(p.owner()));
    }

    #[test]
    fn equal_write_is_noop() {
        let (p, s) = prop(5);
        assert!(!p.set(5));
        assert!(s.is_empty());
    }

    #[test]
    fn many_writes_queue_once() {
        let (p, s) = prop(0);
        for i in 1..=10 {
            p.set(i);
        }
        assert_eq!(s.pending(), 1);
        assert_eq!(p.get(), 10);
    }

    #[test]
    fn update_detects_no_change() {
        let (p, s) = prop(vec![1, 2]);
        assert!(!p.update(|v| v.sort()));
        assert!(s.is_empty());
        assert!(p.update(|v| v.push(3)));
        assert_eq!(p.with(Vec::len), 3);
        assert_eq!(s.pending(), 1);
    }

    #[test]
    fn identity_equality_compares_pointers() {
        let scheduler = Scheduler::new();
        let shared = Rc::new(String::from("x"));
        let p = Property::new(owner(), scheduler.clone(), shared.clone(), Equality::identity());
        assert!(!p.set(shared.clone()));
        // Equal content, different allocation: a change.
        assert!(p.set(Rc::new(String::from("x"))));
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn never_equality_always_notifies() {
        let scheduler = Scheduler::new();
        let p = Property::new(owner(), scheduler.clone(), 1, Equality::never());
        assert!(p.set(1));
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn custom_equality() {
        let scheduler = Scheduler::new();
        let eq: fn(&String, &String) -> bool = |a, b| a.eq_ignore_ascii_case(b);
        let p = Property::new(owner(), scheduler.clone(), "Hello".to_owned(), Equality::custom(eq));
        assert!(!p.set("HELLO".into()));
        assert_eq!(p.get(), "Hello");
        assert!(p.set("bye".into()));
    }

    #[test]
    fn clones_share_the_cell() {
        let (p, _s) = prop(1);
        let q = p.clone();
        q.set(9);
        assert_eq!(p.get(), 9);
    }

    #[test]
    fn debug_shows_value() {
        let (p, _s) = prop(42);
        assert!(format!("{p:?}").contains("42"));
    }
}
