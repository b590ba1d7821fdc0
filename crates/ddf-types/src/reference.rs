use std::fmt;
use std::marker::PhantomData;

use serde::{Serialize, Serializer};

/// Index of an entry inside its kind's container.
///
/// Handles are only handed out by the container that owns the entry and stay
/// valid until that container is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Handle(u32);

impl Handle {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A deferred reference from one entry to an entry of kind `T`.
///
/// Parsing stores only the name. The link phase binds the name to a
/// [`Handle`]; before that `handle()` is always `None`.
pub struct Ref<T> {
    name: Option<String>,
    handle: Option<Handle>,
    _kind: PhantomData<fn() -> T>,
}

impl<T> Ref<T> {
    pub fn named(name: &str) -> Self {
        let mut r = Self::default();
        r.set_name(name);
        r
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Replace the stored name. Any previous binding is dropped.
    pub fn set_name(&mut self, name: &str) {
        let name = name.trim();
        self.name = (!name.is_empty()).then(|| name.to_string());
        self.handle = None;
    }

    pub fn clear(&mut self) {
        self.name = None;
        self.handle = None;
    }

    pub fn is_set(&self) -> bool {
        self.name.is_some()
    }

    pub fn handle(&self) -> Option<Handle> {
        self.handle
    }

    pub fn is_bound(&self) -> bool {
        self.handle.is_some()
    }

    pub fn bind(&mut self, handle: Handle) {
        self.handle = Some(handle);
    }

    pub fn unbind(&mut self) {
        self.handle = None;
    }
}

impl<T> Default for Ref<T> {
    fn default() -> Self {
        Self {
            name: None,
            handle: None,
            _kind: PhantomData,
        }
    }
}

impl<T> Clone for Ref<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            handle: self.handle,
            _kind: PhantomData,
        }
    }
}

impl<T> PartialEq for Ref<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.handle == other.handle
    }
}

impl<T> fmt::Debug for Ref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, self.handle) {
            (None, _) => write!(f, "Ref(-)"),
            (Some(name), None) => write!(f, "Ref({name:?})"),
            (Some(name), Some(h)) => write!(f, "Ref({name:?} -> {h})"),
        }
    }
}

impl<T> Serialize for Ref<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.name.serialize(serializer)
    }
}
