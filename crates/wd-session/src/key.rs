//! Typed store keys.

use std::fmt;
use std::marker::PhantomData;

/// A store key that carries the type of the value stored under it.
///
/// Keys are declared once as constants, so every reader and writer of a
/// name agrees on its type:
///
/// ```
/// use wd_session::Key;
///
/// const WELL_COUNT: Key<usize> = Key::new("wells.count");
/// assert_eq!(WELL_COUNT.name(), "wells.count");
/// ```
pub struct Key<T> {
    name: &'static str,
    _type: PhantomData<fn() -> T>,
}

impl<T> Key<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _type: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for Key<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Key<T> {}

impl<T> fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.name)
    }
}
