//! Session data store.

use crate::hash::InputIdentity;
use crate::key::Key;
use crate::{SessionError, SessionResult};
use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;
use std::any::TypeId;
use tracing::{debug, warn};
use wd_core::DatasetKind;

/// Memoization counters for one store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoStats {
    pub hits: u64,
    pub misses: u64,
}

/// Key/value state owned by a single session.
///
/// A missing key means "not yet loaded": `get` returns `None` and never
/// panics. Values are shared as `Rc` so page code can hold them while the
/// store keeps serving later reads. The store is not `Send`; each session
/// handles one interaction at a time.
#[derive(Default)]
pub struct SessionStore {
    entries: HashMap<&'static str, Rc<dyn Any>>,
    memo: HashMap<(DatasetKind, InputIdentity), Rc<dyn Any>>,
    stats: MemoStats,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<T: Any>(&self, key: &Key<T>) -> Option<Rc<T>> {
        self.entries.get(key.name()).cloned()?.downcast::<T>().ok()
    }

    /// Overwrites any previous value of the same type; last writer wins.
    /// A key keeps the type of its first write, so a value of another type is
    /// rejected and the previous value stays.
    pub fn put<T: Any>(&mut self, key: &Key<T>, value: impl Into<Rc<T>>) -> SessionResult<()> {
        self.check_type(key.name(), TypeId::of::<T>())?;
        let value: Rc<T> = value.into();
        self.entries.insert(key.name(), value);
        Ok(())
    }

    pub fn has<T: Any>(&self, key: &Key<T>) -> bool {
        self.entries
            .get(key.name())
            .is_some_and(|value| value.is::<T>())
    }

    /// Names of every key currently holding a value, sorted.
    pub fn keys(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Returns the value computed earlier for `(kind, identity)`, or runs
    /// `compute` once and remembers its result.
    ///
    /// A failing `compute` leaves nothing behind, so the next call with the
    /// same input runs it again.
    pub fn memoize<T, E>(
        &mut self,
        kind: DatasetKind,
        identity: &InputIdentity,
        compute: impl FnOnce() -> Result<T, E>,
    ) -> Result<Rc<T>, E>
    where
        T: Any,
    {
        let slot = (kind, identity.clone());
        if let Some(cached) = self.memo.get(&slot) {
            match cached.clone().downcast::<T>() {
                Ok(value) => {
                    self.stats.hits += 1;
                    debug!(%kind, identity = %identity, "Memo hit");
                    return Ok(value);
                }
                Err(_) => {
                    warn!(%kind, identity = %identity, "Memo entry has another type, recomputing");
                }
            }
        }

        self.stats.misses += 1;
        debug!(%kind, identity = %identity, "Memo miss");
        let value = Rc::new(compute()?);
        self.memo.insert(slot, value.clone());
        Ok(value)
    }

    pub fn memo_stats(&self) -> MemoStats {
        self.stats
    }

    /// Starts a batch of writes that become visible together on `commit`.
    pub fn stage(&mut self) -> StagedWrites<'_> {
        StagedWrites {
            store: self,
            writes: Vec::new(),
        }
    }

    fn check_type(&self, name: &'static str, ty: TypeId) -> SessionResult<()> {
        match self.entries.get(name) {
            Some(previous) if Any::type_id(&**previous) != ty => {
                warn!(key = name, "Store key written with a different type, rejected");
                Err(SessionError::KeyType { key: name })
            }
            _ => Ok(()),
        }
    }
}

/// Pending writes; dropping the batch without `commit` discards them.
#[must_use = "staged writes are discarded unless committed"]
pub struct StagedWrites<'s> {
    store: &'s mut SessionStore,
    writes: Vec<(&'static str, Rc<dyn Any>)>,
}

impl StagedWrites<'_> {
    pub fn put<T: Any>(mut self, key: &Key<T>, value: impl Into<Rc<T>>) -> Self {
        let value: Rc<T> = value.into();
        let value: Rc<dyn Any> = value;
        self.writes.push((key.name(), value));
        self
    }

    /// Applies every write, or none of them when any write would change the
    /// type of a key.
    pub fn commit(self) -> SessionResult<()> {
        for (i, &(name, ref value)) in self.writes.iter().enumerate() {
            let ty = Any::type_id(&**value);
            self.store.check_type(name, ty)?;
            if self.writes[..i]
                .iter()
                .any(|(earlier, v)| *earlier == name && Any::type_id(&**v) != ty)
            {
                return Err(SessionError::KeyType { key: name });
            }
        }
        let count = self.writes.len();
        for (name, value) in self.writes {
            self.store.entries.insert(name, value);
        }
        debug!(count, "Committed staged writes");
        Ok(())
    }
}
