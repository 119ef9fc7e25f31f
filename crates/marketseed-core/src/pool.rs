use std::fmt;
use std::marker::PhantomData;

use rand::Rng;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::table::Row;

/// IDs generated for one table, used as foreign-key candidates by its children.
///
/// The type parameter ties a pool to the row type that produced it, so a pool
/// of user IDs cannot be handed to a routine expecting job IDs. Pools are
/// append-only while their table is generated and read-only afterwards.
pub struct IdPool<T> {
    ids: Vec<Uuid>,
    _row: PhantomData<fn() -> T>,
}

impl<T> IdPool<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
            _row: PhantomData,
        }
    }

    pub fn push(&mut self, id: Uuid) {
        self.ids.push(id);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn as_slice(&self) -> &[Uuid] {
        &self.ids
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Uuid> {
        self.ids.iter()
    }

    /// Uniformly pick one ID, or `None` when the pool is empty.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Uuid> {
        if self.ids.is_empty() {
            return None;
        }
        Some(self.ids[rng.random_range(0..self.ids.len())])
    }
}

impl<T: Row> IdPool<T> {
    /// Uniformly pick one ID, failing with the owning table name when empty.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Uuid> {
        self.choose(rng).ok_or(Error::EmptyPool(T::TABLE.name))
    }
}

impl<T> Default for IdPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for IdPool<T> {
    fn clone(&self) -> Self {
        Self {
            ids: self.ids.clone(),
            _row: PhantomData,
        }
    }
}

impl<T> fmt::Debug for IdPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdPool").field("len", &self.ids.len()).finish()
    }
}

impl<T> FromIterator<Uuid> for IdPool<T> {
    fn from_iter<I: IntoIterator<Item = Uuid>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
            _row: PhantomData,
        }
    }
}

impl<'a, T> IntoIterator for &'a IdPool<T> {
    type Item = &'a Uuid;
    type IntoIter = std::slice::Iter<'a, Uuid>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}
