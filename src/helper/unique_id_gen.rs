use std::{collections::BTreeSet, fmt, marker::PhantomData};
use thiserror::Error;

pub type UniqueId = u32;

/// Implemented by id newtypes handed out by [`UniqueIdGen`].
pub trait UniqueIdType: Copy + Ord + From<UniqueId> + fmt::Display {
    fn raw_id(&self) -> UniqueId;
}

/// Hands out ids starting at 1, preferring to recycle ids returned via [`UniqueIdGen::recycle_id`].
#[derive(Debug, Clone)]
pub struct UniqueIdGen<T: UniqueIdType> {
    counter: UniqueId,
    recycled_ids: BTreeSet<UniqueId>,
    id_type: PhantomData<T>,
}

impl<T: UniqueIdType> UniqueIdGen<T> {
    pub const fn new() -> Self {
        Self {
            counter: 1,
            recycled_ids: BTreeSet::new(),
            id_type: PhantomData,
        }
    }

    pub fn new_id(&mut self) -> Result<T, UniqueIdError> {
        // prefer recycling ids
        if let Some(new_id) = self.recycled_ids.pop_first() {
            return Ok(new_id.into());
        }

        if self.counter == UniqueId::MAX {
            return Err(UniqueIdError::MaxReached);
        }
        let new_id = self.counter;
        self.counter += 1;
        Ok(new_id.into())
    }

    pub fn recycle_id(&mut self, old_id: T) -> Result<(), UniqueIdError> {
        let raw_id = old_id.raw_id();
        if raw_id == 0 || raw_id >= self.counter {
            return Err(UniqueIdError::NeverIssued(raw_id));
        }
        if self.recycled_ids.insert(raw_id) {
            Ok(())
        } else {
            Err(UniqueIdError::RecycledIdExists(raw_id))
        }
    }
}

impl<T: UniqueIdType> Default for UniqueIdGen<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UniqueIdError {
    #[error("maximum id value reached in unique id generator")]
    MaxReached,
    #[error("recycled id {0} could not be inserted into recycled_ids collection because it already exists there")]
    RecycledIdExists(UniqueId),
    #[error("id {0} was never issued by this generator")]
    NeverIssued(UniqueId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
    struct TestId(UniqueId);

    impl UniqueIdType for TestId {
        fn raw_id(&self) -> UniqueId {
            self.0
        }
    }
    impl From<UniqueId> for TestId {
        fn from(id: UniqueId) -> Self {
            Self(id)
        }
    }
    impl fmt::Display for TestId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    #[test]
    fn ids_start_at_one_and_recycle_lowest_first() {
        let mut id_gen = UniqueIdGen::<TestId>::new();
        let a = id_gen.new_id().unwrap();
        let b = id_gen.new_id().unwrap();
        let c = id_gen.new_id().unwrap();
        assert_eq!((a.0, b.0, c.0), (1, 2, 3));

        id_gen.recycle_id(c).unwrap();
        id_gen.recycle_id(a).unwrap();
        assert_eq!(id_gen.new_id().unwrap(), a);
        assert_eq!(id_gen.new_id().unwrap(), c);
        assert_eq!(id_gen.new_id().unwrap().0, 4);
    }

    #[test]
    fn recycling_twice_or_unissued_fails() {
        let mut id_gen = UniqueIdGen::<TestId>::new();
        let a = id_gen.new_id().unwrap();
        id_gen.recycle_id(a).unwrap();
        assert_eq!(id_gen.recycle_id(a), Err(UniqueIdError::RecycledIdExists(1)));
        assert_eq!(
            id_gen.recycle_id(TestId(7)),
            Err(UniqueIdError::NeverIssued(7))
        );
    }
}
