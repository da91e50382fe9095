// glhandles/src/table.rs
//
//! Id-indexed tables of native objects.

use crate::error::Error;

use std::mem;

/// How an `ObjectTable` chooses the id for a new entry.
///
/// No policy ever hands out id 0, which GL reserves for "no object" (and, for framebuffers, the
/// default framebuffer).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AllocationPolicy {
    /// Reuse the most recently released id, falling back to a fresh id past the end.
    #[default]
    FreeList,
    /// Use the smallest empty id.
    LowestFree,
    /// Count upward and never reuse an id. Released slots stay empty forever.
    Monotonic,
}

/// Either form a caller may use to name an object in a table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ObjectRef<T> {
    /// An id the caller has already populated. It is used as-is, without validation.
    Id(i64),
    /// A native object that needs a fresh id.
    Native(T),
}

impl<T> ObjectRef<T> {
    /// Returns the table id this reference names, storing a native object in a new slot first.
    ///
    /// Fails with `invalid` if a numeric id doesn't fit the table's index range.
    pub(crate) fn resolve_in(self, table: &mut ObjectTable<T>, invalid: Error) -> Result<u32, Error> {
        match self {
            ObjectRef::Id(id) => u32::try_from(id).map_err(|_| invalid),
            ObjectRef::Native(object) => table.insert(object),
        }
    }
}

#[derive(Debug)]
enum Slot<T> {
    Empty,
    // Empty and queued on the free list.
    Free,
    // Handed out by `allocate()` but not yet filled in.
    Reserved,
    Occupied(T),
}

impl<T> Slot<T> {
    #[inline]
    fn is_empty(&self) -> bool {
        matches!(*self, Slot::Empty | Slot::Free)
    }
}

/// A growable table mapping small integer ids to native objects.
#[derive(Debug)]
pub struct ObjectTable<T> {
    // Indexed by id. Slot 0 is never allocated.
    slots: Vec<Slot<T>>,
    // Ids of `Slot::Free` slots, most recent last. Only `FreeList` queues ids.
    free: Vec<u32>,
    // The next id `Monotonic` hands out.
    next_id: u32,
    policy: AllocationPolicy,
    occupied: usize,
}

impl<T> Default for ObjectTable<T> {
    fn default() -> ObjectTable<T> {
        ObjectTable::new(AllocationPolicy::default())
    }
}

impl<T> ObjectTable<T> {
    /// The largest id a table holds. Tables are dense, so ids past this are refused rather than
    /// grown into.
    pub const MAX_ID: u32 = (1 << 24) - 1;

    pub fn new(policy: AllocationPolicy) -> ObjectTable<T> {
        ObjectTable {
            slots: vec![Slot::Empty],
            free: vec![],
            next_id: 1,
            policy,
            occupied: 0,
        }
    }

    #[inline]
    pub fn policy(&self) -> AllocationPolicy {
        self.policy
    }

    /// Reserves and returns the next free id according to the table's policy.
    ///
    /// The slot stays empty until `set()` fills it, but it won't be handed out again until it's
    /// cleared.
    ///
    /// Fails with `Error::TableFull` once every id up to `MAX_ID` is taken.
    pub fn allocate(&mut self) -> Result<u32, Error> {
        let id = match self.policy {
            AllocationPolicy::FreeList => match self.free.pop() {
                Some(id) => id,
                None => self.push_slot()?,
            },
            AllocationPolicy::LowestFree => match self.slots.iter().skip(1).position(Slot::is_empty)
            {
                Some(index) => index as u32 + 1,
                None => self.push_slot()?,
            },
            AllocationPolicy::Monotonic => {
                while self
                    .slots
                    .get(self.next_id as usize)
                    .map_or(false, |slot| !slot.is_empty())
                {
                    self.next_id += 1;
                }
                if self.next_id > Self::MAX_ID {
                    return Err(Error::TableFull);
                }
                let id = self.next_id;
                self.next_id += 1;
                self.grow_to(id);
                id
            }
        };
        self.slots[id as usize] = Slot::Reserved;
        Ok(id)
    }

    /// Allocates an id and stores `object` there.
    pub fn insert(&mut self, object: T) -> Result<u32, Error> {
        let id = self.allocate()?;
        self.set(id, object)?;
        Ok(id)
    }

    /// Stores `object` at `id`, growing the table as needed, and returns the previous occupant.
    ///
    /// Fails with `Error::IdOutOfRange` if `id` is past `MAX_ID`.
    pub fn set(&mut self, id: u32, object: T) -> Result<Option<T>, Error> {
        if id > Self::MAX_ID {
            return Err(Error::IdOutOfRange(id));
        }
        self.grow_to(id);
        let previous = mem::replace(&mut self.slots[id as usize], Slot::Occupied(object));
        Ok(match previous {
            Slot::Occupied(previous) => Some(previous),
            Slot::Free => {
                self.unqueue(id);
                self.occupied += 1;
                None
            }
            Slot::Empty | Slot::Reserved => {
                self.occupied += 1;
                None
            }
        })
    }

    /// Empties the slot at `id` and returns what it held.
    ///
    /// The id becomes eligible for reuse, except under `AllocationPolicy::Monotonic`. Id 0 is
    /// never queued for reuse.
    pub fn clear(&mut self, id: u32) -> Option<T> {
        let slot = self.slots.get_mut(id as usize)?;
        if slot.is_empty() {
            return None;
        }
        let object = match mem::replace(slot, Slot::Empty) {
            Slot::Occupied(object) => {
                self.occupied -= 1;
                Some(object)
            }
            _ => None,
        };
        self.push_free(id);
        object
    }

    #[inline]
    pub fn get(&self, id: u32) -> Option<&T> {
        match self.slots.get(id as usize) {
            Some(Slot::Occupied(ref object)) => Some(object),
            _ => None,
        }
    }

    #[inline]
    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.occupied
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Iterates over occupied slots in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| match *slot {
                Slot::Occupied(ref object) => Some((id as u32, object)),
                _ => None,
            })
    }

    #[cfg(test)]
    pub(crate) fn queued_len(&self) -> usize {
        self.free.len()
    }

    fn push_free(&mut self, id: u32) {
        if id != 0 && self.policy == AllocationPolicy::FreeList {
            self.slots[id as usize] = Slot::Free;
            self.free.push(id);
        }
    }

    // Drops a refilled id from the free list.
    fn unqueue(&mut self, id: u32) {
        if let Some(index) = self.free.iter().rposition(|&queued| queued == id) {
            self.free.remove(index);
        }
    }

    fn push_slot(&mut self) -> Result<u32, Error> {
        let id = self.slots.len() as u32;
        if id > Self::MAX_ID {
            return Err(Error::TableFull);
        }
        self.slots.push(Slot::Empty);
        Ok(id)
    }

    fn grow_to(&mut self, id: u32) {
        let len = id as usize + 1;
        if self.slots.len() < len {
            self.slots.resize_with(len, || Slot::Empty);
        }
    }
}
