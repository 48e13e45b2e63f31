//! Dual-indexed booking store

use bookvault_common::*;

/// Fixed-capacity record store with a dense active list
///
/// `entries` is the map region: one slot per known identifier. Resolution
/// retires a record in place; the slot is only rewritten when the same
/// identifier is reserved again. `active` lists the slots of bookings that
/// currently hold custodied value, with no gaps; each active record carries
/// its own list position so removal is O(1).
pub struct BookingStore<const N: usize> {
    /// Map region: one record per known identifier
    pub entries: [Booking; N],
    /// Dense active list of slots
    pub active: [u32; N],
    /// Number of active bookings
    pub active_count: u32,
    /// Number of occupied slots (active or retired)
    pub entry_count: u32,
}

impl<const N: usize> BookingStore<N> {
    pub fn new() -> Self {
        Self {
            entries: [Booking::default(); N],
            active: [NO_SLOT; N],
            active_count: 0,
            entry_count: 0,
        }
    }

    /// Reset counts for in-place initialization of a zeroed account
    pub fn reset(&mut self) {
        self.active_count = 0;
        self.entry_count = 0;
    }

    /// Find the map slot holding an identifier
    pub fn find_slot(&self, id: &BookingId) -> Option<u32> {
        for i in 0..self.entry_count as usize {
            if &self.entries[i].id == id {
                return Some(i as u32);
            }
        }
        None
    }

    /// Insert a booking as active
    ///
    /// Reuses the identifier's retired slot when one exists, otherwise claims
    /// a fresh slot. Fails with `AlreadyActive` if the identifier currently
    /// occupies the active list, `StoreFull` at capacity.
    pub fn insert(&mut self, booking: Booking) -> Result<u32, BookingError> {
        let slot = match self.find_slot(&booking.id) {
            Some(slot) => {
                if self.entries[slot as usize].active {
                    return Err(BookingError::AlreadyActive);
                }
                slot
            }
            None => {
                if self.entry_count as usize >= N {
                    return Err(BookingError::StoreFull);
                }
                let slot = self.entry_count;
                self.entry_count += 1;
                slot
            }
        };

        let pos = self.active_count;
        self.active[pos as usize] = slot;
        self.active_count += 1;

        self.entries[slot as usize] = Booking {
            active_pos: pos,
            active: true,
            ..booking
        };

        Ok(slot)
    }

    /// Retire an active booking in O(1), preserving the no-gaps invariant
    ///
    /// Overwrites the removed booking's list position with the last slot,
    /// fixes the moved booking's back-pointer, shrinks the list, and clears
    /// the active flag. The overwrite is a no-op when the removed booking is
    /// itself the tail.
    pub fn remove_active(&mut self, slot: u32) {
        if slot as usize >= N || !self.entries[slot as usize].active {
            return;
        }

        let pos = self.entries[slot as usize].active_pos;
        let last_pos = self.active_count - 1;
        let last_slot = self.active[last_pos as usize];

        self.active[pos as usize] = last_slot;
        self.entries[last_slot as usize].active_pos = pos;

        self.active[last_pos as usize] = NO_SLOT;
        self.active_count = last_pos;
        self.entries[slot as usize].active = false;
    }

    /// Re-link a just-retired slot at the tail of the active list
    ///
    /// Restores the store side of an operation whose custody transfer was
    /// refused after the record had been deactivated.
    pub fn reactivate(&mut self, slot: u32) {
        if slot as usize >= N || self.entries[slot as usize].active {
            return;
        }

        let pos = self.active_count;
        self.active[pos as usize] = slot;
        self.active_count += 1;
        self.entries[slot as usize].active_pos = pos;
        self.entries[slot as usize].active = true;
    }

    /// Undo an insert whose enclosing operation failed downstream
    ///
    /// `prev` is the retired record the insert overwrote, if any; it is put
    /// back verbatim. A slot the insert had claimed fresh is released
    /// entirely so no ghost map entry remains.
    pub fn rollback_insert(&mut self, slot: u32, prev: Option<Booking>) {
        self.remove_active(slot);
        match prev {
            Some(record) => self.entries[slot as usize] = record,
            None => {
                if slot + 1 == self.entry_count {
                    self.entries[slot as usize] = Booking::default();
                    self.entry_count = slot;
                }
            }
        }
    }

    /// Look up a record by identifier (active or retired)
    pub fn get(&self, id: &BookingId) -> Option<&Booking> {
        self.find_slot(id).map(|slot| &self.entries[slot as usize])
    }

    /// Number of currently active bookings
    pub fn count(&self) -> u32 {
        self.active_count
    }

    /// Whether an identifier currently occupies the active list
    pub fn is_active(&self, id: &BookingId) -> bool {
        self.get(id).map(|b| b.active).unwrap_or(false)
    }
}
