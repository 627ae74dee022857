//! Parking slot model
//!
//! A slot is either free or occupied by exactly one vehicle. The plate and the
//! entry time live inside the `Occupied` variant, so a slot can never be
//! occupied without both or free with either.

use crate::domain::plate::LicensePlate;
use crate::domain::types::{Floor, SlotId};
use chrono::{DateTime, Utc};

/// Occupancy state of a single slot
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SlotState {
    #[default]
    Free,
    Occupied { plate: LicensePlate, entered_at: DateTime<Utc> },
}

/// One parking space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkingSlot {
    id: SlotId,
    state: SlotState,
}

impl ParkingSlot {
    pub fn new(id: SlotId) -> Self {
        Self { id, state: SlotState::Free }
    }

    #[inline]
    pub fn id(&self) -> SlotId {
        self.id
    }

    #[inline]
    pub fn floor(&self) -> Floor {
        self.id.floor
    }

    #[inline]
    pub fn number(&self) -> u8 {
        self.id.number
    }

    #[inline]
    pub fn state(&self) -> &SlotState {
        &self.state
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        matches!(self.state, SlotState::Occupied { .. })
    }

    pub fn license_plate(&self) -> Option<&LicensePlate> {
        match &self.state {
            SlotState::Occupied { plate, .. } => Some(plate),
            SlotState::Free => None,
        }
    }

    pub fn entered_at(&self) -> Option<DateTime<Utc>> {
        match &self.state {
            SlotState::Occupied { entered_at, .. } => Some(*entered_at),
            SlotState::Free => None,
        }
    }

    /// Mark the slot occupied. Returns false (and leaves the slot untouched)
    /// if it already holds a vehicle.
    pub(crate) fn occupy(&mut self, plate: LicensePlate, entered_at: DateTime<Utc>) -> bool {
        if self.is_occupied() {
            return false;
        }
        self.state = SlotState::Occupied { plate, entered_at };
        true
    }

    /// Free the slot, handing back what was stored. None if it was already free.
    pub(crate) fn release(&mut self) -> Option<(LicensePlate, DateTime<Utc>)> {
        match std::mem::take(&mut self.state) {
            SlotState::Occupied { plate, entered_at } => Some((plate, entered_at)),
            SlotState::Free => None,
        }
    }
}
