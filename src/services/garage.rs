//! Slot store - the single source of truth for slot occupancy
//!
//! The garage is created once with a fixed set of slots (6 per floor) and never
//! grows or shrinks; slots are only mutated in place by park-in / park-out.

use crate::domain::plate::LicensePlate;
use crate::domain::slot::ParkingSlot;
use crate::domain::types::{Floor, SlotId, SLOTS_PER_FLOOR};

/// All parking slots, ordered by floor then slot number
#[derive(Debug, Clone)]
pub struct Garage {
    slots: Vec<ParkingSlot>,
}

impl Default for Garage {
    fn default() -> Self {
        Self::initialize()
    }
}

impl Garage {
    /// Create every slot on every floor, all free
    pub fn initialize() -> Self {
        let slots = Floor::ALL
            .into_iter()
            .flat_map(|floor| {
                (1..=SLOTS_PER_FLOOR).map(move |number| ParkingSlot::new(SlotId::new(floor, number)))
            })
            .collect();
        Self { slots }
    }

    pub fn slots(&self) -> &[ParkingSlot] {
        &self.slots
    }

    /// Total number of slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn find_slot(&self, id: SlotId) -> Option<&ParkingSlot> {
        self.slots.iter().find(|s| s.id() == id)
    }

    pub(crate) fn find_slot_mut(&mut self, id: SlotId) -> Option<&mut ParkingSlot> {
        self.slots.iter_mut().find(|s| s.id() == id)
    }

    /// Slot currently holding this plate, if any
    pub fn find_plate(&self, plate: &LicensePlate) -> Option<&ParkingSlot> {
        self.slots.iter().find(|s| s.license_plate() == Some(plate))
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_occupied()).count()
    }

    /// Free slots on one floor
    pub fn free_count(&self, floor: Floor) -> usize {
        self.slots.iter().filter(|s| s.floor() == floor && !s.is_occupied()).count()
    }
}
