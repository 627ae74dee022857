//! Visible-slot derivation for the selected floor

use crate::domain::slot::ParkingSlot;
use crate::domain::types::Floor;
use crate::services::garage::Garage;

/// Slots on `floor`, in store order (slot 1..6)
pub fn visible_slots(garage: &Garage, floor: Floor) -> Vec<ParkingSlot> {
    garage.slots().iter().filter(|s| s.floor() == floor).cloned().collect()
}
