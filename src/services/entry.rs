//! Park-in: validate a plate and occupy a slot
//!
//! Checks run in a fixed order and stop at the first failure:
//! empty input, plate format, duplicate vehicle. A target slot that does not
//! exist or is already occupied is a silent no-op (`Ok(None)`), not an error.

use crate::domain::plate::{LicensePlate, PlateError};
use crate::domain::types::SlotId;
use crate::services::garage::Garage;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info};

/// Rejected park-in. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParkInError {
    #[error("Please enter a license plate.")]
    EmptyInput,
    #[error("Invalid license plate. Expected two letters, a space and 1-6 digits (e.g. ZH 12345).")]
    InvalidFormat,
    #[error("Vehicle {0} is already parked.")]
    DuplicateVehicle(LicensePlate),
}

impl ParkInError {
    /// Short reason tag for logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            ParkInError::EmptyInput => "empty_input",
            ParkInError::InvalidFormat => "invalid_format",
            ParkInError::DuplicateVehicle(_) => "duplicate_vehicle",
        }
    }
}

impl From<PlateError> for ParkInError {
    fn from(e: PlateError) -> Self {
        match e {
            PlateError::Empty => ParkInError::EmptyInput,
            PlateError::InvalidFormat => ParkInError::InvalidFormat,
        }
    }
}

/// Successful park-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parked {
    pub slot: SlotId,
    pub plate: LicensePlate,
    pub entered_at: DateTime<Utc>,
}

impl Parked {
    /// Status line shown to the user
    pub fn summary(&self) -> String {
        format!("Vehicle {} parked on {}, slot {}.", self.plate, self.slot.floor, self.slot.number)
    }
}

/// Park the vehicle with `raw_plate` in `slot` at `now`
pub fn park_in(
    garage: &mut Garage,
    slot: SlotId,
    raw_plate: &str,
    now: DateTime<Utc>,
) -> Result<Option<Parked>, ParkInError> {
    let plate = LicensePlate::parse(raw_plate).map_err(ParkInError::from)?;

    if let Some(holder) = garage.find_plate(&plate) {
        debug!(plate = %plate, held_by = %holder.id(), "duplicate_plate");
        return Err(ParkInError::DuplicateVehicle(plate));
    }

    let Some(target) = garage.find_slot_mut(slot) else {
        debug!(slot = %slot, "park_in_unknown_slot");
        return Ok(None);
    };

    if !target.occupy(plate.clone(), now) {
        debug!(slot = %slot, "park_in_slot_occupied");
        return Ok(None);
    }

    info!(slot = %slot, plate = %plate, "slot_parked_in");
    Ok(Some(Parked { slot, plate, entered_at: now }))
}
