//! Domain models - core garage types
//!
//! This module contains the canonical data types used throughout the system:
//! - `Floor` / `SlotId` - the fixed floor set and slot identities
//! - `ParkingSlot` - one parking space and its occupancy state
//! - `LicensePlate` - validated, normalized plate text
//! - `Fee` / `Tariff` - per-minute billing
//! - `Receipt` - record of a completed stay

pub mod fee;
pub mod plate;
pub mod receipt;
pub mod slot;
pub mod types;

// Re-export commonly used types at module level
pub use fee::{Fee, InvalidRate, Tariff};
pub use plate::{LicensePlate, PlateError};
pub use receipt::Receipt;
pub use slot::{ParkingSlot, SlotState};
pub use types::{Floor, SlotId, UnknownFloor, SLOTS_PER_FLOOR};
