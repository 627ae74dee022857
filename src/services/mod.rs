//! Services - business logic and state management
//!
//! This module contains the core business logic services:
//! - `garage` - Slot store, the single source of truth for occupancy
//! - `floor_filter` - Visible slots for the selected floor
//! - `entry` - Park-in validation and transition
//! - `exit` - Park-out billing and transition
//! - `session` - Owned front-end state driving the above

pub mod entry;
pub mod exit;
pub mod floor_filter;
pub mod garage;
pub mod session;

// Re-export commonly used types
pub use entry::{ParkInError, Parked};
pub use garage::Garage;
pub use session::{GarageSession, SessionEvent};
