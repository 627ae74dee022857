//! Per-slot display values derived from the slot state

use crate::domain::fee::Tariff;
use crate::domain::slot::ParkingSlot;
use chrono::{DateTime, Local, Utc};
use ratatui::style::Color;

pub const FREE_TEXT: &str = "FREE";
pub const FREE_COLOR: Color = Color::Green;
pub const OCCUPIED_COLOR: Color = Color::Red;

/// What the slot table shows for one slot
#[derive(Debug, Clone, PartialEq)]
pub struct SlotView {
    pub number: u8,
    pub is_free: bool,
    pub color: Color,
    /// Plate, or "FREE"
    pub info: String,
    /// Local entry time, empty when free
    pub since: String,
    /// Fee if the vehicle left now, empty when free
    pub running_fee: String,
}

impl SlotView {
    pub fn new(slot: &ParkingSlot, tariff: &Tariff, now: DateTime<Utc>) -> Self {
        match (slot.license_plate(), slot.entered_at()) {
            (Some(plate), Some(entered_at)) => {
                let (_, fee) = tariff.charge(now - entered_at);
                Self {
                    number: slot.number(),
                    is_free: false,
                    color: OCCUPIED_COLOR,
                    info: plate.to_string(),
                    since: entered_at.with_timezone(&Local).format("%H:%M:%S").to_string(),
                    running_fee: format!("{} {}", fee, tariff.currency()),
                }
            }
            _ => Self {
                number: slot.number(),
                is_free: true,
                color: FREE_COLOR,
                info: FREE_TEXT.to_string(),
                since: String::new(),
                running_fee: String::new(),
            },
        }
    }
}
