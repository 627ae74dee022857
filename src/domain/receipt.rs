//! Park-out receipt: what was billed for one stay

use crate::domain::fee::Fee;
use crate::domain::plate::LicensePlate;
use crate::domain::types::SlotId;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use uuid::Uuid;

/// Generate a new UUIDv7 (time-sortable)
pub fn new_uuid_v7() -> String {
    Uuid::now_v7().to_string()
}

fn rfc3339<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Record of a completed stay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    pub rid: String, // UUIDv7 receipt ID
    #[serde(flatten)]
    pub slot: SlotId, // emitted as "floor" + "number"
    pub plate: LicensePlate,
    #[serde(serialize_with = "rfc3339")]
    pub entered_at: DateTime<Utc>,
    #[serde(serialize_with = "rfc3339")]
    pub exited_at: DateTime<Utc>,
    pub minutes: u64,
    pub fee: Fee,
    pub currency: String,
}

impl Receipt {
    /// Single-line JSON for the receipt log
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Status line shown to the user after park-out
    pub fn summary(&self) -> String {
        format!(
            "Vehicle {} left {}, slot {}. Fee: {} {} ({} min)",
            self.plate,
            self.slot.floor,
            self.slot.number,
            self.fee,
            self.currency,
            self.minutes
        )
    }
}
