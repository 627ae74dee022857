//! Park-out: bill the stay and free the slot

use crate::domain::fee::Tariff;
use crate::domain::receipt::{new_uuid_v7, Receipt};
use crate::domain::types::SlotId;
use crate::services::garage::Garage;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Free `slot` at `now` and return the receipt for the stay.
///
/// None if the slot does not exist or is already free.
pub fn park_out(garage: &mut Garage, slot: SlotId, tariff: &Tariff, now: DateTime<Utc>) -> Option<Receipt> {
    let Some(target) = garage.find_slot_mut(slot) else {
        debug!(slot = %slot, "park_out_unknown_slot");
        return None;
    };

    let Some((plate, entered_at)) = target.release() else {
        debug!(slot = %slot, "park_out_slot_free");
        return None;
    };

    let (minutes, fee) = tariff.charge(now - entered_at);

    info!(
        slot = %slot,
        plate = %plate,
        minutes = %minutes,
        fee = %fee,
        currency = %tariff.currency(),
        "slot_parked_out"
    );

    Some(Receipt {
        rid: new_uuid_v7(),
        slot,
        plate,
        entered_at,
        exited_at: now,
        minutes,
        fee,
        currency: tariff.currency().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fee::Fee;
    use crate::domain::types::Floor;
    use crate::services::entry::park_in;
    use chrono::TimeDelta;

    fn eg(n: u8) -> SlotId {
        SlotId::new(Floor::Ground, n)
    }

    #[test]
    fn test_ninety_second_stay_costs_one_franc() {
        let mut garage = Garage::initialize();
        let entered = Utc::now();
        park_in(&mut garage, eg(1), "ZH 1234", entered).unwrap().unwrap();

        let receipt =
            park_out(&mut garage, eg(1), &Tariff::default(), entered + TimeDelta::seconds(90)).unwrap();
        assert_eq!(receipt.minutes, 2);
        assert_eq!(receipt.fee, Fee(100));
        assert_eq!(receipt.fee.to_string(), "1.00");
        assert_eq!(receipt.plate.as_str(), "ZH 1234");
        assert_eq!(receipt.entered_at, entered);
        assert_eq!(receipt.currency, "CHF");
    }

    #[test]
    fn test_one_second_stay_bills_a_full_minute() {
        let mut garage = Garage::initialize();
        let entered = Utc::now();
        park_in(&mut garage, eg(2), "BE 1", entered).unwrap().unwrap();

        let receipt =
            park_out(&mut garage, eg(2), &Tariff::default(), entered + TimeDelta::seconds(1)).unwrap();
        assert_eq!(receipt.fee.to_string(), "0.50");
    }

    #[test]
    fn test_park_out_resets_slot_and_allows_reuse() {
        let mut garage = Garage::initialize();
        let now = Utc::now();
        park_in(&mut garage, eg(1), "ZH 1", now).unwrap().unwrap();
        park_out(&mut garage, eg(1), &Tariff::default(), now).unwrap();

        let slot = garage.find_slot(eg(1)).unwrap();
        assert!(!slot.is_occupied());
        assert!(slot.license_plate().is_none());
        assert!(slot.entered_at().is_none());

        // Same plate may park again once it has left
        assert!(park_in(&mut garage, eg(1), "ZH 1", now).unwrap().is_some());
    }

    #[test]
    fn test_free_or_unknown_slot_is_noop() {
        let mut garage = Garage::initialize();
        assert!(park_out(&mut garage, eg(1), &Tariff::default(), Utc::now()).is_none());
        assert!(park_out(&mut garage, eg(42), &Tariff::default(), Utc::now()).is_none());
    }

    #[test]
    fn test_uses_tariff_rate_and_currency() {
        let mut garage = Garage::initialize();
        let entered = Utc::now();
        park_in(&mut garage, eg(3), "VD 10", entered).unwrap().unwrap();

        let tariff = Tariff::from_decimal_rate(1.2, "EUR").unwrap();
        let receipt = park_out(&mut garage, eg(3), &tariff, entered + TimeDelta::minutes(10)).unwrap();
        assert_eq!(receipt.fee.to_string(), "12.00");
        assert_eq!(receipt.currency, "EUR");
    }
}
