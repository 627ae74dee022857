//! End-to-end tests driving a garage session the way the front end does

use chrono::{TimeDelta, Utc};
use garage_slots::domain::{Fee, Floor, SlotId};
use garage_slots::infra::Config;
use garage_slots::io::ReceiptLog;
use garage_slots::services::{GarageSession, ParkInError, SessionEvent};
use std::cell::RefCell;
use std::fs;
use std::rc::Rc;
use tempfile::tempdir;

fn session() -> GarageSession {
    GarageSession::from_config(&Config::default())
}

fn assert_slot_invariant(session: &GarageSession) {
    for slot in session.garage().slots() {
        assert_eq!(slot.is_occupied(), slot.license_plate().is_some(), "{}", slot.id());
        assert_eq!(slot.is_occupied(), slot.entered_at().is_some(), "{}", slot.id());
    }
}

#[test]
fn test_every_floor_has_six_numbered_slots() {
    let mut session = session();
    for name in session.floor_names() {
        session.select_floor(name).unwrap();
        let ids: Vec<SlotId> = session.visible_slots().iter().map(|s| s.id()).collect();
        let floor: Floor = name.parse().unwrap();
        let expected: Vec<SlotId> = (1..=6).map(|n| SlotId::new(floor, n)).collect();
        assert_eq!(ids, expected);
    }
}

#[test]
fn test_duplicate_vehicle_on_another_floor() {
    let mut session = session();

    session.set_input("ZH 999");
    session.park_in(SlotId::new(Floor::Ground, 1)).unwrap().unwrap();

    session.select_floor("1. OG").unwrap();
    session.set_input("ZH 999");
    let result = session.park_in(SlotId::new(Floor::First, 1));

    assert!(matches!(result, Err(ParkInError::DuplicateVehicle(_))));
    assert_eq!(session.status(), "Vehicle ZH 999 is already parked.");
    assert!(!session.visible_slots()[0].is_occupied());
    assert_slot_invariant(&session);
}

#[test]
fn test_rejected_plates_change_nothing() {
    let mut session = session();
    let slot = SlotId::new(Floor::Ground, 1);

    for (raw, expected) in [
        ("", ParkInError::EmptyInput),
        ("   ", ParkInError::EmptyInput),
        ("Z 123", ParkInError::InvalidFormat),
        ("AB 1234567", ParkInError::InvalidFormat),
    ] {
        session.set_input(raw);
        assert_eq!(session.park_in(slot), Err(expected), "{raw:?}");
    }
    assert_eq!(session.garage().occupied_count(), 0);
    assert_eq!(session.metrics_summary().rejected_total(), 4);
    assert_slot_invariant(&session);
}

#[test]
fn test_full_cycle_with_fee_and_reuse() {
    let mut session = session();
    let slot = SlotId::new(Floor::Second, 4);
    let entered = Utc::now();

    session.select_floor("2. OG").unwrap();
    session.set_input("  zh 1234 ");
    let parked = session.park_in_at(slot, entered).unwrap().unwrap();
    assert_eq!(parked.plate.as_str(), "ZH 1234");
    assert_eq!(session.status(), "Vehicle ZH 1234 parked on 2. OG, slot 4.");
    assert_slot_invariant(&session);

    let receipt = session.park_out_at(slot, entered + TimeDelta::seconds(90)).unwrap();
    assert_eq!(receipt.minutes, 2);
    assert_eq!(receipt.fee, Fee(100));
    assert!(session.status().contains("Fee: 1.00 CHF"));

    let freed = &session.visible_slots()[3];
    assert!(!freed.is_occupied());
    assert!(freed.license_plate().is_none());
    assert!(freed.entered_at().is_none());
    assert_slot_invariant(&session);

    session.set_input("BE 42");
    assert!(session.park_in(slot).unwrap().is_some());

    let summary = session.metrics_summary();
    assert_eq!(summary.parks_in, 2);
    assert_eq!(summary.parks_out, 1);
    assert_eq!(summary.revenue, Fee(100));
    assert_eq!(summary.occupied, 1);
}

#[test]
fn test_park_out_appends_receipt() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("receipts.jsonl");
    let config = Config::default().with_receipts_file(path.to_str().unwrap());
    let mut session = GarageSession::from_config(&config);

    let entered = Utc::now();
    for (n, plate) in [(1, "ZH 1"), (2, "ZH 2")] {
        let slot = SlotId::new(Floor::Ground, n);
        session.set_input(plate);
        session.park_in_at(slot, entered).unwrap().unwrap();
        session.park_out_at(slot, entered + TimeDelta::seconds(61)).unwrap();
    }

    // Free slot: no receipt
    assert!(session.park_out(SlotId::new(Floor::Ground, 3)).is_none());

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);

    let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["floor"], "EG");
    assert_eq!(first["number"], 1);
    assert_eq!(first["plate"], "ZH 1");
    assert_eq!(first["minutes"], 2);
    assert_eq!(first["fee"], "1.00");
    assert_eq!(first["currency"], "CHF");
}

#[test]
fn test_park_out_survives_receipt_write_failure() {
    let dir = tempdir().unwrap();
    // A directory cannot be appended to
    let log = ReceiptLog::new(dir.path().to_str().unwrap());
    let mut session = session().with_receipt_log(log);
    let slot = SlotId::new(Floor::Ground, 2);
    let entered = Utc::now();

    session.set_input("ZH 77");
    session.park_in_at(slot, entered).unwrap().unwrap();
    let receipt = session.park_out_at(slot, entered + TimeDelta::seconds(30));

    assert!(receipt.is_some());
    assert!(!session.visible_slots()[1].is_occupied());
    assert!(session.status().starts_with("Vehicle ZH 77 left EG, slot 2."));
    assert_eq!(session.metrics_summary().parks_out, 1);
    assert_slot_invariant(&session);
}

#[test]
fn test_observer_sees_park_out_events() {
    let events: Rc<RefCell<Vec<SessionEvent>>> = Rc::default();
    let sink = events.clone();
    let mut session = session();
    let slot = SlotId::new(Floor::Ground, 1);
    let entered = Utc::now();

    session.set_input("BE 5");
    session.park_in_at(slot, entered).unwrap().unwrap();
    session.set_observer(move |e| sink.borrow_mut().push(e.clone()));

    let receipt = session.park_out_at(slot, entered + TimeDelta::seconds(90)).unwrap();

    let events = events.borrow();
    assert_eq!(
        *events,
        vec![
            SessionEvent::SlotsChanged,
            SessionEvent::StatusChanged(receipt.summary()),
            SessionEvent::ReceiptIssued(receipt),
        ]
    );
}
