//! Garage session - the state the front end drives
//!
//! Owns the garage, the selected floor, the plate input and the status line,
//! and keeps the visible slot list in step with both. Every mutation goes
//! through here so the visible list is recomputed in the same call.
//!
//! The session does not know how it is rendered. Front ends either read the
//! accessors after each action or register an observer for `SessionEvent`s.

use crate::domain::fee::Tariff;
use crate::domain::receipt::Receipt;
use crate::domain::slot::ParkingSlot;
use crate::domain::types::{Floor, SlotId, UnknownFloor};
use crate::infra::config::Config;
use crate::infra::metrics::{Metrics, MetricsSummary};
use crate::io::receipts::ReceiptLog;
use crate::services::entry::{self, ParkInError, Parked};
use crate::services::exit;
use crate::services::floor_filter::visible_slots;
use crate::services::garage::Garage;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Change notification for observers
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    FloorChanged(Floor),
    SlotsChanged,
    StatusChanged(String),
    ReceiptIssued(Receipt),
}

type Observer = Box<dyn FnMut(&SessionEvent)>;

pub struct GarageSession {
    garage: Garage,
    tariff: Tariff,
    selected_floor: Floor,
    input: String,
    status: String,
    visible: Vec<ParkingSlot>,
    metrics: Metrics,
    receipts: Option<ReceiptLog>,
    observer: Option<Observer>,
}

impl GarageSession {
    pub fn new(tariff: Tariff, floor: Floor) -> Self {
        let garage = Garage::initialize();
        let visible = visible_slots(&garage, floor);
        Self {
            garage,
            tariff,
            selected_floor: floor,
            input: String::new(),
            status: String::new(),
            visible,
            metrics: Metrics::new(),
            receipts: None,
            observer: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut session = Self::new(config.tariff().clone(), config.default_floor());
        if config.receipts_enabled() {
            session.receipts = Some(ReceiptLog::new(config.receipts_file()));
        }
        session
    }

    pub fn with_receipt_log(mut self, log: ReceiptLog) -> Self {
        self.receipts = Some(log);
        self
    }

    /// Register the change observer, replacing any previous one
    pub fn set_observer(&mut self, observer: impl FnMut(&SessionEvent) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    fn notify(&mut self, event: SessionEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer(&event);
        }
    }

    fn set_status(&mut self, status: String) {
        self.status = status.clone();
        self.notify(SessionEvent::StatusChanged(status));
    }

    fn refresh_visible(&mut self) {
        self.visible = visible_slots(&self.garage, self.selected_floor);
        self.notify(SessionEvent::SlotsChanged);
    }

    // Read side

    pub fn floor_names(&self) -> [&'static str; 3] {
        Floor::names()
    }

    pub fn selected_floor(&self) -> Floor {
        self.selected_floor
    }

    pub fn visible_slots(&self) -> &[ParkingSlot] {
        &self.visible
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn garage(&self) -> &Garage {
        &self.garage
    }

    pub fn tariff(&self) -> &Tariff {
        &self.tariff
    }

    pub fn free_count(&self, floor: Floor) -> usize {
        self.garage.free_count(floor)
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn metrics_summary(&self) -> MetricsSummary {
        self.metrics.report(self.garage.occupied_count(), self.garage.capacity())
    }

    // Write side

    /// Select a floor by display name
    pub fn select_floor(&mut self, name: &str) -> Result<(), UnknownFloor> {
        let floor = name.parse::<Floor>()?;
        self.set_floor(floor);
        Ok(())
    }

    pub fn set_floor(&mut self, floor: Floor) {
        if floor == self.selected_floor {
            return;
        }
        self.selected_floor = floor;
        debug!(floor = %floor, "floor_selected");
        self.notify(SessionEvent::FloorChanged(floor));
        self.refresh_visible();
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn push_input(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_input(&mut self) {
        self.input.pop();
    }

    /// Park the vehicle from the input field in `slot`, now
    pub fn park_in(&mut self, slot: SlotId) -> Result<Option<Parked>, ParkInError> {
        self.park_in_at(slot, Utc::now())
    }

    /// Park the vehicle from the input field in `slot` at `now`.
    ///
    /// Rejections set the status line; a missing or occupied slot changes
    /// nothing and returns `Ok(None)`.
    pub fn park_in_at(&mut self, slot: SlotId, now: DateTime<Utc>) -> Result<Option<Parked>, ParkInError> {
        match entry::park_in(&mut self.garage, slot, &self.input, now) {
            Ok(Some(parked)) => {
                self.metrics.record_park_in();
                self.input.clear();
                self.refresh_visible();
                self.set_status(parked.summary());
                Ok(Some(parked))
            }
            Ok(None) => {
                self.metrics.record_ignored();
                Ok(None)
            }
            Err(e) => {
                info!(slot = %slot, reason = %e.as_str(), "park_in_rejected");
                self.metrics.record_rejection(&e);
                self.set_status(e.to_string());
                Err(e)
            }
        }
    }

    /// Bill and free `slot`, now
    pub fn park_out(&mut self, slot: SlotId) -> Option<Receipt> {
        self.park_out_at(slot, Utc::now())
    }

    /// Bill and free `slot` at `now`. None (and no status change) if the
    /// slot is missing or free.
    pub fn park_out_at(&mut self, slot: SlotId, now: DateTime<Utc>) -> Option<Receipt> {
        let Some(receipt) = exit::park_out(&mut self.garage, slot, &self.tariff, now) else {
            self.metrics.record_ignored();
            return None;
        };

        self.metrics.record_park_out(receipt.minutes, receipt.fee);
        if let Some(log) = &self.receipts {
            log.write_receipt(&receipt);
        }

        self.refresh_visible();
        self.set_status(receipt.summary());
        self.notify(SessionEvent::ReceiptIssued(receipt.clone()));
        Some(receipt)
    }
}

impl std::fmt::Debug for GarageSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GarageSession")
            .field("selected_floor", &self.selected_floor)
            .field("occupied", &self.garage.occupied_count())
            .field("input", &self.input)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fee::Fee;
    use chrono::TimeDelta;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session() -> GarageSession {
        GarageSession::new(Tariff::default(), Floor::Ground)
    }

    fn eg(n: u8) -> SlotId {
        SlotId::new(Floor::Ground, n)
    }

    #[test]
    fn test_starts_on_default_floor() {
        let session = session();
        assert_eq!(session.selected_floor(), Floor::Ground);
        assert_eq!(session.floor_names(), ["EG", "1. OG", "2. OG"]);
        assert_eq!(session.visible_slots().len(), 6);
        assert!(session.visible_slots().iter().all(|s| s.floor() == Floor::Ground));
        assert_eq!(session.status(), "");
    }

    #[test]
    fn test_select_floor_updates_visible_slots() {
        let mut session = session();
        session.select_floor("1. OG").unwrap();

        assert_eq!(session.selected_floor(), Floor::First);
        let numbers: Vec<u8> = session.visible_slots().iter().map(|s| s.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
        assert!(session.visible_slots().iter().all(|s| s.floor() == Floor::First));
    }

    #[test]
    fn test_select_unknown_floor_is_rejected() {
        let mut session = session();
        assert_eq!(session.select_floor("UG"), Err(UnknownFloor("UG".to_string())));
        assert_eq!(session.selected_floor(), Floor::Ground);
    }

    #[test]
    fn test_park_in_success_clears_input_and_reports() {
        let mut session = session();
        session.set_input("zh 1234");

        let parked = session.park_in(eg(2)).unwrap().unwrap();
        assert_eq!(parked.plate.as_str(), "ZH 1234");
        assert_eq!(session.input(), "");
        assert_eq!(session.status(), "Vehicle ZH 1234 parked on EG, slot 2.");
        assert!(session.visible_slots()[1].is_occupied());
        assert_eq!(session.metrics().parks_in(), 1);
    }

    #[test]
    fn test_park_in_rejection_keeps_input_and_sets_message() {
        let mut session = session();
        session.set_input("Z 123");

        assert_eq!(session.park_in(eg(1)), Err(ParkInError::InvalidFormat));
        assert_eq!(session.input(), "Z 123");
        assert_eq!(session.status(), ParkInError::InvalidFormat.to_string());
        assert!(!session.visible_slots()[0].is_occupied());
    }

    #[test]
    fn test_noop_leaves_status_untouched() {
        let mut session = session();
        session.set_input("ZH 1");
        session.park_in(eg(1)).unwrap();
        let status = session.status().to_string();

        session.set_input("ZH 2");
        assert_eq!(session.park_in(eg(1)), Ok(None));
        assert_eq!(session.status(), status);
        assert_eq!(session.input(), "ZH 2");

        assert!(session.park_out(eg(5)).is_none());
        assert_eq!(session.status(), status);
    }

    #[test]
    fn test_park_out_reports_fee() {
        let mut session = session();
        let entered = Utc::now();
        session.set_input("ZH 999");
        session.park_in_at(eg(1), entered).unwrap();

        let receipt = session.park_out_at(eg(1), entered + TimeDelta::seconds(90)).unwrap();
        assert_eq!(receipt.fee, Fee(100));
        assert_eq!(session.status(), "Vehicle ZH 999 left EG, slot 1. Fee: 1.00 CHF (2 min)");
        assert!(!session.visible_slots()[0].is_occupied());
        assert_eq!(session.metrics().revenue(), Fee(100));
    }

    #[test]
    fn test_visible_slots_are_a_fresh_view_after_floor_switch() {
        let mut session = session();
        session.set_input("ZH 1");
        session.park_in(eg(1)).unwrap();

        session.set_floor(Floor::Second);
        assert!(session.visible_slots().iter().all(|s| !s.is_occupied()));

        session.set_floor(Floor::Ground);
        assert!(session.visible_slots()[0].is_occupied());
    }

    #[test]
    fn test_observer_receives_events_in_order() {
        let events: Rc<RefCell<Vec<SessionEvent>>> = Rc::default();
        let sink = events.clone();

        let mut session = session();
        session.set_observer(move |e| sink.borrow_mut().push(e.clone()));

        session.set_floor(Floor::First);
        session.set_input("");
        let _ = session.park_in(SlotId::new(Floor::First, 1));

        let events = events.borrow();
        assert_eq!(events[0], SessionEvent::FloorChanged(Floor::First));
        assert_eq!(events[1], SessionEvent::SlotsChanged);
        assert_eq!(events[2], SessionEvent::StatusChanged(ParkInError::EmptyInput.to_string()));
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_selecting_current_floor_is_silent() {
        let count = Rc::new(RefCell::new(0));
        let sink = count.clone();

        let mut session = session();
        session.set_observer(move |_| *sink.borrow_mut() += 1);
        session.set_floor(Floor::Ground);
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_input_editing() {
        let mut session = session();
        session.push_input('z');
        session.push_input('h');
        session.push_input('x');
        session.pop_input();
        assert_eq!(session.input(), "zh");
    }
}
