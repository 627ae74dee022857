//! Terminal front end
//!
//! - `app` - key handling and cursor state around a `GarageSession`
//! - `draw` - ratatui rendering
//! - `slot_view` - per-slot display values (color, text, free flag)

pub mod app;
pub mod draw;
pub mod slot_view;

pub use app::App;
pub use draw::draw_ui;
pub use slot_view::SlotView;
