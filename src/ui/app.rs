//! Terminal front-end state and key handling
//!
//! Keys:
//! - Left/Right (or Shift+Tab/Tab): switch floor
//! - Up/Down: move slot cursor
//! - printable characters / Backspace: edit plate input
//! - Enter: park in at the cursor slot
//! - Delete or F2: park out at the cursor slot
//! - Esc or Ctrl+C: quit

use crate::domain::types::{SlotId, SLOTS_PER_FLOOR};
use crate::services::session::GarageSession;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Longest plate the format allows is 9 characters; leave some slack for typos.
/// Surrounding whitespace is trimmed on park-in and does not count.
const MAX_INPUT_LEN: usize = 16;

#[derive(Debug)]
pub struct App {
    pub session: GarageSession,
    pub garage_name: String,
    cursor: usize,
    should_quit: bool,
}

impl App {
    pub fn new(session: GarageSession, garage_name: impl Into<String>) -> Self {
        Self { session, garage_name: garage_name.into(), cursor: 0, should_quit: false }
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Slot under the cursor on the selected floor
    pub fn selected_slot(&self) -> Option<SlotId> {
        self.session.visible_slots().get(self.cursor).map(|s| s.id())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Right | KeyCode::Tab => {
                let next = self.session.selected_floor().next();
                self.session.set_floor(next);
            }
            KeyCode::Left | KeyCode::BackTab => {
                let prev = self.session.selected_floor().prev();
                self.session.set_floor(prev);
            }
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => {
                self.cursor = (self.cursor + 1).min(SLOTS_PER_FLOOR as usize - 1);
            }
            KeyCode::Enter => {
                if let Some(slot) = self.selected_slot() {
                    // Outcome is reflected in the session status line
                    let _ = self.session.park_in(slot);
                }
            }
            KeyCode::Delete | KeyCode::F(2) => {
                if let Some(slot) = self.selected_slot() {
                    self.session.park_out(slot);
                }
            }
            KeyCode::Backspace => self.session.pop_input(),
            KeyCode::Char(c) => {
                if self.session.input().trim().chars().count() < MAX_INPUT_LEN {
                    self.session.push_input(c);
                }
            }
            _ => {}
        }
    }
}
