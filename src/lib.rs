//! Garage slots library
//!
//! Exposes modules for integration testing and the terminal front end.

pub mod domain;
pub mod infra;
pub mod io;
pub mod services;
pub mod ui;
