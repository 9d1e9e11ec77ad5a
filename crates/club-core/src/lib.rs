//! Core domain logic for the table club.
//!
//! This crate contains the fundamental types and logic for:
//! - Replay: applying a day of client requests to the club in time order
//! - Billing: per-table usage minutes and revenue in whole started hours
//! - Input: reading the day's configuration and requests from text

mod clock;
mod config;
pub mod event;
pub mod input;
mod replay;
mod state;
mod sweep;
mod types;

pub use clock::ClockTime;
pub use config::{ClubConfig, ConfigError, MAX_TABLES};
pub use event::{Event, EventKind, InputEvent, RejectReason, Request};
pub use input::{ClubInput, ParseError, ParseErrorKind, parse_input};
pub use replay::{ReplayReport, replay};
pub use state::{ClubState, TableSummary};
pub use types::{ClientName, ValidationError, format_usage};
