//! Replays a day of requests against a fresh club.

use serde::Serialize;

use crate::clock::ClockTime;
use crate::config::ClubConfig;
use crate::event::{Event, InputEvent, sort_for_replay};
use crate::state::{ClubState, TableSummary};

/// The outcome of one replayed day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    pub open: ClockTime,
    pub close: ClockTime,
    /// Every logged event, in the order the club produced them.
    #[serde(rename = "events")]
    pub log: Vec<Event>,
    /// Usage per table, ordered by table number.
    pub tables: Vec<TableSummary>,
}

impl ReplayReport {
    pub fn total_revenue(&self) -> u64 {
        self.tables.iter().map(|table| table.revenue).sum()
    }
}

/// Runs a full day: orders the requests, applies each in turn, then closes.
///
/// Requests are ordered by time and then by event id; requests sharing
/// both are applied in input order.
pub fn replay(config: ClubConfig, mut requests: Vec<InputEvent>) -> ReplayReport {
    sort_for_replay(&mut requests);

    let mut club = ClubState::new(config);
    let mut log = Vec::with_capacity(requests.len() * 2);
    for input in &requests {
        tracing::trace!(line = input.line, time = %input.time, code = input.request.code(), "applying");
        log.extend(club.apply(input.time, &input.request));
    }
    log.extend(club.close_day());

    let report = ReplayReport {
        open: config.open(),
        close: config.close(),
        log,
        tables: club.table_summaries(),
    };
    tracing::info!(
        requests = requests.len(),
        logged = report.log.len(),
        revenue = report.total_revenue(),
        "day replayed"
    );
    report
}
