//! Club state machine: tables, clients inside, and the waiting queue.
//!
//! Each request is validated against the current state and produces the
//! log entries for it: the echoed request first, followed by whatever the
//! club does in response (a rejection, an auto-seat, a forced leave).
//!
//! Tables are numbered from 1 in requests and log entries and indexed
//! from 0 everywhere inside this module.

use std::collections::{BTreeMap, VecDeque};

use serde::{Serialize, Serializer};

use crate::clock::ClockTime;
use crate::config::ClubConfig;
use crate::event::{Event, EventKind, RejectReason, Request};
use crate::types::{ClientName, format_usage};

/// An ongoing occupation of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Session {
    pub(crate) table: usize,
    pub(crate) started: ClockTime,
}

/// A client currently inside the club.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Client {
    pub(crate) session: Option<Session>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Table {
    pub(crate) occupant: Option<ClientName>,
    pub(crate) occupied_minutes: u64,
    pub(crate) revenue: u64,
}

/// Accumulated usage of one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    /// Table number, starting at 1.
    #[serde(rename = "table")]
    pub number: usize,
    pub revenue: u64,
    #[serde(rename = "usage", serialize_with = "serialize_usage")]
    pub occupied_minutes: u64,
}

fn serialize_usage<S: Serializer>(minutes: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_usage(*minutes))
}

/// The club during one business day.
#[derive(Debug, Clone)]
pub struct ClubState {
    pub(crate) config: ClubConfig,
    pub(crate) tables: Vec<Table>,
    /// Clients inside, keyed by name. Iteration order is name order.
    pub(crate) clients: BTreeMap<ClientName, Client>,
    pub(crate) queue: VecDeque<ClientName>,
}

impl ClubState {
    pub fn new(config: ClubConfig) -> Self {
        Self {
            tables: vec![Table::default(); config.tables()],
            clients: BTreeMap::new(),
            queue: VecDeque::with_capacity(config.tables()),
            config,
        }
    }

    /// Applies one request and returns the log entries it produces.
    pub fn apply(&mut self, time: ClockTime, request: &Request) -> Vec<Event> {
        let mut log = vec![Event::request(time, request.clone())];
        let outcome = match request {
            Request::Arrive { client } => self.arrive(time, client),
            Request::Seat { client, table } => self.seat(time, client, *table),
            Request::Wait { client } => self.wait(time, client),
            Request::Leave { client } => self.leave(time, client),
        };

        match outcome {
            Ok(events) => log.extend(events),
            Err(reason) => {
                tracing::debug!(%time, client = %request.client(), %reason, "request rejected");
                log.push(Event::new(time, EventKind::Rejected(reason)));
            }
        }
        log
    }

    fn arrive(&mut self, time: ClockTime, client: &ClientName) -> Result<Vec<Event>, RejectReason> {
        if self.clients.contains_key(client) {
            return Err(RejectReason::YouShallNotPass);
        }
        if !self.config.is_open_at(time) {
            return Err(RejectReason::NotOpenYet);
        }
        self.clients.insert(client.clone(), Client::default());
        Ok(Vec::new())
    }

    fn seat(
        &mut self,
        time: ClockTime,
        client: &ClientName,
        number: i64,
    ) -> Result<Vec<Event>, RejectReason> {
        let table = self.table_index(number).ok_or(RejectReason::PlaceIsBusy)?;
        let current = self
            .clients
            .get(client)
            .ok_or(RejectReason::ClientUnknown)?
            .session;
        if self.tables[table]
            .occupant
            .as_ref()
            .is_some_and(|occupant| occupant != client)
        {
            return Err(RejectReason::PlaceIsBusy);
        }

        if let Some(session) = current {
            self.end_session(session, time, false);
        }
        self.queue.retain(|queued| queued != client);
        self.start_session(client, table, time);
        Ok(Vec::new())
    }

    fn wait(&mut self, time: ClockTime, client: &ClientName) -> Result<Vec<Event>, RejectReason> {
        let seated = self
            .clients
            .get(client)
            .ok_or(RejectReason::ClientUnknown)?
            .session
            .is_some();
        if self.free_table().is_some() {
            return Err(RejectReason::ICanWaitNoLonger);
        }
        if seated || self.queue.contains(client) {
            return Ok(Vec::new());
        }

        if self.queue.len() >= self.config.tables() {
            tracing::debug!(%time, %client, "queue full, turning client away");
            self.clients.remove(client);
            return Ok(vec![Event::new(
                time,
                EventKind::ForcedLeave {
                    client: client.clone(),
                },
            )]);
        }
        self.queue.push_back(client.clone());
        Ok(Vec::new())
    }

    fn leave(&mut self, time: ClockTime, client: &ClientName) -> Result<Vec<Event>, RejectReason> {
        let departed = self
            .clients
            .remove(client)
            .ok_or(RejectReason::ClientUnknown)?;
        if let Some(session) = departed.session {
            self.end_session(session, time, true);
        }
        self.queue.retain(|queued| queued != client);

        Ok(self.seat_next_waiting(time).into_iter().collect())
    }

    /// Moves the head of the queue to the lowest-numbered free table.
    fn seat_next_waiting(&mut self, time: ClockTime) -> Option<Event> {
        let table = self.free_table()?;
        let client = self.queue.pop_front()?;
        tracing::debug!(%time, %client, table = table + 1, "seating from queue");
        self.start_session(&client, table, time);
        Some(Event::new(
            time,
            EventKind::AutoSeat {
                client,
                table: table + 1,
            },
        ))
    }

    pub(crate) fn start_session(&mut self, client: &ClientName, table: usize, time: ClockTime) {
        if let Some(entry) = self.clients.get_mut(client) {
            entry.session = Some(Session {
                table,
                started: time,
            });
            self.tables[table].occupant = Some(client.clone());
        }
    }

    /// Closes a session at `end`, adding its minutes to the table and,
    /// when `bill` is set, charging for it.
    pub(crate) fn end_session(&mut self, session: Session, end: ClockTime, bill: bool) {
        let minutes = u64::try_from(end.minutes_since(session.started)).unwrap_or(0);
        let table = &mut self.tables[session.table];
        table.occupied_minutes = table.occupied_minutes.saturating_add(minutes);
        if bill {
            table.revenue = table.revenue.saturating_add(self.config.charge_for(minutes));
        }
        table.occupant = None;
    }

    fn table_index(&self, number: i64) -> Option<usize> {
        usize::try_from(number)
            .ok()
            .filter(|n| (1..=self.tables.len()).contains(n))
            .map(|n| n - 1)
    }

    fn free_table(&self) -> Option<usize> {
        self.tables.iter().position(|table| table.occupant.is_none())
    }

    /// Whether `client` is currently inside the club.
    pub fn is_inside(&self, client: &ClientName) -> bool {
        self.clients.contains_key(client)
    }

    /// Table number (from 1) the client is sitting at, if any.
    pub fn table_of(&self, client: &ClientName) -> Option<usize> {
        self.clients
            .get(client)?
            .session
            .map(|session| session.table + 1)
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    /// Clients waiting for a table, front of the queue first.
    pub fn waiting(&self) -> impl Iterator<Item = &ClientName> {
        self.queue.iter()
    }

    pub fn table_summaries(&self) -> Vec<TableSummary> {
        self.tables
            .iter()
            .enumerate()
            .map(|(index, table)| TableSummary {
                number: index + 1,
                revenue: table.revenue,
                occupied_minutes: table.occupied_minutes,
            })
            .collect()
    }

    /// Panics if tables, clients and the queue disagree with each other.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        for (index, table) in self.tables.iter().enumerate() {
            if let Some(occupant) = &table.occupant {
                let session = self.clients.get(occupant).and_then(|c| c.session);
                assert_eq!(
                    session.map(|s| s.table),
                    Some(index),
                    "table {} occupant {occupant} is not seated there",
                    index + 1
                );
            }
        }
        for (name, client) in &self.clients {
            if let Some(session) = client.session {
                assert_eq!(
                    self.tables[session.table].occupant.as_ref(),
                    Some(name),
                    "{name} is seated at a table that lists someone else"
                );
                assert!(!self.queue.contains(name), "{name} is seated and queued");
            }
        }
        for (position, name) in self.queue.iter().enumerate() {
            assert!(self.clients.contains_key(name), "{name} queued but not inside");
            assert!(
                !self.queue.iter().skip(position + 1).any(|other| other == name),
                "{name} queued twice"
            );
        }
        assert!(self.queue.len() <= self.config.tables());
    }
}
