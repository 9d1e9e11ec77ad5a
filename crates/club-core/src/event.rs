//! Timestamped club events, both client requests and club responses.

use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::clock::ClockTime;
use crate::types::ClientName;

/// A request made by a client. These are the only kinds accepted as input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// The client walks in.
    Arrive { client: ClientName },
    /// The client sits at a table, numbered from 1 as printed in the club.
    /// The number is kept as given; it is range-checked when applied.
    Seat { client: ClientName, table: i64 },
    /// The client asks to wait for a table.
    Wait { client: ClientName },
    /// The client leaves.
    Leave { client: ClientName },
}

impl Request {
    /// Numeric event id used in the text format.
    pub const fn code(&self) -> u8 {
        match self {
            Self::Arrive { .. } => 1,
            Self::Seat { .. } => 2,
            Self::Wait { .. } => 3,
            Self::Leave { .. } => 4,
        }
    }

    pub const fn client(&self) -> &ClientName {
        match self {
            Self::Arrive { client }
            | Self::Seat { client, .. }
            | Self::Wait { client }
            | Self::Leave { client } => client,
        }
    }
}

/// Why a request was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// The client is already inside.
    YouShallNotPass,
    /// The client arrived outside operating hours.
    NotOpenYet,
    /// The table does not exist or someone else is sitting there.
    PlaceIsBusy,
    /// The client is not inside the club.
    ClientUnknown,
    /// The client asked to wait while a table is free.
    ICanWaitNoLonger,
}

impl RejectReason {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::YouShallNotPass => "YouShallNotPass",
            Self::NotOpenYet => "NotOpenYet",
            Self::PlaceIsBusy => "PlaceIsBusy",
            Self::ClientUnknown => "ClientUnknown",
            Self::ICanWaitNoLonger => "ICanWaitNoLonger!",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything that can appear in the day's log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// An input request, echoed as received.
    Request(Request),
    /// The club made the client leave: queue overflow or closing time.
    ForcedLeave { client: ClientName },
    /// The club seated a waiting client at a table that just freed up.
    AutoSeat { client: ClientName, table: usize },
    /// The request logged just before this one had no effect.
    Rejected(RejectReason),
}

impl EventKind {
    /// Numeric event id used in the text format.
    pub const fn code(&self) -> u8 {
        match self {
            Self::Request(request) => request.code(),
            Self::ForcedLeave { .. } => 11,
            Self::AutoSeat { .. } => 12,
            Self::Rejected(_) => 13,
        }
    }
}

/// A log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub time: ClockTime,
    pub kind: EventKind,
}

impl Event {
    pub const fn new(time: ClockTime, kind: EventKind) -> Self {
        Self { time, kind }
    }

    pub const fn request(time: ClockTime, request: Request) -> Self {
        Self::new(time, EventKind::Request(request))
    }

    pub const fn code(&self) -> u8 {
        self.kind.code()
    }

    /// Payload tokens in the order they are printed after the id.
    pub fn payload(&self) -> Vec<String> {
        match &self.kind {
            EventKind::Request(Request::Seat { client, table }) => {
                vec![client.to_string(), table.to_string()]
            }
            EventKind::Request(request) => vec![request.client().to_string()],
            EventKind::ForcedLeave { client } => vec![client.to_string()],
            EventKind::AutoSeat { client, table } => vec![client.to_string(), table.to_string()],
            EventKind::Rejected(reason) => vec![reason.to_string()],
        }
    }
}

impl fmt::Display for Event {
    /// Renders the line form: `HH:MM <id> [payload...]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.time, self.code())?;
        for token in self.payload() {
            write!(f, " {token}")?;
        }
        Ok(())
    }
}

impl Serialize for Event {
    /// Serializes as `{ time, id, payload }`, the same tokens as the line form.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut event = serializer.serialize_struct("Event", 3)?;
        event.serialize_field("time", &self.time)?;
        event.serialize_field("id", &self.code())?;
        event.serialize_field("payload", &self.payload())?;
        event.end()
    }
}

/// A client request read from the input, with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    pub time: ClockTime,
    pub request: Request,
    /// 1-based line number in the source text, 0 if not read from text.
    pub line: usize,
}

impl InputEvent {
    pub const fn new(time: ClockTime, request: Request) -> Self {
        Self {
            time,
            request,
            line: 0,
        }
    }
}

/// Orders requests for replay by `(time, code)`.
///
/// The sort is stable, so requests sharing both keep their input order.
pub fn sort_for_replay(requests: &mut [InputEvent]) {
    requests.sort_by_key(|input| (input.time, input.request.code()));
}
