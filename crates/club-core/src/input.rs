//! Reading a day's input file.
//!
//! The format is line oriented:
//!
//! ```text
//! 3                 number of tables
//! 09:00 19:00       opening and closing time
//! 10                hourly rate
//! 08:48 1 client1   events: time, id, arguments
//! ```
//!
//! Any malformed line is fatal. The error keeps the offending line so it
//! can be shown to the user as-is.

use thiserror::Error;

use crate::clock::ClockTime;
use crate::config::{ClubConfig, ConfigError, MAX_TABLES};
use crate::event::{InputEvent, Request};
use crate::types::{ClientName, ValidationError};

/// What was wrong with a line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("missing {0}")]
    MissingLine(&'static str),

    #[error("expected an integer from 0 to {}", u32::MAX)]
    InvalidNumber,

    #[error("expected opening and closing time")]
    InvalidHours,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("expected time and event id")]
    MalformedEvent,

    #[error("unknown event id {0}")]
    UnknownEventId(String),

    /// Ids the club emits itself never appear in input.
    #[error("event id {0} is outgoing only")]
    ReservedEventId(u32),

    #[error("event id {id} takes {expected} argument(s), got {got}")]
    WrongArity { id: u32, expected: usize, got: usize },

    #[error("invalid table number {0}")]
    InvalidTable(String),
}

/// A fatal input error, located at a line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number.
    pub line: usize,
    raw: String,
    pub kind: ParseErrorKind,
}

impl ParseError {
    fn new(line: usize, raw: &str, kind: impl Into<ParseErrorKind>) -> Self {
        Self {
            line,
            raw: raw.to_string(),
            kind: kind.into(),
        }
    }

    /// The offending line exactly as read, or a description when the line
    /// is missing altogether.
    pub fn raw_line(&self) -> &str {
        if self.raw.is_empty() {
            if let ParseErrorKind::MissingLine(what) = &self.kind {
                return what;
            }
        }
        &self.raw
    }
}

/// A parsed input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClubInput {
    pub config: ClubConfig,
    /// Requests in file order.
    pub events: Vec<InputEvent>,
}

/// Parses a complete input file.
pub fn parse_input(text: &str) -> Result<ClubInput, ParseError> {
    let mut lines = text.lines().enumerate().map(|(index, line)| (index + 1, line));

    let (line_no, raw) = next_line(&mut lines, 1, "table count")?;
    let tables = parse_number(raw).map_err(|kind| ParseError::new(line_no, raw, kind))?;
    let tables = usize::try_from(tables)
        .map_err(|_| ParseError::new(line_no, raw, ParseErrorKind::InvalidNumber))?;
    if tables == 0 {
        return Err(ParseError::new(line_no, raw, ConfigError::NoTables));
    }
    if tables > MAX_TABLES {
        return Err(ParseError::new(
            line_no,
            raw,
            ConfigError::TooManyTables { max: MAX_TABLES },
        ));
    }

    let (hours_line_no, hours_raw) = next_line(&mut lines, 2, "opening hours")?;
    let (open, close) =
        parse_hours(hours_raw).map_err(|kind| ParseError::new(hours_line_no, hours_raw, kind))?;

    let (rate_line_no, rate_raw) = next_line(&mut lines, 3, "hourly rate")?;
    let rate = parse_number(rate_raw).map_err(|kind| ParseError::new(rate_line_no, rate_raw, kind))?;

    let config = ClubConfig::new(open, close, tables, rate)
        .map_err(|err| ParseError::new(rate_line_no, rate_raw, err))?;

    let mut events = Vec::new();
    for (line_no, raw) in lines {
        if raw.trim().is_empty() {
            continue;
        }
        let (time, request) =
            parse_event(raw).map_err(|kind| ParseError::new(line_no, raw, kind))?;
        events.push(InputEvent {
            time,
            request,
            line: line_no,
        });
    }

    tracing::debug!(tables = config.tables(), events = events.len(), "input parsed");
    Ok(ClubInput { config, events })
}

fn next_line<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    expected_no: usize,
    what: &'static str,
) -> Result<(usize, &'a str), ParseError> {
    lines
        .next()
        .ok_or_else(|| ParseError::new(expected_no, "", ParseErrorKind::MissingLine(what)))
}

/// Parses a header number. Values past `u32::MAX` are rejected.
fn parse_number(raw: &str) -> Result<u32, ParseErrorKind> {
    let token = raw.trim();
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseErrorKind::InvalidNumber);
    }
    token.parse().map_err(|_| ParseErrorKind::InvalidNumber)
}

fn parse_hours(raw: &str) -> Result<(ClockTime, ClockTime), ParseErrorKind> {
    let mut tokens = raw.split_whitespace();
    let (Some(open), Some(close), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(ParseErrorKind::InvalidHours);
    };
    let open: ClockTime = open.parse()?;
    let close: ClockTime = close.parse()?;
    if open >= close {
        return Err(ConfigError::InvertedHours { open, close }.into());
    }
    Ok((open, close))
}

fn parse_event(raw: &str) -> Result<(ClockTime, Request), ParseErrorKind> {
    let mut tokens = raw.split_whitespace();
    let (Some(time), Some(id)) = (tokens.next(), tokens.next()) else {
        return Err(ParseErrorKind::MalformedEvent);
    };
    let time: ClockTime = time.parse()?;
    let id: u32 = id
        .parse()
        .map_err(|_| ParseErrorKind::UnknownEventId(id.to_string()))?;
    let args: Vec<&str> = tokens.collect();

    let expect_args = |expected: usize| {
        if args.len() == expected {
            Ok(())
        } else {
            Err(ParseErrorKind::WrongArity {
                id,
                expected,
                got: args.len(),
            })
        }
    };

    let request = match id {
        1 | 3 | 4 => {
            expect_args(1)?;
            let client = ClientName::new(args[0])?;
            match id {
                1 => Request::Arrive { client },
                3 => Request::Wait { client },
                _ => Request::Leave { client },
            }
        }
        2 => {
            expect_args(2)?;
            let client = ClientName::new(args[0])?;
            let table = args[1]
                .parse()
                .map_err(|_| ParseErrorKind::InvalidTable(args[1].to_string()))?;
            Request::Seat { client, table }
        }
        11..=13 => return Err(ParseErrorKind::ReservedEventId(id)),
        _ => return Err(ParseErrorKind::UnknownEventId(id.to_string())),
    };
    Ok((time, request))
}
