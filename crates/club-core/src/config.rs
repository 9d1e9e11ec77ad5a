//! Fixed parameters of a business day.

use std::num::NonZeroUsize;

use thiserror::Error;

use crate::clock::ClockTime;

/// Largest number of tables a club may have.
pub const MAX_TABLES: usize = 10_000;

/// Invalid club parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("club must have at least one table")]
    NoTables,

    #[error("club cannot have more than {max} tables")]
    TooManyTables { max: usize },

    #[error("hourly rate must be positive")]
    ZeroRate,

    /// Opening time is not strictly before closing time.
    #[error("opening time {open} must be earlier than closing time {close}")]
    InvertedHours { open: ClockTime, close: ClockTime },
}

/// Club parameters for one run. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClubConfig {
    open: ClockTime,
    close: ClockTime,
    tables: NonZeroUsize,
    hourly_rate: u32,
}

impl ClubConfig {
    pub fn new(
        open: ClockTime,
        close: ClockTime,
        tables: usize,
        hourly_rate: u32,
    ) -> Result<Self, ConfigError> {
        let tables = NonZeroUsize::new(tables).ok_or(ConfigError::NoTables)?;
        if tables.get() > MAX_TABLES {
            return Err(ConfigError::TooManyTables { max: MAX_TABLES });
        }
        if hourly_rate == 0 {
            return Err(ConfigError::ZeroRate);
        }
        if open >= close {
            return Err(ConfigError::InvertedHours { open, close });
        }
        Ok(Self {
            open,
            close,
            tables,
            hourly_rate,
        })
    }

    pub const fn open(&self) -> ClockTime {
        self.open
    }

    pub const fn close(&self) -> ClockTime {
        self.close
    }

    /// Number of tables, also the waiting queue capacity.
    pub const fn tables(&self) -> usize {
        self.tables.get()
    }

    pub const fn hourly_rate(&self) -> u32 {
        self.hourly_rate
    }

    /// Whether `time` falls within operating hours, both ends inclusive.
    pub fn is_open_at(&self, time: ClockTime) -> bool {
        (self.open..=self.close).contains(&time)
    }

    /// Charge for a session of `minutes`, rounded up to whole hours.
    ///
    /// Saturates at `u64::MAX` instead of wrapping.
    pub fn charge_for(&self, minutes: u64) -> u64 {
        minutes.div_ceil(60).saturating_mul(u64::from(self.hourly_rate))
    }
}
