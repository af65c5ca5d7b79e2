// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

//! Wall-clock source used to report how long a render took.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// Time of day with one-second resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Time {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl Time {
    pub fn new(hours: u8, minutes: u8, seconds: u8) -> Self {
        Time {
            hours,
            minutes,
            seconds,
        }
    }

    pub fn from_seconds(total: u32) -> Self {
        let total = total % SECONDS_PER_DAY;
        Time {
            hours: (total / 3600) as u8,
            minutes: (total / 60 % 60) as u8,
            seconds: (total % 60) as u8,
        }
    }

    pub fn as_seconds(&self) -> u32 {
        self.hours as u32 * 3600 + self.minutes as u32 * 60 + self.seconds as u32
    }

    /// Seconds from `self` to `later`, assuming less than a day passed.
    pub fn seconds_until(&self, later: &Time) -> u32 {
        (later.as_seconds() + SECONDS_PER_DAY - self.as_seconds()) % SECONDS_PER_DAY
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

pub trait Clock {
    fn now(&self) -> Time;
}

/// Reads the host's clock (UTC).
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Time {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Time::from_seconds((elapsed.as_secs() % SECONDS_PER_DAY as u64) as u32)
    }
}

// {{{ tests


// }}}
