use crate::consts;
use std::fmt;
use std::time::Duration;

/// The snake's speed, in ticks per second
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub(crate) struct Speed(u32);

impl Speed {
    pub(crate) const BASE: Speed = Speed(consts::BASE_SPEED);
    pub(crate) const MAX: Speed = Speed(consts::MAX_SPEED);

    pub(crate) fn get(self) -> u32 {
        self.0
    }

    /// Speed up by one tick per second, up to [`Speed::MAX`]
    pub(crate) fn increase(&mut self) {
        *self = Speed(self.0.saturating_add(1)).min(Speed::MAX);
    }

    /// Time between ticks at this speed
    pub(crate) fn period(self) -> Duration {
        Duration::from_secs(1) / self.0
    }
}

impl Default for Speed {
    fn default() -> Speed {
        Speed::BASE
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0.to_string())
    }
}
