use std::fmt::{Display, Formatter, Result as FmtResult};

/// Where the cache manager is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CacheState {
    /// Nothing loaded yet, or everything was just cleared.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// Serving a working set from a successful fetch or a fresh cache record.
    Ready,
    /// Serving older or built-in quotes because the last fetch failed.
    Degraded,
}

impl Display for CacheState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready => "live",
            Self::Degraded => "offline",
        })
    }
}

/// How a status message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Success,
    Info,
    Warning,
    Error,
}

/// A user-facing notification about something the core just did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub state: CacheState,
    pub level: Level,
    pub message: String,
}

impl Status {
    pub fn new(state: CacheState, level: Level, message: impl Into<String>) -> Self {
        Self {
            state,
            level,
            message: message.into(),
        }
    }

    pub fn success(state: CacheState, message: impl Into<String>) -> Self {
        Self::new(state, Level::Success, message)
    }

    pub fn info(state: CacheState, message: impl Into<String>) -> Self {
        Self::new(state, Level::Info, message)
    }

    pub fn warning(state: CacheState, message: impl Into<String>) -> Self {
        Self::new(state, Level::Warning, message)
    }

    pub fn error(state: CacheState, message: impl Into<String>) -> Self {
        Self::new(state, Level::Error, message)
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "[{}] {}", self.state, self.message)
    }
}
