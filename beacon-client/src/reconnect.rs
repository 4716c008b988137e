use std::time::Duration;

pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(2);
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub base_delay: Duration,
    pub max_attempts: u32,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            base_delay: DEFAULT_BASE_DELAY,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl ReconnectPolicy {
    /// Never retry.
    pub fn disabled() -> Self {
        Self {
            base_delay: Duration::ZERO,
            max_attempts: 0,
        }
    }

    /// Delay before the `attempt`-th retry (1-based): `attempt × base_delay`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting { attempt: u32, delay: Duration },
    GaveUp,
}

/// Retry bookkeeping for one client. Pure, so it can be driven without sockets.
#[derive(Debug, Clone)]
pub struct ReconnectState {
    policy: ReconnectPolicy,
    attempts: u32,
}

impl ReconnectState {
    pub fn new(policy: ReconnectPolicy) -> Self {
        Self {
            policy,
            attempts: 0,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn on_connected(&mut self) -> ConnectionState {
        self.attempts = 0;
        ConnectionState::Connected
    }

    /// Called whenever the socket closes or a connect attempt fails.
    pub fn on_closed(&mut self) -> ConnectionState {
        if self.attempts >= self.policy.max_attempts {
            return ConnectionState::GaveUp;
        }

        self.attempts += 1;
        ConnectionState::Reconnecting {
            attempt: self.attempts,
            delay: self.policy.delay_for(self.attempts),
        }
    }
}
