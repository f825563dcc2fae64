use serde::{Deserialize, Serialize};

/// Days before the end date during which an open window is reported as a deadline.
pub const DEFAULT_DEADLINE_THRESHOLD_DAYS: i64 = 7;

/// How long a window with a start date but no end date stays open.
pub const DEFAULT_ROLLING_WINDOW_DAYS: i64 = 90;

/// Tunable thresholds applied by the window rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPolicy {
    pub deadline_threshold_days: i64,
    pub rolling_window_days: i64,
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self {
            deadline_threshold_days: DEFAULT_DEADLINE_THRESHOLD_DAYS,
            rolling_window_days: DEFAULT_ROLLING_WINDOW_DAYS,
        }
    }
}
