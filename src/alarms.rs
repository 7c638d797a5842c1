//! Alarm management
//!
//! Rate-limited reporting for repeated client mistakes. A bad-input alarm
//! is raised once per client and logged at WARN; repeats only bump a
//! counter at DEBUG, so a misbehaving client cannot flood the logs with
//! identical complaints. Releasing the alarm reports how often it fired.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Alarm behavior knobs.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AlarmConfig {
    /// Log every repeated occurrence at WARN instead of only the first.
    #[serde(default)]
    pub relog_repeats: bool,
}

#[derive(Debug)]
struct BadInputAlarm {
    occurrences: u64,
    raised_at: DateTime<Utc>,
}

/// Shared alarm registry. One instance is shared across request paths;
/// interior mutability keeps the reporting API on `&self`.
#[derive(Debug)]
pub struct AlarmManager {
    relog_repeats: bool,
    bad_inputs: Mutex<HashMap<String, BadInputAlarm>>,
}

impl Default for AlarmManager {
    fn default() -> Self {
        Self::new(AlarmConfig::default())
    }
}

impl AlarmManager {
    pub fn new(config: AlarmConfig) -> Self {
        AlarmManager {
            relog_repeats: config.relog_repeats,
            bad_inputs: Mutex::new(HashMap::new()),
        }
    }

    /// Report bad input from a client. Returns true when this raises a new
    /// alarm, false when an alarm for the client was already active.
    pub fn bad_input(&self, client: &str, details: &str) -> bool {
        let mut bad_inputs = self.bad_inputs.lock();

        if let Some(alarm) = bad_inputs.get_mut(client) {
            alarm.occurrences += 1;
            if self.relog_repeats {
                warn!(client, details, occurrences = alarm.occurrences, "bad input");
            } else {
                debug!(client, details, occurrences = alarm.occurrences, "bad input repeated");
            }
            return false;
        }

        bad_inputs.insert(
            client.to_string(),
            BadInputAlarm {
                occurrences: 1,
                raised_at: Utc::now(),
            },
        );
        warn!(client, details, "bad input alarm raised");
        true
    }

    /// Clear the bad-input alarm for a client, logging its lifetime
    /// occurrence count. Returns false when no alarm was active.
    pub fn bad_input_release(&self, client: &str) -> bool {
        let removed = self.bad_inputs.lock().remove(client);
        match removed {
            Some(alarm) => {
                info!(
                    client,
                    occurrences = alarm.occurrences,
                    raised_at = %alarm.raised_at.to_rfc3339(),
                    "bad input alarm released"
                );
                true
            }
            None => false,
        }
    }

    /// Number of currently raised bad-input alarms.
    pub fn active_bad_inputs(&self) -> usize {
        self.bad_inputs.lock().len()
    }
}
