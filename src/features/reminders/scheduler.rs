//! # Tick Scheduler
//!
//! Best-effort reminder notifier. While armed, a background task fires
//! once every 60 real-time seconds with no alignment to the wall-clock
//! minute boundary; each fire compares the current local `HH:MM` against
//! every active reminder by exact string equality. A reminder whose
//! minute elapses between two ticks is simply missed. This is
//! "fires when the minute matches at the moment of tick evaluation",
//! not a precise alarm.

use chrono::Timelike;
use log::{debug, info};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time;

use super::store::Reminder;

/// Fixed tick period.
const TICK_PERIOD: Duration = Duration::from_secs(60);

/// Scheduler states. There is no paused state: the scheduler is either
/// fully off or firing every period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Armed,
}

/// Owns the recurring tick task.
pub struct ReminderScheduler {
    state: SchedulerState,
    handle: Option<JoinHandle<()>>,
}

impl ReminderScheduler {
    pub fn new() -> Self {
        ReminderScheduler {
            state: SchedulerState::Idle,
            handle: None,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Transition Idle -> Armed. `on_fire` runs once per tick; the first
    /// tick lands one full period after arming. Arming twice is a no-op.
    pub fn arm<F>(&mut self, on_fire: F)
    where
        F: Fn() + Send + 'static,
    {
        if self.state == SchedulerState::Armed {
            return;
        }
        let handle = tokio::spawn(async move {
            let mut ticker = time::interval_at(time::Instant::now() + TICK_PERIOD, TICK_PERIOD);
            loop {
                ticker.tick().await;
                debug!("reminder tick");
                on_fire();
            }
        });
        self.handle = Some(handle);
        self.state = SchedulerState::Armed;
        info!("reminder scheduler armed (60s period)");
    }

    /// Transition Armed -> Idle. Safe to call when already idle.
    pub fn disarm(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            info!("reminder scheduler disarmed");
        }
        self.state = SchedulerState::Idle;
    }
}

impl Default for ReminderScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.disarm();
    }
}

/// Zero-padded `HH:MM` key for any clock-bearing time value.
pub fn minute_key<T: Timelike>(t: &T) -> String {
    format!("{:02}:{:02}", t.hour(), t.minute())
}

/// The current local wall-clock minute as `HH:MM`.
pub fn current_minute() -> String {
    minute_key(&chrono::Local::now())
}

/// Active reminders whose configured time equals `hhmm` exactly.
/// `interval_minutes` deliberately plays no part in matching.
pub fn due_reminders<'a>(reminders: &'a [Reminder], hhmm: &str) -> Vec<&'a Reminder> {
    reminders
        .iter()
        .filter(|r| r.is_active && r.time == hhmm)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reminders::store::ReminderKind;
    use chrono::NaiveTime;

    fn reminder(time: &str, active: bool) -> Reminder {
        Reminder {
            id: format!("r-{}", time),
            user_id: "u-1".into(),
            kind: ReminderKind::Hydration,
            title: "Drink".into(),
            time: time.into(),
            interval_minutes: 0,
            is_active: active,
        }
    }

    #[test]
    fn test_minute_key_zero_pads() {
        let t = NaiveTime::from_hms_opt(9, 5, 44).unwrap();
        assert_eq!(minute_key(&t), "09:05");
        let t = NaiveTime::from_hms_opt(23, 59, 0).unwrap();
        assert_eq!(minute_key(&t), "23:59");
    }

    #[test]
    fn test_match_anywhere_inside_the_minute() {
        let reminders = vec![reminder("09:00", true)];
        // Seconds are irrelevant: 09:00:00 and 09:00:59 share a key.
        for sec in [0, 30, 59] {
            let now = NaiveTime::from_hms_opt(9, 0, sec).unwrap();
            assert_eq!(due_reminders(&reminders, &minute_key(&now)).len(), 1);
        }
        // The minute has passed; the match window is gone.
        let late = NaiveTime::from_hms_opt(9, 1, 15).unwrap();
        assert!(due_reminders(&reminders, &minute_key(&late)).is_empty());
    }

    #[test]
    fn test_inactive_reminders_never_match() {
        let reminders = vec![reminder("09:00", false)];
        assert!(due_reminders(&reminders, "09:00").is_empty());
    }

    #[test]
    fn test_interval_minutes_does_not_widen_match() {
        let mut r = reminder("09:00", true);
        r.interval_minutes = 60;
        let reminders = vec![r];
        assert!(due_reminders(&reminders, "10:00").is_empty());
        assert_eq!(due_reminders(&reminders, "09:00").len(), 1);
    }

    #[test]
    fn test_multiple_due_at_same_minute() {
        let reminders = vec![
            reminder("09:00", true),
            reminder("09:00", true),
            reminder("09:01", true),
        ];
        assert_eq!(due_reminders(&reminders, "09:00").len(), 2);
    }

    #[tokio::test]
    async fn test_arm_disarm_transitions() {
        let mut scheduler = ReminderScheduler::new();
        assert_eq!(scheduler.state(), SchedulerState::Idle);

        scheduler.arm(|| {});
        assert_eq!(scheduler.state(), SchedulerState::Armed);

        // Second arm is a no-op.
        scheduler.arm(|| panic!("second arm must not replace the task"));
        assert_eq!(scheduler.state(), SchedulerState::Armed);

        scheduler.disarm();
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        // Disarming while idle is safe.
        scheduler.disarm();
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }
}
