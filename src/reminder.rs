use crate::audio::AudioPlayer;
use crate::domain::Task;
use crate::notify::{Notifier, PermissionState};
use chrono::NaiveDateTime;
use uuid::Uuid;

/// Maximum schedulable delay for a single one-shot reminder, in
/// milliseconds. Delays beyond this ceiling are dropped rather than chunked.
pub const MAX_TIMER_DELAY_MS: i64 = 2_147_483_647;

/// Fixed fallback sound played when a task has no custom sound
pub const DEFAULT_SOUND: &str = "sounds/dun-dun-dun.mp3";

/// A reminder waiting to fire. Snapshot of the task's notification content
/// at save time; later edits re-arm rather than mutate in place.
#[derive(Debug, Clone)]
struct PendingReminder {
    task_id: Uuid,
    fire_at: NaiveDateTime,
    title: String,
    body: String,
    sound_url: Option<String>,
}

/// One-shot reminder scheduler, polled from the main loop tick.
///
/// Pending reminders live in memory only: exiting the process drops them
/// all, and re-saving a task is the only way to re-arm one. Each task id
/// holds at most one pending reminder.
pub struct ReminderScheduler {
    pending: Vec<PendingReminder>,
    notifier: Box<dyn Notifier>,
    audio: Box<dyn AudioPlayer>,
}

impl ReminderScheduler {
    pub fn new(notifier: Box<dyn Notifier>, audio: Box<dyn AudioPlayer>) -> Self {
        Self {
            pending: Vec::new(),
            notifier,
            audio,
        }
    }

    /// Request notification permission eagerly (editor-mount time),
    /// independent of whether any reminder is ever set
    pub fn request_permission(&mut self) {
        if self.notifier.permission_state() != PermissionState::Granted {
            self.notifier.request_permission();
        }
    }

    /// Arm a reminder for a just-saved task. Any pending reminder for the
    /// same task is dropped first, so edits never leave a stale timer
    /// behind. No-ops: no reminder time, a time not in the future, or a
    /// delay beyond the timer ceiling.
    pub fn arm(&mut self, task: &Task, now: NaiveDateTime) {
        self.cancel(task.id);

        let fire_at = match task.reminder_time {
            Some(t) => t,
            None => return,
        };

        let delay_ms = fire_at.signed_duration_since(now).num_milliseconds();
        if delay_ms <= 0 || delay_ms > MAX_TIMER_DELAY_MS {
            return;
        }

        self.pending.push(PendingReminder {
            task_id: task.id,
            fire_at,
            title: task.title.clone(),
            body: task.reminder_body(),
            sound_url: task.sound_url.clone(),
        });
    }

    /// Drop the pending reminder for a task, if any (called on delete and
    /// before re-arming)
    pub fn cancel(&mut self, task_id: Uuid) {
        self.pending.retain(|r| r.task_id != task_id);
    }

    /// Whether a reminder is pending for the given task
    pub fn is_armed(&self, task_id: Uuid) -> bool {
        self.pending.iter().any(|r| r.task_id == task_id)
    }

    /// Fire every reminder that has come due. Returns how many fired.
    pub fn poll(&mut self, now: NaiveDateTime) -> usize {
        let mut due = Vec::new();
        self.pending.retain(|r| {
            if r.fire_at <= now {
                due.push(r.clone());
                false
            } else {
                true
            }
        });

        for reminder in &due {
            self.fire(reminder);
        }
        due.len()
    }

    fn fire(&self, reminder: &PendingReminder) {
        // Without permission the reminder silently shows nothing; no error,
        // no retry prompt
        if self.notifier.permission_state() != PermissionState::Granted {
            return;
        }

        self.notifier
            .show(&format!("\u{1F514} {}", reminder.title), &reminder.body);

        let sound = reminder.sound_url.as_deref().unwrap_or(DEFAULT_SOUND);
        if let Err(e) = self.audio.play(sound) {
            log::warn!("reminder sound failed: {}", e);
        }
    }
}
