/// Cross-platform notification support, modeled after the browser
/// Notification API: a permission gate plus a fire-and-forget `show`.
use std::process::Command;

/// Notification permission state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Granted,
    Denied,
    Default,
}

/// System notification capability
pub trait Notifier {
    fn permission_state(&self) -> PermissionState;

    /// Request permission once, eagerly. Idempotent.
    fn request_permission(&mut self);

    /// Display a system notification. Fire-and-forget; failures are invisible.
    fn show(&self, title: &str, body: &str);
}

/// Desktop notifier shelling out to the platform notification command.
/// Desktop notifications need no permission prompt, so permission is
/// granted from the start.
#[derive(Default)]
pub struct SystemNotifier;

impl Notifier for SystemNotifier {
    fn permission_state(&self) -> PermissionState {
        PermissionState::Granted
    }

    fn request_permission(&mut self) {}

    fn show(&self, title: &str, body: &str) {
        #[cfg(target_os = "macos")]
        {
            let script = format!(
                r#"display notification "{}" with title "{}""#,
                body.replace('"', "\\\""),
                title.replace('"', "\\\"")
            );

            let _ = Command::new("osascript").arg("-e").arg(&script).output();
        }

        #[cfg(target_os = "linux")]
        {
            let _ = Command::new("notify-send").arg(title).arg(body).output();
        }

        #[cfg(not(any(target_os = "macos", target_os = "linux")))]
        {
            let _ = (title, body);
        }
    }
}
