use crossbeam_channel as cbc;
use serde;

use crate::building::notification::Notification;

#[derive(serde::Serialize)]
struct LoggedNotification<'a> {
    at: String,
    #[serde(flatten)]
    notification: &'a Notification,
}

/// One JSON line for `notification`, stamped with `at`.
pub fn format_line(notification: &Notification, at: chrono::DateTime<chrono::Local>) -> serde_json::Result<String> {
    serde_json::to_string(&LoggedNotification {
        at: at.to_rfc3339(),
        notification,
    })
}

/// Prints notifications to stdout until every sender is gone.
pub fn print_notifications(rx: cbc::Receiver<Notification>) {
    for notification in rx.iter() {
        match format_line(&notification, chrono::Local::now()) {
            Ok(line) => println!("{}", line),
            Err(e) => log::error!("Could not format {:?}: {}", notification, e),
        }
    }
}
