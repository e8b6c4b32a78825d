//! User-visible notifications

/// Shown when the soundtrack can't be played
pub const PLAYER_ERROR: &str = "Player error";

/// Sink for short messages shown to the user
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Writes notifications to the log
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, message: &str) {
        tracing::info!(target: "crawl::notify", "{}", message);
    }
}
