//! Progression notification capability.

/// Transient progression notifications.
///
/// Fire-and-forget: implementations display or record the notification and
/// return nothing. The tracker never waits on or inspects the result, so
/// presentation stays fully decoupled from the state machine.
pub trait Notifier: Send + Sync {
    /// The user crossed a level threshold.
    fn level_up(&self, old_level: u8, new_level: u8);

    /// The user gained points without changing level.
    fn points_gained(&self, points: u64);
}

/// Notifier that prints to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn level_up(&self, old_level: u8, new_level: u8) {
        println!("LEVEL UP  {} -> {}", old_level, new_level);
    }

    fn points_gained(&self, points: u64) {
        println!("+{} points", points);
    }
}

/// Notifier that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn level_up(&self, _old_level: u8, _new_level: u8) {}

    fn points_gained(&self, _points: u64) {}
}
