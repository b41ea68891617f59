//! The progression tracker service.

use crate::events::EventBus;
use crate::notify::{NoopNotifier, Notifier};
use levelgate_core::{
    AwardOutcome, LevelChange, LevelProgress, Profile, ProgressionConfig,
};
use levelgate_storage::{Storage, StorageError};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Error type for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Errors that can occur during tracker operations.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Underlying storage failure
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Progression tracker over a storage backend.
///
/// All mutations funnel through this service: the storage handle sits
/// behind a mutex so read-modify-write cycles on the user record never
/// interleave, even with the tracker shared across tasks.
pub struct ProgressTracker<S: Storage> {
    storage: Arc<tokio::sync::Mutex<S>>,
    config: Arc<ProgressionConfig>,
    notifier: Arc<dyn Notifier>,
    events: EventBus,
}

impl<S: Storage> ProgressTracker<S> {
    /// Create a tracker over `storage` with the given configuration.
    pub fn new(storage: S, config: ProgressionConfig) -> Self {
        Self {
            storage: Arc::new(tokio::sync::Mutex::new(storage)),
            config: Arc::new(config),
            notifier: Arc::new(NoopNotifier),
            events: EventBus::default(),
        }
    }

    /// Set the notifier.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// The static progression tables, read-only.
    pub fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    /// Subscribe to award outcomes published by [`track_activity`].
    ///
    /// [`track_activity`]: ProgressTracker::track_activity
    pub fn subscribe(&self) -> broadcast::Receiver<AwardOutcome> {
        self.events.subscribe()
    }

    // === Persisted-record operations ===

    /// Read the active user record. No side effects.
    pub async fn current_user(&self) -> Result<Option<Profile>> {
        Ok(self.storage.lock().await.load_current().await?)
    }

    /// Select the known user named `name` as active, creating the record
    /// (zero points, level zero) on first login.
    pub async fn login(&self, name: &str) -> Result<Profile> {
        let mut storage = self.storage.lock().await;

        let profile = storage
            .list_profiles()
            .await?
            .into_iter()
            .find(|p| p.name == name)
            .unwrap_or_else(|| {
                tracing::info!(name, "creating profile on first login");
                Profile::new(name)
            });

        storage.upsert_profile(&profile).await?;
        storage.save_current(&profile).await?;
        Ok(profile)
    }

    /// Clear the active user record.
    pub async fn logout(&self) -> Result<()> {
        Ok(self.storage.lock().await.clear_current().await?)
    }

    /// List every known user record.
    pub async fn known_users(&self) -> Result<Vec<Profile>> {
        Ok(self.storage.lock().await.list_profiles().await?)
    }

    /// Award the configured points for `activity` to the active user.
    ///
    /// Returns `Ok(None)` when nobody is logged in; callers must not award
    /// anonymously. An unknown activity is a zero-point no-op that returns
    /// the record unchanged without touching storage. Otherwise the record
    /// is re-leveled and persisted to both the active slot and the
    /// collection before the outcome is returned.
    pub async fn award_points(&self, activity: &str) -> Result<Option<AwardOutcome>> {
        let mut storage = self.storage.lock().await;

        let Some(mut user) = storage.load_current().await? else {
            return Ok(None);
        };

        let points_gained = self.config.rewards.reward_for(activity);
        if points_gained == 0 {
            return Ok(Some(AwardOutcome {
                user,
                points_gained: 0,
                level_change: None,
            }));
        }

        user.points += points_gained;

        let old_level = user.level;
        let new_level = self.config.levels.level_of(user.points);
        let level_change = if new_level > old_level {
            user.level = new_level;
            Some(LevelChange {
                from: old_level,
                to: new_level,
            })
        } else {
            None
        };

        user.version += 1;
        user.updated_at = chrono::Utc::now();

        storage.upsert_profile(&user).await?;
        storage.save_current(&user).await?;

        if let Some(change) = level_change {
            tracing::info!(
                user = %user.id,
                from = change.from,
                to = change.to,
                "level up"
            );
        } else {
            tracing::debug!(user = %user.id, activity, points_gained, "points awarded");
        }

        Ok(Some(AwardOutcome {
            user,
            points_gained,
            level_change,
        }))
    }

    /// Award points for `activity`, notify observers, and publish the
    /// outcome as a domain event.
    ///
    /// A level-up notification takes priority over a plain points-gained
    /// notification.
    pub async fn track_activity(&self, activity: &str) -> Result<Option<AwardOutcome>> {
        let Some(outcome) = self.award_points(activity).await? else {
            return Ok(None);
        };

        if let Some(change) = outcome.level_change {
            self.notifier.level_up(change.from, change.to);
        } else if outcome.points_gained > 0 {
            self.notifier.points_gained(outcome.points_gained);
        }

        self.events.publish(outcome.clone());
        Ok(Some(outcome))
    }

    /// Whether the caller may access `resource`. Anonymous callers see
    /// only the configured public resources; logged-in callers see what
    /// their level unlocks.
    pub async fn can_access(&self, resource: &str) -> Result<bool> {
        match self.current_user().await? {
            None => Ok(self.config.is_public(resource)),
            Some(user) => Ok(self.config.unlocks.is_unlocked(resource, user.level)),
        }
    }

    // === Pure table queries ===

    /// Level for a point total.
    pub fn level_of(&self, points: u64) -> u8 {
        self.config.levels.level_of(points)
    }

    /// Resources visible at `level`.
    pub fn unlocked_resources(&self, level: u8) -> BTreeSet<String> {
        self.config.unlocks.unlocked_at(level)
    }

    /// Resources not yet visible at `level`.
    pub fn locked_resources(&self, level: u8) -> BTreeSet<String> {
        self.config.unlocks.locked_at(level)
    }

    /// Whether `resource` is visible at `level`.
    pub fn is_resource_unlocked(&self, resource: &str, level: u8) -> bool {
        self.config.unlocks.is_unlocked(resource, level)
    }

    /// Progress toward the next level for a user record.
    pub fn next_level_progress(&self, user: &Profile) -> LevelProgress {
        self.config.next_level_progress(user.points, user.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use levelgate_storage::MemoryStorage;
    use std::sync::Mutex;

    fn tracker() -> ProgressTracker<MemoryStorage> {
        ProgressTracker::new(MemoryStorage::new(), ProgressionConfig::default())
    }

    /// Notifier that records every call for assertions.
    #[derive(Default)]
    struct RecordingNotifier {
        calls: Mutex<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn level_up(&self, old_level: u8, new_level: u8) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("level_up {} {}", old_level, new_level));
        }

        fn points_gained(&self, points: u64) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("points_gained {}", points));
        }
    }

    #[tokio::test]
    async fn award_without_a_user_is_absent() {
        let tracker = tracker();
        assert!(tracker.award_points("chat_message").await.unwrap().is_none());
        assert!(tracker.track_activity("chat_message").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn login_creates_then_reselects_the_profile() {
        let tracker = tracker();

        let created = tracker.login("kaoru").await.unwrap();
        assert_eq!(created.points, 0);
        assert_eq!(created.level, 0);

        // Award some points, log out, and log back in.
        tracker.award_points("mission_complete").await.unwrap();
        tracker.logout().await.unwrap();
        assert!(tracker.current_user().await.unwrap().is_none());

        let back = tracker.login("kaoru").await.unwrap();
        assert_eq!(back.id, created.id);
        assert_eq!(back.points, 100);

        // Logging in again does not duplicate the collection entry.
        assert_eq!(tracker.known_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn mission_complete_reaches_level_one_exactly() {
        let tracker = tracker();
        tracker.login("kaoru").await.unwrap();

        let outcome = tracker
            .award_points("mission_complete")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(outcome.points_gained, 100);
        assert_eq!(outcome.user.points, 100);
        assert_eq!(outcome.user.level, 1);
        assert!(outcome.leveled_up());
        assert_eq!(outcome.level_change, Some(LevelChange { from: 0, to: 1 }));

        // Persisted to both the active slot and the collection.
        let current = tracker.current_user().await.unwrap().unwrap();
        assert_eq!(current.points, 100);
        assert_eq!(current.version, 1);
    }

    #[tokio::test]
    async fn small_award_below_the_threshold_keeps_the_level() {
        let tracker = tracker();
        tracker.login("kaoru").await.unwrap();

        // 90 points, then a 5-point chat message: 95 < 100.
        for _ in 0..9 {
            tracker.award_points("profile_view").await.unwrap();
        }
        let outcome = tracker.award_points("chat_message").await.unwrap().unwrap();

        assert_eq!(outcome.user.points, 95);
        assert_eq!(outcome.user.level, 0);
        assert!(!outcome.leveled_up());
    }

    #[tokio::test]
    async fn unknown_activity_is_a_noop_that_returns_the_record() {
        let tracker = tracker();
        tracker.login("kaoru").await.unwrap();
        tracker.award_points("chat_message").await.unwrap();

        let before = tracker.current_user().await.unwrap().unwrap();
        let outcome = tracker
            .award_points("unknown_activity")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(outcome.points_gained, 0);
        assert!(!outcome.leveled_up());
        assert_eq!(outcome.user, before);

        // Nothing was persisted: version and timestamp are untouched.
        let after = tracker.current_user().await.unwrap().unwrap();
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn awards_are_monotonic_in_points_and_level() {
        let tracker = tracker();
        tracker.login("kaoru").await.unwrap();

        let mut last_points = 0;
        let mut last_level = 0;
        for activity in ["first_login", "daily_login", "mission_complete", "nope"] {
            if let Some(outcome) = tracker.award_points(activity).await.unwrap() {
                assert!(outcome.user.points >= last_points);
                assert!(outcome.user.level >= last_level);
                last_points = outcome.user.points;
                last_level = outcome.user.level;
            }
        }
    }

    #[tokio::test]
    async fn anonymous_access_is_limited_to_public_resources() {
        let tracker = tracker();
        assert!(tracker.can_access("login.html").await.unwrap());
        assert!(tracker.can_access("index.html").await.unwrap());
        assert!(!tracker.can_access("dashboard.html").await.unwrap());
        assert!(!tracker.can_access("classified.html").await.unwrap());
    }

    #[tokio::test]
    async fn logged_in_access_follows_the_unlock_table() {
        let tracker = tracker();
        tracker.login("kaoru").await.unwrap();

        assert!(tracker.can_access("dashboard.html").await.unwrap());
        assert!(!tracker.can_access("chat.html").await.unwrap());

        // 100 points -> level 1 unlocks chat.
        tracker.award_points("mission_complete").await.unwrap();
        assert!(tracker.can_access("chat.html").await.unwrap());
        assert!(!tracker.can_access("classified.html").await.unwrap());
    }

    #[tokio::test]
    async fn max_level_progress_is_flagged() {
        let tracker = tracker();
        tracker.login("kaoru").await.unwrap();

        // 20 missions = 2000 points = level 5.
        for _ in 0..20 {
            tracker.award_points("mission_complete").await.unwrap();
        }
        let user = tracker.current_user().await.unwrap().unwrap();
        assert_eq!(user.level, 5);
        assert!(tracker.next_level_progress(&user).is_max_level());
    }

    #[tokio::test]
    async fn track_activity_prefers_level_up_notifications() {
        let notifier = Arc::new(RecordingNotifier::default());
        let tracker = tracker().with_notifier(notifier.clone());
        tracker.login("kaoru").await.unwrap();

        tracker.track_activity("chat_message").await.unwrap();
        // 95 more points crosses the level-1 threshold.
        tracker.track_activity("first_login").await.unwrap();
        tracker.track_activity("daily_login").await.unwrap();
        tracker.track_activity("division_view").await.unwrap();

        let calls = notifier.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![
                "points_gained 5",
                "points_gained 50",
                "points_gained 25",
                "level_up 0 1",
            ]
        );
    }

    #[tokio::test]
    async fn track_activity_publishes_a_domain_event() {
        let tracker = tracker();
        let mut rx = tracker.subscribe();
        tracker.login("kaoru").await.unwrap();

        tracker.track_activity("mission_complete").await.unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.points_gained, 100);
        assert_eq!(event.level_change, Some(LevelChange { from: 0, to: 1 }));
        assert_eq!(event.user.name, "kaoru");
    }

    #[tokio::test]
    async fn pure_queries_mirror_the_tables() {
        let tracker = tracker();
        assert_eq!(tracker.level_of(95), 0);
        assert_eq!(tracker.level_of(250), 2);
        assert!(tracker.is_resource_unlocked("missions.html", 4));
        assert!(!tracker.is_resource_unlocked("missions.html", 3));

        let unlocked = tracker.unlocked_resources(1);
        let locked = tracker.locked_resources(1);
        assert!(unlocked.contains("chat.html"));
        assert!(locked.contains("phenomenon.html"));
        assert!(unlocked.is_disjoint(&locked));
    }
}
