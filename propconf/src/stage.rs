//! Read-only status snapshot of a scheduling stage.
//!
//! A [`StageInfo`] is produced by a scheduler and handed to monitoring
//! consumers. It is a plain value: no identity beyond its fields, no
//! mutating methods. The serialized shape (camelCase JSON field names) is
//! what external status tools consume; unknown fields are ignored on input
//! so that adding fields later stays compatible.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Progress snapshot of one stage attempt.
///
/// The task counters are expected, but not required, to satisfy
/// `active + completed + failed <= total`; see
/// [`is_consistent`](Self::is_consistent).
///
/// # Examples
///
/// ```
/// use propconf::StageInfo;
///
/// let stage = StageInfo::new(4, 0, 1_700_000_000_000, "map at job.rs:12", 10, 3, 6, 1);
/// assert_eq!(stage.num_tasks(), 10);
/// assert_eq!(stage.num_pending_tasks(), 0);
/// assert!(stage.is_consistent());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageInfo {
    stage_id: i32,
    current_attempt_id: i32,
    submission_time: i64,
    name: String,
    num_tasks: u32,
    num_active_tasks: u32,
    num_completed_tasks: u32,
    num_failed_tasks: u32,
}

impl StageInfo {
    /// Creates a snapshot. `submission_time` is milliseconds since the Unix
    /// epoch.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        stage_id: i32,
        current_attempt_id: i32,
        submission_time: i64,
        name: impl Into<String>,
        num_tasks: u32,
        num_active_tasks: u32,
        num_completed_tasks: u32,
        num_failed_tasks: u32,
    ) -> Self {
        Self {
            stage_id,
            current_attempt_id,
            submission_time,
            name: name.into(),
            num_tasks,
            num_active_tasks,
            num_completed_tasks,
            num_failed_tasks,
        }
    }

    /// Stage identifier.
    #[must_use]
    pub fn stage_id(&self) -> i32 {
        self.stage_id
    }

    /// Attempt number of the stage currently running.
    #[must_use]
    pub fn current_attempt_id(&self) -> i32 {
        self.current_attempt_id
    }

    /// Submission time in milliseconds since the Unix epoch.
    #[must_use]
    pub fn submission_time(&self) -> i64 {
        self.submission_time
    }

    /// Display name of the stage.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total number of tasks in the stage.
    #[must_use]
    pub fn num_tasks(&self) -> u32 {
        self.num_tasks
    }

    /// Tasks currently running.
    #[must_use]
    pub fn num_active_tasks(&self) -> u32 {
        self.num_active_tasks
    }

    /// Tasks that finished successfully.
    #[must_use]
    pub fn num_completed_tasks(&self) -> u32 {
        self.num_completed_tasks
    }

    /// Tasks that failed.
    #[must_use]
    pub fn num_failed_tasks(&self) -> u32 {
        self.num_failed_tasks
    }

    /// The submission time as a UTC timestamp, if it is in chrono's range.
    #[must_use]
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.submission_time)
    }

    /// Tasks not yet started: total minus active, completed and failed,
    /// floored at zero.
    #[must_use]
    pub fn num_pending_tasks(&self) -> u32 {
        self.num_tasks
            .saturating_sub(self.num_active_tasks)
            .saturating_sub(self.num_completed_tasks)
            .saturating_sub(self.num_failed_tasks)
    }

    /// Whether `active + completed + failed <= total` holds.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let accounted = u64::from(self.num_active_tasks)
            + u64::from(self.num_completed_tasks)
            + u64::from(self.num_failed_tasks);
        accounted <= u64::from(self.num_tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StageInfo {
        StageInfo::new(7, 2, 1_700_000_000_000, "reduceByKey", 10, 3, 6, 1)
    }

    #[test]
    fn test_accessors_return_supplied_values() {
        let stage = sample();
        assert_eq!(stage.stage_id(), 7);
        assert_eq!(stage.current_attempt_id(), 2);
        assert_eq!(stage.submission_time(), 1_700_000_000_000);
        assert_eq!(stage.name(), "reduceByKey");
        assert_eq!(stage.num_tasks(), 10);
        assert_eq!(stage.num_active_tasks(), 3);
        assert_eq!(stage.num_completed_tasks(), 6);
        assert_eq!(stage.num_failed_tasks(), 1);
    }

    #[test]
    fn test_clone_is_equal_value() {
        let stage = sample();
        let copy = stage.clone();
        assert_eq!(stage, copy);
        assert_eq!(copy.num_active_tasks(), 3);
    }

    #[test]
    fn test_submitted_at() {
        let at = sample().submitted_at().unwrap();
        assert_eq!(at.timestamp_millis(), 1_700_000_000_000);
        assert!(StageInfo::new(0, 0, i64::MAX, "", 0, 0, 0, 0)
            .submitted_at()
            .is_none());
    }

    #[test]
    fn test_inconsistent_counters_are_representable() {
        let stage = StageInfo::new(1, 0, 0, "odd", 2, 2, 2, 2);
        assert!(!stage.is_consistent());
        assert_eq!(stage.num_pending_tasks(), 0);
    }

    #[test]
    fn test_consistency_does_not_overflow() {
        let stage = StageInfo::new(1, 0, 0, "big", u32::MAX, u32::MAX, u32::MAX, 0);
        assert!(!stage.is_consistent());
    }

    #[test]
    fn test_pending_tasks() {
        let stage = StageInfo::new(1, 0, 0, "s", 10, 2, 3, 1);
        assert_eq!(stage.num_pending_tasks(), 4);
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["stageId"], 7);
        assert_eq!(json["currentAttemptId"], 2);
        assert_eq!(json["submissionTime"], 1_700_000_000_000_i64);
        assert_eq!(json["numFailedTasks"], 1);
    }

    #[test]
    fn test_json_ignores_unknown_fields() {
        let json = r#"{
            "stageId": 1, "currentAttemptId": 0, "submissionTime": 5,
            "name": "s", "numTasks": 4, "numActiveTasks": 1,
            "numCompletedTasks": 2, "numFailedTasks": 0,
            "numSkippedTasks": 9
        }"#;
        let stage: StageInfo = serde_json::from_str(json).unwrap();
        assert_eq!(stage.num_completed_tasks(), 2);
        assert_eq!(stage.name(), "s");
    }
}
