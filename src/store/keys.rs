//! Cache keys shared between the features and the remote document.
//!
//! One remote field exists per key; the value shapes behind each key are
//! owned by the feature that reads and writes it.

/// Last dashboard section the user interacted with.
pub const ACTIVE_SECTION: &str = "activeSection";

/// Writing word-count target (number).
pub const WRITING_TARGET: &str = "writingTarget";
/// Target cadence: "daily" or "weekly".
pub const WRITING_TARGET_TYPE: &str = "writingTargetType";
/// Map of date key → words written that day.
pub const WRITING_SESSIONS: &str = "writingSessions";

/// List of `{id, text}` checklist goals.
pub const DAILY_GOALS: &str = "dailyGoals";
/// Map of date key → checked goal ids.
pub const DAILY_CHECKED: &str = "dailyChecked";
/// Streak state for all-goals-checked days.
pub const ACHIEVEMENT_STREAK: &str = "achievementStreak";

/// Map of date key → note text.
pub const CALENDAR_NOTES: &str = "calendarNotes";

/// Map of date key → up to three focus entries.
pub const THREE_THINGS: &str = "threeThings";

/// List of known exercise type names.
pub const FITNESS_EXERCISE_TYPES: &str = "fitnessExerciseTypes";
/// Map of date key → exercise types logged that day.
pub const FITNESS_WORKOUTS: &str = "fitnessWorkouts";
/// Streak state for days with at least one workout.
pub const FITNESS_STREAK: &str = "fitnessStreak";
