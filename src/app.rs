use clap::Subcommand;
use color_eyre::Result;
use std::sync::Arc;

use crate::config::Config;
use crate::date::today_key;
use crate::features::calendar::CalendarNotes;
use crate::features::fitness::FitnessLog;
use crate::features::goals::GoalChecklist;
use crate::features::three_things::ThreeThings;
use crate::features::writing::{TargetCadence, WritingLog};
use crate::store::{keys, HttpRemoteStore, MemoryRemote, RemoteStore, SyncedCache};

/// Dashboard subcommands. Each maps onto one feature section.
#[derive(Debug, Subcommand)]
pub enum DashboardCommand {
  /// Show today's dashboard summary
  Status,
  /// Log words written today
  Write { words: u64 },
  /// Set the writing target
  Target {
    words: u64,
    /// Measure the target over the trailing week instead of per day
    #[arg(long)]
    weekly: bool,
  },
  /// Manage the daily goal checklist
  #[command(subcommand)]
  Goal(GoalCommand),
  /// Show or set the note for a day
  Note {
    /// Day to note, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    date: Option<String>,
    /// Note text; omit to show the current note
    text: Vec<String>,
  },
  /// List all calendar notes
  Notes,
  /// Set today's three things
  Three { things: Vec<String> },
  /// Manage the fitness log
  #[command(subcommand)]
  Fit(FitCommand),
}

#[derive(Debug, Subcommand)]
pub enum GoalCommand {
  /// Add a goal to the checklist
  Add { text: Vec<String> },
  /// Toggle a goal for today
  Toggle { id: u64 },
  /// Remove a goal
  Remove { id: u64 },
  /// List goals with today's checkmarks
  List,
}

#[derive(Debug, Subcommand)]
pub enum FitCommand {
  /// Log a workout for today
  Log { exercise: String },
  /// Register an exercise type
  AddType { name: String },
  /// List known exercise types
  Types,
}

/// Wire up the cache for the configured backend and dispatch the command.
///
/// The one remote load happens here, before any feature reads; a failed
/// load degrades to an empty cache inside `initialize`.
pub async fn run(config: Config, command: DashboardCommand) -> Result<()> {
  match &config.sync {
    Some(sync) => {
      let remote = HttpRemoteStore::new(sync, Config::get_sync_token())?;
      App::boot(remote).await.dispatch(command)
    }
    None => {
      tracing::debug!("no sync backend configured, running unsynced");
      App::boot(MemoryRemote::new()).await.dispatch(command)
    }
  }
}

/// The assembled dashboard: one cache, one handle per feature.
pub struct App<R: RemoteStore> {
  cache: Arc<SyncedCache<R>>,
  writing: WritingLog<R>,
  goals: GoalChecklist<R>,
  calendar: CalendarNotes<R>,
  three_things: ThreeThings<R>,
  fitness: FitnessLog<R>,
}

impl<R: RemoteStore> App<R> {
  pub async fn boot(remote: R) -> Self {
    let cache = Arc::new(SyncedCache::new(remote));
    cache.initialize().await;

    Self {
      writing: WritingLog::new(Arc::clone(&cache)),
      goals: GoalChecklist::new(Arc::clone(&cache)),
      calendar: CalendarNotes::new(Arc::clone(&cache)),
      three_things: ThreeThings::new(Arc::clone(&cache)),
      fitness: FitnessLog::new(Arc::clone(&cache)),
      cache,
    }
  }

  pub fn dispatch(&self, command: DashboardCommand) -> Result<()> {
    match command {
      DashboardCommand::Status => self.print_status(),
      DashboardCommand::Write { words } => {
        self.set_active_section("writing");
        self.writing.record(words);
        let progress = self.writing.progress();
        println!(
          "Logged {} words. {} of {} ({})",
          words,
          progress.words,
          progress.target,
          progress.cadence.as_str()
        );
      }
      DashboardCommand::Target { words, weekly } => {
        self.set_active_section("writing");
        let cadence = if weekly {
          TargetCadence::Weekly
        } else {
          TargetCadence::Daily
        };
        self.writing.set_target(words, cadence);
        println!("Target set to {} words ({})", words, cadence.as_str());
      }
      DashboardCommand::Goal(cmd) => {
        self.set_active_section("goals");
        self.dispatch_goal(cmd);
      }
      DashboardCommand::Note { date, text } => {
        self.set_active_section("calendar");
        let day = date.unwrap_or_else(today_key);
        if text.is_empty() {
          match self.calendar.note_for(&day) {
            Some(note) => println!("{}: {}", day, note),
            None => println!("{}: no note", day),
          }
        } else {
          self.calendar.set_note(&day, &text.join(" "));
          println!("Note saved for {}", day);
        }
      }
      DashboardCommand::Notes => {
        self.set_active_section("calendar");
        for (day, note) in self.calendar.all() {
          println!("{}: {}", day, note);
        }
      }
      DashboardCommand::Three { things } => {
        self.set_active_section("threeThings");
        self.three_things.set_today(&things);
        for (index, thing) in self.three_things.today().iter().enumerate() {
          println!("{}. {}", index + 1, thing);
        }
      }
      DashboardCommand::Fit(cmd) => {
        self.set_active_section("fitness");
        self.dispatch_fit(cmd);
      }
    }

    Ok(())
  }

  fn dispatch_goal(&self, command: GoalCommand) {
    match command {
      GoalCommand::Add { text } => {
        let goal = self.goals.add(&text.join(" "));
        println!("Added goal {}: {}", goal.id, goal.text);
      }
      GoalCommand::Toggle { id } => match self.goals.toggle(id) {
        Some(true) => println!("Checked goal {}", id),
        Some(false) => println!("Unchecked goal {}", id),
        None => println!("No goal with id {}", id),
      },
      GoalCommand::Remove { id } => {
        if self.goals.remove(id) {
          println!("Removed goal {}", id);
        } else {
          println!("No goal with id {}", id);
        }
      }
      GoalCommand::List => {
        let checked = self.goals.checked_on(&today_key());
        for goal in self.goals.goals() {
          let mark = if checked.contains(&goal.id) { "x" } else { " " };
          println!("[{}] {} {}", mark, goal.id, goal.text);
        }
        let streak = self.goals.streak();
        println!("Achievement streak: {} days", streak.count);
      }
    }
  }

  fn dispatch_fit(&self, command: FitCommand) {
    match command {
      FitCommand::Log { exercise } => {
        self.fitness.log_workout(&exercise);
        println!(
          "Logged {}. Fitness streak: {} days",
          exercise,
          self.fitness.streak().count
        );
      }
      FitCommand::AddType { name } => {
        if self.fitness.add_exercise_type(&name) {
          println!("Added exercise type {}", name);
        } else {
          println!("Exercise type {} already exists", name);
        }
      }
      FitCommand::Types => {
        for name in self.fitness.exercise_types() {
          println!("{}", name);
        }
      }
    }
  }

  fn print_status(&self) {
    let today = today_key();
    println!("Dashboard for {}", today);

    let progress = self.writing.progress();
    println!(
      "Writing: {} today, {} of {} words ({})",
      self.writing.words_on(&today),
      progress.words,
      progress.target,
      progress.cadence.as_str()
    );

    let goals = self.goals.goals();
    let checked = self.goals.checked_on(&today);
    let checked_count = checked
      .iter()
      .filter(|id| goals.iter().any(|g| g.id == **id))
      .count();
    println!(
      "Goals: {} of {} checked, streak {} days",
      checked_count,
      goals.len(),
      self.goals.streak().count
    );

    let things = self.three_things.today();
    if things.is_empty() {
      println!("Three things: not set");
    } else {
      println!("Three things: {}", things.join(", "));
    }

    let workouts = self.fitness.workouts_on(&today);
    println!(
      "Fitness: {} workout(s) today, streak {} days",
      workouts.len(),
      self.fitness.streak().count
    );

    if let Some(note) = self.calendar.note_for(&today) {
      println!("Note: {}", note);
    }
  }

  fn set_active_section(&self, section: &str) {
    self.cache.set(keys::ACTIVE_SECTION, section.into());
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::Value;

  #[tokio::test]
  async fn test_boot_loads_remote_state() {
    let mut fields = std::collections::HashMap::new();
    fields.insert(keys::WRITING_TARGET.to_string(), "750".to_string());

    let app = App::boot(MemoryRemote::with_fields(fields)).await;
    assert_eq!(app.writing.target(), 750);
  }

  #[tokio::test]
  async fn test_dispatch_sets_active_section() {
    let app = App::boot(MemoryRemote::new()).await;
    app
      .dispatch(DashboardCommand::Fit(FitCommand::Log {
        exercise: "running".to_string(),
      }))
      .unwrap();

    assert_eq!(
      app.cache.get(keys::ACTIVE_SECTION, Value::Null),
      Value::String("fitness".to_string())
    );
  }
}
