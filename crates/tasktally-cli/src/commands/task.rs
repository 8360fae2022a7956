//! Task management commands for CLI.

use clap::Subcommand;
use tasktally_core::{
    format_time, operations, project_all, sort_derived, Config, DerivedTask, SortMode, StorageProvider,
    StoredData, SystemClock,
};
use tasktally_core::Clock;

use super::{load_state, local_store};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Task name
        name: String,
        /// Make the new task the active one
        #[arg(long)]
        start: bool,
    },
    /// Make a task the active one
    Start {
        /// Task ID
        id: String,
    },
    /// Rename a task
    Rename {
        /// Task ID
        id: String,
        /// New name
        name: String,
    },
    /// Delete a task and its history
    Delete {
        /// Task ID
        id: String,
    },
    /// Delete every task and all history
    DeleteAll,
    /// Erase all recorded time, keeping tasks
    Reset,
    /// Stop whichever task is running
    Stop,
    /// Undo the most recent activation
    Pause,
    /// List tasks with their tracked time
    List {
        /// Output JSON
        #[arg(long)]
        json: bool,
        /// Sort order: total or alphabetical (default: from config)
        #[arg(long)]
        sort: Option<String>,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = local_store()?;
    let state = load_state(&store)?;
    let clock = SystemClock;

    let next = match action {
        TaskAction::Add { name, start } => {
            let next = if start {
                operations::add_and_start_task(&state, &name, &clock)
            } else {
                operations::add_task(&state, &name, &clock)
            };
            match next.tasks.last() {
                Some(task) if next != state => println!("Task created: {}", task.id),
                _ => return Err("task name must not be blank".into()),
            }
            next
        }
        TaskAction::Start { id } => {
            if state.find_task(&id).is_none() {
                return Err(format!("Task not found: {id}").into());
            }
            println!("Task started: {id}");
            operations::start_task(&state, &id, &clock)
        }
        TaskAction::Rename { id, name } => {
            if state.find_task(&id).is_none() {
                return Err(format!("Task not found: {id}").into());
            }
            println!("Task renamed: {id}");
            operations::update_task_name(&state, &id, &name, &clock)
        }
        TaskAction::Delete { id } => {
            if state.find_task(&id).is_none() {
                return Err(format!("Task not found: {id}").into());
            }
            println!("Task deleted: {id}");
            operations::delete_task(&state, &id, &clock)
        }
        TaskAction::DeleteAll => {
            println!("All tasks deleted");
            operations::delete_all_tasks(&state, &clock)
        }
        TaskAction::Reset => {
            println!("All timers reset");
            operations::reset_all_tasks(&state, &clock)
        }
        TaskAction::Stop => {
            println!("Stopped");
            operations::stop_all_tasks(&state, &clock)
        }
        TaskAction::Pause => {
            println!("Last activation undone");
            operations::pause_current_task(&state, &clock)
        }
        TaskAction::List { json, sort } => {
            let config = Config::load_or_default();
            let mode = match sort.as_deref() {
                Some(s) => SortMode::parse(s).ok_or_else(|| format!("unknown sort mode: {s}"))?,
                None => state.sort_mode.unwrap_or(config.display.sort_mode),
            };
            print_list(&state, mode, config.display.show_idle, json)?;
            return Ok(());
        }
    };

    if next != state {
        store.save(&next)?;
        let sync = Config::load_or_default().sync;
        if sync.auto_sync && sync.remote_path.is_some() {
            super::sync::run(None)?;
        }
    }
    Ok(())
}

fn print_list(
    state: &StoredData,
    mode: SortMode,
    show_idle: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let view: Vec<DerivedTask> = sort_derived(
        project_all(&state.tasks, &state.events, SystemClock.now_ms()),
        mode,
    )
    .into_iter()
    .filter(|t| show_idle || t.total_time > 0 || t.is_running)
    .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if view.is_empty() {
        println!("No tasks");
        return Ok(());
    }
    for task in &view {
        let marker = if task.is_running { "*" } else { " " };
        let session = if task.is_running {
            format!("now {}", format_time(task.current_session_time))
        } else {
            format!("last {}", format_time(task.last_session_time))
        };
        println!(
            "{marker} {:<14} {:<24} total {:<8} {session}",
            task.id,
            task.name,
            format_time(task.total_time)
        );
    }
    Ok(())
}
