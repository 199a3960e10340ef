//! Merging an edited master quest into every player's quest state.
//!
//! The master template owns definitions (titles, riddle text, sub-task
//! descriptions, kinds, answers); each player owns their progress
//! (completion flags, completion locations, cursor, notifications).
//! Tasks and sub-tasks are matched by id only. The synced task list
//! follows the master order; tasks the master no longer has are dropped.

use crate::domain::{Quest, QuestState, SubTask, Task};
use crate::error::Result;
use crate::storage::{KeyValueStore, MasterTemplateStore, QuestStateStore, UserDirectory};
use instant::Instant;
use tracing::{debug, info};

/// What propagation did to one player's state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Player had no quest state; a fresh one was created
    Created,

    /// Existing state was merged with the template
    Synced {
        previous_cursor: usize,
        cursor: usize,
        added_tasks: usize,
        dropped_tasks: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSync {
    pub username: String,
    pub outcome: SyncOutcome,
}

/// Summary of a propagation run, in directory order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagationReport {
    pub users: Vec<UserSync>,
}

impl PropagationReport {
    pub fn created(&self) -> usize {
        self.users
            .iter()
            .filter(|u| u.outcome == SyncOutcome::Created)
            .count()
    }

    pub fn synced(&self) -> usize {
        self.users.len() - self.created()
    }

    pub fn outcome_for(&self, username: &str) -> Option<&SyncOutcome> {
        self.users
            .iter()
            .find(|u| u.username == username)
            .map(|u| &u.outcome)
    }
}

/// Writes the master template and brings every player's state in line with it
pub struct PropagationEngine<'a, S: KeyValueStore + ?Sized> {
    kv: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> PropagationEngine<'a, S> {
    pub fn new(kv: &'a S) -> Self {
        Self { kv }
    }

    /// Save `master` as the template and sync every player, one at a time.
    ///
    /// A storage failure stops the loop; players already processed keep
    /// their new state.
    pub fn propagate(&self, master: &Quest) -> Result<PropagationReport> {
        let started = Instant::now();
        MasterTemplateStore::new(self.kv).write(master)?;

        let states = QuestStateStore::new(self.kv);
        let mut report = PropagationReport::default();

        for user in UserDirectory::new(self.kv).players()? {
            let outcome = match states.read(&user.username)? {
                None => {
                    states.write(&user.username, &QuestState::fresh(master))?;
                    SyncOutcome::Created
                }
                Some(old) => {
                    let synced = sync_quest_state(&old, master);
                    let outcome = SyncOutcome::Synced {
                        previous_cursor: old.current_task_index,
                        cursor: synced.current_task_index,
                        added_tasks: count_missing(&synced.quest, &old.quest),
                        dropped_tasks: count_missing(&old.quest, &synced.quest),
                    };
                    states.write(&user.username, &synced)?;
                    outcome
                }
            };

            debug!("Propagated template to {}: {:?}", user.username, outcome);
            report.users.push(UserSync {
                username: user.username,
                outcome,
            });
        }

        info!(
            "Propagated master quest '{}' to {} players ({} created, {} synced) in {:?}",
            master.title,
            report.users.len(),
            report.created(),
            report.synced(),
            started.elapsed()
        );
        Ok(report)
    }
}

/// Merge a player's state with the master template.
///
/// Title, description and task definitions come from `master`; completion
/// flags come from `old` where the id still exists. The cursor stays on the
/// task it pointed at: same index if the task did not move, its new index if
/// it moved and is still incomplete, otherwise the first incomplete task.
pub fn sync_quest_state(old: &QuestState, master: &Quest) -> QuestState {
    let tasks: Vec<Task> = master
        .tasks
        .iter()
        .map(|master_task| match old.quest.task(&master_task.id) {
            Some(old_task) => sync_task(old_task, master_task),
            None => master_task.fresh_copy(),
        })
        .collect();

    let mut synced = old.clone();
    synced.quest.title = master.title.clone();
    synced.quest.description = master.description.clone();
    synced.quest.tasks = tasks;
    synced.current_task_index = reposition_cursor(&old.quest, &synced.quest, old.current_task_index);
    synced
}

/// Master definition with the player's progress laid over it
fn sync_task(old_task: &Task, master_task: &Task) -> Task {
    let sub_tasks = master_task
        .sub_tasks
        .iter()
        .map(|master_subtask| SubTask {
            is_completed: old_task
                .subtask(&master_subtask.id)
                .is_some_and(|s| s.is_completed),
            ..master_subtask.clone()
        })
        .collect();

    Task {
        sub_tasks,
        is_completed: old_task.is_completed,
        completion_location: old_task.completion_location,
        ..master_task.clone()
    }
}

fn reposition_cursor(old: &Quest, synced: &Quest, cursor: usize) -> usize {
    let Some(current) = old.tasks.get(cursor) else {
        return synced.first_incomplete_index();
    };

    if synced.tasks.get(cursor).is_some_and(|t| t.id == current.id) {
        return cursor;
    }

    // The current task moved: follow it unless it is already done
    match synced.task_position(&current.id) {
        Some(index) if !synced.tasks[index].is_completed => index,
        _ => synced.first_incomplete_index(),
    }
}

/// Tasks in `from` whose id is absent in `to`
fn count_missing(from: &Quest, to: &Quest) -> usize {
    from.tasks
        .iter()
        .filter(|t| to.task(&t.id).is_none())
        .count()
}
