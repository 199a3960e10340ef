use crate::domain::{GeoPoint, Quest, Task, UnlockNotification};
use serde::{Deserialize, Serialize};

/// A player's live copy of the quest plus their progress cursor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestState {
    /// Independent copy of the master quest, never a reference to it
    pub quest: Quest,

    /// Index of the task the player may work on; equals the task count when finished
    pub current_task_index: usize,

    #[serde(default)]
    pub notifications: Vec<UnlockNotification>,
}

/// Errors that can occur when progressing through a quest
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum QuestError {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Sub-task not found: {subtask_id} (task {task_id})")]
    SubTaskNotFound { task_id: String, subtask_id: String },

    #[error("Sub-task is not a riddle: {0}")]
    NotARiddle(String),

    #[error("Quest already finished")]
    QuestFinished,

    #[error("Task {0} still has incomplete sub-tasks")]
    SubTasksIncomplete(String),

    #[error("Task index {index} out of range (quest has {len} tasks)")]
    TaskIndexOutOfRange { index: usize, len: usize },

    #[error("Notification not found: {0}")]
    NotificationNotFound(String),
}

impl QuestState {
    /// New player state: a progress-free copy of the template with the cursor at the start
    pub fn fresh(template: &Quest) -> Self {
        Self {
            quest: template.fresh_copy(),
            current_task_index: 0,
            notifications: Vec::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.current_task_index >= self.quest.tasks.len()
    }

    pub fn current_task(&self) -> Option<&Task> {
        self.quest.tasks.get(self.current_task_index)
    }

    /// Number of tasks marked complete
    pub fn completed_tasks(&self) -> usize {
        self.quest.tasks.iter().filter(|t| t.is_completed).count()
    }

    // ===== Player Actions =====

    /// Set a sub-task's completion flag
    pub fn complete_subtask(
        &mut self,
        task_id: &str,
        subtask_id: &str,
        completed: bool,
    ) -> Result<(), QuestError> {
        let task = self.task_mut(task_id)?;
        let subtask = task
            .subtask_mut(subtask_id)
            .ok_or_else(|| QuestError::SubTaskNotFound {
                task_id: task_id.to_string(),
                subtask_id: subtask_id.to_string(),
            })?;

        subtask.is_completed = completed;
        Ok(())
    }

    /// Check a riddle answer; a correct answer completes the sub-task.
    ///
    /// A wrong answer leaves the sub-task as it was.
    pub fn answer_riddle(
        &mut self,
        task_id: &str,
        subtask_id: &str,
        answer: &str,
    ) -> Result<bool, QuestError> {
        let task = self.task_mut(task_id)?;
        let subtask = task
            .subtask_mut(subtask_id)
            .ok_or_else(|| QuestError::SubTaskNotFound {
                task_id: task_id.to_string(),
                subtask_id: subtask_id.to_string(),
            })?;

        if !subtask.is_riddle() {
            return Err(QuestError::NotARiddle(subtask_id.to_string()));
        }

        let correct = subtask.check_answer(answer);
        if correct {
            subtask.is_completed = true;
        }
        Ok(correct)
    }

    /// Complete the task under the cursor and advance to the next one.
    ///
    /// Returns the new cursor position.
    pub fn complete_current_task(&mut self, location: Option<GeoPoint>) -> Result<usize, QuestError> {
        let index = self.current_task_index;
        let task = self
            .quest
            .tasks
            .get_mut(index)
            .ok_or(QuestError::QuestFinished)?;

        if !task.all_subtasks_completed() {
            return Err(QuestError::SubTasksIncomplete(task.id.clone()));
        }

        task.is_completed = true;
        task.completion_location = location;
        self.current_task_index = index + 1;

        tracing::debug!(
            "Task {} completed, cursor {} -> {}",
            task.id,
            index,
            self.current_task_index
        );
        Ok(self.current_task_index)
    }

    pub fn dismiss_notification(
        &mut self,
        notification_id: &str,
    ) -> Result<UnlockNotification, QuestError> {
        let index = self
            .notifications
            .iter()
            .position(|n| n.id == notification_id)
            .ok_or_else(|| QuestError::NotificationNotFound(notification_id.to_string()))?;

        Ok(self.notifications.remove(index))
    }

    pub fn notifications_for(&self, subtask_id: &str) -> Vec<&UnlockNotification> {
        self.notifications
            .iter()
            .filter(|n| n.subtask_id == subtask_id)
            .collect()
    }

    // ===== Administrator Actions =====

    /// Move the cursor directly to a task (index may equal the task count)
    pub fn unlock_task(&mut self, index: usize) -> Result<(), QuestError> {
        let len = self.quest.tasks.len();
        if index > len {
            return Err(QuestError::TaskIndexOutOfRange { index, len });
        }

        self.current_task_index = index;
        Ok(())
    }

    /// Force a sub-task complete. Returns false if it already was.
    pub fn unlock_subtask(&mut self, task_id: &str, subtask_id: &str) -> Result<bool, QuestError> {
        let task = self.task_mut(task_id)?;
        let subtask = task
            .subtask_mut(subtask_id)
            .ok_or_else(|| QuestError::SubTaskNotFound {
                task_id: task_id.to_string(),
                subtask_id: subtask_id.to_string(),
            })?;

        let changed = !subtask.is_completed;
        subtask.is_completed = true;
        Ok(changed)
    }

    pub fn push_notification(&mut self, notification: UnlockNotification) {
        self.notifications.push(notification);
    }

    fn task_mut(&mut self, task_id: &str) -> Result<&mut Task, QuestError> {
        self.quest
            .task_mut(task_id)
            .ok_or_else(|| QuestError::TaskNotFound(task_id.to_string()))
    }
}
