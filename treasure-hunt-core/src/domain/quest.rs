use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task ID (stable, assigned by the quest editor, never reused)
pub type TaskId = String;

/// Sub-task ID (stable, unique within its task)
pub type SubTaskId = String;

/// Kind of work a sub-task asks the player to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubTaskKind {
    Checkbox,
    Photo,
    Riddle,
    ScreenshotUpload,
}

impl fmt::Display for SubTaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubTaskKind::Checkbox => write!(f, "checkbox"),
            SubTaskKind::Photo => write!(f, "photo"),
            SubTaskKind::Riddle => write!(f, "riddle"),
            SubTaskKind::ScreenshotUpload => write!(f, "screenshot_upload"),
        }
    }
}

/// Where a player stood when they completed a task
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Atomic unit of work inside a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubTask {
    pub id: SubTaskId,

    pub description: String,

    #[serde(rename = "type")]
    pub kind: SubTaskKind,

    /// Expected answer, only meaningful for riddle sub-tasks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub riddle_answer: Option<String>,

    #[serde(default)]
    pub is_completed: bool,
}

impl SubTask {
    pub fn new(id: impl Into<SubTaskId>, description: impl Into<String>, kind: SubTaskKind) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            kind,
            riddle_answer: None,
            is_completed: false,
        }
    }

    pub fn checkbox(id: impl Into<SubTaskId>, description: impl Into<String>) -> Self {
        Self::new(id, description, SubTaskKind::Checkbox)
    }

    pub fn photo(id: impl Into<SubTaskId>, description: impl Into<String>) -> Self {
        Self::new(id, description, SubTaskKind::Photo)
    }

    pub fn screenshot_upload(id: impl Into<SubTaskId>, description: impl Into<String>) -> Self {
        Self::new(id, description, SubTaskKind::ScreenshotUpload)
    }

    pub fn riddle(
        id: impl Into<SubTaskId>,
        description: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            riddle_answer: Some(answer.into()),
            ..Self::new(id, description, SubTaskKind::Riddle)
        }
    }

    pub fn is_riddle(&self) -> bool {
        self.kind == SubTaskKind::Riddle
    }

    /// Compare a player's answer against the riddle answer.
    ///
    /// Surrounding whitespace is ignored on both sides and the comparison is
    /// case-insensitive. A sub-task without an answer never matches.
    pub fn check_answer(&self, answer: &str) -> bool {
        match &self.riddle_answer {
            Some(expected) => normalize_answer(expected) == normalize_answer(answer),
            None => false,
        }
    }
}

fn normalize_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}

/// One stage of a quest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,

    pub title: String,

    #[serde(default)]
    pub riddle: String,

    /// Set by the explicit "complete task" action only, never derived from sub-tasks
    #[serde(default)]
    pub is_completed: bool,

    #[serde(default)]
    pub sub_tasks: Vec<SubTask>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_location: Option<GeoPoint>,
}

impl Task {
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>, riddle: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            riddle: riddle.into(),
            is_completed: false,
            sub_tasks: Vec::new(),
            completion_location: None,
        }
    }

    pub fn with_subtask(mut self, subtask: SubTask) -> Self {
        self.sub_tasks.push(subtask);
        self
    }

    pub fn subtask(&self, subtask_id: &str) -> Option<&SubTask> {
        self.sub_tasks.iter().find(|s| s.id == subtask_id)
    }

    pub fn subtask_mut(&mut self, subtask_id: &str) -> Option<&mut SubTask> {
        self.sub_tasks.iter_mut().find(|s| s.id == subtask_id)
    }

    pub fn all_subtasks_completed(&self) -> bool {
        self.sub_tasks.iter().all(|s| s.is_completed)
    }

    /// Clear completion on the task and every sub-task
    pub fn reset_progress(&mut self) {
        self.is_completed = false;
        self.completion_location = None;
        for subtask in &mut self.sub_tasks {
            subtask.is_completed = false;
        }
    }

    /// Structural copy with all progress cleared
    pub fn fresh_copy(&self) -> Self {
        let mut task = self.clone();
        task.reset_progress();
        task
    }
}

/// Quest definition: title, description and ordered tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Quest {
    pub fn new(id: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            tasks: Vec::new(),
        }
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == task_id)
    }

    pub fn task_position(&self, task_id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }

    pub fn task_ids(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.id.as_str()).collect()
    }

    /// Index of the first incomplete task, or the task count when all are done
    pub fn first_incomplete_index(&self) -> usize {
        self.tasks
            .iter()
            .position(|t| !t.is_completed)
            .unwrap_or(self.tasks.len())
    }

    /// Clear completion flags at every depth
    pub fn reset_progress(&mut self) {
        for task in &mut self.tasks {
            task.reset_progress();
        }
    }

    /// Structural copy with all progress cleared
    pub fn fresh_copy(&self) -> Self {
        let mut quest = self.clone();
        quest.reset_progress();
        quest
    }

    /// Template seeded on first administrator access so the editor is never empty
    pub fn default_template() -> Self {
        Quest::new(
            "master-quest-static-default",
            "The Silent Forest's Secret",
            "A mysterious silence has fallen over the once-lively forest. Uncover the secrets \
             hidden within its ancient heart. This is a default quest template for the \
             administrator to edit.",
        )
        .with_task(
            Task::new(
                "task-default-1",
                "The Whispering Leaves",
                "I speak without a mouth and hear without ears. I have no body, but I come \
                 alive with wind. What am I?",
            )
            .with_subtask(SubTask::checkbox(
                "subtask-default-1-1",
                "Find a tree with whispering leaves and mark it as found.",
            ))
            .with_subtask(SubTask::riddle(
                "subtask-default-1-2",
                "Solve the riddle of the wind.",
                "An echo",
            )),
        )
        .with_task(
            Task::new(
                "task-default-2",
                "The Sunken Stone",
                "Find a stone that weeps by the river's edge, marked with the symbol of a \
                 crescent moon.",
            )
            .with_subtask(SubTask::photo(
                "subtask-default-2-1",
                "Take a photo of the crescent moon symbol on the stone.",
            ))
            .with_subtask(SubTask::checkbox(
                "subtask-default-2-2",
                "Confirm you have found the sunken stone.",
            )),
        )
    }
}
