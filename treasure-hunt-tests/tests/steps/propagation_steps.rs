use cucumber::{then, when};
use treasure_hunt_core::{QuestCommand, SubTask, SyncOutcome, Task};
use treasure_hunt_tests::QuestWorld;

// ===== When Steps =====

#[when(expr = "the administrator renames task {string} to {string}")]
async fn rename_task(world: &mut QuestWorld, task_id: String, title: String) {
    let task = world
        .draft_mut()
        .task_mut(&task_id)
        .expect("Task should exist in the master quest");
    task.title = title;
}

#[when(expr = "the administrator inserts task {string} titled {string} at position {int}")]
async fn insert_task(world: &mut QuestWorld, task_id: String, title: String, position: usize) {
    let task = Task::new(task_id.clone(), title, "Look where the path forks")
        .with_subtask(SubTask::checkbox(format!("{}-1", task_id), "Walk the path"));
    world.draft_mut().tasks.insert(position - 1, task);
}

#[when(expr = "the administrator adds checkbox {string} to task {string}")]
async fn add_subtask(world: &mut QuestWorld, subtask_id: String, task_id: String) {
    let task = world
        .draft_mut()
        .task_mut(&task_id)
        .expect("Task should exist in the master quest");
    task.sub_tasks
        .push(SubTask::checkbox(subtask_id, "Something new to find"));
}

#[when(expr = "the administrator changes the answer of riddle {string} in task {string} to {string}")]
async fn change_riddle_answer(
    world: &mut QuestWorld,
    subtask_id: String,
    task_id: String,
    answer: String,
) {
    let subtask = world
        .draft_mut()
        .task_mut(&task_id)
        .and_then(|t| t.subtask_mut(&subtask_id))
        .expect("Riddle should exist in the master quest");
    subtask.riddle_answer = Some(answer);
}

#[when(expr = "the administrator removes task {string}")]
async fn remove_task(world: &mut QuestWorld, task_id: String) {
    world.draft_mut().tasks.retain(|t| t.id != task_id);
}

#[when(expr = "the administrator swaps tasks {int} and {int}")]
async fn swap_tasks(world: &mut QuestWorld, first: usize, second: usize) {
    world.draft_mut().tasks.swap(first - 1, second - 1);
}

#[when("the administrator publishes the master quest")]
async fn publish(world: &mut QuestWorld) {
    let quest = world.draft_mut().clone();
    world.execute_ok(QuestCommand::PublishTemplate { quest });
}

// ===== Then Steps =====

#[then(expr = "{string} sees task {string} titled {string}")]
async fn sees_task_titled(world: &mut QuestWorld, username: String, task_id: String, title: String) {
    let state = world.state(&username);
    let task = state.quest.task(&task_id).expect("Task should exist");
    assert_eq!(task.title, title);
}

#[then(expr = "{string} has tasks {string}")]
async fn has_tasks(world: &mut QuestWorld, username: String, expected: String) {
    let state = world.state(&username);
    let expected: Vec<&str> = expected.split(',').map(str::trim).collect();
    assert_eq!(state.quest.task_ids(), expected);
}

#[then(expr = "the riddle {string} of task {string} expects {string} for {string}")]
async fn riddle_expects(
    world: &mut QuestWorld,
    subtask_id: String,
    task_id: String,
    answer: String,
    username: String,
) {
    let state = world.state(&username);
    let subtask = state
        .quest
        .task(&task_id)
        .and_then(|t| t.subtask(&subtask_id))
        .expect("Riddle should exist");
    assert_eq!(subtask.riddle_answer.as_deref(), Some(answer.as_str()));
}

#[then(expr = "the propagation report shows {string} as created")]
async fn report_created(world: &mut QuestWorld, username: String) {
    let report = world.last_report.as_ref().expect("Nothing was published");
    assert_eq!(report.outcome_for(&username), Some(&SyncOutcome::Created));
}

#[then(expr = "the propagation report shows {string} as synced")]
async fn report_synced(world: &mut QuestWorld, username: String) {
    let report = world.last_report.as_ref().expect("Nothing was published");
    assert!(matches!(
        report.outcome_for(&username),
        Some(SyncOutcome::Synced { .. })
    ));
}

#[then(expr = "the propagation report does not mention {string}")]
async fn report_skips(world: &mut QuestWorld, username: String) {
    let report = world.last_report.as_ref().expect("Nothing was published");
    assert!(report.outcome_for(&username).is_none());
}
