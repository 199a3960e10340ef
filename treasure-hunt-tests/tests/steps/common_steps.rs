use cucumber::{given, then};
use treasure_hunt_core::{KeyValueStore, NewUser, QuestCommand, QuestStateStore};
use treasure_hunt_tests::QuestWorld;

// ===== Given Steps =====

#[given("the default game is initialized")]
async fn default_game(world: &mut QuestWorld) {
    world.execute_ok(QuestCommand::InitializeDefaults);
}

#[given(expr = "player {string} has registered")]
async fn player_registered(world: &mut QuestWorld, username: String) {
    world.execute_ok(QuestCommand::AddUser {
        user: NewUser {
            username: username.clone(),
            master_key: format!("{}.001", username),
            first_name: "Test".to_string(),
            last_name: username,
        },
    });
}

#[given(expr = "{string} has no quest yet")]
async fn no_quest_yet(world: &mut QuestWorld, username: String) {
    QuestStateStore::new(world.store())
        .reset(&username)
        .expect("Failed to reset quest state");
}

#[given(expr = "{string} has finished task {string}")]
async fn finished_task(world: &mut QuestWorld, username: String, task_id: String) {
    world.finish_current_task(&username, &task_id);
}

#[given(expr = "{string} has completed sub-task {string} of task {string}")]
async fn completed_subtask(
    world: &mut QuestWorld,
    username: String,
    subtask_id: String,
    task_id: String,
) {
    world.execute_ok(QuestCommand::CompleteSubTask {
        username,
        task_id,
        subtask_id,
        completed: true,
    });
}

// ===== Then Steps =====

#[then(expr = "the current task of {string} is {string}")]
async fn current_task_is(world: &mut QuestWorld, username: String, task_id: String) {
    let state = world.state(&username);
    let current = state
        .current_task()
        .unwrap_or_else(|| panic!("'{}' has finished the quest", username));
    assert_eq!(current.id, task_id);
}

#[then(expr = "sub-task {string} of task {string} is complete for {string}")]
async fn subtask_complete(world: &mut QuestWorld, subtask_id: String, task_id: String, username: String) {
    let state = world.state(&username);
    let subtask = state
        .quest
        .task(&task_id)
        .and_then(|t| t.subtask(&subtask_id))
        .expect("Sub-task should exist");
    assert!(subtask.is_completed, "{} should be complete", subtask_id);
}

#[then(expr = "sub-task {string} of task {string} is not complete for {string}")]
async fn subtask_not_complete(
    world: &mut QuestWorld,
    subtask_id: String,
    task_id: String,
    username: String,
) {
    let state = world.state(&username);
    let subtask = state
        .quest
        .task(&task_id)
        .and_then(|t| t.subtask(&subtask_id))
        .expect("Sub-task should exist");
    assert!(!subtask.is_completed, "{} should not be complete", subtask_id);
}

#[then(expr = "the command fails with {string}")]
async fn command_fails_with(world: &mut QuestWorld, fragment: String) {
    assert!(world.last_command_failed(), "Expected failure, got {:?}", world.last_event());
    let message = world.last_error_message().unwrap_or_default();
    assert!(
        message.contains(&fragment),
        "Error '{}' should mention '{}'",
        message,
        fragment
    );
}

#[then(expr = "the stored state of {string} has cursor {int}")]
async fn stored_cursor(world: &mut QuestWorld, username: String, cursor: u64) {
    let raw = world
        .store()
        .get(&format!("treasure-quest-state-{}", username))
        .expect("Failed to read store")
        .expect("No stored state");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("Stored state is not JSON");
    assert_eq!(json["currentTaskIndex"], serde_json::json!(cursor));
}
