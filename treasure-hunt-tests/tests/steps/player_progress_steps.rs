use cucumber::{then, when};
use treasure_hunt_core::{GeoPoint, QuestCommand, QuestEvent};
use treasure_hunt_tests::QuestWorld;

// ===== When Steps =====

#[when(expr = "{string} answers {string} to riddle {string} of task {string}")]
async fn answer_riddle(
    world: &mut QuestWorld,
    username: String,
    answer: String,
    subtask_id: String,
    task_id: String,
) {
    world.execute(QuestCommand::AnswerRiddle {
        username,
        task_id,
        subtask_id,
        answer,
    });
}

#[when(expr = "{string} completes the current task")]
async fn complete_task(world: &mut QuestWorld, username: String) {
    world.execute(QuestCommand::CompleteCurrentTask {
        username,
        location: None,
    });
}

#[when(expr = "{string} completes the current task at {float}, {float}")]
async fn complete_task_at(world: &mut QuestWorld, username: String, latitude: f64, longitude: f64) {
    world.execute(QuestCommand::CompleteCurrentTask {
        username,
        location: Some(GeoPoint::new(latitude, longitude)),
    });
}

#[when(expr = "the administrator unlocks task {int} for {string}")]
async fn unlock_task(world: &mut QuestWorld, position: usize, username: String) {
    world.execute(QuestCommand::UnlockTask {
        username,
        index: position - 1,
    });
}

#[when(expr = "{string} resets their quest")]
async fn reset_quest(world: &mut QuestWorld, username: String) {
    world.execute_ok(QuestCommand::ResetQuest {
        username: username.clone(),
    });
    world.execute_ok(QuestCommand::StartQuest { username });
}

// ===== Then Steps =====

#[then("the answer was correct")]
async fn answer_correct(world: &mut QuestWorld) {
    assert!(matches!(
        world.last_event(),
        QuestEvent::RiddleAnswered { correct: true, .. }
    ));
}

#[then("the answer was wrong")]
async fn answer_wrong(world: &mut QuestWorld) {
    assert!(matches!(
        world.last_event(),
        QuestEvent::RiddleAnswered { correct: false, .. }
    ));
}

#[then(expr = "{string} has finished the quest")]
async fn finished_quest(world: &mut QuestWorld, username: String) {
    let state = world.state(&username);
    assert!(state.is_finished());
    assert_eq!(state.completed_tasks(), state.quest.tasks.len());
}

#[then(expr = "task {string} of {string} was completed at {float}, {float}")]
async fn completed_at(
    world: &mut QuestWorld,
    task_id: String,
    username: String,
    latitude: f64,
    longitude: f64,
) {
    let state = world.state(&username);
    let task = state.quest.task(&task_id).expect("Task should exist");
    assert!(task.is_completed);
    assert_eq!(
        task.completion_location,
        Some(GeoPoint::new(latitude, longitude))
    );
}
