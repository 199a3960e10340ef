use cucumber::{then, when};
use treasure_hunt_core::{NewUnlockRequest, QuestCommand, UnlockRequestStore};
use treasure_hunt_tests::QuestWorld;

fn last_request_id(world: &QuestWorld) -> String {
    world
        .last_request_id
        .clone()
        .expect("No unlock request submitted")
}

// ===== When Steps =====

#[when(expr = "{string} requests an unlock of sub-task {string} of task {string} because {string}")]
async fn request_subtask_unlock(
    world: &mut QuestWorld,
    username: String,
    subtask_id: String,
    task_id: String,
    reason: String,
) {
    world.execute(QuestCommand::SubmitUnlockRequest {
        request: NewUnlockRequest {
            user_id: username,
            task_id,
            subtask_id: Some(subtask_id),
            reason,
        },
    });
}

#[when(expr = "{string} requests an unlock of task {string} because {string}")]
async fn request_task_unlock(world: &mut QuestWorld, username: String, task_id: String, reason: String) {
    world.execute(QuestCommand::SubmitUnlockRequest {
        request: NewUnlockRequest {
            user_id: username,
            task_id,
            subtask_id: None,
            reason,
        },
    });
}

#[when("the administrator approves the request")]
async fn approve(world: &mut QuestWorld) {
    let request_id = last_request_id(world);
    world.execute_ok(QuestCommand::ApproveUnlockRequest { request_id });
}

#[when("the administrator rejects the request")]
async fn reject(world: &mut QuestWorld) {
    let request_id = last_request_id(world);
    world.execute_ok(QuestCommand::RejectUnlockRequest { request_id });
}

#[when(expr = "{string} dismisses their notifications")]
async fn dismiss_all(world: &mut QuestWorld, username: String) {
    let state = world.state(&username);
    for notification in state.notifications {
        world.execute_ok(QuestCommand::DismissNotification {
            username: username.clone(),
            notification_id: notification.id,
        });
    }
}

// ===== Then Steps =====

#[then(expr = "the request status is {string}")]
async fn request_status(world: &mut QuestWorld, status: String) {
    let request_id = last_request_id(world);
    let request = UnlockRequestStore::new(world.store())
        .get(&request_id)
        .expect("Failed to read requests")
        .expect("Request should exist");
    assert_eq!(request.status.to_string(), status);
}

#[then(expr = "the request names task {string} for {string}")]
async fn request_names_task(world: &mut QuestWorld, title: String, full_name: String) {
    let request_id = last_request_id(world);
    let request = UnlockRequestStore::new(world.store())
        .get(&request_id)
        .expect("Failed to read requests")
        .expect("Request should exist");
    assert_eq!(request.task_title, title);
    assert_eq!(format!("{} {}", request.first_name, request.last_name), full_name);
}

#[then(expr = "{string} has {int} {string} notification(s)")]
async fn notification_count(world: &mut QuestWorld, username: String, count: usize, kind: String) {
    let state = world.state(&username);
    let matching = state
        .notifications
        .iter()
        .filter(|n| n.kind.to_string() == kind)
        .count();
    assert_eq!(matching, count);
}

#[then(expr = "{string} has no notifications")]
async fn no_notifications(world: &mut QuestWorld, username: String) {
    assert!(world.state(&username).notifications.is_empty());
}
