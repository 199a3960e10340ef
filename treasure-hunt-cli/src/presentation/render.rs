//! Plain-text views of core types for terminal output.

use std::fmt::Write;
use treasure_hunt_core::{
    ActivityData, PlayerLocation, PropagationReport, Quest, QuestState, SosAlert, SyncOutcome,
    UnlockRequest, User, UserAsset,
};

fn mark(done: bool) -> &'static str {
    if done {
        "[x]"
    } else {
        "[ ]"
    }
}

pub fn quest(quest: &Quest) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", quest.title, quest.id);
    if !quest.description.is_empty() {
        let _ = writeln!(out, "  {}", quest.description);
    }
    for (index, task) in quest.tasks.iter().enumerate() {
        let _ = writeln!(out, "{}. {} [{}]", index + 1, task.title, task.id);
        for subtask in &task.sub_tasks {
            let _ = writeln!(
                out,
                "     - {} ({}) [{}]",
                subtask.description, subtask.kind, subtask.id
            );
        }
    }
    out
}

pub fn quest_state(username: &str, state: &QuestState) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {} - {}/{} tasks complete",
        username,
        state.quest.title,
        state.completed_tasks(),
        state.quest.tasks.len()
    );

    for (index, task) in state.quest.tasks.iter().enumerate() {
        let cursor = if index == state.current_task_index { ">" } else { " " };
        let _ = writeln!(
            out,
            "{} {} {}. {} [{}]",
            cursor,
            mark(task.is_completed),
            index + 1,
            task.title,
            task.id
        );
        if let Some(location) = task.completion_location {
            let _ = writeln!(
                out,
                "        completed at {:.5},{:.5}",
                location.latitude, location.longitude
            );
        }
        for subtask in &task.sub_tasks {
            let _ = writeln!(
                out,
                "      {} {} ({}) [{}]",
                mark(subtask.is_completed),
                subtask.description,
                subtask.kind,
                subtask.id
            );
        }
    }

    if state.is_finished() {
        let _ = writeln!(out, "Quest complete!");
    }
    for notification in &state.notifications {
        let _ = writeln!(
            out,
            "! {} ({} on {}): {}",
            notification.id, notification.kind, notification.subtask_id, notification.message
        );
    }
    out
}

pub fn propagation(report: &PropagationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Master quest published to {} players ({} created, {} synced)",
        report.users.len(),
        report.created(),
        report.synced()
    );
    for user in &report.users {
        match &user.outcome {
            SyncOutcome::Created => {
                let _ = writeln!(out, "  {}: new quest", user.username);
            }
            SyncOutcome::Synced {
                previous_cursor,
                cursor,
                added_tasks,
                dropped_tasks,
            } => {
                let _ = writeln!(
                    out,
                    "  {}: cursor {} -> {}, +{} / -{} tasks",
                    user.username, previous_cursor, cursor, added_tasks, dropped_tasks
                );
            }
        }
    }
    out
}

pub fn unlock_request(request: &UnlockRequest) -> String {
    let target = match &request.subtask_description {
        Some(description) => format!("{} / {}", request.task_title, description),
        None => request.task_title.clone(),
    };
    format!(
        "{} [{}] {} {} ({}) - {}: \"{}\" at {}",
        request.id,
        request.status,
        request.first_name,
        request.last_name,
        request.user_id,
        target,
        request.reason,
        request.timestamp.format("%Y-%m-%d %H:%M UTC")
    )
}

pub fn user(user: &User) -> String {
    let deleted = if user.is_deleted { " (deleted)" } else { "" };
    format!(
        "{:<16} {:<7} {:<24} key={}{}",
        user.username,
        user.role.to_string(),
        user.display_name(),
        user.master_key,
        deleted
    )
}

pub fn activity(username: &str, data: &ActivityData) -> String {
    let started = match data.start_time {
        Some(start) => start.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => "unknown".to_string(),
    };
    format!(
        "{}: {:.2} km, +{:.0} m / -{:.0} m, {:.0} kcal, active {} min, resting {} min (since {})",
        username,
        data.distance / 1000.0,
        data.elevation_gain,
        data.elevation_loss,
        data.calories,
        data.active_time / 60,
        data.rest_time / 60,
        started
    )
}

pub fn player_location(location: &PlayerLocation) -> String {
    format!(
        "{:<16} {:<7} {:.5},{:.5} at {}",
        location.username,
        location.status.to_string(),
        location.latitude,
        location.longitude,
        location.timestamp.format("%H:%M:%S UTC")
    )
}

pub fn sos_alert(alert: &SosAlert) -> String {
    format!(
        "{} {} ({}) at {:.5},{:.5} on {}",
        alert.id,
        alert.display_name(),
        alert.username,
        alert.location.latitude,
        alert.location.longitude,
        alert.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

pub fn asset(asset: &UserAsset) -> String {
    let place = match asset.location {
        Some(point) => format!(" at {:.5},{:.5}", point.latitude, point.longitude),
        None => String::new(),
    };
    format!(
        "{} {}/{}{} on {} ({} bytes)",
        asset.id,
        asset.task_id,
        asset.subtask_id,
        place,
        asset.timestamp.format("%Y-%m-%d %H:%M UTC"),
        asset.image_data_url.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use treasure_hunt_core::GeoPoint;

    #[test]
    fn test_quest_state_marks_cursor_and_progress() {
        let mut state = QuestState::fresh(&Quest::default_template());
        state
            .complete_subtask("task-default-1", "subtask-default-1-1", true)
            .unwrap();

        let text = quest_state("adventurer", &state);

        assert!(text.starts_with("adventurer: The Silent Forest's Secret - 0/2 tasks complete"));
        assert!(text.contains("> [ ] 1. The Whispering Leaves [task-default-1]"));
        assert!(text.contains("[x] Find a tree with whispering leaves"));
        assert!(!text.contains("Quest complete!"));
    }

    #[test]
    fn test_quest_state_finished_with_location() {
        let mut state = QuestState::fresh(&Quest::default_template());
        for task in &mut state.quest.tasks {
            task.is_completed = true;
        }
        state.quest.tasks[0].completion_location = Some(GeoPoint::new(7.0, 80.0));
        state.current_task_index = 2;

        let text = quest_state("adventurer", &state);

        assert!(text.contains("completed at 7.00000,80.00000"));
        assert!(text.contains("Quest complete!"));
    }

    #[test]
    fn test_quest_lists_tasks() {
        let text = quest(&Quest::default_template());

        assert!(text.contains("1. The Whispering Leaves [task-default-1]"));
        assert!(text.contains("(riddle) [subtask-default-1-2]"));
    }

    #[test]
    fn test_activity_summary() {
        let mut data = ActivityData::starting_now();
        data.distance = 2500.0;
        data.calories = 140.0;
        data.active_time = 1800;

        let text = activity("adventurer", &data);

        assert!(text.starts_with("adventurer: 2.50 km"));
        assert!(text.contains("140 kcal, active 30 min"));
    }
}
