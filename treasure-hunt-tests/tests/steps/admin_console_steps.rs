use cucumber::{then, when};
use treasure_hunt_core::{GeoPoint, LocationStore, QuestCommand, SosAlertStore};
use treasure_hunt_tests::QuestWorld;

// ===== When Steps =====

#[when(expr = "{string} sends an SOS from {float}, {float}")]
async fn send_sos(world: &mut QuestWorld, username: String, latitude: f64, longitude: f64) {
    world.execute_ok(QuestCommand::SendSosAlert {
        username,
        location: GeoPoint::new(latitude, longitude),
    });
}

#[when(expr = "{string} reports the position {float}, {float}")]
async fn report_position(world: &mut QuestWorld, username: String, latitude: f64, longitude: f64) {
    world.execute_ok(QuestCommand::RecordLocation {
        username,
        location: GeoPoint::new(latitude, longitude),
    });
}

#[when(expr = "the administrator deletes {string}")]
async fn delete_player(world: &mut QuestWorld, username: String) {
    world.execute_ok(QuestCommand::SoftDeleteUser { username });
}

#[when(expr = "{string} starts the quest")]
async fn start_quest(world: &mut QuestWorld, username: String) {
    world.execute(QuestCommand::StartQuest { username });
}

// ===== Then Steps =====

#[then(expr = "the console shows {int} SOS alert(s) from {string}")]
async fn sos_alerts_from(world: &mut QuestWorld, count: usize, username: String) {
    let alerts = SosAlertStore::new(world.store())
        .list()
        .expect("Failed to read alerts");
    let matching = alerts.iter().filter(|a| a.username == username).count();
    assert_eq!(matching, count);
}

#[then(expr = "the live map shows {string} as {string}")]
async fn map_shows(world: &mut QuestWorld, username: String, status: String) {
    let map = LocationStore::new(world.store())
        .players()
        .expect("Failed to read locations");
    let entry = map
        .iter()
        .find(|l| l.username == username)
        .unwrap_or_else(|| panic!("'{}' is not on the map", username));
    assert_eq!(entry.status.to_string(), status);
}

#[then(expr = "the live map does not show {string}")]
async fn map_hides(world: &mut QuestWorld, username: String) {
    let map = LocationStore::new(world.store())
        .players()
        .expect("Failed to read locations");
    assert!(map.iter().all(|l| l.username != username));
}
