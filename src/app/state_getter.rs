//! Gets the current game state from the controller and converts it to JSON.

use std::sync::Mutex;

use log::{debug, error};

use crate::app::controller::GameController;
use crate::app::game_app::lock;
use crate::error::GameError;

/// コントローラーの状態を JSON 文字列で返すよ。
/// (GameApp::get_state_json のロジック)
pub(crate) fn get_state_json(controller: &Mutex<GameController>) -> Result<String, GameError> {
    let snapshot = lock(controller).snapshot();
    debug!(
        "Getting game state: round {}, {} in hand, {} placed",
        snapshot.round_id,
        snapshot.hand.len(),
        snapshot.assembly.len()
    );
    serde_json::to_string(&snapshot).map_err(|e| {
        error!("Failed to serialize game state: {}", e);
        GameError::Dom(format!("snapshot serialization failed: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::controller::AppEvent;
    use crate::config::GameConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn state_json_reflects_the_round() {
        let mut controller = GameController::with_rng(GameConfig::default(), StdRng::seed_from_u64(5));
        controller.handle(AppEvent::Start).unwrap();
        let json = get_state_json(&Mutex::new(controller)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["score"], 0);
        assert_eq!(value["remaining_seconds"], 30);
        assert_eq!(value["effects_on"], false);
        assert_eq!(value["hand"][0]["entity"].as_u64().is_some(), true);
    }
}
