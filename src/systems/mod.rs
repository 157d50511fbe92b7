// src/systems/mod.rs
//! World を書き換えるゲームロジック (System) たち。

pub mod deal_system;
pub mod move_card_system;
pub mod verify_system;

pub use deal_system::{DealRoundSystem, DealtRound};
pub use move_card_system::{MoveCardSystem, MoveOutcome};
pub use verify_system::VerifySystem;

use crate::components::game_state::GameState;
use crate::ecs::{World, GAME_STATE_ENTITY};

/// `GameState` のコピーを返す。まだ無ければデフォルト値。
pub fn game_state(world: &World) -> GameState {
    world
        .get_component::<GameState>(GAME_STATE_ENTITY)
        .copied()
        .unwrap_or_default()
}

/// シングルトンがまだ無ければデフォルト値で作る。
/// カードより先に呼んでおかないと、予約 ID 0 をカードに取られちゃうよ！
pub fn ensure_game_state(world: &mut World) {
    if world.get_component::<GameState>(GAME_STATE_ENTITY).is_none() {
        world.create_entity_with_id(GAME_STATE_ENTITY);
        world.add_component(GAME_STATE_ENTITY, GameState::default());
    }
}

/// `GameState` を読んで、`f` で書き換えて、書き戻す。シングルトンが無ければここで作るよ。
pub fn update_game_state<T>(world: &mut World, f: impl FnOnce(&mut GameState) -> T) -> T {
    let mut state = game_state(world);
    let result = f(&mut state);
    world.create_entity_with_id(GAME_STATE_ENTITY);
    world.add_component(GAME_STATE_ENTITY, state);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_creates_the_singleton_on_first_use() {
        let mut world = World::new();
        assert_eq!(game_state(&world), GameState::default());
        let score = update_game_state(&mut world, |state| state.score.increment());
        assert_eq!(score, 1);
        assert!(world.is_entity_alive(GAME_STATE_ENTITY));
        assert_eq!(game_state(&world).score.value(), 1);
    }

    #[test]
    fn ensure_reserves_the_singleton_id() {
        let mut world = World::new();
        ensure_game_state(&mut world);
        assert_eq!(game_state(&world), GameState::default());
        assert_ne!(world.create_entity(), GAME_STATE_ENTITY);
    }
}
