// src/systems/deal_system.rs

use log::info;
use rand::Rng;

use crate::components::card::Card;
use crate::components::game_state::RoundStatus;
use crate::components::zone::{Zone, ZoneInfo};
use crate::ecs::{Entity, System, World};
use crate::logic::deck::generate_round;
use crate::systems::{ensure_game_state, update_game_state};

/// 新しいラウンドを配るシステムだよ！🃏
///
/// 1. 前のラウンドのカードエンティティを全部破棄する
/// 2. 役割ごとに 1 枚ずつ選んでシャッフルする (最初から正解にはならない)
/// 3. 4 枚を手札 (`Zone::Hand`) に 0〜3 番で並べる
/// 4. `GameState` のラウンド番号を進めて `Active` にする
///
/// 乱数生成器はシステム自身が持つので、テストでは種を固定できるよ。
pub struct DealRoundSystem<R> {
    rng: R,
}

impl<R: Rng> DealRoundSystem<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

/// 配った結果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealtRound {
    pub round_id: u64,
    /// 手札に並んだ順のカードエンティティ
    pub cards: Vec<Entity>,
}

impl<R: Rng> System for DealRoundSystem<R> {
    type Output = DealtRound;

    fn run(&mut self, world: &mut World) -> DealtRound {
        ensure_game_state(world);
        // 前のラウンドのお掃除 🧹
        for entity in world.get_all_entities_with_component::<Card>() {
            world.destroy_entity(entity);
        }

        let cards: Vec<Entity> = generate_round(&mut self.rng)
            .into_iter()
            .enumerate()
            .map(|(position, card)| {
                let entity = world.create_entity();
                world.add_component(entity, card);
                world.add_component(entity, ZoneInfo::new(Zone::Hand, position));
                entity
            })
            .collect();

        let round_id = update_game_state(world, |state| {
            state.round_id += 1;
            state.status = RoundStatus::Active;
            state.round_id
        });

        info!("Deal: round {} dealt with cards {:?}", round_id, cards);
        DealtRound { round_id, cards }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::card::Role;
    use crate::ecs::GAME_STATE_ENTITY;
    use crate::logic::deck::is_canonical;
    use crate::systems::game_state;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dealt_cards(world: &World, entities: &[Entity]) -> Vec<Card> {
        entities
            .iter()
            .filter_map(|&e| world.get_component::<Card>(e).copied())
            .collect()
    }

    #[test]
    fn deal_puts_four_cards_in_the_hand() {
        let mut world = World::new();
        let mut deal = DealRoundSystem::new(StdRng::seed_from_u64(11));
        let dealt = deal.run(&mut world);

        assert_eq!(dealt.cards.len(), 4);
        assert_eq!(world.cards_in_zone(Zone::Hand), dealt.cards);
        assert!(world.cards_in_zone(Zone::Assembly).is_empty());

        let cards = dealt_cards(&world, &dealt.cards);
        let mut roles: Vec<Role> = cards.iter().map(|c| c.role).collect();
        assert!(!is_canonical(&cards));
        roles.sort();
        assert_eq!(roles, Role::CANONICAL_ORDER.to_vec());
    }

    #[test]
    fn dealing_again_replaces_the_previous_round() {
        let mut world = World::new();
        let mut deal = DealRoundSystem::new(StdRng::seed_from_u64(2));
        let first = deal.run(&mut world);
        let second = deal.run(&mut world);

        assert_eq!(first.round_id, 1);
        assert_eq!(second.round_id, 2);
        assert!(first.cards.iter().all(|&e| !world.is_entity_alive(e)));
        assert_eq!(world.get_all_entities_with_component::<Card>(), second.cards);
        // カードのエンティティは GameState の予約 ID とかぶらない
        assert!(!first.cards.contains(&GAME_STATE_ENTITY));
        assert!(!second.cards.contains(&GAME_STATE_ENTITY));
        assert!(world.is_entity_alive(GAME_STATE_ENTITY));
    }

    #[test]
    fn deal_activates_the_round_and_keeps_the_score() {
        let mut world = World::new();
        update_game_state(&mut world, |state| {
            state.score.increment();
            state.status = RoundStatus::Resolving;
        });
        DealRoundSystem::new(StdRng::seed_from_u64(9)).run(&mut world);
        let state = game_state(&world);
        assert_eq!(state.status, RoundStatus::Active);
        assert_eq!(state.score.value(), 1);
    }
}
