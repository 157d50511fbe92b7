// src/systems/move_card_system.rs

use log::debug;

use crate::components::card::Card;
use crate::components::zone::{Zone, ZoneInfo};
use crate::ecs::{Entity, System, World};
use crate::error::GameError;

/// カード移動のロジックを実行するシステムだよ！🖱️💨
///
/// ドラッグエンジン (JS) から届いた「どのカードを、どのゾーンの何番目に置いたか」を
/// World に反映するよ。移動元のゾーンは詰めて、移動先のゾーンは番号を振り直すので、
/// どのゾーンも `position` は常に 0 から隙間なく並ぶ。
/// 並べ替えに「ルール違反」はないので、知らないカード以外は全部受け付けるよ。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCardSystem {
    pub entity: Entity,
    pub target: Zone,
    /// 移動先での位置。ゾーンの長さを超えていたら末尾に置く。
    pub index: usize,
}

/// 移動した結果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub from: Zone,
    pub to: Zone,
    /// 実際に置かれた位置
    pub position: usize,
}

impl MoveOutcome {
    /// 手札から組み立てエリアに入ってきたか (ドロップ音を鳴らすタイミング)
    pub fn entered_assembly(&self) -> bool {
        self.from != Zone::Assembly && self.to == Zone::Assembly
    }
}

impl MoveCardSystem {
    pub fn new(entity: Entity, target: Zone, index: usize) -> Self {
        Self { entity, target, index }
    }

    /// ゾーンのカード列に 0 から番号を振り直す。
    fn renumber(world: &mut World, zone: Zone, order: &[Entity]) {
        for (position, &entity) in order.iter().enumerate() {
            world.add_component(entity, ZoneInfo::new(zone, position));
        }
    }
}

impl System for MoveCardSystem {
    type Output = Result<MoveOutcome, GameError>;

    fn run(&mut self, world: &mut World) -> Result<MoveOutcome, GameError> {
        let entity = self.entity;
        let from = match (world.get_component::<Card>(entity), world.get_component::<ZoneInfo>(entity)) {
            (Some(_), Some(info)) => info.zone,
            _ => return Err(GameError::UnknownEntity(entity)),
        };

        let mut source: Vec<Entity> = world.cards_in_zone(from);
        source.retain(|&e| e != entity);

        let mut target = if from == self.target {
            source.clone()
        } else {
            world.cards_in_zone(self.target)
        };
        let position = self.index.min(target.len());
        target.insert(position, entity);

        if from != self.target {
            Self::renumber(world, from, &source);
        }
        Self::renumber(world, self.target, &target);

        debug!("MoveCard: {:?} {} -> {}[{}]", entity, from, self.target, position);
        Ok(MoveOutcome { from, to: self.target, position })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::DealRoundSystem;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dealt_world() -> (World, Vec<Entity>) {
        let mut world = World::new();
        let dealt = DealRoundSystem::new(StdRng::seed_from_u64(4)).run(&mut world);
        (world, dealt.cards)
    }

    fn positions(world: &World, zone: Zone) -> Vec<usize> {
        world
            .cards_in_zone(zone)
            .into_iter()
            .filter_map(|e| world.get_component::<ZoneInfo>(e).map(|i| i.position))
            .collect()
    }

    #[test]
    fn moving_into_assembly_closes_the_gap_in_hand() {
        let (mut world, cards) = dealt_world();
        let outcome = MoveCardSystem::new(cards[1], Zone::Assembly, 0).run(&mut world).unwrap();

        assert_eq!(outcome, MoveOutcome { from: Zone::Hand, to: Zone::Assembly, position: 0 });
        assert!(outcome.entered_assembly());
        assert_eq!(world.cards_in_zone(Zone::Assembly), vec![cards[1]]);
        assert_eq!(world.cards_in_zone(Zone::Hand), vec![cards[0], cards[2], cards[3]]);
        assert_eq!(positions(&world, Zone::Hand), vec![0, 1, 2]);
    }

    #[test]
    fn index_past_the_end_appends() {
        let (mut world, cards) = dealt_world();
        MoveCardSystem::new(cards[0], Zone::Assembly, 0).run(&mut world).unwrap();
        let outcome = MoveCardSystem::new(cards[3], Zone::Assembly, 99).run(&mut world).unwrap();
        assert_eq!(outcome.position, 1);
        assert_eq!(world.cards_in_zone(Zone::Assembly), vec![cards[0], cards[3]]);
    }

    #[test]
    fn reordering_inside_a_zone_keeps_every_card() {
        let (mut world, cards) = dealt_world();
        for &card in &cards {
            MoveCardSystem::new(card, Zone::Assembly, 99).run(&mut world).unwrap();
        }
        // 最後のカードを先頭へ
        let outcome = MoveCardSystem::new(cards[3], Zone::Assembly, 0).run(&mut world).unwrap();
        assert!(!outcome.entered_assembly());
        assert_eq!(
            world.cards_in_zone(Zone::Assembly),
            vec![cards[3], cards[0], cards[1], cards[2]]
        );
        assert_eq!(positions(&world, Zone::Assembly), vec![0, 1, 2, 3]);
        assert!(world.cards_in_zone(Zone::Hand).is_empty());
    }

    #[test]
    fn moving_back_to_hand_works() {
        let (mut world, cards) = dealt_world();
        MoveCardSystem::new(cards[2], Zone::Assembly, 0).run(&mut world).unwrap();
        let outcome = MoveCardSystem::new(cards[2], Zone::Hand, 1).run(&mut world).unwrap();
        assert_eq!(outcome.from, Zone::Assembly);
        assert!(!outcome.entered_assembly());
        assert_eq!(world.cards_in_zone(Zone::Hand), vec![cards[0], cards[2], cards[1], cards[3]]);
        assert!(world.cards_in_zone(Zone::Assembly).is_empty());
    }

    #[test]
    fn unknown_entities_are_rejected_without_changes() {
        let (mut world, cards) = dealt_world();
        let err = MoveCardSystem::new(Entity(999), Zone::Assembly, 0).run(&mut world).unwrap_err();
        assert!(matches!(err, GameError::UnknownEntity(Entity(999))));
        assert_eq!(world.cards_in_zone(Zone::Hand), cards);
    }
}
