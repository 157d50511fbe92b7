// src/systems/verify_system.rs

use log::info;

use crate::components::card::{Card, Role};
use crate::components::zone::Zone;
use crate::ecs::{System, World};
use crate::logic::verifier::{verify, Verdict};
use crate::systems::update_game_state;

/// 組み立てエリアの並びを判定するシステムだよ！🏆
///
/// 正解ならスコアを 1 増やす。不正解や 4 枚未満ならスコアはそのまま。
/// 「同じラウンドで二回判定しない」はコントローラー側 (RoundStatus) の責任だよ。
#[derive(Debug, Default, Clone, Copy)]
pub struct VerifySystem;

impl VerifySystem {
    /// 組み立てエリアに置かれたカードの役割を、並び順で返す。
    pub fn placed_roles(world: &World) -> Vec<Role> {
        world
            .cards_in_zone(Zone::Assembly)
            .into_iter()
            .filter_map(|entity| world.get_component::<Card>(entity).map(|card| card.role))
            .collect()
    }
}

impl System for VerifySystem {
    type Output = Verdict;

    fn run(&mut self, world: &mut World) -> Verdict {
        let placed = Self::placed_roles(world);
        let verdict = verify(&placed);
        if verdict == Verdict::Correct {
            let score = update_game_state(world, |state| state.score.increment());
            info!("Verify: correct chain, score is now {}", score);
        } else {
            info!("Verify: {:?} for {:?}", verdict, placed);
        }
        verdict
    }
}
