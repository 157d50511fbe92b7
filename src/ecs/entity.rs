// src/ecs/entity.rs

use serde::{Deserialize, Serialize};

/// Entity（エンティティ）は、ゲームに登場する「モノ」を表すただの ID だよ！
///
/// ID だけだと意味はないけど、コンポーネントと組み合わせると
/// 「ID 3 のエンティティは『Orca』のカードで、組み立てエリアの 2 番目にある」
/// みたいに意味を持つようになるんだ ✨
///
/// JS 側 (ドラッグエンジン) には `data-entity` 属性としてこの数値を渡して、
/// 移動イベントで送り返してもらうよ。
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Entity(pub usize);

/// `GameState` (スコアやラウンド番号) を持たせる予約済みエンティティ。
/// ゲーム全体で 1 つだけのシングルトンだよ。
pub const GAME_STATE_ENTITY: Entity = Entity(0);
