// src/components/game_state.rs

use serde::{Deserialize, Serialize};

use crate::ecs::component::Component;

/// ラウンドの進行状態だよ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundStatus {
    /// プレイ中。判定もタイマーも受け付ける。
    Active,
    /// 判定 (か時間切れ) が済んで、次のラウンド待ち。
    Resolving,
}

/// スコア。増やすことしかできないカウンタだよ 📈
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(u32);

impl Score {
    pub fn value(self) -> u32 {
        self.0
    }

    /// 1 点加算して、新しい値を返す。
    pub fn increment(&mut self) -> u32 {
        self.0 = self.0.saturating_add(1);
        self.0
    }
}

/// ゲーム全体の状態を持つコンポーネント。
/// `GAME_STATE_ENTITY` にだけくっつけるシングルトンだよ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub score: Score,
    /// 今のラウンドの番号。配り直すたびに増える。0 はまだ一度も配っていない状態。
    pub round_id: u64,
    pub status: RoundStatus,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            score: Score::default(),
            round_id: 0,
            status: RoundStatus::Resolving,
        }
    }
}

impl Component for GameState {}
