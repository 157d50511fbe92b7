// src/logic/verifier.rs

use serde::Serialize;

use crate::components::card::Role;
use crate::config::game::CARDS_PER_ROUND;

/// 組み立てエリアの並びを判定した結果だよ！✅❌
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "lowercase")]
pub enum Verdict {
    /// 正しい食物連鎖！
    Correct,
    /// 4 枚そろってるけど順番が違う
    Wrong,
    /// まだ 4 枚置かれていない。エラーじゃなくて「もう少し」のお知らせ。
    Incomplete { placed: usize },
}

impl Verdict {
    /// 4 枚そろった上での判定 (正解 or 不正解) かどうか。
    pub fn is_final(self) -> bool {
        matches!(self, Verdict::Correct | Verdict::Wrong)
    }
}

/// 置かれたカードの役割の並びを、正しい順番と位置ごとに比べる。
pub fn verify(placed: &[Role]) -> Verdict {
    if placed.len() != CARDS_PER_ROUND {
        return Verdict::Incomplete { placed: placed.len() };
    }
    if placed == Role::CANONICAL_ORDER {
        Verdict::Correct
    } else {
        Verdict::Wrong
    }
}
