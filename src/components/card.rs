// src/components/card.rs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ecs::component::Component;

/// 食物連鎖の中でのカードの役割 (栄養段階) だよ！🌿🐟🦑🦈
///
/// 並び順そのものが答えなので、`Ord` は宣言順 = 正しい順番になってる。
/// JS 側の `data-level` 属性には小文字の名前 (`"producer"` とか) で出すよ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 生産者 (植物プランクトンや海藻)
    Producer,
    /// 一次消費者
    Primary,
    /// 二次消費者
    Secondary,
    /// 三次消費者 (頂点捕食者)
    Tertiary,
}

impl Role {
    /// 正しい食物連鎖の順番。これと完全一致したら正解！
    pub const CANONICAL_ORDER: [Role; 4] = [Role::Producer, Role::Primary, Role::Secondary, Role::Tertiary];

    /// `data-level` 属性やログに使う名前。
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Producer => "producer",
            Role::Primary => "primary",
            Role::Secondary => "secondary",
            Role::Tertiary => "tertiary",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// カードそのものを表すコンポーネントだよ！🃏
///
/// 中身は静的カタログ (`config::catalog::CATALOG`) からコピーされるだけで、
/// ラウンド中に書き換わることはないよ。だから全部 `&'static str` で持つ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Card {
    /// 表示名 (ポルトガル語)
    pub name: &'static str,
    pub role: Role,
    /// 画像のパス
    pub image: &'static str,
}

impl Component for Card {}
