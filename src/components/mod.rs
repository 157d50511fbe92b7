// src/components/mod.rs

// World に入れるデータ部品 (コンポーネント) たち！
pub mod card; // カードそのもの (名前・役割・画像) 🐟
pub mod zone; // カードがどこの何番目にあるか 📍
pub mod game_state; // スコアとラウンド状態 🏆

pub use card::{Card, Role};
pub use game_state::{GameState, RoundStatus, Score};
pub use zone::{Zone, ZoneInfo};
