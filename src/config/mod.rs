// src/config/mod.rs
//! ゲームの定数・カタログ・文言・実行時設定をまとめるよ。

pub mod catalog;
pub mod dom;
pub mod game;
pub mod messages;
pub mod settings;

pub use settings::{GameConfig, SoundUrls};
