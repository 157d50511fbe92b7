// src/app/mod.rs
//! GameApp の内部ロジックを役割ごとに分割して置くモジュールだよ！

pub mod controller;  // イベント → UiCommand (DOM なし)
pub mod game_app;

pub(crate) mod audio;
pub(crate) mod browser_event_manager;
pub(crate) mod renderer;
pub(crate) mod state_getter;
