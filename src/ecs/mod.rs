// src/ecs/mod.rs
//! ECS (Entity-Component-System) のコア。カードもゲーム状態も全部ここで管理するよ。

pub mod component;
pub mod entity;
pub mod system;
pub mod world;


// よく使う型は `crate::ecs::X` で呼べるように再エクスポート！
pub use component::Component;
pub use entity::{Entity, GAME_STATE_ENTITY};
pub use system::System;
pub use world::World;
