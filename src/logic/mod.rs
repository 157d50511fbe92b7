// src/logic/mod.rs
//! DOM にも World にも依存しない、ゲームの純粋なルールたち。

pub mod deck;
pub mod feedback;
pub mod timer;
pub mod verifier;
