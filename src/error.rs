// src/error.rs
//! このクレートのエラー型。JS との境界で `JsValue` に変換されるよ。

use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::ecs::Entity;

#[derive(Debug, Error)]
pub enum GameError {
    /// ページに必要な要素が見つからない (id が違う、HTML が古いなど)
    #[error("element #{0} not found in the page")]
    MissingElement(&'static str),

    /// DOM や Web Audio の呼び出しが失敗した
    #[error("browser call failed: {0}")]
    Dom(String),

    #[error("invalid game config: {0}")]
    InvalidConfig(String),

    #[error("entity {0:?} is not a card in the current round")]
    UnknownEntity(Entity),

    #[error("unknown zone {0:?} (expected \"hand\" or \"assembly\")")]
    UnknownZone(String),
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        let text = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        GameError::Dom(text)
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::InvalidConfig(err.to_string())
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
