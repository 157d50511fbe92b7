// src/ecs/component.rs

/// Component（コンポーネント）トレイトだよ！
///
/// エンティティにくっつけるデータの目印 (マーカー) になるトレイト。
/// カード (`Card`) も、置き場所 (`ZoneInfo`) も、スコアを持つ `GameState` も、
/// これを実装すれば World に入れられるようになるよ。
/// `Debug` はログ出力用、`Send + Sync + 'static` は `Arc<Mutex<World>>` 越しに扱うためのおまじない！
pub trait Component: std::fmt::Debug + Send + Sync + 'static {}
