// src/config/game.rs
//! ラウンド進行に関する定数だよ！ ⏱️

/// 1 ラウンドの制限時間 (秒)
pub const ROUND_SECONDS: u32 = 30;
/// タイマーの 1 ティックの長さ (ミリ秒)
pub const TICK_MS: i32 = 1000;

/// ボタンで判定したあと、次のラウンドを配るまでの待ち時間 (ミリ秒)
pub const VERIFY_DELAY_MS: u32 = 900;
/// 時間切れのあと、次のラウンドを配るまでの待ち時間 (ミリ秒)
pub const EXPIRY_DELAY_MS: u32 = 1000;

/// トーストを表示しておく時間 (ミリ秒)
pub const TOAST_MS: u32 = 1700;
/// 画面フラッシュの時間 (ミリ秒)
pub const FLASH_MS: u32 = 300;

/// 正しい順番を引いちゃったときにシャッフルし直す最大回数。
/// 使い切ったら 1 枚ずらして確実に崩す。
pub const MAX_RESHUFFLES: usize = 64;

/// 1 ラウンドで配るカードの枚数 (役割ごとに 1 枚)
pub const CARDS_PER_ROUND: usize = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_are_unsigned_millis_and_ordered() {
        // setTimeout 系はすべて u32 のミリ秒で受け取る
        let delays: [u32; 4] = [VERIFY_DELAY_MS, EXPIRY_DELAY_MS, TOAST_MS, FLASH_MS];
        assert!(delays.iter().all(|&d| d > 0));
        assert!(VERIFY_DELAY_MS < EXPIRY_DELAY_MS);
        assert!(FLASH_MS < TOAST_MS);
        assert_eq!(TICK_MS, 1000);
    }
}
