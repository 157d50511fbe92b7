// src/logic/timer.rs

use crate::config::game::ROUND_SECONDS;

/// 1 ティック進めた結果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// まだ時間が残ってる (残り秒数)
    Running(u32),
    /// ちょうど今 0 になった！
    Expired,
    /// もう止まってる (期限切れ後や、止められた後のティック)
    Idle,
}

/// ラウンドのカウントダウン ⏳
///
/// 本物の `setInterval` はブラウザ側 (`browser_event_manager`) が持っていて、
/// これは「残り何秒か」を数えるだけの純粋な状態だよ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTimer {
    duration: u32,
    remaining: u32,
    running: bool,
}

impl Default for RoundTimer {
    fn default() -> Self {
        Self::new(ROUND_SECONDS)
    }
}

impl RoundTimer {
    /// 止まった状態のタイマーを作る。`reset` でスタート。
    pub fn new(duration: u32) -> Self {
        Self { duration, remaining: duration, running: false }
    }

    /// 残り時間を満タンに戻して動かし始める。
    pub fn reset(&mut self) {
        self.remaining = self.duration;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn tick(&mut self) -> TimerTick {
        if !self.running {
            return TimerTick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            TimerTick::Expired
        } else {
            TimerTick::Running(self.remaining)
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_timer_is_stopped_and_full() {
        let mut timer = RoundTimer::default();
        assert_eq!(timer.duration(), 30);
        assert_eq!(timer.remaining(), 30);
        assert!(!timer.is_running());
        assert_eq!(timer.tick(), TimerTick::Idle);
        assert_eq!(timer.remaining(), 30);
    }

    #[test]
    fn counts_down_to_expiry_once() {
        let mut timer = RoundTimer::new(3);
        timer.reset();
        assert_eq!(timer.tick(), TimerTick::Running(2));
        assert_eq!(timer.tick(), TimerTick::Running(1));
        assert_eq!(timer.tick(), TimerTick::Expired);
        assert_eq!(timer.remaining(), 0);
        // 期限切れのあとは何回ティックしても Idle
        assert_eq!(timer.tick(), TimerTick::Idle);
        assert_eq!(timer.tick(), TimerTick::Idle);
    }

    #[test]
    fn full_round_takes_thirty_ticks() {
        let mut timer = RoundTimer::default();
        timer.reset();
        let ticks = std::iter::repeat_with(|| timer.tick())
            .take_while(|t| *t != TimerTick::Expired)
            .count();
        assert_eq!(ticks, 29, "29 回の Running のあと 30 回目で Expired");
    }

    #[test]
    fn reset_refills_and_stop_freezes() {
        let mut timer = RoundTimer::new(5);
        timer.reset();
        timer.tick();
        timer.tick();
        timer.stop();
        assert_eq!(timer.tick(), TimerTick::Idle);
        assert_eq!(timer.remaining(), 3);
        timer.reset();
        assert_eq!(timer.remaining(), 5);
        assert_eq!(timer.tick(), TimerTick::Running(4));
    }
}
