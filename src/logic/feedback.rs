// src/logic/feedback.rs
//! 判定結果を「何を見せて、何を鳴らすか」に変換するよ 🎉🔔
//! 実際に DOM や音を触るのは app::renderer と app::audio の仕事。

use serde::Serialize;

use crate::config::messages;
use crate::logic::verifier::Verdict;

/// トーストとフラッシュの色分け用タグ。CSS のクラス名になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Correct,
    Wrong,
    Hint,
}

impl FeedbackKind {
    pub const ALL: [FeedbackKind; 3] = [FeedbackKind::Correct, FeedbackKind::Wrong, FeedbackKind::Hint];

    pub fn css_class(self) -> &'static str {
        match self {
            FeedbackKind::Correct => "correct",
            FeedbackKind::Wrong => "wrong",
            FeedbackKind::Hint => "hint",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub message: &'static str,
    /// `None` ならタグなし (色なしのトースト)
    pub kind: Option<FeedbackKind>,
}

/// 効果音の種類。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sound {
    Drag,
    Drop,
    Correct,
    Wrong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Sawtooth,
}

/// 音声ファイルが無いときに Web Audio で鳴らす合成音 1 つ分。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_ms: u32,
    pub waveform: Waveform,
    pub gain: f32,
    /// 効果音の鳴り始めからの遅れ
    pub delay_ms: u32,
}

const fn tone(frequency_hz: f32, duration_ms: u32, waveform: Waveform, gain: f32, delay_ms: u32) -> Tone {
    Tone { frequency_hz, duration_ms, waveform, gain, delay_ms }
}

const DRAG_TONES: [Tone; 1] = [tone(420.0, 80, Waveform::Sine, 0.03, 0)];
const DROP_TONES: [Tone; 1] = [tone(520.0, 80, Waveform::Triangle, 0.03, 0)];
const CORRECT_TONES: [Tone; 2] = [
    tone(720.0, 220, Waveform::Sine, 0.08, 0),
    tone(920.0, 140, Waveform::Sine, 0.06, 140),
];
const WRONG_TONES: [Tone; 1] = [tone(220.0, 220, Waveform::Sawtooth, 0.07, 0)];

impl Sound {
    pub const ALL: [Sound; 4] = [Sound::Drag, Sound::Drop, Sound::Correct, Sound::Wrong];

    pub fn as_str(self) -> &'static str {
        match self {
            Sound::Drag => "drag",
            Sound::Drop => "drop",
            Sound::Correct => "correct",
            Sound::Wrong => "wrong",
        }
    }

    /// フォールバック用の合成音の並び。
    pub fn tones(self) -> &'static [Tone] {
        match self {
            Sound::Drag => &DRAG_TONES,
            Sound::Drop => &DROP_TONES,
            Sound::Correct => &CORRECT_TONES,
            Sound::Wrong => &WRONG_TONES,
        }
    }
}

/// 1 回のお知らせで出すもの一式。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub toast: Toast,
    pub sound: Sound,
    pub flash: Option<FeedbackKind>,
}

impl Feedback {
    pub fn for_verdict(verdict: Verdict) -> Self {
        let (message, kind, sound) = match verdict {
            Verdict::Correct => (messages::CORRECT, FeedbackKind::Correct, Sound::Correct),
            Verdict::Wrong => (messages::WRONG, FeedbackKind::Wrong, Sound::Wrong),
            Verdict::Incomplete { .. } => (messages::INCOMPLETE, FeedbackKind::Hint, Sound::Wrong),
        };
        Self {
            toast: Toast { message, kind: Some(kind) },
            sound,
            flash: Some(kind),
        }
    }

    /// 4 枚置かれないまま時間切れになったとき。フラッシュはなし。
    pub fn time_expired() -> Self {
        Self {
            toast: Toast { message: messages::TIME_EXPIRED, kind: None },
            sound: Sound::Wrong,
            flash: None,
        }
    }
}
