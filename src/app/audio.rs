// src/app/audio.rs
//! 効果音と BGM 🔊
//!
//! 効果音ごとに、設定に音声ファイルがあればそれを、無ければ Web Audio の
//! オシレーターで作った合成音を鳴らす。AudioContext が作れない環境では無音。
//! 音が鳴らないのはゲームとして致命的じゃないので、失敗は全部 debug ログに流して終わり。

use std::collections::HashMap;

use js_sys::Promise;
use log::debug;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{AudioContext, AudioContextState, AudioScheduledSourceNode, HtmlAudioElement, HtmlMediaElement, OscillatorType};

use crate::config::GameConfig;
use crate::logic::feedback::{Sound, Tone, Waveform};

/// 合成音の音量をここまで絞ってから止める
const RAMP_FLOOR: f32 = 0.001;
/// ランプが終わってからオシレーターを止めるまでの余白 (秒)
const STOP_PADDING_SECS: f64 = 0.02;

pub(crate) struct AudioPlayer {
    effects: HashMap<Sound, HtmlAudioElement>,
    context: Option<AudioContext>,
    music: HtmlAudioElement,
}

impl AudioPlayer {
    pub fn new(config: &GameConfig, music: HtmlAudioElement) -> Self {
        let mut effects = HashMap::new();
        for sound in Sound::ALL {
            let Some(url) = config.sounds.url_for(sound) else {
                continue;
            };
            match HtmlAudioElement::new_with_src(url) {
                Ok(audio) => {
                    audio.set_volume(config.effects_volume);
                    effects.insert(sound, audio);
                }
                Err(e) => debug!("Audio: could not load {} from {}: {:?}", sound.as_str(), url, e),
            }
        }

        // ファイルが全部そろってるなら合成音はいらない
        let context = if effects.len() < Sound::ALL.len() {
            AudioContext::new()
                .map_err(|e| debug!("Audio: no AudioContext, tones disabled: {:?}", e))
                .ok()
        } else {
            None
        };

        debug!(
            "Audio: {} sound files, tone fallback {}",
            effects.len(),
            if context.is_some() { "ready" } else { "off" }
        );
        Self { effects, context, music }
    }

    pub fn play(&self, sound: Sound) {
        if let Some(audio) = self.effects.get(&sound) {
            audio.set_current_time(0.0);
            play_media(audio);
            return;
        }
        let Some(context) = &self.context else {
            return;
        };
        for tone in sound.tones() {
            if let Err(e) = play_tone(context, tone) {
                debug!("Audio: tone for {} failed: {:?}", sound.as_str(), e);
            }
        }
    }

    /// ユーザー操作の前に作られた AudioContext は止まっているので、起こしてあげる。
    pub fn resume(&self) {
        let Some(context) = &self.context else {
            return;
        };
        if context.state() != AudioContextState::Suspended {
            return;
        }
        match context.resume() {
            Ok(promise) => ignore_rejection("resume", promise),
            Err(e) => debug!("Audio: resume failed: {:?}", e),
        }
    }

    pub fn set_music(&self, playing: bool, volume: f64) {
        if playing {
            self.music.set_volume(volume);
            play_media(&self.music);
        } else if let Err(e) = self.music.pause() {
            debug!("Audio: pause failed: {:?}", e);
        }
    }

    pub fn set_music_volume(&self, volume: f64) {
        self.music.set_volume(volume);
    }
}

fn play_media(media: &HtmlMediaElement) {
    match media.play() {
        Ok(promise) => ignore_rejection("play", promise),
        Err(e) => debug!("Audio: play failed: {:?}", e),
    }
}

/// 自動再生ブロックなどで Promise が reject されても気にしない。
fn ignore_rejection(what: &'static str, promise: Promise) {
    spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            debug!("Audio: {} was rejected: {:?}", what, e);
        }
    });
}

fn oscillator_type(waveform: Waveform) -> OscillatorType {
    match waveform {
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Triangle => OscillatorType::Triangle,
        Waveform::Sawtooth => OscillatorType::Sawtooth,
    }
}

/// オシレーター → ゲイン → スピーカー、で 1 音鳴らす。
/// ゲインは指数カーブで絞って、少し後にオシレーターを止めるよ。
fn play_tone(context: &AudioContext, tone: &Tone) -> Result<(), JsValue> {
    let oscillator = context.create_oscillator()?;
    let gain = context.create_gain()?;
    oscillator.set_type(oscillator_type(tone.waveform));
    oscillator.frequency().set_value(tone.frequency_hz);
    oscillator.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&context.destination())?;

    let (start, end) = tone_window(context.current_time(), tone);
    let level = gain.gain();
    level.set_value_at_time(tone.gain, start)?;
    level.exponential_ramp_to_value_at_time(RAMP_FLOOR, end)?;

    AudioScheduledSourceNode::start_with_when(&oscillator, start)?;
    AudioScheduledSourceNode::stop_with_when(&oscillator, end + STOP_PADDING_SECS)?;
    Ok(())
}

/// AudioContext の時計で、鳴り始めとランプの終わり (秒) を計算する。
fn tone_window(now: f64, tone: &Tone) -> (f64, f64) {
    let start = now + f64::from(tone.delay_ms) / 1000.0;
    (start, start + f64::from(tone.duration_ms) / 1000.0)
}
