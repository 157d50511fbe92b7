// src/app/game_app.rs

use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::app::audio::AudioPlayer;
use crate::app::browser_event_manager::{self, Interval, Listener};
use crate::app::controller::{AppEvent, GameController, UiCommand};
use crate::app::renderer::{Page, Renderer};
use crate::app::state_getter;
use crate::components::zone::Zone;
use crate::config::GameConfig;
use crate::ecs::Entity;
use crate::error::GameError;

/// Mutex をロックする。前の持ち主がパニックしていても中身をそのまま使うよ。
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        warn!("recovering a poisoned lock");
        poisoned.into_inner()
    })
}

/// GameApp とブラウザのコールバックたちで共有する状態。
/// コールバックは `Weak` で持つので、GameApp が消えたら一緒に消えるよ。
pub(crate) struct AppShared {
    pub controller: Mutex<GameController>,
    pub renderer: Renderer,
    pub audio: AudioPlayer,
    pub ticker: Mutex<Option<Interval>>,
    pub listeners: Mutex<Vec<Listener>>,
}

/// イベントをコントローラーに渡して、返ってきたコマンドを画面に反映する。
/// コントローラーのロックはコマンドを適用する前に外れるので、
/// コマンドの中から別のイベントが飛んできても大丈夫。
pub(crate) fn dispatch(shared: &Arc<AppShared>, event: AppEvent) -> Result<(), GameError> {
    let commands = lock(&shared.controller).handle(event)?;
    for command in commands {
        if let Err(e) = apply(shared, command) {
            warn!("GameApp: command failed: {}", e);
        }
    }
    Ok(())
}

fn apply(shared: &Arc<AppShared>, command: UiCommand) -> Result<(), GameError> {
    let renderer = &shared.renderer;
    match command {
        UiCommand::RenderRound(cards) => renderer.render_round(&cards)?,
        UiCommand::HideAssemblyHint => renderer.hide_assembly_hint()?,
        UiCommand::UpdateTimer(seconds) => renderer.update_timer(seconds),
        UiCommand::UpdateScore(score) => renderer.update_score(score),
        UiCommand::ShowToast { toast, duration_ms } => renderer.show_toast(&toast, duration_ms)?,
        UiCommand::Flash { kind, duration_ms } => renderer.flash(kind, duration_ms)?,
        UiCommand::PlaySound(sound) => shared.audio.play(sound),
        UiCommand::StartTicking { round_id, interval_ms } => {
            let interval = browser_event_manager::start_ticking(Arc::downgrade(shared), round_id, interval_ms)?;
            if let Some(previous) = lock(&shared.ticker).replace(interval) {
                browser_event_manager::clear_interval(previous);
            }
        }
        UiCommand::StopTicking => stop_ticking(shared),
        UiCommand::ScheduleNewRound { round_id, delay_ms } => {
            let weak = Arc::downgrade(shared);
            browser_event_manager::set_timeout(
                move || {
                    if let Some(shared) = weak.upgrade() {
                        if let Err(e) = dispatch(&shared, AppEvent::ScheduledNewRound { round_id }) {
                            warn!("GameApp: scheduled round failed: {}", e);
                        }
                    }
                },
                delay_ms,
            )?;
        }
        UiCommand::SetEffectsLabel(on) => renderer.set_effects_label(on),
        UiCommand::ResumeAudio => shared.audio.resume(),
        UiCommand::SetMusic { playing, volume } => {
            shared.audio.set_music(playing, volume);
            renderer.set_music_label(playing);
        }
        UiCommand::SetMusicVolume(volume) => shared.audio.set_music_volume(volume),
    }
    Ok(())
}

fn stop_ticking(shared: &AppShared) {
    // guard を先に落としてから clear する
    let interval = lock(&shared.ticker).take();
    if let Some(interval) = interval {
        browser_event_manager::clear_interval(interval);
    }
}

// --- ゲーム全体のアプリケーション状態を管理する構造体 ---
#[wasm_bindgen]
pub struct GameApp {
    shared: Arc<AppShared>,
}

// GameApp 構造体のメソッドを実装していくよ！
#[wasm_bindgen]
impl GameApp {
    /// 設定 JSON (省略可) を読んで、ページの要素を探して、コントローラーを作る。
    /// 必須の要素が無かったり、設定がおかしかったらエラーを JS に投げるよ。
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<GameApp, JsValue> {
        let config = GameConfig::from_json(config_json.as_deref())?;
        crate::init_logging(config.level_filter()?);
        info!("GameApp: 初期化中...");

        let document = window()
            .and_then(|w| w.document())
            .ok_or(GameError::MissingElement("document"))?;
        let page = Page::lookup(document)?;
        let audio = AudioPlayer::new(&config, page.music.clone());

        let shared = Arc::new(AppShared {
            controller: Mutex::new(GameController::new(config)),
            renderer: Renderer::new(page),
            audio,
            ticker: Mutex::new(None),
            listeners: Mutex::new(Vec::new()),
        });
        info!("GameApp: 初期化完了。");
        Ok(GameApp { shared })
    }

    /// リスナーを付けて、画面の向きを確認して、最初のラウンドを配る 🃏
    /// 2 回目以降の呼び出しはリスナーを付け直さず、新しいラウンドを配るだけ。
    pub fn start(&self) -> Result<(), JsValue> {
        if !browser_event_manager::attach_listeners(&self.shared)? {
            info!("GameApp: start called again, dealing a fresh round only.");
        }
        if let Err(e) = self.shared.renderer.update_orientation() {
            debug!("GameApp: orientation check failed: {}", e);
        }
        dispatch(&self.shared, AppEvent::Start)?;
        Ok(())
    }

    pub fn check(&self) -> Result<(), JsValue> {
        Ok(dispatch(&self.shared, AppEvent::CheckRequested)?)
    }

    pub fn new_round(&self) -> Result<(), JsValue> {
        Ok(dispatch(&self.shared, AppEvent::NewRoundRequested)?)
    }

    pub fn toggle_effects(&self) -> Result<(), JsValue> {
        Ok(dispatch(&self.shared, AppEvent::EffectsToggled)?)
    }

    pub fn toggle_music(&self) -> Result<(), JsValue> {
        Ok(dispatch(&self.shared, AppEvent::MusicToggled)?)
    }

    pub fn set_volume(&self, volume: f64) -> Result<(), JsValue> {
        Ok(dispatch(&self.shared, AppEvent::VolumeChanged(volume))?)
    }

    /// ドラッグエンジン (SortableJS) の onStart から呼ばれる。
    pub fn handle_drag_start(&self) -> Result<(), JsValue> {
        Ok(dispatch(&self.shared, AppEvent::CardDragStarted)?)
    }

    /// ドラッグエンジンの onEnd から呼ばれる。
    ///
    /// # 引数
    /// * `entity_id`: カード要素の `data-entity`
    /// * `zone`: `"hand"` か `"assembly"`
    /// * `index`: 置かれたゾーンの中での位置
    pub fn handle_card_moved(&self, entity_id: usize, zone: String, index: usize) -> Result<(), JsValue> {
        let zone: Zone = zone.parse().map_err(|e: GameError| {
            warn!("GameApp: move of entity {} rejected: {}", entity_id, e);
            JsValue::from(e)
        })?;
        dispatch(&self.shared, AppEvent::CardMoved { entity: Entity(entity_id), zone, index }).map_err(|e| {
            warn!("GameApp: move of entity {} rejected: {}", entity_id, e);
            JsValue::from(e)
        })
    }

    /// デバッグ用に今の状態を JSON 文字列で返す。
    pub fn get_state_json(&self) -> Result<String, JsValue> {
        Ok(state_getter::get_state_json(&self.shared.controller)?)
    }
}

// GameApp が不要になった時に、ブラウザ側に残ったコールバックを片付ける (Drop トレイト)
impl Drop for GameApp {
    fn drop(&mut self) {
        debug!("GameApp: GameApp インスタンスを破棄中。リスナーとタイマーを外します...");
        stop_ticking(&self.shared);
        browser_event_manager::detach_listeners(&self.shared.listeners);
        self.shared.renderer.release_image_handlers();
    }
}
