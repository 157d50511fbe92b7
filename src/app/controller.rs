// src/app/controller.rs
//! ゲームの進行役 (コントローラー) だよ！🎮
//!
//! ブラウザで起きたこと (`AppEvent`) を受け取って、World とタイマーを更新し、
//! 画面や音に対して「やってほしいこと」(`UiCommand`) のリストを返す。
//! DOM には一切触らないので、ネイティブの `cargo test` でそのまま試せるよ。
//! 実際にコマンドを画面に反映するのは `game_app` の仕事。

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::components::card::{Card, Role};
use crate::components::game_state::RoundStatus;
use crate::components::zone::Zone;
use crate::config::game::{CARDS_PER_ROUND, EXPIRY_DELAY_MS, FLASH_MS, TICK_MS, TOAST_MS, VERIFY_DELAY_MS};
use crate::config::GameConfig;
use crate::ecs::{Entity, System, World};
use crate::error::GameError;
use crate::logic::feedback::{Feedback, FeedbackKind, Sound, Toast};
use crate::logic::timer::{RoundTimer, TimerTick};
use crate::logic::verifier::Verdict;
use crate::systems::{ensure_game_state, game_state, update_game_state, DealRoundSystem, MoveCardSystem, VerifySystem};

/// ブラウザ側から届くイベント。
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// ページの準備ができた。最初のラウンドを配る。
    Start,
    /// 「確認」ボタン、または組み立てエリアで Enter
    CheckRequested,
    /// 「新しいラウンド」ボタン
    NewRoundRequested,
    /// 1 秒ごとのタイマー。どのラウンドのために動いているかを持ってる。
    Tick { round_id: u64 },
    /// 判定後・時間切れ後に予約しておいた「次のラウンド」
    ScheduledNewRound { round_id: u64 },
    CardDragStarted,
    CardMoved { entity: Entity, zone: Zone, index: usize },
    EffectsToggled,
    MusicToggled,
    VolumeChanged(f64),
}

/// 描画用のカード情報。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub entity: Entity,
    pub name: &'static str,
    pub role: Role,
    pub image: &'static str,
}

impl CardView {
    fn new(entity: Entity, card: &Card) -> Self {
        Self { entity, name: card.name, role: card.role, image: card.image }
    }
}

/// コントローラーから画面 (と音) への指示。上から順番に適用してね。
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    /// 手札にカードを並べ直して、組み立てエリアをヒント付きの空っぽに戻す
    RenderRound(Vec<CardView>),
    HideAssemblyHint,
    UpdateTimer(u32),
    UpdateScore(u32),
    ShowToast { toast: Toast, duration_ms: u32 },
    Flash { kind: FeedbackKind, duration_ms: u32 },
    /// 効果音。効果音がオフのときは最初から出てこないよ。
    PlaySound(Sound),
    StartTicking { round_id: u64, interval_ms: i32 },
    StopTicking,
    ScheduleNewRound { round_id: u64, delay_ms: u32 },
    SetEffectsLabel(bool),
    /// 止まっている AudioContext を起こす
    ResumeAudio,
    SetMusic { playing: bool, volume: f64 },
    SetMusicVolume(f64),
}

/// `get_state_json` で返すデバッグ用のスナップショット。
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub score: u32,
    pub round_id: u64,
    pub status: RoundStatus,
    pub remaining_seconds: u32,
    pub timer_running: bool,
    pub effects_on: bool,
    pub music_on: bool,
    pub music_volume: f64,
    pub hand: Vec<CardView>,
    pub assembly: Vec<CardView>,
}

pub struct GameController {
    world: World,
    deal_system: DealRoundSystem<StdRng>,
    timer: RoundTimer,
    effects_on: bool,
    music_on: bool,
    music_volume: f64,
    config: GameConfig,
}

impl GameController {
    /// ブラウザの乱数 (getrandom) で種を作るコントローラー。
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// 乱数を外から渡す版。テストで配られるカードを固定したいとき用。
    pub fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let mut world = World::new();
        world.register_component::<Card>();
        world.register_component::<crate::components::zone::ZoneInfo>();
        world.register_component::<crate::components::game_state::GameState>();
        ensure_game_state(&mut world);

        Self {
            world,
            deal_system: DealRoundSystem::new(rng),
            timer: RoundTimer::default(),
            effects_on: false,
            music_on: false,
            music_volume: config.music_volume,
            config,
        }
    }

    pub fn effects_on(&self) -> bool {
        self.effects_on
    }

    pub fn current_round(&self) -> u64 {
        game_state(&self.world).round_id
    }

    /// イベントを 1 つ処理して、画面への指示を返す。
    /// 知らないカードを動かそうとしたときだけエラーになるよ (状態は変わらない)。
    pub fn handle(&mut self, event: AppEvent) -> Result<Vec<UiCommand>, GameError> {
        debug!("Controller: handling {:?}", event);
        let commands = match event {
            AppEvent::Start | AppEvent::NewRoundRequested => self.start_round(),
            AppEvent::CheckRequested => self.check(),
            AppEvent::Tick { round_id } => self.tick(round_id),
            AppEvent::ScheduledNewRound { round_id } => {
                if round_id == self.current_round() {
                    self.start_round()
                } else {
                    debug!("Controller: dropping stale scheduled round {} (current {})", round_id, self.current_round());
                    Vec::new()
                }
            }
            AppEvent::CardDragStarted => self.sound(Sound::Drag).into_iter().collect(),
            AppEvent::CardMoved { entity, zone, index } => self.move_card(entity, zone, index)?,
            AppEvent::EffectsToggled => self.toggle_effects(),
            AppEvent::MusicToggled => self.toggle_music(),
            AppEvent::VolumeChanged(volume) => self.change_volume(volume),
        };
        Ok(commands)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let state = game_state(&self.world);
        GameSnapshot {
            score: state.score.value(),
            round_id: state.round_id,
            status: state.status,
            remaining_seconds: self.timer.remaining(),
            timer_running: self.timer.is_running(),
            effects_on: self.effects_on,
            music_on: self.music_on,
            music_volume: self.music_volume,
            hand: self.card_views(Zone::Hand),
            assembly: self.card_views(Zone::Assembly),
        }
    }

    fn card_views(&self, zone: Zone) -> Vec<CardView> {
        self.world
            .cards_in_zone(zone)
            .into_iter()
            .filter_map(|entity| self.world.get_component::<Card>(entity).map(|card| CardView::new(entity, card)))
            .collect()
    }

    // --- ラウンドの始まりと終わり ---

    fn start_round(&mut self) -> Vec<UiCommand> {
        let dealt = self.deal_system.run(&mut self.world);
        self.timer.reset();
        info!("Controller: round {} started", dealt.round_id);
        vec![
            UiCommand::StopTicking,
            UiCommand::RenderRound(self.card_views(Zone::Hand)),
            UiCommand::UpdateTimer(self.timer.remaining()),
            UiCommand::StartTicking { round_id: dealt.round_id, interval_ms: TICK_MS },
        ]
    }

    /// ラウンドを締めて、次のラウンドを 1 回だけ予約する。
    fn finish_round(&mut self, delay_ms: u32) -> Vec<UiCommand> {
        self.timer.stop();
        let round_id = update_game_state(&mut self.world, |state| {
            state.status = RoundStatus::Resolving;
            state.round_id
        });
        debug!("Controller: round {} resolving, next in {}ms", round_id, delay_ms);
        vec![UiCommand::StopTicking, UiCommand::ScheduleNewRound { round_id, delay_ms }]
    }

    fn is_active(&self) -> bool {
        game_state(&self.world).status == RoundStatus::Active
    }

    // --- 判定 ---

    fn check(&mut self) -> Vec<UiCommand> {
        if !self.is_active() {
            debug!("Controller: check ignored, round already resolved");
            return Vec::new();
        }
        let (verdict, mut commands) = self.verify();
        if verdict.is_final() {
            commands.extend(self.finish_round(VERIFY_DELAY_MS));
        }
        commands
    }

    fn verify(&mut self) -> (Verdict, Vec<UiCommand>) {
        let verdict = VerifySystem.run(&mut self.world);
        let mut commands = Vec::new();
        if verdict == Verdict::Correct {
            commands.push(UiCommand::UpdateScore(game_state(&self.world).score.value()));
        }
        commands.extend(self.present(Feedback::for_verdict(verdict)));
        (verdict, commands)
    }

    fn present(&self, feedback: Feedback) -> Vec<UiCommand> {
        let mut commands = vec![UiCommand::ShowToast { toast: feedback.toast, duration_ms: TOAST_MS }];
        commands.extend(self.sound(feedback.sound));
        if let Some(kind) = feedback.flash {
            commands.push(UiCommand::Flash { kind, duration_ms: FLASH_MS });
        }
        commands
    }

    // --- タイマー ---

    fn tick(&mut self, round_id: u64) -> Vec<UiCommand> {
        if round_id != self.current_round() || !self.is_active() {
            debug!("Controller: ignoring tick for round {}", round_id);
            return Vec::new();
        }
        match self.timer.tick() {
            TimerTick::Running(remaining) => vec![UiCommand::UpdateTimer(remaining)],
            TimerTick::Expired => {
                let mut commands = vec![UiCommand::UpdateTimer(0)];
                let placed = self.world.cards_in_zone(Zone::Assembly).len();
                if placed == CARDS_PER_ROUND {
                    info!("Controller: time is up, checking the placed chain");
                    commands.extend(self.verify().1);
                } else {
                    info!("Controller: time is up with {} cards placed", placed);
                    commands.extend(self.present(Feedback::time_expired()));
                }
                commands.extend(self.finish_round(EXPIRY_DELAY_MS));
                commands
            }
            TimerTick::Idle => Vec::new(),
        }
    }

    // --- カード移動 ---

    fn move_card(&mut self, entity: Entity, zone: Zone, index: usize) -> Result<Vec<UiCommand>, GameError> {
        let outcome = MoveCardSystem::new(entity, zone, index).run(&mut self.world)?;
        let mut commands = Vec::new();
        if outcome.entered_assembly() {
            commands.extend(self.sound(Sound::Drop));
            commands.push(UiCommand::HideAssemblyHint);
        }
        Ok(commands)
    }

    // --- 効果音と BGM ---

    fn sound(&self, sound: Sound) -> Option<UiCommand> {
        self.effects_on.then_some(UiCommand::PlaySound(sound))
    }

    fn toggle_effects(&mut self) -> Vec<UiCommand> {
        self.effects_on = !self.effects_on;
        info!("Controller: effects {}", if self.effects_on { "on" } else { "off" });
        let mut commands = vec![UiCommand::SetEffectsLabel(self.effects_on)];
        if self.effects_on {
            commands.push(UiCommand::ResumeAudio);
        }
        commands
    }

    fn toggle_music(&mut self) -> Vec<UiCommand> {
        self.music_on = !self.music_on;
        if self.music_on {
            // オンにするたびに設定の音量に戻す
            self.music_volume = self.config.music_volume;
        }
        vec![UiCommand::SetMusic { playing: self.music_on, volume: self.music_volume }]
    }

    fn change_volume(&mut self, volume: f64) -> Vec<UiCommand> {
        if !volume.is_finite() {
            warn!("Controller: ignoring volume {}", volume);
            return Vec::new();
        }
        self.music_volume = volume.clamp(0.0, 1.0);
        vec![UiCommand::SetMusicVolume(self.music_volume)]
    }
}
