// src/app/browser_event_manager.rs
//! ブラウザのイベントリスナーとタイマー (setInterval / setTimeout) の付け外し担当。

use std::sync::{Arc, Mutex, Weak};

use log::{debug, error, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{window, Event, EventTarget, HtmlInputElement, KeyboardEvent, Window};

use crate::app::controller::AppEvent;
use crate::app::game_app::{dispatch, lock, AppShared};
use crate::error::GameError;

fn browser_window() -> Result<Window, GameError> {
    window().ok_or(GameError::MissingElement("window"))
}

/// 付けたリスナー 1 つ分。外すときに同じクロージャが必要なので一緒に持っておく。
pub(crate) struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// 動いている setInterval。ID とコールバックをセットで持つよ。
pub(crate) struct Interval {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

fn listen(
    listeners: &Mutex<Vec<Listener>>,
    target: &EventTarget,
    event: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), GameError> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    lock(listeners).push(Listener { target: target.clone(), event, closure });
    debug!("  Attached {} listener.", event);
    Ok(())
}

/// クリックされたら `event` を投げるだけのリスナー。
fn dispatch_on(
    shared: &Arc<AppShared>,
    target: &EventTarget,
    event_name: &'static str,
    event: AppEvent,
) -> Result<(), GameError> {
    let weak = Arc::downgrade(shared);
    listen(&shared.listeners, target, event_name, move |_| {
        if let Some(shared) = weak.upgrade() {
            if let Err(e) = dispatch(&shared, event.clone()) {
                error!("{} handler failed: {}", event_name, e);
            }
        }
    })
}

/// ボタン・キー・スライダー・画面回転のリスナーをまとめて付ける。
/// もう付いているなら何もしないで `false` を返すよ。
pub(crate) fn attach_listeners(shared: &Arc<AppShared>) -> Result<bool, GameError> {
    if !lock(&shared.listeners).is_empty() {
        debug!("Page listeners already attached, skipping.");
        return Ok(false);
    }
    let page = shared.renderer.page();
    debug!("Attaching page listeners...");

    dispatch_on(shared, &page.check_button, "click", AppEvent::CheckRequested)?;
    dispatch_on(shared, &page.new_round_button, "click", AppEvent::NewRoundRequested)?;
    dispatch_on(shared, &page.effects_toggle, "click", AppEvent::EffectsToggled)?;
    dispatch_on(shared, &page.music_toggle, "click", AppEvent::MusicToggled)?;

    // 組み立てエリアで Enter を押しても確認できる ⌨️
    let weak = Arc::downgrade(shared);
    listen(&shared.listeners, &page.drop_zone, "keydown", move |event: Event| {
        let is_enter = event
            .dyn_ref::<KeyboardEvent>()
            .map(|key| key.key() == "Enter")
            .unwrap_or(false);
        if let (true, Some(shared)) = (is_enter, weak.upgrade()) {
            if let Err(e) = dispatch(&shared, AppEvent::CheckRequested) {
                error!("keydown handler failed: {}", e);
            }
        }
    })?;

    let weak = Arc::downgrade(shared);
    listen(&shared.listeners, &page.volume_slider, "input", move |event: Event| {
        let Some(slider) = event.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) else {
            warn!("input event without a slider target");
            return;
        };
        let volume = slider.value().parse::<f64>().unwrap_or(f64::NAN);
        if let Some(shared) = weak.upgrade() {
            if let Err(e) = dispatch(&shared, AppEvent::VolumeChanged(volume)) {
                error!("input handler failed: {}", e);
            }
        }
    })?;

    let window = browser_window()?;
    for event in ["resize", "orientationchange"] {
        let weak = Arc::downgrade(shared);
        listen(&shared.listeners, &window, event, move |_| {
            if let Some(shared) = weak.upgrade() {
                if let Err(e) = shared.renderer.update_orientation() {
                    debug!("orientation check failed: {}", e);
                }
            }
        })?;
    }
    Ok(true)
}

/// 付けたリスナーを全部外す。
pub(crate) fn detach_listeners(listeners: &Mutex<Vec<Listener>>) {
    for listener in lock(listeners).drain(..) {
        if let Err(e) = listener
            .target
            .remove_event_listener_with_callback(listener.event, listener.closure.as_ref().unchecked_ref())
        {
            warn!("Failed to detach {} listener: {:?}", listener.event, e);
        }
    }
}

/// `interval_ms` ごとに `callback` を呼ぶ。止めるときは `clear_interval` に返り値を渡してね。
pub(crate) fn set_interval(callback: impl FnMut() + 'static, interval_ms: i32) -> Result<Interval, GameError> {
    let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
    let id = browser_window()?
        .set_interval_with_callback_and_timeout_and_arguments_0(closure.as_ref().unchecked_ref(), interval_ms)?;
    Ok(Interval { id, _closure: closure })
}

pub(crate) fn clear_interval(interval: Interval) {
    match browser_window() {
        Ok(window) => window.clear_interval_with_handle(interval.id),
        Err(e) => warn!("Failed to clear interval {}: {}", interval.id, e),
    }
}

/// `delay_ms` 後に 1 回だけ `callback` を呼ぶ。クロージャは呼ばれたら JS 側で解放されるよ。
pub(crate) fn set_timeout(callback: impl FnOnce() + 'static, delay_ms: u32) -> Result<i32, GameError> {
    let function = Closure::once_into_js(callback);
    let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
    Ok(browser_window()?.set_timeout_with_callback_and_timeout_and_arguments_0(function.unchecked_ref(), delay)?)
}

/// 毎ティック、コントローラーに `Tick` を投げるインターバルを作る。
pub(crate) fn start_ticking(shared: Weak<AppShared>, round_id: u64, interval_ms: i32) -> Result<Interval, GameError> {
    set_interval(
        move || {
            if let Some(shared) = shared.upgrade() {
                if let Err(e) = dispatch(&shared, AppEvent::Tick { round_id }) {
                    error!("tick handler failed: {}", e);
                }
            }
        },
        interval_ms,
    )
}
