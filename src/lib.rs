// src/lib.rs

// WASM と JavaScript を繋ぐための基本！
use wasm_bindgen::prelude::*;

// 自分で作ったモジュールたち！ これでコードを整理してるんだ。
pub mod app;
pub mod components;
pub mod config;
pub mod ecs;
pub mod error;
pub mod logic;
pub mod systems;

pub use app::controller::{AppEvent, GameController, UiCommand};
pub use app::game_app::GameApp;
pub use error::GameError;

// JavaScript の console.* を Rust から呼び出すための準備 (extern ブロック)。
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
    #[wasm_bindgen(js_namespace = console, js_name = debug)]
    fn console_debug(s: &str);
    #[wasm_bindgen(js_namespace = console, js_name = info)]
    fn console_info(s: &str);
    #[wasm_bindgen(js_namespace = console, js_name = warn)]
    fn console_warn(s: &str);
    #[wasm_bindgen(js_namespace = console, js_name = error)]
    fn console_error(s: &str);
}

/// `log` クレートのマクロ (`info!` とか) をブラウザのコンソールに流すロガー。
/// ネイティブのテストでは何もインストールしないので、ログは捨てられるよ。
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}: {}", record.level(), record.target(), record.args());
        match record.level() {
            log::Level::Error => console_error(&line),
            log::Level::Warn => console_warn(&line),
            log::Level::Info => console_info(&line),
            log::Level::Debug | log::Level::Trace => console_debug(&line),
        }
    }

    fn flush(&self) {}
}

/// コンソールロガーを入れて、レベルを設定する。二回目以降はレベルだけ変わるよ。
pub(crate) fn init_logging(level: log::LevelFilter) {
    if log::set_logger(&LOGGER).is_err() {
        log::debug!("logger already installed, updating level only");
    }
    log::set_max_level(level);
}

// main 関数の代わりに、Wasm がロードされた時に最初に実行される関数だよ。
#[wasm_bindgen(start)]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
    init_logging(log::LevelFilter::Info);
    log("Panic hook set!");
}
