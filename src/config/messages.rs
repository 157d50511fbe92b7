// src/config/messages.rs
//! 画面に出す文言 (ポルトガル語)。

pub const CORRECT: &str = "Parabéns! Cadeia correta!";
pub const WRONG: &str = "Cadeia incorreta! Tente novamente.";
pub const INCOMPLETE: &str = "Coloque as 4 cartas na área de montagem!";
pub const TIME_EXPIRED: &str = "Tempo esgotado! Coloque 4 cartas para verificar.";
pub const ASSEMBLY_HINT: &str = "Arraste as cartas para cá — reordene livremente";

pub fn score_label(score: u32) -> String {
    format!("Pontuação: {score}")
}

pub fn timer_label(seconds: u32) -> String {
    format!("Tempo: {seconds}s")
}

pub fn effects_label(on: bool) -> &'static str {
    if on { "Efeitos: On" } else { "Efeitos: Off" }
}

pub fn music_label(on: bool) -> &'static str {
    if on { "Música: On" } else { "Música: Off" }
}
