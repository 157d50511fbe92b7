// src/config/catalog.rs
//! 海の食物網のカードカタログ 🌊 役割ごとに 3 枚ずつ。

use crate::components::card::{Card, Role};

/// 役割ごとのカード枚数
pub const CARDS_PER_ROLE: usize = 3;

/// `Role::CANONICAL_ORDER` と同じ順番で、役割ごとのバケツに分けてあるよ。
pub const CATALOG: [[Card; CARDS_PER_ROLE]; 4] = [
    [
        Card { name: "Fitoplâncton", role: Role::Producer, image: "assets/cards/producers_fitoplancton.png" },
        Card { name: "Algas verdes", role: Role::Producer, image: "assets/cards/producers_algas_verdes.png" },
        Card { name: "Algas vermelhas", role: Role::Producer, image: "assets/cards/producers_algas_vermelhas.png" },
    ],
    [
        Card { name: "Zooplâncton", role: Role::Primary, image: "assets/cards/primary_zooplancton.png" },
        Card { name: "Peixe pequeno", role: Role::Primary, image: "assets/cards/primary_peixe_pequeno.png" },
        Card { name: "Cavalo-marinho", role: Role::Primary, image: "assets/cards/primary_cavalo_marinho.png" },
    ],
    [
        Card { name: "Água-viva", role: Role::Secondary, image: "assets/cards/secondary_agua_viva.png" },
        Card { name: "Lula", role: Role::Secondary, image: "assets/cards/secondary_lula.png" },
        Card { name: "Peixe carnívoro", role: Role::Secondary, image: "assets/cards/secondary_peixe_carnivoro.png" },
    ],
    [
        Card { name: "Tubarão", role: Role::Tertiary, image: "assets/cards/tertiary_tubarao.png" },
        Card { name: "Orca", role: Role::Tertiary, image: "assets/cards/tertiary_orca.png" },
        Card { name: "Foca", role: Role::Tertiary, image: "assets/cards/tertiary_foca.png" },
    ],
];

/// 指定した役割のカードのバケツ。
pub fn bucket(role: Role) -> &'static [Card; CARDS_PER_ROLE] {
    &CATALOG[role as usize]
}

/// カタログの全カード。
pub fn all_cards() -> impl Iterator<Item = &'static Card> {
    CATALOG.iter().flatten()
}
