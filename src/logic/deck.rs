// src/logic/deck.rs

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::card::{Card, Role};
use crate::config::catalog::bucket;
use crate::config::game::{CARDS_PER_ROUND, MAX_RESHUFFLES};

/// 1 ラウンド分のカード。役割ごとに 1 枚ずつ、計 4 枚。
pub type RoundCards = [Card; CARDS_PER_ROUND];

/// カタログから役割ごとに 1 枚ずつランダムに選ぶよ！
/// 返り値は正しい順番 (生産者 → 三次消費者) に並んでる。
pub fn pick_one_per_role<R: Rng + ?Sized>(rng: &mut R) -> RoundCards {
    Role::CANONICAL_ORDER.map(|role| {
        let cards = bucket(role);
        cards[rng.gen_range(0..cards.len())]
    })
}

/// 並びが正しい食物連鎖の順番そのものかどうか。
pub fn is_canonical(cards: &[Card]) -> bool {
    cards.len() == Role::CANONICAL_ORDER.len()
        && cards.iter().map(|c| c.role).eq(Role::CANONICAL_ORDER)
}

/// カードをシャッフルする。正しい順番になっちゃったらやり直し！🔀
///
/// 1 回のシャッフルで正解になる確率は 1/24 なので、普通は 1〜2 回で終わる。
/// それでも `MAX_RESHUFFLES` 回ぜんぶ正解を引いたら、左に 1 枚ずらして終わり。
/// ずらした並びは絶対に正解にならないので、このループは必ず止まるよ。
pub fn shuffle_until_unsorted<R: Rng + ?Sized>(cards: &mut RoundCards, rng: &mut R) {
    for attempt in 1..=MAX_RESHUFFLES {
        cards.shuffle(rng);
        if !is_canonical(cards) {
            if attempt > 1 {
                debug!("deck: needed {attempt} shuffles to leave the canonical order");
            }
            return;
        }
    }
    cards.rotate_left(1);
}

/// 新しいラウンドのカードを作る。どの役割も 1 枚ずつで、最初から正解の並びにはならない。
pub fn generate_round<R: Rng + ?Sized>(rng: &mut R) -> RoundCards {
    let mut cards = pick_one_per_role(rng);
    shuffle_until_unsorted(&mut cards, rng);
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn roles(cards: &[Card]) -> Vec<Role> {
        cards.iter().map(|c| c.role).collect()
    }

    #[test]
    fn picked_cards_are_one_per_role_in_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let cards = pick_one_per_role(&mut rng);
        assert_eq!(roles(&cards), Role::CANONICAL_ORDER.to_vec());
        assert!(is_canonical(&cards));
    }

    #[test]
    fn is_canonical_needs_exactly_four_in_order() {
        let mut rng = StdRng::seed_from_u64(1);
        let cards = pick_one_per_role(&mut rng);
        assert!(is_canonical(&cards));
        assert!(!is_canonical(&cards[..3]));
        let mut swapped = cards;
        swapped.swap(0, 1);
        assert!(!is_canonical(&swapped));
    }

    #[test]
    fn rotating_the_canonical_order_breaks_it() {
        let mut cards = pick_one_per_role(&mut StdRng::seed_from_u64(5));
        cards.rotate_left(1);
        assert!(!is_canonical(&cards));
    }

    #[test]
    fn degenerate_rng_still_yields_a_puzzle() {
        // StepRng(0, 0) はいつも 0 を返す。1 回目のシャッフルでもう崩れる
        let mut rng = StepRng::new(0, 0);
        let mut cards = pick_one_per_role(&mut StdRng::seed_from_u64(3));
        shuffle_until_unsorted(&mut cards, &mut rng);
        assert!(!is_canonical(&cards));
        let set: HashSet<Role> = cards.iter().map(|c| c.role).collect();
        assert_eq!(set.len(), 4);
    }

    /// 決まった u32 の列を繰り返し返すだけの RNG。
    /// [3<<30, 2/3 * 2^32, 1<<31] だと 4 枚のシャッフルが毎回「何も入れ替えない」になる。
    struct ScriptedRng {
        script: Vec<u32>,
        next: usize,
        calls: usize,
    }

    impl ScriptedRng {
        fn identity_shuffle() -> Self {
            Self { script: vec![3 << 30, 2_863_311_531, 1 << 31], next: 0, calls: 0 }
        }
    }

    impl rand::RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            let value = self.script[self.next];
            self.next = (self.next + 1) % self.script.len();
            self.calls += 1;
            value
        }

        fn next_u64(&mut self) -> u64 {
            (u64::from(self.next_u32()) << 32) | u64::from(self.next_u32())
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(4) {
                let bytes = self.next_u32().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn scripted_rng_keeps_the_canonical_order() {
        let mut cards = pick_one_per_role(&mut StdRng::seed_from_u64(8));
        cards.shuffle(&mut ScriptedRng::identity_shuffle());
        assert!(is_canonical(&cards));
    }

    #[test]
    fn reshuffle_gives_up_and_rotates_when_every_shuffle_is_canonical() {
        use Role::*;
        let original = pick_one_per_role(&mut StdRng::seed_from_u64(8));
        let mut cards = original;
        let mut rng = ScriptedRng::identity_shuffle();
        shuffle_until_unsorted(&mut cards, &mut rng);

        // 上限まで試してから 1 枚ずらす
        assert_eq!(rng.calls, MAX_RESHUFFLES * 3);
        assert_eq!(roles(&cards), vec![Primary, Secondary, Tertiary, Producer]);
        assert!(!is_canonical(&cards));
        assert_eq!(cards[3], original[0]);
    }

    #[test]
    fn different_seeds_eventually_pick_different_cards() {
        let seen: HashSet<&str> = (0..200u64)
            .flat_map(|seed| generate_round(&mut StdRng::seed_from_u64(seed)))
            .map(|c| c.name)
            .collect();
        // 12 枚全部が一度は出てくるはず
        assert_eq!(seen.len(), 12);
    }

    proptest! {
        #[test]
        fn generated_round_covers_every_role_once(seed in any::<u64>()) {
            let cards = generate_round(&mut StdRng::seed_from_u64(seed));
            let mut sorted = roles(&cards);
            sorted.sort();
            prop_assert_eq!(sorted, Role::CANONICAL_ORDER.to_vec());
        }

        #[test]
        fn generated_round_is_never_in_canonical_order(seed in any::<u64>()) {
            let cards = generate_round(&mut StdRng::seed_from_u64(seed));
            prop_assert!(!is_canonical(&cards));
            prop_assert_ne!(roles(&cards), Role::CANONICAL_ORDER.to_vec());
        }
    }
}
