// src/ecs/system.rs

use crate::ecs::world::World;

/// System（システム）トレイトだよ！
///
/// システムはゲームのロジック (ルールや振る舞い) を 1 つずつカプセル化したもの。
/// 「ラウンドを配る」「カードを動かす」「並びを判定する」みたいに、
/// 関心事ごとに分けて World の中身を読み書きするんだ。
///
/// 結果を呼び出し側 (コントローラー) に返したいことが多いので、
/// `Output` で戻り値の型を決められるようにしてあるよ。
pub trait System {
    /// `run` が返す値の型。何も返さないなら `()`。
    type Output;

    /// このシステムを実行するよ！
    ///
    /// # 引数
    /// - `world`: エンティティとコンポーネントを保持する World への可変参照。
    fn run(&mut self, world: &mut World) -> Self::Output;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::component::Component;

    // --- テスト用のダミーコンポーネント ---
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Counter(u32);
    impl Component for Counter {}

    // 全ての Counter を 1 増やして、触った数を返すだけのシステム
    struct BumpSystem;

    impl System for BumpSystem {
        type Output = usize;

        fn run(&mut self, world: &mut World) -> usize {
            let entities = world.get_all_entities_with_component::<Counter>();
            for &entity in &entities {
                if let Some(counter) = world.get_component_mut::<Counter>(entity) {
                    counter.0 += 1;
                }
            }
            entities.len()
        }
    }

    #[test]
    fn system_runs_and_modifies_world() {
        let mut world = World::new();
        world.register_component::<Counter>();

        let a = world.create_entity();
        let b = world.create_entity();
        world.add_component(a, Counter(0));
        world.add_component(b, Counter(10));

        let touched = BumpSystem.run(&mut world);
        assert_eq!(touched, 2);
        assert_eq!(world.get_component::<Counter>(a), Some(&Counter(1)));
        assert_eq!(world.get_component::<Counter>(b), Some(&Counter(11)));

        BumpSystem.run(&mut world);
        assert_eq!(world.get_component::<Counter>(a), Some(&Counter(2)));
    }
}
