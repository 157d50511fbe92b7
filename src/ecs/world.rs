// src/ecs/world.rs

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use log::{debug, trace, warn};

use crate::components::zone::{Zone, ZoneInfo};
use crate::ecs::component::Component;
use crate::ecs::entity::Entity;

/// コンポーネントストレージとその操作をまとめた内部的な構造体だよ！
/// `storage` は型消去した `HashMap<Entity, T>`、`remover` はその型専用のお掃除関数。
/// `remover` があるおかげで、`destroy_entity` は中身の型を知らなくても
/// エンティティのコンポーネントを全種類まとめて消せるんだ 🧹
struct ComponentStoreEntry {
    storage: Box<dyn Any + Send + Sync>,
    remover: fn(&mut (dyn Any + Send + Sync), Entity),
}

impl ComponentStoreEntry {
    fn new<T: Component>() -> Self {
        let remover: fn(&mut (dyn Any + Send + Sync), Entity) = |storage_any, entity| {
            if let Some(storage) = storage_any.downcast_mut::<HashMap<Entity, T>>() {
                storage.remove(&entity);
            } else {
                warn!(
                    "World: remover for {} got a storage of another type",
                    std::any::type_name::<T>()
                );
            }
        };
        Self {
            storage: Box::new(HashMap::<Entity, T>::new()),
            remover,
        }
    }
}

/// ゲーム世界の全てのエンティティとコンポーネントを管理する中心的な構造体だよ。
/// エンティティの生存管理と、コンポーネントの型ごとの保存・取得を担当するよ。
pub struct World {
    /// 現在生存しているエンティティの ID。
    entities: HashSet<Entity>,
    /// 次に生成するエンティティに割り当てる ID。
    next_entity_id: usize,
    /// コンポーネントの型 (TypeId) ごとのストレージ。
    component_stores: HashMap<TypeId, ComponentStoreEntry>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// 新しい空の World を作る。
    pub fn new() -> Self {
        World {
            entities: HashSet::new(),
            next_entity_id: 0,
            component_stores: HashMap::new(),
        }
    }

    /// 新しいエンティティを生成して返す。ID は単調増加で、使い回しはしないよ。
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity(self.next_entity_id);
        self.next_entity_id += 1;
        self.entities.insert(entity);
        trace!("World: created entity {:?}", entity);
        entity
    }

    /// 指定した ID でエンティティを作る。`GAME_STATE_ENTITY` みたいな予約 ID 用。
    /// 既に生きている ID なら何もしない (セットなので重複しない)。
    pub fn create_entity_with_id(&mut self, entity: Entity) {
        self.entities.insert(entity);
        // 次の ID が予約 ID とかぶらないように進めておく
        self.next_entity_id = self.next_entity_id.max(entity.0 + 1);
        trace!("World: created entity with specific id {:?}", entity);
    }

    pub fn is_entity_alive(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// エンティティを破棄する。くっついていたコンポーネントも全部消えるよ！
    ///
    /// # 戻り値
    /// 生きていたエンティティを消したら `true`、元々いなかったら `false`。
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if !self.entities.remove(&entity) {
            debug!("World: tried to destroy unknown entity {:?}", entity);
            return false;
        }
        for entry in self.component_stores.values_mut() {
            (entry.remover)(entry.storage.as_mut(), entity);
        }
        trace!("World: destroyed entity {:?}", entity);
        true
    }

    /// コンポーネントの型を World に登録する。
    /// `add_component` は未登録の型も自動で登録するので、これは初期化時に
    /// 「この World で使う型」を明示しておくためのもの。二重登録しても中身は消えないよ。
    pub fn register_component<T: Component>(&mut self) {
        let type_id = TypeId::of::<T>();
        if self.component_stores.contains_key(&type_id) {
            debug!("World: component {} already registered", std::any::type_name::<T>());
            return;
        }
        self.component_stores.insert(type_id, ComponentStoreEntry::new::<T>());
        debug!("World: registered component {}", std::any::type_name::<T>());
    }

    /// エンティティにコンポーネントを追加 (既にあれば上書き) する。
    /// 生きていないエンティティには追加しないで `false` を返すよ。
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> bool {
        if !self.is_entity_alive(entity) {
            debug!(
                "World: ignoring {} for dead entity {:?}",
                std::any::type_name::<T>(),
                entity
            );
            return false;
        }
        if self.storage::<T>().is_none() {
            self.register_component::<T>();
        }
        match self.storage_mut::<T>() {
            Some(storage) => {
                storage.insert(entity, component);
                true
            }
            None => false,
        }
    }

    /// コンポーネントへの読み取り専用参照を取得する。
    /// 型が未登録、エンティティが持っていない、などは全部 `None`。
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>().and_then(|storage| storage.get(&entity))
    }

    /// コンポーネントへの書き込み可能参照を取得する。死んだエンティティは `None`。
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.is_entity_alive(entity) {
            return None;
        }
        self.storage_mut::<T>().and_then(|storage| storage.get_mut(&entity))
    }

    /// コンポーネントを削除して、その値を返す。
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.storage_mut::<T>().and_then(|storage| storage.remove(&entity))
    }

    /// 指定した型のコンポーネントを持つ、生きているエンティティの一覧。
    /// HashMap の順番はバラバラなので、ID 順に並べて返すよ。
    pub fn get_all_entities_with_component<T: Component>(&self) -> Vec<Entity> {
        match self.storage::<T>() {
            Some(storage) => storage
                .keys()
                .copied()
                .filter(|e| self.is_entity_alive(*e))
                .sorted()
                .collect(),
            None => Vec::new(),
        }
    }

    /// 指定したゾーンにあるカードを、ゾーン内の並び順 (`position`) で返す。
    pub fn cards_in_zone(&self, zone: Zone) -> Vec<Entity> {
        self.get_all_entities_with_component::<ZoneInfo>()
            .into_iter()
            .filter_map(|entity| {
                self.get_component::<ZoneInfo>(entity)
                    .filter(|info| info.zone == zone)
                    .map(|info| (entity, info.position))
            })
            .sorted_by_key(|&(entity, position)| (position, entity))
            .map(|(entity, _)| entity)
            .collect()
    }

    // --- 型付きストレージへのアクセス (内部用) ---

    pub(crate) fn storage<T: Component>(&self) -> Option<&HashMap<Entity, T>> {
        self.component_stores
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.storage.downcast_ref::<HashMap<Entity, T>>())
    }

    pub(crate) fn storage_mut<T: Component>(&mut self) -> Option<&mut HashMap<Entity, T>> {
        self.component_stores
            .get_mut(&TypeId::of::<T>())
            .and_then(|entry| entry.storage.downcast_mut::<HashMap<Entity, T>>())
    }

    #[cfg(test)]
    pub(crate) fn entity_count(&self) -> usize {
        self.entities.len()
    }

    #[cfg(test)]
    pub(crate) fn next_entity_id(&self) -> usize {
        self.next_entity_id
    }
}
