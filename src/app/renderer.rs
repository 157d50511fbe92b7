// src/app/renderer.rs
//! GameApp の描画関連ロジック。DOM をいじるのはここだけだよ！🖼️

use std::sync::Mutex;

use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlAudioElement, HtmlElement, HtmlImageElement, HtmlInputElement};

use crate::app::browser_event_manager::set_timeout;
use crate::app::controller::CardView;
use crate::app::game_app::lock;
use crate::config::dom::*;
use crate::config::messages;
use crate::error::GameError;
use crate::logic::feedback::{FeedbackKind, Toast};

/// id で要素を探して、欲しい型にキャストする。
pub(crate) fn element_by_id<T: JsCast>(document: &Document, id: &'static str) -> Result<T, GameError> {
    document
        .get_element_by_id(id)
        .ok_or(GameError::MissingElement(id))?
        .dyn_into::<T>()
        .map_err(|_| GameError::Dom(format!("#{id} has an unexpected element type")))
}

fn optional_element(document: &Document, id: &'static str) -> Option<HtmlElement> {
    let found = element_by_id::<HtmlElement>(document, id).ok();
    if found.is_none() {
        debug!("Renderer: optional element #{} not present", id);
    }
    found
}

fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T, GameError> {
    document
        .create_element(tag)?
        .dyn_into::<T>()
        .map_err(|_| GameError::Dom(format!("<{tag}> has an unexpected element type")))
}

/// ゲームが使うページ上の要素一式。`GameApp::new` で一回だけ探すよ。
pub(crate) struct Page {
    pub document: Document,
    pub cards_container: HtmlElement,
    pub drop_zone: HtmlElement,
    pub check_button: HtmlElement,
    pub new_round_button: HtmlElement,
    pub effects_toggle: HtmlElement,
    pub music_toggle: HtmlElement,
    pub volume_slider: HtmlInputElement,
    pub toast: HtmlElement,
    pub scoreboard: HtmlElement,
    pub music: HtmlAudioElement,
    pub timers: Vec<HtmlElement>,
    pub flash_overlay: Option<HtmlElement>,
    pub rotate_message: Option<HtmlElement>,
}

impl Page {
    pub fn lookup(document: Document) -> Result<Self, GameError> {
        Ok(Self {
            cards_container: element_by_id(&document, CARDS_CONTAINER_ID)?,
            drop_zone: element_by_id(&document, DROP_ZONE_ID)?,
            check_button: element_by_id(&document, CHECK_BUTTON_ID)?,
            new_round_button: element_by_id(&document, NEW_ROUND_BUTTON_ID)?,
            effects_toggle: element_by_id(&document, EFFECTS_TOGGLE_ID)?,
            music_toggle: element_by_id(&document, MUSIC_TOGGLE_ID)?,
            volume_slider: element_by_id(&document, VOLUME_SLIDER_ID)?,
            toast: element_by_id(&document, TOAST_ID)?,
            scoreboard: element_by_id(&document, SCOREBOARD_ID)?,
            music: element_by_id(&document, MUSIC_ID)?,
            timers: TIMER_IDS.iter().filter_map(|id| optional_element(&document, id)).collect(),
            flash_overlay: optional_element(&document, FLASH_OVERLAY_ID),
            rotate_message: optional_element(&document, ROTATE_MESSAGE_ID),
            document,
        })
    }
}

/// カード画像に付けた onerror ハンドラー。次のラウンドを配る前に外して捨てる。
struct ImageErrorHandler {
    img: HtmlImageElement,
    _closure: Closure<dyn FnMut()>,
}

pub(crate) struct Renderer {
    page: Page,
    image_handlers: Mutex<Vec<ImageErrorHandler>>,
}

impl Renderer {
    pub fn new(page: Page) -> Self {
        Self { page, image_handlers: Mutex::new(Vec::new()) }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 手札を描き直して、組み立てエリアをヒントだけの状態に戻す。
    pub fn render_round(&self, cards: &[CardView]) -> Result<(), GameError> {
        self.release_image_handlers();
        self.page.cards_container.set_inner_html("");
        for view in cards {
            let el = self.create_card_element(view)?;
            self.page.cards_container.append_child(&el)?;
        }
        self.reset_assembly()
    }

    /// 前のラウンドの onerror を外してからクロージャを落とす。
    pub fn release_image_handlers(&self) {
        let released: Vec<ImageErrorHandler> = lock(&self.image_handlers).drain(..).collect();
        for handler in &released {
            handler.img.set_onerror(None);
        }
        if !released.is_empty() {
            debug!("Renderer: released {} image handlers", released.len());
        }
    }

    #[cfg(all(test, target_arch = "wasm32"))]
    fn image_handler_count(&self) -> usize {
        lock(&self.image_handlers).len()
    }

    fn reset_assembly(&self) -> Result<(), GameError> {
        let zone = &self.page.drop_zone;
        zone.set_inner_html("");
        let hint: HtmlElement = create(&self.page.document, "div")?;
        hint.set_class_name(ASSEMBLY_HINT_CLASS);
        hint.set_text_content(Some(messages::ASSEMBLY_HINT));
        zone.append_child(&hint)?;
        Ok(())
    }

    pub fn hide_assembly_hint(&self) -> Result<(), GameError> {
        if let Some(hint) = self.page.drop_zone.query_selector(&format!(".{ASSEMBLY_HINT_CLASS}"))? {
            hint.remove();
        }
        Ok(())
    }

    /// `div.card` を 1 枚作る。画像が読めなかったら名前入りのプレースホルダーに差し替わるよ。
    fn create_card_element(&self, view: &CardView) -> Result<HtmlElement, GameError> {
        let document = &self.page.document;
        let el: HtmlElement = create(document, "div")?;
        el.set_class_name(CARD_CLASS);
        el.set_tab_index(0);
        el.set_attribute("data-level", view.role.as_str())?;
        el.set_attribute("data-name", view.name)?;
        el.set_attribute("data-entity", &view.entity.0.to_string())?;

        let img: HtmlImageElement = create(document, "img")?;
        img.set_src(view.image);
        img.set_alt(view.name);

        let card_el = el.clone();
        let broken_img = img.clone();
        let doc = document.clone();
        let name = view.name;
        let on_error = Closure::wrap(Box::new(move || {
            // 2 回目以降は img がもう外れているので何もしない
            if broken_img.parent_node().is_none() {
                return;
            }
            broken_img.remove();
            match create::<Element>(&doc, "div") {
                Ok(placeholder) => {
                    placeholder.set_class_name(PLACEHOLDER_CLASS);
                    placeholder.set_text_content(Some(name));
                    if let Err(e) = card_el.append_child(&placeholder) {
                        warn!("Renderer: could not insert placeholder for {}: {:?}", name, e);
                    }
                }
                Err(e) => warn!("Renderer: could not create placeholder for {}: {}", name, e),
            }
        }) as Box<dyn FnMut()>);
        img.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        lock(&self.image_handlers).push(ImageErrorHandler { img: img.clone(), _closure: on_error });

        el.append_child(&img)?;
        Ok(el)
    }

    pub fn update_timer(&self, seconds: u32) {
        let label = messages::timer_label(seconds);
        for timer in &self.page.timers {
            timer.set_text_content(Some(&label));
        }
    }

    pub fn update_score(&self, score: u32) {
        self.page.scoreboard.set_text_content(Some(&messages::score_label(score)));
    }

    /// トーストを出して、`duration_ms` 後に `show` を外す。
    pub fn show_toast(&self, toast: &Toast, duration_ms: u32) -> Result<(), GameError> {
        let el = &self.page.toast;
        el.set_text_content(Some(toast.message));
        let classes = el.class_list();
        for kind in FeedbackKind::ALL {
            classes.remove_1(kind.css_class())?;
        }
        if let Some(kind) = toast.kind {
            classes.add_1(kind.css_class())?;
        }
        classes.add_1(TOAST_SHOW_CLASS)?;

        let hide = el.clone();
        set_timeout(
            move || {
                if let Err(e) = hide.class_list().remove_1(TOAST_SHOW_CLASS) {
                    debug!("Renderer: could not hide toast: {:?}", e);
                }
            },
            duration_ms,
        )?;
        Ok(())
    }

    /// 画面全体を一瞬だけ色付きで光らせる ✨ オーバーレイが無いページでは何もしない。
    pub fn flash(&self, kind: FeedbackKind, duration_ms: u32) -> Result<(), GameError> {
        let Some(overlay) = &self.page.flash_overlay else {
            return Ok(());
        };
        overlay.set_class_name(&format!("flash {}", kind.css_class()));
        overlay.style().set_property("opacity", "1")?;

        let fade = overlay.clone();
        set_timeout(
            move || {
                if let Err(e) = fade.style().set_property("opacity", "0") {
                    debug!("Renderer: could not fade flash overlay: {:?}", e);
                }
            },
            duration_ms,
        )?;
        Ok(())
    }

    pub fn set_effects_label(&self, on: bool) {
        self.page.effects_toggle.set_text_content(Some(messages::effects_label(on)));
    }

    pub fn set_music_label(&self, on: bool) {
        self.page.music_toggle.set_text_content(Some(messages::music_label(on)));
    }

    /// 縦向きのときだけ「横にしてね」メッセージを出す 📱
    pub fn update_orientation(&self) -> Result<(), GameError> {
        let Some(message) = &self.page.rotate_message else {
            return Ok(());
        };
        let window = web_sys::window().ok_or(GameError::MissingElement("window"))?;
        let width = window.inner_width()?.as_f64().unwrap_or_default();
        let height = window.inner_height()?.as_f64().unwrap_or_default();
        let display = if is_portrait(width, height) { "flex" } else { "none" };
        message.style().set_property("display", display)?;
        Ok(())
    }
}

fn is_portrait(width: f64, height: f64) -> bool {
    height > width
}

#[cfg(all(test, target_arch = "wasm32"))]
pub(crate) mod browser_tests {
    use wasm_bindgen_test::*;

    use super::*;
    use crate::components::card::Role;
    use crate::ecs::Entity;

    wasm_bindgen_test_configure!(run_in_browser);

    /// ゲームが必要とする要素だけを置いたページ。
    pub(crate) fn test_page() -> Page {
        let document = web_sys::window().and_then(|w| w.document()).unwrap();
        document.body().unwrap().set_inner_html(
            r#"<div id="cards-container"></div>
            <div id="drop-zone"></div>
            <button id="check-btn"></button>
            <button id="new-btn"></button>
            <button id="effects-toggle"></button>
            <button id="music-toggle"></button>
            <input id="volume-slider" type="range">
            <div id="toast"></div>
            <div id="scoreboard"></div>
            <audio id="background-music"></audio>"#,
        );
        Page::lookup(document).unwrap()
    }

    fn hand(first_entity: usize) -> Vec<CardView> {
        Role::CANONICAL_ORDER
            .into_iter()
            .enumerate()
            .map(|(i, role)| CardView {
                entity: Entity(first_entity + i),
                name: "Capim",
                role,
                image: "img/missing.png",
            })
            .collect()
    }

    #[wasm_bindgen_test]
    fn each_round_keeps_only_its_own_image_handlers() {
        let renderer = Renderer::new(test_page());
        renderer.render_round(&hand(1)).unwrap();
        assert_eq!(renderer.image_handler_count(), 4);
        let first_imgs: Vec<HtmlImageElement> =
            lock(&renderer.image_handlers).iter().map(|handler| handler.img.clone()).collect();
        assert!(first_imgs.iter().all(|img| img.onerror().is_some()));

        renderer.render_round(&hand(5)).unwrap();
        assert_eq!(renderer.image_handler_count(), 4);
        assert!(first_imgs.iter().all(|img| img.onerror().is_none()));

        renderer.release_image_handlers();
        assert_eq!(renderer.image_handler_count(), 0);
    }
}

#[cfg(test)]
mod tests {
    use super::is_portrait;

    #[test]
    fn portrait_means_taller_than_wide() {
        assert!(is_portrait(390.0, 844.0));
        assert!(!is_portrait(844.0, 390.0));
        assert!(!is_portrait(500.0, 500.0));
    }
}
