//! Entity elements inside the playfield

use std::collections::{HashMap, HashSet};

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::settings::Settings;
use crate::sim::GameState;

/// Max screen shake offset in px at full intensity
const SHAKE_PX: f64 = 8.0;

/// DOM surface for one playfield
pub struct DomRenderer {
    document: Document,
    area: HtmlElement,
    player: Option<HtmlElement>,
    flash: Option<HtmlElement>,
    objects: HashMap<u32, HtmlElement>,
    particles: HashMap<u32, HtmlElement>,
    floats: HashMap<u32, HtmlElement>,
}

fn html_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
}

fn px(v: f32) -> String {
    format!("{}px", v)
}

impl DomRenderer {
    /// Attach to `#gameArea`; None if the page has no playfield
    pub fn new(document: Document) -> Option<Self> {
        let area = html_by_id(&document, "gameArea")?;
        let player = html_by_id(&document, "player");
        let flash = html_by_id(&document, "flash");
        if player.is_none() {
            log::warn!("No #player element - paddle will not be drawn");
        }
        Some(Self {
            document,
            area,
            player,
            flash,
            objects: HashMap::new(),
            particles: HashMap::new(),
            floats: HashMap::new(),
        })
    }

    /// Current playfield size in px
    pub fn playfield_size(&self) -> (f32, f32) {
        (
            self.area.offset_width() as f32,
            self.area.offset_height() as f32,
        )
    }

    /// Paddle size as laid out by CSS
    pub fn paddle_size(&self) -> Option<(f32, f32)> {
        let player = self.player.as_ref()?;
        Some((player.offset_width() as f32, player.offset_height() as f32))
    }

    /// Render the current frame
    pub fn render(&mut self, state: &GameState, settings: &Settings) {
        if let Some(player) = &self.player {
            let _ = player.style().set_property("left", &px(state.player_x));
        }

        let size = px(state.config.object_size);
        reconcile(
            &self.document,
            &self.area,
            &mut self.objects,
            state.objects.iter().map(|o| (o.id, o)),
            |el, obj| {
                el.set_class_name(obj.category.as_str());
                let style = el.style();
                let _ = style.set_property("left", &px(obj.x));
                let _ = style.set_property("width", &size);
                let _ = style.set_property("height", &size);
            },
            |el, obj| {
                let _ = el.style().set_property("top", &px(obj.y));
            },
        );

        reconcile(
            &self.document,
            &self.area,
            &mut self.particles,
            state.particles.iter().map(|p| (p.id, p)),
            |el, p| {
                el.set_class_name("particle");
                let _ = el.style().set_property("background", p.color);
            },
            |el, p| {
                let style = el.style();
                let _ = style.set_property("left", &px(p.pos.x));
                let _ = style.set_property("top", &px(p.pos.y));
                let _ = style.set_property("opacity", &p.opacity().to_string());
            },
        );

        reconcile(
            &self.document,
            &self.area,
            &mut self.floats,
            state.floats.iter().map(|f| (f.id, f)),
            |el, f| {
                el.set_class_name(f.style.css_class());
                el.set_text_content(Some(&f.text));
                let style = el.style();
                let _ = style.set_property("left", &px(f.pos.x));
                let _ = style.set_property("top", &px(f.pos.y));
            },
            |el, f| {
                let style = el.style();
                let _ = style.set_property("transform", &format!("translateY({}px)", f.rise_offset()));
                let _ = style.set_property("opacity", &f.opacity().to_string());
            },
        );

        self.apply_effects(state, settings);
    }

    /// Screen shake and hit flash
    fn apply_effects(&self, state: &GameState, settings: &Settings) {
        let shake = if settings.effective_screen_shake() {
            state.screen_shake as f64
        } else {
            0.0
        };
        let transform = if shake > 0.0 {
            let dx = (js_sys::Math::random() - 0.5) * 2.0 * SHAKE_PX * shake;
            let dy = (js_sys::Math::random() - 0.5) * 2.0 * SHAKE_PX * shake;
            format!("translate({:.1}px, {:.1}px)", dx, dy)
        } else {
            String::new()
        };
        let _ = self.area.style().set_property("transform", &transform);

        // Missing flash overlay is fine
        if let Some(flash) = &self.flash {
            let opacity = if settings.effective_hit_flash() {
                state.flash * 0.6
            } else {
                0.0
            };
            let _ = flash.style().set_property("opacity", &opacity.to_string());
        }
    }

    /// Remove every entity element (new session)
    pub fn clear(&mut self) {
        for (_, el) in self
            .objects
            .drain()
            .chain(self.particles.drain())
            .chain(self.floats.drain())
        {
            el.remove();
        }
        let _ = self.area.style().set_property("transform", "");
    }
}

/// Bring one element map in line with one entity collection
///
/// New IDs get an element (`init` runs once), surviving IDs get `update`, and
/// elements whose entity is gone are removed from the page.
fn reconcile<'a, T: 'a>(
    document: &Document,
    area: &HtmlElement,
    elements: &mut HashMap<u32, HtmlElement>,
    items: impl Iterator<Item = (u32, &'a T)>,
    init: impl Fn(&HtmlElement, &T),
    update: impl Fn(&HtmlElement, &T),
) {
    let mut live = HashSet::new();
    for (id, item) in items {
        live.insert(id);
        if !elements.contains_key(&id) {
            let Some(el) = document
                .create_element("div")
                .ok()
                .and_then(|e| e.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            init(&el, item);
            if area.append_child(&el).is_err() {
                continue;
            }
            elements.insert(id, el);
        }
        if let Some(el) = elements.get(&id) {
            update(el, item);
        }
    }

    elements.retain(|id, el| {
        let keep = live.contains(id);
        if !keep {
            el.remove();
        }
        keep
    });
}
