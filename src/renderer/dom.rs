//! Browser renderer
//!
//! Cards are absolutely positioned `div.word-card` elements inside the game
//! container. The celebration is an SVG overlay with a star riding an
//! `animateMotion` along the orbit path.

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use super::CardRenderer;
use crate::celebration::{ORBIT_PERIOD_SECS, Orbit, STAR_POINTS};
use crate::sim::{Card, CardId};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Attribute holding the card id on each card element
pub const CARD_ID_ATTR: &str = "data-card-id";

pub struct DomRenderer {
    document: Document,
    container: HtmlElement,
    restart_btn: Option<HtmlElement>,
    cards: HashMap<CardId, HtmlElement>,
}

impl DomRenderer {
    pub fn new(document: Document, container: HtmlElement, restart_btn: Option<HtmlElement>) -> Self {
        Self {
            document,
            container,
            restart_btn,
            cards: HashMap::new(),
        }
    }

    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    /// Current container size in CSS pixels
    pub fn container_size(&self) -> Vec2 {
        let rect = self.container.get_bounding_client_rect();
        Vec2::new(rect.width() as f32, rect.height() as f32)
    }

    /// Convert viewport coordinates to container coordinates
    pub fn to_container(&self, client_x: f32, client_y: f32) -> Vec2 {
        let rect = self.container.get_bounding_client_rect();
        Vec2::new(client_x - rect.left() as f32, client_y - rect.top() as f32)
    }

    /// Card id of the card element under `target`, if any
    pub fn card_at(target: &Element) -> Option<CardId> {
        let card = target.closest(".word-card").ok()??;
        card.get_attribute(CARD_ID_ATTR)?.parse().ok().map(CardId)
    }

    fn create_card(&self, card: &Card) -> Result<HtmlElement, JsValue> {
        let el: HtmlElement = self.document.create_element("div")?.dyn_into()?;
        el.class_list().add_1("word-card")?;
        el.set_text_content(Some(card.text()));
        el.set_attribute(CARD_ID_ATTR, &card.id.0.to_string())?;
        place(&el, card.pos)?;
        self.container.append_child(&el)?;
        Ok(el)
    }

    fn create_orbit(&self, orbit: &Orbit) -> Result<(), JsValue> {
        let svg = self.document.create_element_ns(Some(SVG_NS), "svg")?;
        svg.set_attribute("id", "orbit-svg")?;
        svg.set_attribute("width", &self.container.offset_width().to_string())?;
        svg.set_attribute("height", &self.container.offset_height().to_string())?;

        let path = self.document.create_element_ns(Some(SVG_NS), "path")?;
        path.set_attribute("id", "orbit-path")?;
        path.set_attribute("d", &orbit.svg_path())?;
        svg.append_child(&path)?;

        let star = self.document.create_element_ns(Some(SVG_NS), "g")?;
        let polygon = self.document.create_element_ns(Some(SVG_NS), "polygon")?;
        polygon.set_attribute("points", STAR_POINTS)?;
        polygon.class_list().add_1("star-polygon")?;
        star.append_child(&polygon)?;

        let anim = self.document.create_element_ns(Some(SVG_NS), "animateMotion")?;
        anim.set_attribute("dur", &format!("{}s", ORBIT_PERIOD_SECS))?;
        anim.set_attribute("repeatCount", "indefinite")?;
        anim.set_attribute("rotate", "auto")?;
        let mpath = self.document.create_element_ns(Some(SVG_NS), "mpath")?;
        mpath.set_attribute_ns(Some(XLINK_NS), "xlink:href", "#orbit-path")?;
        anim.append_child(&mpath)?;
        star.append_child(&anim)?;

        svg.append_child(&star)?;
        self.container.append_child(&svg)?;
        Ok(())
    }
}

fn place(el: &HtmlElement, pos: Vec2) -> Result<(), JsValue> {
    let style = el.style();
    style.set_property("left", &format!("{}px", pos.x))?;
    style.set_property("top", &format!("{}px", pos.y))?;
    Ok(())
}

impl CardRenderer for DomRenderer {
    fn clear(&mut self) {
        self.container.set_inner_html("");
        self.cards.clear();
        self.set_restart_visible(false);
    }

    fn spawn_card(&mut self, card: &Card) {
        match self.create_card(card) {
            Ok(el) => {
                self.cards.insert(card.id, el);
            }
            Err(e) => log::error!("Failed to create {}: {:?}", card.id, e),
        }
    }

    fn measure(&self, card: &Card) -> Vec2 {
        match self.cards.get(&card.id) {
            Some(el) => Vec2::new(el.offset_width() as f32, el.offset_height() as f32),
            None => card.size,
        }
    }

    fn set_position(&mut self, id: CardId, pos: Vec2) {
        if let Some(el) = self.cards.get(&id) {
            if let Err(e) = place(el, pos) {
                log::warn!("Failed to move {}: {:?}", id, e);
            }
        }
    }

    fn set_interactive(&mut self, id: CardId, interactive: bool) {
        if let Some(el) = self.cards.get(&id) {
            let style = el.style();
            let (events, cursor) = if interactive { ("auto", "grab") } else { ("none", "default") };
            let _ = style.set_property("pointer-events", events);
            let _ = style.set_property("cursor", cursor);
        }
    }

    fn render_celebration(&mut self, orbit: &Orbit) {
        if let Err(e) = self.create_orbit(orbit) {
            log::error!("Failed to start star orbit: {:?}", e);
        }
    }

    fn set_restart_visible(&mut self, visible: bool) {
        if let Some(btn) = &self.restart_btn {
            let display = if visible { "inline-block" } else { "none" };
            let _ = btn.style().set_property("display", display);
        }
    }
}
