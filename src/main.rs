//! Word Line entry point
//!
//! On the web: wires DOM pointer events to the session. Natively: plays one
//! scripted round against the headless renderer.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, MouseEvent};

    use word_line::renderer::DomRenderer;
    use word_line::sim::DragGesture;
    use word_line::{Rules, Session};

    type Listener = Closure<dyn FnMut(MouseEvent)>;

    /// A drag in progress: its gesture plus the document listeners serving it
    struct ActiveDrag {
        gesture: DragGesture,
        on_move: Listener,
        on_up: Listener,
    }

    /// Game instance holding all state
    struct Game {
        session: Session<DomRenderer>,
        document: Document,
        active: Option<ActiveDrag>,
        /// Listeners of the last drag. A closure can't be dropped while it
        /// runs, so they are released on the next press.
        retired: Option<ActiveDrag>,
    }

    impl Game {
        fn pointer(&self, event: &MouseEvent) -> glam::Vec2 {
            self.session
                .renderer()
                .to_container(event.client_x() as f32, event.client_y() as f32)
        }

        /// Detach the drag listeners and hand back the gesture
        fn end_drag(&mut self) -> Option<DragGesture> {
            let active = self.active.take()?;
            let _ = self.document.remove_event_listener_with_callback(
                "mousemove",
                active.on_move.as_ref().unchecked_ref(),
            );
            let _ = self.document.remove_event_listener_with_callback(
                "mouseup",
                active.on_up.as_ref().unchecked_ref(),
            );
            let gesture = active.gesture;
            self.retired = Some(active);
            Some(gesture)
        }

        /// Start a fresh round sized to the current container
        fn restart(&mut self) {
            self.end_drag();
            let size = self.session.renderer().container_size();
            if let Err(e) = self.session.resize(size) {
                log::error!("Cannot start round: {}", e);
                return;
            }
            match self.session.restart() {
                Ok(round) => log::info!("New round: \"{}\"", round.sentence()),
                Err(e) => log::error!("Cannot start round: {}", e),
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Word Line starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let container: HtmlElement = document
            .get_element_by_id("game-container")
            .expect("no game container")
            .dyn_into()
            .expect("game container is not an HTML element");
        let restart_btn: Option<HtmlElement> = document
            .get_element_by_id("restart-btn")
            .and_then(|el| el.dyn_into().ok());

        let renderer = DomRenderer::new(document.clone(), container.clone(), restart_btn);
        let size = renderer.container_size();
        let seed = js_sys::Date::now() as u64;

        let session = match Session::new(renderer, Rules::load(), size, seed) {
            Ok(session) => session,
            Err(e) => {
                log::error!("Cannot create session: {}", e);
                return;
            }
        };

        let game = Rc::new(RefCell::new(Game {
            session,
            document,
            active: None,
            retired: None,
        }));
        log::info!("Session created with seed: {}", seed);

        game.borrow_mut().restart();

        setup_press_handler(&container, game.clone());
        setup_restart_button(game);

        log::info!("Word Line running!");
    }

    fn setup_press_handler(container: &HtmlElement, game: Rc<RefCell<Game>>) {
        let handler_game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let Some(card) = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| DomRenderer::card_at(&el))
            else {
                return;
            };

            let mut g = handler_game.borrow_mut();
            // A release that never reached us still gets its win check
            if let Some(missed) = g.end_drag() {
                g.session.press_end(missed);
            }
            g.retired = None;

            let pointer = g.pointer(&event);
            let gesture = match g.session.press_start(card, pointer) {
                Ok(Some(gesture)) => gesture,
                Ok(None) => return,
                Err(e) => {
                    log::warn!("Press ignored: {}", e);
                    return;
                }
            };
            event.prevent_default();

            let on_move = {
                let game = handler_game.clone();
                Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                    let mut g = game.borrow_mut();
                    let Some(gesture) = g.active.as_ref().map(|a| a.gesture) else {
                        return;
                    };
                    let pointer = g.pointer(&event);
                    g.session.press_move(&gesture, pointer);
                })
            };
            let on_up = {
                let game = handler_game.clone();
                Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    let mut g = game.borrow_mut();
                    if let Some(gesture) = g.end_drag() {
                        g.session.press_end(gesture);
                    }
                })
            };

            let _ = g
                .document
                .add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref());
            let _ = g
                .document
                .add_event_listener_with_callback("mouseup", on_up.as_ref().unchecked_ref());
            g.active = Some(ActiveDrag {
                gesture,
                on_move,
                on_up,
            });
        });
        let _ = container
            .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let document = game.borrow().document.clone();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Word Line (native) starting...");
    log::info!("Native mode plays a scripted round - run with `trunk serve` for the web version");

    if let Err(e) = native::play_scripted_round() {
        log::error!("Scripted round failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use glam::Vec2;
    use word_line::renderer::HeadlessRenderer;
    use word_line::sim::MoveOutcome;
    use word_line::{GameError, Rules, Session};

    const CONTAINER: Vec2 = Vec2::new(900.0, 500.0);

    /// Scatter a random sentence, then drag the words into a line one by one
    pub fn play_scripted_round() -> Result<(), GameError> {
        let rules = Rules::load();
        let seed = std::env::args()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or(42);
        let mut session = Session::new(HeadlessRenderer::new(rules.clone()), rules, CONTAINER, seed)?;

        let round = session.restart()?;
        println!("Sentence: {}", round.sentence());
        for card in round.cards() {
            println!("  {:>14} at ({:>5.1}, {:>5.1})", card.text(), card.pos.x, card.pos.y);
        }

        // Find a row no scattered card touches and assemble the line there
        let cards: Vec<_> = round.cards().iter().map(|c| (c.id, c.pos, c.size)).collect();
        let margin = round.rules().drag_margin;
        let height = cards.iter().map(|c| c.2.y).fold(0.0, f32::max);
        let row = (margin as u32..=(CONTAINER.y - margin - height) as u32)
            .map(|y| y as f32)
            .find(|&y| cards.iter().all(|&(_, pos, size)| pos.y >= y + height || pos.y + size.y <= y))
            .unwrap_or(margin);

        let mut x = margin + 10.0;
        for (id, pos, size) in cards {
            let Some(gesture) = session.press_start(id, pos)? else {
                break;
            };
            match session.press_move(&gesture, Vec2::new(x, row)) {
                MoveOutcome::Moved(_) => {}
                other => log::warn!("{} did not move: {:?}", id, other),
            }
            let verdict = session.press_end(gesture);
            log::debug!("After {}: {:?}", id, verdict);
            x += size.x + 10.0;
        }

        if session.is_solved() {
            if let Some(orbit) = &session.renderer().celebration {
                println!("Solved! Star orbit: {}", orbit.svg_path());
            }
        } else {
            println!("Not solved: {:?}", session.round().map(|r| r.evaluate()));
        }
        Ok(())
    }
}
