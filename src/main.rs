//! Tile Hopper entry point
//!
//! The browser build wires DOM events to a [`Session`] and draws it on a
//! canvas. The native build runs a short headless play-through.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_editor {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, HtmlInputElement, KeyboardEvent, MouseEvent,
    };

    use tile_hopper::consts::*;
    use tile_hopper::editor::{PointerFrame, clamp_map_size, pixel_to_tile, tile_bar_slot};
    use tile_hopper::map::PALETTE;
    use tile_hopper::map::tile::{BRICK, DIRT, END, GRASS, HAZARD, START, STONE};
    use tile_hopper::{PlayWarning, Session, Settings, SimEvent};

    /// Fill colour for a stored tile value
    fn tile_color(value: i32) -> Option<&'static str> {
        match value {
            DIRT => Some("#8b5a2b"),
            GRASS => Some("#3cb043"),
            STONE => Some("#7f7f7f"),
            BRICK => Some("#b22222"),
            HAZARD => Some("#ff4500"),
            START => Some("#1e90ff"),
            END => Some("#ffd700"),
            _ => None,
        }
    }

    /// Editor page state
    struct Editor {
        session: Session,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        tilebar: Option<(HtmlCanvasElement, CanvasRenderingContext2d)>,
        /// Outstanding animation frame request while playing
        frame_request: Option<i32>,
        /// Mouse button held over the map
        painting: bool,
    }

    impl Editor {
        /// Match the canvas to the map's pixel size
        fn fit_canvas(&self) {
            let grid = self.session.grid();
            self.canvas.set_width(grid.pixel_width() as u32);
            self.canvas.set_height(grid.pixel_height() as u32);
        }

        fn draw(&self) {
            let grid = self.session.grid();
            let ctx = &self.ctx;
            ctx.clear_rect(0.0, 0.0, grid.pixel_width() as f64, grid.pixel_height() as f64);

            let columns = grid.columns();
            let size = TILE_PIXELS as f64;
            for (i, &value) in grid.cells().iter().enumerate() {
                if let Some(color) = tile_color(value) {
                    ctx.set_fill_style_str(color);
                    let x = (i % columns) as f64 * size;
                    let y = (i / columns) as f64 * size;
                    ctx.fill_rect(x, y, size, size);
                }
            }

            if let Some(player) = self.session.player() {
                ctx.set_fill_style_str("#f0f0f0");
                ctx.fill_rect(player.pos.x as f64, player.pos.y as f64, size, size);
                // Eye on the facing side
                ctx.set_fill_style_str("#000000");
                let eye_x = player.pos.x + TILE_PIXELS / 2.0 + player.facing.sign() * 8.0 - 2.0;
                ctx.fill_rect(eye_x as f64, player.pos.y as f64 + 8.0, 4.0, 4.0);
            }
        }

        fn draw_tilebar(&self) {
            let Some((_, ctx)) = &self.tilebar else {
                return;
            };
            let size = TILE_PIXELS as f64;
            ctx.clear_rect(0.0, 0.0, size * PALETTE.len() as f64, size);
            for (slot, &(value, _)) in PALETTE.iter().enumerate() {
                ctx.set_fill_style_str(tile_color(value).unwrap_or("#ffffff"));
                ctx.fill_rect(slot as f64 * size, 0.0, size, size);
            }
            let selected = PALETTE
                .iter()
                .position(|&(value, _)| value == self.session.selected_tile())
                .unwrap_or(0);
            ctx.set_stroke_style_str("#000000");
            ctx.stroke_rect(selected as f64 * size + 1.0, 1.0, size - 2.0, size - 2.0);
        }

        /// Paint the selected tile under the pointer
        fn paint_at(&mut self, event: &MouseEvent) {
            let rect = self.canvas.get_bounding_client_rect();
            let frame = PointerFrame {
                canvas_offset: Vec2::new(rect.left() as f32, rect.top() as f32),
                scroll: Vec2::ZERO,
                border: self.canvas.client_left() as f32,
                canvas_size: Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32),
            };
            let pixel = frame.to_pixel(Vec2::new(event.client_x() as f32, event.client_y() as f32));
            let grid = self.session.grid();
            let (x, y) = pixel_to_tile(pixel, grid.columns(), grid.rows());
            match self.session.paint(x, y) {
                Ok(()) => self.draw(),
                Err(e) => log::debug!("Paint rejected: {e}"),
            }
        }

        fn set_status(&self, text: &str) {
            if let Some(el) = document().and_then(|d| d.get_element_by_id("status")) {
                el.set_text_content(Some(text));
            }
        }

        fn update_play_button(&self) {
            if let Some(el) = document().and_then(|d| d.get_element_by_id("play-btn")) {
                let label = if self.session.is_playing() { "Stop" } else { "Play" };
                el.set_text_content(Some(label));
            }
        }

        /// Leave Play Mode and drop any scheduled frame
        fn stop(&mut self) {
            self.session.stop_playing();
            if let Some(id) = self.frame_request.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
            self.update_play_button();
            self.draw();
        }
    }

    fn document() -> Option<web_sys::Document> {
        web_sys::window().and_then(|w| w.document())
    }

    fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
        canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Tile Hopper starting...");

        let document = document().expect("no document");
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx = context_2d(&canvas).expect("no 2d context");

        let tilebar = document
            .get_element_by_id("tilebar")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .and_then(|bar| context_2d(&bar).map(|ctx| (bar, ctx)));

        let editor = Rc::new(RefCell::new(Editor {
            session: Session::new(Settings::load()),
            canvas: canvas.clone(),
            ctx,
            tilebar,
            frame_request: None,
            painting: false,
        }));

        {
            let ed = editor.borrow();
            ed.fit_canvas();
            ed.draw();
            ed.draw_tilebar();
            ed.update_play_button();
        }

        setup_keyboard(editor.clone());
        setup_map_pointer(&canvas, editor.clone());
        setup_tilebar(editor.clone());
        setup_play_button(editor.clone());
        setup_size_inputs(editor);

        log::info!("Tile Hopper ready");
    }

    fn setup_keyboard(editor: Rc<RefCell<Editor>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let editor = editor.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut ed = editor.borrow_mut();
                ed.session.key_down(&event.code());
                // Keep arrows and space from scrolling the page while playing
                if ed.session.is_playing() {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let editor = editor.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                editor.borrow_mut().session.key_up(&event.code());
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keys released outside the window never send keyup
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                editor.borrow_mut().session.release_keys();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_map_pointer(canvas: &HtmlCanvasElement, editor: Rc<RefCell<Editor>>) {
        {
            let editor = editor.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut ed = editor.borrow_mut();
                ed.painting = true;
                ed.paint_at(&event);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let editor = editor.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut ed = editor.borrow_mut();
                if ed.painting {
                    ed.paint_at(&event);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                editor.borrow_mut().painting = false;
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_tilebar(editor: Rc<RefCell<Editor>>) {
        let Some(bar) = editor.borrow().tilebar.as_ref().map(|(bar, _)| bar.clone()) else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let mut ed = editor.borrow_mut();
            if ed.session.is_playing() {
                return;
            }
            if let Some(slot) = tile_bar_slot(event.offset_x() as f32) {
                if ed.session.select_tile(slot).is_ok() {
                    log::info!("Selected {}", PALETTE[slot].1);
                    ed.draw_tilebar();
                }
            }
        });
        let _ = bar.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_play_button(editor: Rc<RefCell<Editor>>) {
        let Some(btn) = document().and_then(|d| d.get_element_by_id("play-btn")) else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let playing = editor.borrow().session.is_playing();
            if playing {
                editor.borrow_mut().stop();
                return;
            }

            {
                let mut ed = editor.borrow_mut();
                match ed.session.start_playing() {
                    Some(PlayWarning::MissingEndMarker) => {
                        ed.set_status("This map has no end marker")
                    }
                    None => ed.set_status(""),
                }
                ed.update_play_button();
            }
            request_frame(editor.clone());
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_size_inputs(editor: Rc<RefCell<Editor>>) {
        let Some(document) = document() else {
            return;
        };
        let input = |id: &str| {
            document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        };
        let (Some(width_input), Some(height_input)) = (input("map-width"), input("map-height"))
        else {
            log::warn!("Map size inputs not found");
            return;
        };

        for target in [width_input.clone(), height_input.clone()] {
            let editor = editor.clone();
            let width_input = width_input.clone();
            let height_input = height_input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut ed = editor.borrow_mut();
                let (width, height) = clamp_map_size(
                    width_input.value_as_number().max(0.0) as usize,
                    height_input.value_as_number().max(0.0) as usize,
                );
                match ed.session.resize(width, height) {
                    Ok(()) => {
                        ed.fit_canvas();
                        ed.draw();
                    }
                    Err(e) => log::warn!("Resize rejected: {e}"),
                }
                let grid = ed.session.grid();
                width_input.set_value_as_number(grid.width() as f64);
                height_input.set_value_as_number(grid.height() as f64);
            });
            let _ = target
                .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_frame(editor: Rc<RefCell<Editor>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let handle = editor.clone();
        let closure = Closure::once(move |time: f64| {
            play_frame(handle, time);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => editor.borrow_mut().frame_request = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn play_frame(editor: Rc<RefCell<Editor>>, time: f64) {
        let keep_playing = {
            let mut ed = editor.borrow_mut();
            ed.frame_request = None;
            match ed.session.frame(time) {
                Some(SimEvent::Win) => {
                    ed.set_status("Level complete!");
                    ed.update_play_button();
                }
                Some(SimEvent::Death) => log::info!("Respawned"),
                None => {}
            }
            ed.draw();
            ed.session.is_playing()
        };

        if keep_playing {
            request_frame(editor);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_editor::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use tile_hopper::{Session, Settings, SimEvent};

    env_logger::init();
    log::info!("Tile Hopper (native) starting...");
    log::info!("The editor runs in the browser - build for wasm32 to use it");

    // Headless play-through of the default map: hold right until the goal
    let mut session = Session::new(Settings::load());
    if let Some(warning) = session.start_playing() {
        log::warn!("{:?}", warning);
    }
    session.key_down("ArrowRight");

    let frame_ms = 1000.0 / 60.0;
    let mut outcome = None;
    for frame in 0..600 {
        let time = frame as f64 * frame_ms;
        if let Some(event) = session.frame(time) {
            log::info!("{:?} at {:.0} ms", event, time);
            if event == SimEvent::Win {
                outcome = Some(time);
                break;
            }
        }
    }

    match outcome {
        Some(time) => println!("Reached the goal in {:.2} s", time / 1000.0),
        None => println!("Did not reach the goal in 10 s"),
    }
}
