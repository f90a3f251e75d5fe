//! Browser backend
//!
//! Shapes go through the WebGPU [`RenderState`]; text is drawn on a 2D canvas
//! stacked over the GPU canvas, which also provides text measurement. Both
//! canvases use court pixels as their backing size.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

use super::Platform;
use super::keys::{Key, KeyState};
use crate::renderer::RenderState;
use crate::scene::{DrawCommand, MonospaceMetrics, TextMetrics, text_layer};
use crate::sim::FrameInput;

const FONT_FAMILY: &str = "monospace";

pub struct WebPlatform {
    keys: Rc<RefCell<KeyState>>,
    render_state: RenderState,
    text_ctx: CanvasRenderingContext2d,
    court: (u32, u32),
}

impl WebPlatform {
    /// Wire keyboard listeners onto the window and take over both canvases
    pub fn new(
        render_state: RenderState,
        text_canvas: &HtmlCanvasElement,
    ) -> Result<Self, JsValue> {
        let court = render_state.court;
        text_canvas.set_width(court.0);
        text_canvas.set_height(court.1);

        let text_ctx: CanvasRenderingContext2d = text_canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        text_ctx.set_text_baseline("top");

        let keys = Rc::new(RefCell::new(KeyState::default()));
        install_key_listeners(keys.clone())?;

        Ok(Self {
            keys,
            render_state,
            text_ctx,
            court,
        })
    }

    fn set_font(&self, size: f32) {
        self.text_ctx.set_font(&format!("{}px {}", size, FONT_FAMILY));
    }

    /// Replay text in draw order. Rectangles that follow text (the pause and
    /// game-over overlays) are painted `source-atop` so they dim only the
    /// text already on this canvas; the GPU canvas below dims its own shapes.
    fn draw_text(&self, commands: &[DrawCommand]) {
        let (w, h) = self.court;
        self.text_ctx.clear_rect(0.0, 0.0, w as f64, h as f64);

        for command in text_layer(commands) {
            match command {
                DrawCommand::Text {
                    text,
                    pos,
                    size,
                    color,
                } => {
                    self.set_font(*size);
                    self.text_ctx.set_fill_style_str(&color.to_css());
                    if let Err(e) = self.text_ctx.fill_text(text, pos.x as f64, pos.y as f64) {
                        log::warn!("fill_text failed: {:?}", e);
                    }
                }
                DrawCommand::Rect { rect, color } => {
                    self.with_composite("source-atop", || {
                        self.text_ctx.set_fill_style_str(&color.to_css());
                        self.text_ctx.fill_rect(
                            rect.pos.x as f64,
                            rect.pos.y as f64,
                            rect.size.x as f64,
                            rect.size.y as f64,
                        );
                    });
                }
                _ => {}
            }
        }
    }

    fn with_composite(&self, op: &str, draw: impl FnOnce()) {
        if let Err(e) = self.text_ctx.set_global_composite_operation(op) {
            log::warn!("composite {} unsupported: {:?}", op, e);
            return;
        }
        draw();
        let _ = self.text_ctx.set_global_composite_operation("source-over");
    }
}

impl TextMetrics for WebPlatform {
    fn measure_text(&self, text: &str, font_size: f32) -> f32 {
        self.set_font(font_size);
        match self.text_ctx.measure_text(text) {
            Ok(metrics) => metrics.width() as f32,
            Err(_) => MonospaceMetrics::default().measure_text(text, font_size),
        }
    }
}

impl Platform for WebPlatform {
    fn poll_input(&mut self) -> FrameInput {
        self.keys.borrow_mut().take_frame_input()
    }

    fn submit_frame(&mut self, commands: &[DrawCommand]) {
        match self.render_state.render(commands) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost) => {
                let (w, h) = self.render_state.size;
                self.render_state.resize(w, h);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
        self.draw_text(commands);
    }
}

fn install_key_listeners(keys: Rc<RefCell<KeyState>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    // Key down
    {
        let keys = keys.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(key) = Key::from_dom(&event.key()) {
                event.prevent_default();
                keys.borrow_mut().key_down(key, event.repeat());
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Key up
    {
        let keys = keys.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(key) = Key::from_dom(&event.key()) {
                keys.borrow_mut().key_up(key);
            }
        });
        window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Window blur: key-ups for held keys will never arrive
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            keys.borrow_mut().release_all();
        });
        window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}
