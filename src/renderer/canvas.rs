//! Canvas2D backend
//!
//! Replays a `Shape` list on a `CanvasRenderingContext2d`.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::{Shape, build_frame, css};
use crate::settings::Settings;
use crate::sim::GameState;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    pub size: (u32, u32),
}

impl CanvasRenderer {
    /// Grab the 2D context of `canvas`, sized to the arena
    pub fn new(canvas: &HtmlCanvasElement, width: u32, height: u32) -> Option<Self> {
        canvas.set_width(width);
        canvas.set_height(height);
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            ctx,
            size: (width, height),
        })
    }

    pub fn render(&self, state: &GameState, settings: &Settings) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, self.size.0 as f64, self.size.1 as f64);

        for shape in build_frame(state, settings) {
            match shape {
                Shape::Rect { min, size, color } => {
                    ctx.set_fill_style_str(&css(color));
                    ctx.fill_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
                }
                Shape::Outline {
                    min,
                    size,
                    color,
                    width,
                } => {
                    ctx.set_stroke_style_str(&css(color));
                    ctx.set_line_width(width as f64);
                    ctx.stroke_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
                }
                Shape::Circle {
                    center,
                    radius,
                    color,
                } => {
                    ctx.set_fill_style_str(&css(color));
                    ctx.begin_path();
                    if ctx
                        .arc(
                            center.x as f64,
                            center.y as f64,
                            radius as f64,
                            0.0,
                            std::f64::consts::TAU,
                        )
                        .is_ok()
                    {
                        ctx.fill();
                    }
                }
                Shape::Line {
                    from,
                    to,
                    color,
                    width,
                } => {
                    ctx.set_stroke_style_str(&css(color));
                    ctx.set_line_width(width as f64);
                    ctx.begin_path();
                    ctx.move_to(from.x as f64, from.y as f64);
                    ctx.line_to(to.x as f64, to.y as f64);
                    ctx.stroke();
                }
                Shape::Text {
                    pos,
                    text,
                    color,
                    px,
                } => {
                    ctx.set_fill_style_str(&css(color));
                    ctx.set_font(&format!("{}px Courier New", px));
                    let _ = ctx.fill_text(&text, pos.x as f64, pos.y as f64);
                }
            }
        }
    }
}
