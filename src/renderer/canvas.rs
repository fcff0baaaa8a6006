//! HTML canvas backend

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{DrawCommand, Rect, Surface};

/// Replays draw commands onto a 2D canvas context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// `None` when the canvas has no 2D context
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    fn fill_rect(&self, rect: &Rect) {
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn execute(&self, command: &DrawCommand) -> Result<(), wasm_bindgen::JsValue> {
        let ctx = &self.ctx;
        match command {
            DrawCommand::VerticalGradient { rect, top, bottom } => {
                let gradient = ctx.create_linear_gradient(
                    0.0,
                    rect.y as f64,
                    0.0,
                    (rect.y + rect.h) as f64,
                );
                gradient.add_color_stop(0.0, &top.to_css())?;
                gradient.add_color_stop(1.0, &bottom.to_css())?;
                ctx.set_fill_style_canvas_gradient(&gradient);
                self.fill_rect(rect);
            }
            DrawCommand::RadialGlow {
                center,
                inner_radius,
                outer_radius,
                inner,
                outer,
            } => {
                let (x, y) = (center.x as f64, center.y as f64);
                let gradient = ctx.create_radial_gradient(
                    x,
                    y,
                    *inner_radius as f64,
                    x,
                    y,
                    *outer_radius as f64,
                )?;
                gradient.add_color_stop(0.0, &inner.to_css())?;
                gradient.add_color_stop(1.0, &outer.to_css())?;
                ctx.set_fill_style_canvas_gradient(&gradient);
                ctx.begin_path();
                ctx.arc(x, y, *outer_radius as f64, 0.0, TAU)?;
                ctx.fill();
            }
            DrawCommand::Line {
                from,
                to,
                color,
                width,
            } => {
                ctx.set_stroke_style_str(&color.to_css());
                ctx.set_line_width(*width as f64);
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
                glow,
            } => {
                let css = color.to_css();
                ctx.begin_path();
                ctx.set_fill_style_str(&css);
                ctx.set_shadow_color(&css);
                ctx.set_shadow_blur(*glow as f64);
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                ctx.fill();
                ctx.set_shadow_blur(0.0);
            }
            DrawCommand::FillRect { rect, color } => {
                ctx.set_fill_style_str(&color.to_css());
                self.fill_rect(rect);
            }
            DrawCommand::StrokeRect { rect, color, width } => {
                ctx.set_stroke_style_str(&color.to_css());
                ctx.set_line_width(*width as f64);
                ctx.stroke_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
            }
        }
        Ok(())
    }
}

impl Surface for CanvasSurface {
    fn draw(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            if let Err(e) = self.execute(command) {
                log::warn!("Canvas draw error: {:?}", e);
            }
        }
    }
}
