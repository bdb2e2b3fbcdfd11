//! Canvas 2D backend

use glam::Vec2;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::target::RenderTarget;

/// `RenderTarget` backed by a browser 2D context
pub struct CanvasTarget {
    ctx: CanvasRenderingContext2d,
    /// Empty array, reused to reset the dash pattern after dashed lines
    solid: js_sys::Array,
}

impl CanvasTarget {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            solid: js_sys::Array::new(),
        }
    }

    fn set_dash(&self, dash: Option<[f32; 2]>) {
        let result = match dash {
            Some([on, off]) => {
                let pattern = js_sys::Array::of2(&JsValue::from_f64(on as f64), &JsValue::from_f64(off as f64));
                self.ctx.set_line_dash(&pattern)
            }
            None => self.ctx.set_line_dash(&self.solid),
        };
        if let Err(e) = result {
            log::warn!("set_line_dash failed: {:?}", e);
        }
    }
}

impl RenderTarget for CanvasTarget {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x as f64, y as f64, width as f64, height as f64);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: &str, dash: Option<[f32; 2]>) {
        self.set_dash(dash);
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
        if dash.is_some() {
            self.set_dash(None);
        }
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn translate(&mut self, x: f32, y: f32) {
        let _ = self.ctx.translate(x as f64, y as f64);
    }

    fn rotate(&mut self, angle: f32) {
        let _ = self.ctx.rotate(angle as f64);
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }
}
