//! Canvas painter: replays [`DrawCommand`]s onto a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) maps the result
//! into the crate error type.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::render::DrawCommand;

/// Paint a frame. `dpr` is the device pixel ratio; commands are in CSS pixels.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn paint(ctx: &CanvasRenderingContext2d, commands: &[DrawCommand], dpr: f64) -> Result<(), JsValue> {
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    for cmd in commands {
        paint_command(ctx, cmd)?;
    }
    Ok(())
}

fn paint_command(ctx: &CanvasRenderingContext2d, cmd: &DrawCommand) -> Result<(), JsValue> {
    match cmd {
        DrawCommand::Clear { width, height } => ctx.clear_rect(0.0, 0.0, *width, *height),
        DrawCommand::Line { from, to, stroke, line_width } => {
            ctx.set_stroke_style_str(stroke);
            ctx.set_line_width(*line_width);
            ctx.begin_path();
            ctx.move_to(from.x, from.y);
            ctx.line_to(to.x, to.y);
            ctx.stroke();
        }
        DrawCommand::PushTransform(camera) => {
            ctx.save();
            ctx.translate(camera.pan_x, camera.pan_y)?;
            ctx.scale(camera.zoom, camera.zoom)?;
        }
        DrawCommand::PopTransform => ctx.restore(),
        DrawCommand::FillRect { rect, fill, alpha } => {
            ctx.save();
            ctx.set_global_alpha(*alpha);
            ctx.set_fill_style_str(fill);
            ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);
            ctx.restore();
        }
        DrawCommand::StrokeRect { rect, stroke, line_width, dash } => {
            ctx.save();
            if let Some(len) = dash {
                let dash_array = js_sys::Array::new();
                dash_array.push(&(*len).into());
                dash_array.push(&(*len).into());
                ctx.set_line_dash(&dash_array)?;
            }
            ctx.set_stroke_style_str(stroke);
            ctx.set_line_width(*line_width);
            ctx.stroke_rect(rect.x, rect.y, rect.w, rect.h);
            ctx.restore();
        }
        DrawCommand::FillCircle { circle, fill } => {
            ctx.set_fill_style_str(fill);
            ctx.begin_path();
            ctx.arc(circle.x, circle.y, circle.r, 0.0, TAU)?;
            ctx.fill();
        }
        DrawCommand::StrokeCircle { circle, stroke, line_width } => {
            ctx.set_stroke_style_str(stroke);
            ctx.set_line_width(*line_width);
            ctx.begin_path();
            ctx.arc(circle.x, circle.y, circle.r, 0.0, TAU)?;
            ctx.stroke();
        }
        DrawCommand::Text { at, text, font_px, fill, align } => {
            ctx.set_fill_style_str(fill);
            ctx.set_font(&format!("{font_px}px sans-serif"));
            ctx.set_text_align(align.as_css());
            ctx.set_text_baseline("middle");
            ctx.fill_text(text, at.x, at.y)?;
        }
    }
    Ok(())
}
