//! The 2D birthday card page: gradient backdrop, cake with a flickering
//! candle and drifting confetti, redrawn every animation frame.

use crate::constants::*;
use crate::dom;
use crate::frame;
use birthday_core::birthday2d::*;
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Ctx = web::CanvasRenderingContext2d;

struct Card {
    canvas: web::HtmlCanvasElement,
    ctx: Ctx,
    layout: CardLayout,
    particles: ParticleField,
}

fn window_size() -> (f64, f64) {
    let Some(w) = web::window() else {
        return (1.0, 1.0);
    };
    let px = |v: Result<wasm_bindgen::JsValue, _>| v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    (px(w.inner_width()), px(w.inner_height()))
}

impl Card {
    fn resize(&mut self) {
        let (w, h) = window_size();
        self.canvas.set_width(w as u32);
        self.canvas.set_height(h as u32);
        self.layout = CardLayout::new(w, h);
        self.particles.resize(w as f32, h as f32);
    }

    fn draw(&mut self) -> anyhow::Result<()> {
        let ctx = &self.ctx;
        let l = &self.layout;
        ctx.clear_rect(0.0, 0.0, l.width, l.height);
        draw_background(ctx, l)?;
        draw_title(ctx, l)?;
        draw_cake(ctx, l);
        draw_flame(ctx, l, Flame::at(js_sys::Date::now()))?;
        self.particles.step();
        for p in &self.particles.particles {
            ctx.set_fill_style_str(&p.color());
            ctx.begin_path();
            ctx.arc(p.pos.x as f64, p.pos.y as f64, p.size as f64, 0.0, TAU)
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            ctx.fill();
        }
        Ok(())
    }
}

fn draw_background(ctx: &Ctx, l: &CardLayout) -> anyhow::Result<()> {
    let g = ctx.create_linear_gradient(0.0, 0.0, 0.0, l.height);
    g.add_color_stop(0.0, GRADIENT_TOP)
        .and_then(|_| g.add_color_stop(1.0, GRADIENT_BOTTOM))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    ctx.set_fill_style_canvas_gradient(&g);
    ctx.fill_rect(0.0, 0.0, l.width, l.height);
    Ok(())
}

fn draw_title(ctx: &Ctx, l: &CardLayout) -> anyhow::Result<()> {
    ctx.set_font(TITLE_FONT);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_fill_style_str("#fff");
    ctx.set_shadow_color(TITLE_SHADOW);
    ctx.set_shadow_blur(10.0);
    ctx.fill_text(TITLE, l.title.0, l.title.1)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    ctx.set_shadow_blur(0.0);
    Ok(())
}

fn draw_cake(ctx: &Ctx, l: &CardLayout) {
    for (rect, color) in [
        (l.cake, CAKE_COLOR),
        (l.icing, ICING_COLOR),
        (l.candle, CANDLE_COLOR),
    ] {
        ctx.set_fill_style_str(color);
        ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);
    }
}

fn draw_flame(ctx: &Ctx, l: &CardLayout, flame: Flame) -> anyhow::Result<()> {
    let (x, y) = l.wick;
    ctx.begin_path();
    ctx.move_to(x, y);
    for [c1, c2, end] in flame.outline(l.wick) {
        ctx.bezier_curve_to(c1.0, c1.1, c2.0, c2.1, end.0, end.1);
    }
    let g = ctx.create_linear_gradient(x, y, x, y - flame.height);
    g.add_color_stop(0.0, FLAME_BASE_COLOR)
        .and_then(|_| g.add_color_stop(1.0, FLAME_TIP_COLOR))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    ctx.set_fill_style_canvas_gradient(&g);
    ctx.fill();

    let ((gx, gy), radius) = flame.glow(l.wick);
    ctx.set_shadow_color(FLAME_BASE_COLOR);
    ctx.set_shadow_blur(20.0);
    ctx.begin_path();
    ctx.arc(gx, gy, radius, 0.0, TAU)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    ctx.set_fill_style_str(GLOW_COLOR);
    ctx.fill();
    ctx.set_shadow_blur(0.0);
    Ok(())
}

pub fn run() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, BIRTHDAY_CANVAS_ID)?;
    let ctx = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into::<Ctx>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let (w, h) = window_size();
    let card = Rc::new(RefCell::new(Card {
        canvas,
        ctx,
        layout: CardLayout::new(w, h),
        particles: ParticleField::spawn(&mut rand::thread_rng(), PARTICLE_COUNT, w as f32, h as f32),
    }));
    card.borrow_mut().resize();

    let card_resize = card.clone();
    let closure = Closure::wrap(Box::new(move || {
        card_resize.borrow_mut().resize();
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();

    log::info!("[birthday] {}x{}", w, h);
    let handle = frame::start_loop(move |_| {
        if let Err(e) = card.borrow_mut().draw() {
            log::error!("[birthday] draw error: {:?}", e);
        }
    });
    frame::cancel_on_pagehide(handle);
    Ok(())
}
