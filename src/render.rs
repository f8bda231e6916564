use raylib::prelude::*;

use carousel::SlideRegistry;
use carousel::view::{Bounds, CAPTION_FONT, COUNTER_FONT, Control, Intent, Scene};

fn rect(bounds: Bounds) -> Rectangle {
    Rectangle::new(bounds.x, bounds.y, bounds.width, bounds.height)
}

fn white(alpha: f32) -> Color {
    Color::new(255, 255, 255, (alpha.clamp(0.0, 1.0) * 255.0) as u8)
}

fn black(alpha: f32) -> Color {
    Color::new(0, 0, 0, (alpha.clamp(0.0, 1.0) * 255.0) as u8)
}

pub fn draw_scene(
    d: &mut RaylibDrawHandle,
    scene: &Scene,
    textures: &[Option<Texture2D>],
    registry: &SlideRegistry,
) {
    for layer in &scene.slides {
        match textures.get(layer.index).and_then(Option::as_ref) {
            Some(texture) => draw_cover(d, texture, layer.bounds),
            None => {
                d.draw_rectangle_rec(rect(layer.bounds), Color::new(38, 38, 44, 255));
                if let Some(slide) = registry.get(layer.index) {
                    d.draw_text(
                        &slide.alt_text,
                        (layer.bounds.x + 24.0) as i32,
                        (layer.bounds.y + 24.0) as i32,
                        20,
                        white(0.6),
                    );
                }
            }
        }

        // Vignette toward the bottom so captions stay readable
        let b = layer.bounds;
        d.draw_rectangle_gradient_v(
            b.x as i32,
            (b.y + b.height * 0.4) as i32,
            b.width as i32,
            (b.height * 0.6) as i32,
            black(0.0),
            black(0.6),
        );
    }

    for caption in &scene.captions {
        d.draw_rectangle_rounded(rect(caption.bounds), 1.0, 12, white(0.15 * caption.opacity));
        d.draw_text(
            &caption.text,
            (caption.bounds.x + 16.0) as i32,
            (caption.bounds.y + (caption.bounds.height - CAPTION_FONT as f32) * 0.5) as i32,
            CAPTION_FONT,
            white(caption.opacity),
        );
    }

    if let Some(progress) = scene.progress {
        let region = scene.region;
        let track = Bounds::new(region.x, region.y, region.width, progress.height);
        d.draw_rectangle_rec(rect(track), white(0.1));
        d.draw_rectangle_rec(rect(progress), white(0.7));
    }

    for button in &scene.buttons {
        draw_button(d, button);
    }

    for dot in &scene.dots {
        let alpha = if dot.active { 0.9 } else { 0.5 };
        d.draw_rectangle_rounded(rect(dot.control.bounds), 1.0, 8, white(alpha));
    }

    if let Some(counter) = &scene.counter {
        d.draw_rectangle_rounded(rect(counter.bounds), 1.0, 8, black(0.35));
        d.draw_text(
            &counter.text,
            (counter.bounds.x + 10.0) as i32,
            (counter.bounds.y + (counter.bounds.height - COUNTER_FONT as f32) * 0.5) as i32,
            COUNTER_FONT,
            Color::WHITE,
        );
    }
}

/// Scales the texture to cover `bounds`, cropping the overflow around the centre.
fn draw_cover(d: &mut RaylibDrawHandle, texture: &Texture2D, bounds: Bounds) {
    let tex_width = texture.width() as f32;
    let tex_height = texture.height() as f32;
    let scale = (bounds.width / tex_width).max(bounds.height / tex_height);

    let source_width = bounds.width / scale;
    let source_height = bounds.height / scale;
    let source = Rectangle::new(
        (tex_width - source_width) * 0.5,
        (tex_height - source_height) * 0.5,
        source_width,
        source_height,
    );

    d.draw_texture_pro(texture, source, rect(bounds), Vector2::new(0.0, 0.0), 0.0, Color::WHITE);
}

fn draw_button(d: &mut RaylibDrawHandle, button: &Control) {
    let b = button.bounds;
    let cx = b.x + b.width * 0.5;
    let cy = b.center_y();
    d.draw_circle(cx as i32, cy as i32, b.width * 0.5, white(0.7));

    // Chevron pointing the way the button scrolls
    let dir = if button.intent == Intent::Prev { -1.0 } else { 1.0 };
    let tip = Vector2::new(cx + 4.0 * dir, cy);
    let color = Color::new(20, 20, 20, 255);
    d.draw_line_ex(Vector2::new(cx - 4.0 * dir, cy - 7.0), tip, 2.0, color);
    d.draw_line_ex(tip, Vector2::new(cx - 4.0 * dir, cy + 7.0), 2.0, color);
}
