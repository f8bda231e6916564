use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use raylib::prelude::*;

mod render;
mod texture_loader;

use carousel::constants::*;
use carousel::view::{self, Intent, Presenter, Scene};
use carousel::{CarouselConfig, Controller, HeightPreset, Manifest};

use crate::texture_loader::load_slide_textures;

const DIGIT_KEYS: [KeyboardKey; 9] = [
    KeyboardKey::KEY_ONE,
    KeyboardKey::KEY_TWO,
    KeyboardKey::KEY_THREE,
    KeyboardKey::KEY_FOUR,
    KeyboardKey::KEY_FIVE,
    KeyboardKey::KEY_SIX,
    KeyboardKey::KEY_SEVEN,
    KeyboardKey::KEY_EIGHT,
    KeyboardKey::KEY_NINE,
];

/// Autoplay image carousel.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Slide manifest (TOML) or a directory of images
    slides: PathBuf,

    /// Time each slide is shown before advancing, in milliseconds
    #[arg(long, allow_hyphen_values = true)]
    interval_ms: Option<i64>,

    /// Stop at the first and last slide instead of wrapping around
    #[arg(long)]
    no_loop: bool,

    /// Keep advancing while the pointer is over the carousel
    #[arg(long)]
    no_pause_on_hover: bool,

    /// Height of the carousel region
    #[arg(long, value_enum)]
    height: Option<HeightPreset>,

    /// Scroll animation duration in milliseconds
    #[arg(long, allow_hyphen_values = true)]
    transition_ms: Option<i64>,

    /// Disable pointer dragging
    #[arg(long)]
    no_drag: bool,

    #[arg(long, default_value_t = WINDOW_WIDTH)]
    window_width: i32,

    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    window_height: i32,
}

impl Args {
    /// Command-line flags win over the manifest.
    fn apply(&self, config: &mut CarouselConfig) {
        if let Some(interval) = self.interval_ms {
            config.autoplay_interval_ms = interval;
        }
        if let Some(transition) = self.transition_ms {
            config.transition_ms = transition;
        }
        if let Some(height) = self.height {
            config.height_preset = height;
        }
        config.looping &= !self.no_loop;
        config.pause_on_hover &= !self.no_pause_on_hover;
        config.draggable &= !self.no_drag;
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let manifest = Manifest::load(&args.slides)
        .with_context(|| format!("Failed to load slides from {:?}", args.slides))?;
    let mut config = manifest.config.clone();
    args.apply(&mut config);
    let registry = manifest.slides;

    let (mut rl, thread) = raylib::init()
        .size(args.window_width, args.window_height)
        .title("Carousel")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let textures = load_slide_textures(&mut rl, &thread, &registry);
    info!(
        "{} of {} slide textures loaded",
        textures.iter().filter(|t| t.is_some()).count(),
        registry.len()
    );

    let mut presenter = Presenter::new(config.height_preset);
    let start = rl.get_time();
    let now_ms = |rl: &RaylibHandle| ((rl.get_time() - start) * 1000.0).max(0.0) as u64;

    let region = presenter.region(rl.get_screen_width() as f32, rl.get_screen_height() as f32);
    let mut last_frame_ms = now_ms(&rl);
    let mut controller = Controller::mount(registry.len(), &config, region.width, last_frame_ms);

    // --- Main Loop ---
    while !rl.window_should_close() {
        let now = now_ms(&rl);
        let dt = now.saturating_sub(last_frame_ms);
        last_frame_ms = now;

        let region = presenter.region(rl.get_screen_width() as f32, rl.get_screen_height() as f32);
        controller.layout(region.width, now);

        // Input is hit-tested against what the user currently sees
        let scene = presenter.scene(&controller, &registry, region, now);
        handle_input(&rl, &mut controller, &scene, now);

        controller.tick(now);
        for event in controller.drain_events() {
            debug!("index changed to {} ({:?})", event.to_index, event.trigger);
        }
        presenter.update(&controller, &registry, dt as f32);

        let scene = presenter.scene(&controller, &registry, region, now);
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        render::draw_scene(&mut d, &scene, &textures, &registry);
    }

    controller.teardown();
    Ok(())
}

fn handle_input(rl: &RaylibHandle, controller: &mut Controller, scene: &Scene, now: u64) {
    let mouse = rl.get_mouse_position();
    let inside = rl.is_cursor_on_screen() && scene.region.contains(mouse.x, mouse.y);
    controller.on_hover_change(inside, now);

    if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
        match scene.hit_test(mouse.x, mouse.y) {
            Some(intent) => {
                view::dispatch(controller, intent, now);
            }
            None if inside => controller.pointer_down(mouse.x, now),
            None => {}
        }
    } else if rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT) {
        controller.pointer_move(mouse.x);
    }
    if rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
        controller.pointer_up(mouse.x, now);
    }

    if let Some(intent) = key_intent(rl) {
        view::dispatch(controller, intent, now);
    }
}

fn key_intent(rl: &RaylibHandle) -> Option<Intent> {
    if rl.is_key_pressed(KeyboardKey::KEY_RIGHT) {
        return Some(Intent::Next);
    }
    if rl.is_key_pressed(KeyboardKey::KEY_LEFT) {
        return Some(Intent::Prev);
    }
    DIGIT_KEYS.iter().position(|&key| rl.is_key_pressed(key)).map(Intent::Goto)
}
