//! Presentation adapter: turns controller state into a drawable scene and user input into
//! intents. Nothing here draws; the binary paints a [`Scene`] with raylib.

use raylib::prelude::ease;

use crate::config::HeightPreset;
use crate::constants::*;
use crate::controller::Controller;
use crate::engine::TransitionEvent;
use crate::registry::SlideRegistry;

pub const CAPTION_FONT: i32 = 20;
pub const COUNTER_FONT: i32 = 12;

const CAPTION_PADDING_X: f32 = 16.0;
const CAPTION_HEIGHT: f32 = 38.0;
const COUNTER_PADDING_X: f32 = 10.0;
const COUNTER_HEIGHT: f32 = 26.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height * 0.5
    }
}

/// Something the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Prev,
    Next,
    Goto(usize),
}

/// A clickable control with its accessible label.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub label: String,
    pub bounds: Bounds,
    pub intent: Intent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dot {
    pub control: Control,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideLayer {
    pub index: usize,
    pub bounds: Bounds,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaptionLayer {
    pub index: usize,
    pub text: String,
    pub opacity: f32,
    pub bounds: Bounds,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Counter {
    pub text: String,
    pub bounds: Bounds,
}

/// Everything needed to paint one frame of the carousel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub region: Bounds,
    pub slides: Vec<SlideLayer>,
    pub captions: Vec<CaptionLayer>,
    /// Filled part of the progress bar.
    pub progress: Option<Bounds>,
    pub buttons: Vec<Control>,
    pub dots: Vec<Dot>,
    pub counter: Option<Counter>,
}

impl Scene {
    pub fn hit_test(&self, x: f32, y: f32) -> Option<Intent> {
        self.buttons
            .iter()
            .chain(self.dots.iter().map(|dot| &dot.control))
            .find(|control| control.bounds.contains(x, y))
            .map(|control| control.intent)
    }
}

/// Forwards an intent to the controller.
pub fn dispatch(
    controller: &mut Controller,
    intent: Intent,
    now_ms: u64,
) -> Option<TransitionEvent> {
    match intent {
        Intent::Prev => controller.prev(now_ms),
        Intent::Next => controller.next(now_ms),
        Intent::Goto(index) => controller.goto(index, now_ms),
    }
}

/// Approximate rendered width of `text` at `font_size`.
pub fn text_width(text: &str, font_size: i32) -> f32 {
    text.chars().count() as f32 * font_size as f32 * GLYPH_WIDTH
}

struct CaptionFade {
    index: usize,
    entering: bool,
    opacity: f32,
    tween: ease::Tween,
}

impl CaptionFade {
    fn new(index: usize, entering: bool, from: f32) -> Self {
        let to = if entering { 1.0 } else { 0.0 };
        Self {
            index,
            entering,
            opacity: from,
            tween: ease::Tween::new(ease::cubic_out, from, to, CAPTION_DURATION_MS),
        }
    }

    fn update(&mut self, dt_ms: f32) {
        self.opacity = self.tween.apply(dt_ms);
        if self.is_done() {
            self.opacity = if self.entering { 1.0 } else { 0.0 };
        }
    }

    fn is_done(&self) -> bool {
        self.tween.has_completed()
    }
}

/// Plays a caption enter/exit whenever the shown index changes.
#[derive(Default)]
pub struct CaptionAnimator {
    shown: Option<usize>,
    fades: Vec<CaptionFade>,
}

impl CaptionAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `has_caption` tells whether a slide has a caption to show at all.
    pub fn sync(
        &mut self,
        current: Option<usize>,
        has_caption: impl Fn(usize) -> bool,
        dt_ms: f32,
    ) {
        if current != self.shown {
            for fade in self.fades.iter_mut().filter(|f| f.entering) {
                *fade = CaptionFade::new(fade.index, false, fade.opacity);
            }
            if let Some(index) = current.filter(|&i| has_caption(i)) {
                self.fades.push(CaptionFade::new(index, true, 0.0));
            }
            self.shown = current;
        }

        for fade in &mut self.fades {
            fade.update(dt_ms);
        }
        self.fades.retain(|f| f.entering || !f.is_done());
    }

    /// Visible captions as `(index, opacity)`, exiting ones first.
    pub fn layers(&self) -> Vec<(usize, f32)> {
        let mut layers: Vec<(bool, usize, f32)> =
            self.fades.iter().map(|f| (f.entering, f.index, f.opacity)).collect();
        layers.sort_by_key(|&(entering, _, _)| entering);
        layers.into_iter().map(|(_, index, opacity)| (index, opacity)).collect()
    }
}

pub struct Presenter {
    height_preset: HeightPreset,
    captions: CaptionAnimator,
}

impl Presenter {
    pub fn new(height_preset: HeightPreset) -> Self {
        Self { height_preset, captions: CaptionAnimator::new() }
    }

    /// Region the carousel fills inside a window of the given size.
    pub fn region(&self, window_width: f32, window_height: f32) -> Bounds {
        Bounds::new(0.0, 0.0, window_width.max(0.0), self.height_preset.resolve(window_height))
    }

    /// Advances presentation-only animations.
    pub fn update(&mut self, controller: &Controller, registry: &SlideRegistry, dt_ms: f32) {
        let current = (!registry.is_empty()).then(|| controller.current_index());
        let has_caption = |index: usize| registry.get(index).is_some_and(|s| s.caption.is_some());
        self.captions.sync(current, has_caption, dt_ms);
    }

    pub fn scene(
        &self,
        controller: &Controller,
        registry: &SlideRegistry,
        region: Bounds,
        now_ms: u64,
    ) -> Scene {
        let mut scene = Scene { region, ..Scene::default() };
        if registry.is_empty() {
            return scene;
        }

        match controller.engine() {
            Some(engine) => {
                for index in 0..registry.len() {
                    let position = engine.slide_position(index);
                    if position.abs() < 1.0 {
                        let x = region.x + position * region.width;
                        scene.slides.push(SlideLayer {
                            index,
                            bounds: Bounds::new(x, region.y, region.width, region.height),
                        });
                    }
                }
            }
            None => scene.slides.push(SlideLayer { index: 0, bounds: region }),
        }

        scene.captions = self
            .captions
            .layers()
            .into_iter()
            .filter_map(|(index, opacity)| {
                let text = registry.get(index)?.caption.clone()?;
                Some(caption_layer(region, index, text, opacity))
            })
            .collect();

        if !controller.is_ready() {
            return scene;
        }

        let fraction = controller.progress_fraction(now_ms);
        let filled = region.width * fraction;
        scene.progress = Some(Bounds::new(region.x, region.y, filled, PROGRESS_BAR_HEIGHT));

        let button_y = region.center_y() - BUTTON_SIZE * 0.5;
        let next_x = region.right() - EDGE_MARGIN - BUTTON_SIZE;
        scene.buttons = vec![
            Control {
                label: "Previous slide".to_owned(),
                bounds: Bounds::new(region.x + EDGE_MARGIN, button_y, BUTTON_SIZE, BUTTON_SIZE),
                intent: Intent::Prev,
            },
            Control {
                label: "Next slide".to_owned(),
                bounds: Bounds::new(next_x, button_y, BUTTON_SIZE, BUTTON_SIZE),
                intent: Intent::Next,
            },
        ];

        scene.dots = dots(region, registry.len(), controller.current_index());

        let text = format!("{} / {}", controller.current_index() + 1, registry.len());
        let width = text_width(&text, COUNTER_FONT) + COUNTER_PADDING_X * 2.0;
        scene.counter = Some(Counter {
            bounds: Bounds::new(
                region.right() - EDGE_MARGIN - width,
                region.bottom() - EDGE_MARGIN - COUNTER_HEIGHT,
                width,
                COUNTER_HEIGHT,
            ),
            text,
        });

        scene
    }
}

fn caption_layer(region: Bounds, index: usize, text: String, opacity: f32) -> CaptionLayer {
    let margin = if region.width >= 640.0 { 40.0 } else { 24.0 };
    let max_width = region.width * if region.width >= 640.0 { 0.7 } else { 0.92 };
    let width = (text_width(&text, CAPTION_FONT) + CAPTION_PADDING_X * 2.0).min(max_width);
    let rise = CAPTION_RISE_PX * (1.0 - opacity);
    CaptionLayer {
        index,
        bounds: Bounds::new(
            region.x + margin,
            region.bottom() - margin - CAPTION_HEIGHT + rise,
            width,
            CAPTION_HEIGHT,
        ),
        text,
        opacity,
    }
}

fn dots(region: Bounds, count: usize, active: usize) -> Vec<Dot> {
    let widths: Vec<f32> = (0..count)
        .map(|i| if i == active { DOT_ACTIVE_WIDTH } else { DOT_SIZE })
        .collect();
    let total = widths.iter().sum::<f32>() + DOT_GAP * count.saturating_sub(1) as f32;
    let y = region.bottom() - EDGE_MARGIN - DOT_SIZE;

    let mut x = region.x + (region.width - total) * 0.5;
    widths
        .into_iter()
        .enumerate()
        .map(|(index, width)| {
            let dot = Dot {
                control: Control {
                    label: format!("Go to slide {}", index + 1),
                    bounds: Bounds::new(x, y, width, DOT_SIZE),
                    intent: Intent::Goto(index),
                },
                active: index == active,
            };
            x += width + DOT_GAP;
            dot
        })
        .collect()
}
