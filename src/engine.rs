//! Scroll/transition engine for a horizontal, circular slide strip.
//!
//! The engine keeps two things apart: the *selected* index, which changes the moment a
//! transition is committed, and the visual *offset* of the strip in slide units, which eases
//! toward the selection afterwards. When looping, the offset lives on a circle of
//! `slide_count` units, so moving from the last slide to the first keeps travelling forward
//! instead of sweeping back across the strip.

use std::fmt;
use std::num::NonZeroUsize;

use raylib::prelude::ease;

use crate::error::EngineInitError;

/// Releasing the pointer after moving less than this (in slide widths) counts as a tap.
const DRAG_THRESHOLD: f32 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Autoplay,
    ManualNext,
    ManualPrev,
    ManualGoto,
    Drag,
}

/// Emitted once per committed index change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionEvent {
    pub from_index: usize,
    pub to_index: usize,
    pub trigger: Trigger,
}

#[derive(Clone, Copy)]
enum Route {
    Forward,
    Backward,
    Shortest,
    Linear,
}

struct Scroll {
    from: f32,
    tween: ease::Tween,
}

struct Drag {
    start_x: f32,
    start_offset: f32,
}

pub struct TransitionEngine {
    slide_count: usize,
    looping: bool,
    viewport_width: f32,
    duration_ms: f32,

    selected: usize,
    offset: f32,

    scroll: Option<Scroll>,
    drag: Option<Drag>,
}

impl fmt::Debug for TransitionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionEngine")
            .field("slide_count", &self.slide_count)
            .field("looping", &self.looping)
            .field("selected", &self.selected)
            .field("offset", &self.offset)
            .field("settling", &self.scroll.is_some())
            .field("dragging", &self.drag.is_some())
            .finish_non_exhaustive()
    }
}

fn measurable(width: f32) -> Result<f32, EngineInitError> {
    if width.is_finite() && width > 0.0 {
        Ok(width)
    } else {
        Err(EngineInitError::Unmeasurable(width))
    }
}

impl TransitionEngine {
    /// Builds an engine resting on slide 0. Fails while the viewport has no usable width.
    pub fn new(
        slide_count: NonZeroUsize,
        looping: bool,
        viewport_width: f32,
        duration_ms: u64,
    ) -> Result<Self, EngineInitError> {
        Ok(Self {
            slide_count: slide_count.get(),
            looping,
            viewport_width: measurable(viewport_width)?,
            duration_ms: duration_ms.max(1) as f32,
            selected: 0,
            offset: 0.0,
            scroll: None,
            drag: None,
        })
    }

    pub fn resize(&mut self, viewport_width: f32) -> Result<(), EngineInitError> {
        self.viewport_width = measurable(viewport_width)?;
        Ok(())
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Visual position of the strip in slide units. In `0..slide_count` when looping.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// True while the strip is still easing toward the selected slide.
    pub fn is_settling(&self) -> bool {
        self.scroll.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Autoplay step: always one slide forward. Without looping the last slide rewinds to 0.
    pub fn advance(&mut self) -> Option<TransitionEvent> {
        let last = self.slide_count - 1;
        if self.looping || self.selected < last {
            self.select((self.selected + 1) % self.slide_count, Route::Forward, Trigger::Autoplay)
        } else {
            self.select(0, Route::Linear, Trigger::Autoplay)
        }
    }

    /// Manual ±1 step. A no-op at the ends of a non-looping strip.
    pub fn step(&mut self, forward: bool) -> Option<TransitionEvent> {
        let last = self.slide_count - 1;
        if forward {
            match (self.selected < last, self.looping) {
                (true, _) => self.select(self.selected + 1, Route::Forward, Trigger::ManualNext),
                (false, true) => self.select(0, Route::Forward, Trigger::ManualNext),
                (false, false) => None,
            }
        } else {
            match (self.selected > 0, self.looping) {
                (true, _) => self.select(self.selected - 1, Route::Backward, Trigger::ManualPrev),
                (false, true) => self.select(last, Route::Backward, Trigger::ManualPrev),
                (false, false) => None,
            }
        }
    }

    /// Direct jump. When looping, rotates the shorter way round; an exact tie goes forward.
    pub fn scroll_to(&mut self, index: usize) -> Option<TransitionEvent> {
        if index >= self.slide_count {
            return None;
        }
        self.select(index, Route::Shortest, Trigger::ManualGoto)
    }

    pub fn pointer_down(&mut self, x: f32) {
        // Grabbing the strip stops it where it is.
        self.scroll = None;
        self.drag = Some(Drag { start_x: x, start_offset: self.offset });
    }

    pub fn pointer_move(&mut self, x: f32) {
        if let Some(drag) = &self.drag {
            let position = drag.start_offset - (x - drag.start_x) / self.viewport_width;
            self.offset = self.normalize(position);
        }
    }

    /// Ends a drag, snapping to the nearest slide boundary.
    pub fn pointer_up(&mut self, x: f32) -> Option<TransitionEvent> {
        self.pointer_move(x);
        let drag = self.drag.take()?;

        let moved = (x - drag.start_x).abs() / self.viewport_width;
        let target = if moved < DRAG_THRESHOLD { self.selected } else { self.nearest_slide() };

        let event = self.select(target, Route::Shortest, Trigger::Drag);
        if event.is_none() {
            self.settle(Route::Shortest);
        }
        event
    }

    /// Advances the scroll animation by `dt_ms`.
    pub fn update(&mut self, dt_ms: f32) {
        let Some(scroll) = self.scroll.as_mut() else {
            return;
        };
        let position = scroll.from + scroll.tween.apply(dt_ms);

        if scroll.tween.has_completed() {
            self.scroll = None;
            self.offset = self.selected as f32;
        } else {
            self.offset = self.normalize(position);
        }
    }

    /// Position of slide `index` relative to the viewport, in slide widths. 0 is fully in view,
    /// -1 is just off the left edge. When looping the result is in `-n/2..=n/2`.
    pub fn slide_position(&self, index: usize) -> f32 {
        let relative = index as f32 - self.offset;
        if !self.looping {
            return relative;
        }
        let n = self.slide_count as f32;
        let wrapped = relative.rem_euclid(n);
        if wrapped > n / 2.0 { wrapped - n } else { wrapped }
    }

    fn select(&mut self, target: usize, route: Route, trigger: Trigger) -> Option<TransitionEvent> {
        if target == self.selected {
            return None;
        }
        let from_index = self.selected;
        self.selected = target;
        self.settle(route);
        Some(TransitionEvent { from_index, to_index: target, trigger })
    }

    fn settle(&mut self, route: Route) {
        let travel = self.travel_to(self.selected, route);
        if travel.abs() < f32::EPSILON {
            self.scroll = None;
            self.offset = self.selected as f32;
            return;
        }
        self.scroll = Some(Scroll {
            from: self.offset,
            tween: ease::Tween::new(ease::cubic_out, 0.0, travel, self.duration_ms),
        });
    }

    fn travel_to(&self, target: usize, route: Route) -> f32 {
        let target = target as f32;
        if !self.looping {
            return target - self.offset;
        }
        let n = self.slide_count as f32;
        let forward = (target - self.offset).rem_euclid(n);
        match route {
            Route::Forward => forward,
            Route::Backward => -(self.offset - target).rem_euclid(n),
            Route::Shortest if forward > n / 2.0 => forward - n,
            Route::Shortest => forward,
            Route::Linear => target - self.offset,
        }
    }

    fn nearest_slide(&self) -> usize {
        let nearest = self.offset.round().max(0.0) as usize;
        if self.looping { nearest % self.slide_count } else { nearest.min(self.slide_count - 1) }
    }

    fn normalize(&self, position: f32) -> f32 {
        let n = self.slide_count as f32;
        if self.looping {
            let wrapped = position.rem_euclid(n);
            if wrapped >= n { 0.0 } else { wrapped }
        } else {
            position.clamp(0.0, n - 1.0)
        }
    }
}
