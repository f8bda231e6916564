//! Carousel controller: the single writer of carousel state.
//!
//! Every operation takes the event loop's current time in milliseconds. Nothing here blocks or
//! sleeps; the autoplay timer is a deadline checked by [`Controller::tick`].

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use log::{debug, info, trace, warn};

use crate::config::CarouselConfig;
use crate::engine::{TransitionEngine, TransitionEvent};
use crate::error::{ConfigurationError, EngineInitError};
use crate::timer::{AutoplayTimer, TimerToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Playing,
    Paused,
}

/// Snapshot of the observable carousel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    pub current_index: usize,
    pub is_hovered: bool,
    pub is_autoplay_active: bool,
}

#[derive(Debug)]
enum EngineSlot {
    /// No slides: nothing to show and nothing to control.
    Inert,
    /// Layout was not measurable yet; one more attempt is allowed.
    Pending,
    Ready(TransitionEngine),
    /// Initialization failed twice: slide 0 only, no autoplay, no controls.
    Static,
    /// Torn down.
    Detached,
}

#[derive(Debug)]
pub struct Controller {
    config: CarouselConfig,
    slide_count: usize,

    current_index: usize,
    hovered: bool,
    playback: Playback,

    timer: AutoplayTimer,
    engine: EngineSlot,

    last_transition_ms: Option<u64>,
    last_tick_ms: u64,
    frozen_progress: f32,

    events: VecDeque<TransitionEvent>,
}

impl Controller {
    /// Creates the carousel at slide 0 and tries to build the transition engine for the given
    /// viewport width. An unmeasurable width is retried once by the next [`Controller::layout`].
    pub fn mount(
        slide_count: usize,
        config: &CarouselConfig,
        viewport_width: f32,
        now_ms: u64,
    ) -> Self {
        let config = config.sanitized();
        let engine = if slide_count == 0 {
            warn!("{}, rendering an empty carousel", ConfigurationError::EmptySlides);
            EngineSlot::Inert
        } else {
            EngineSlot::Pending
        };

        let mut controller = Self {
            timer: AutoplayTimer::new(config.autoplay_interval_ms),
            config,
            slide_count,
            current_index: 0,
            hovered: false,
            playback: Playback::Playing,
            engine,
            last_transition_ms: None,
            last_tick_ms: now_ms,
            frozen_progress: 0.0,
            events: VecDeque::new(),
        };
        if let Err(e) = controller.try_attach(viewport_width, now_ms) {
            debug!("carousel engine not ready: {}, retrying on next layout", e);
        }
        controller
    }

    /// Called on every render pass with the measured viewport width.
    pub fn layout(&mut self, viewport_width: f32, now_ms: u64) {
        if matches!(self.engine, EngineSlot::Pending) {
            if let Err(e) = self.try_attach(viewport_width, now_ms) {
                warn!("carousel engine failed to initialize twice ({}), showing a static slide", e);
                self.engine = EngineSlot::Static;
            }
            return;
        }
        if let EngineSlot::Ready(engine) = &mut self.engine {
            if let Err(e) = engine.resize(viewport_width) {
                trace!("ignoring resize: {}", e);
            }
        }
    }

    fn try_attach(&mut self, viewport_width: f32, now_ms: u64) -> Result<(), EngineInitError> {
        let Some(count) = NonZeroUsize::new(self.slide_count) else {
            return Ok(());
        };
        let engine = TransitionEngine::new(
            count,
            self.config.looping,
            viewport_width,
            self.config.effective_transition_ms(),
        )?;
        self.engine = EngineSlot::Ready(engine);
        self.sync_playback(now_ms);
        if self.playback == Playback::Playing {
            self.timer.start(now_ms);
        }
        info!(
            "carousel ready: {} slides, {}ms interval, loop={}",
            self.slide_count,
            self.timer.interval_ms(),
            self.config.looping
        );
        Ok(())
    }

    /// Stops the timer and detaches the engine. Everything afterwards is a no-op.
    pub fn teardown(&mut self) {
        self.timer.stop();
        self.engine = EngineSlot::Detached;
        self.playback = Playback::Paused;
        debug!("carousel torn down");
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    pub fn state(&self) -> CarouselState {
        CarouselState {
            current_index: self.current_index,
            is_hovered: self.hovered,
            is_autoplay_active: self.is_ready() && self.playback == Playback::Playing,
        }
    }

    /// True once the engine is running; controls are only shown then.
    pub fn is_ready(&self) -> bool {
        matches!(self.engine, EngineSlot::Ready(_))
    }

    pub fn engine(&self) -> Option<&TransitionEngine> {
        match &self.engine {
            EngineSlot::Ready(engine) => Some(engine),
            _ => None,
        }
    }

    /// Index changes since the last drain, in the order they happened.
    pub fn drain_events(&mut self) -> impl Iterator<Item = TransitionEvent> + '_ {
        self.events.drain(..)
    }

    /// Elapsed fraction of the autoplay interval, for the progress indicator only.
    /// Frozen while paused.
    pub fn progress_fraction(&self, now_ms: u64) -> f32 {
        match (self.is_ready(), self.playback) {
            (false, _) => 0.0,
            (true, Playback::Playing) => self.timer.elapsed_fraction(now_ms),
            (true, Playback::Paused) => self.frozen_progress,
        }
    }

    /// Whether a manual navigation started recently enough to still be in flight.
    pub fn is_transition_in_flight(&self, now_ms: u64) -> bool {
        self.last_transition_ms
            .is_some_and(|at| now_ms < at.saturating_add(self.config.effective_transition_ms()))
    }

    pub fn next(&mut self, now_ms: u64) -> Option<TransitionEvent> {
        self.navigate(now_ms, |engine| engine.step(true))
    }

    pub fn prev(&mut self, now_ms: u64) -> Option<TransitionEvent> {
        self.navigate(now_ms, |engine| engine.step(false))
    }

    /// Jumps to `index`. Out-of-range indices are ignored.
    pub fn goto(&mut self, index: usize, now_ms: u64) -> Option<TransitionEvent> {
        if index >= self.slide_count {
            debug!("ignoring goto({}) with {} slides", index, self.slide_count);
            return None;
        }
        self.navigate(now_ms, |engine| engine.scroll_to(index))
    }

    pub fn on_hover_change(&mut self, hovered: bool, now_ms: u64) {
        if self.hovered == hovered {
            return;
        }
        self.hovered = hovered;
        trace!("hover {}", if hovered { "enter" } else { "leave" });
        self.sync_playback(now_ms);
    }

    /// Drives the scroll animation and the autoplay timer up to `now_ms`.
    pub fn tick(&mut self, now_ms: u64) {
        let dt_ms = now_ms.saturating_sub(self.last_tick_ms);
        self.last_tick_ms = now_ms;

        let EngineSlot::Ready(engine) = &mut self.engine else {
            return;
        };
        engine.update(dt_ms as f32);

        // Autoplay holds off while the strip is grabbed; releasing restarts the interval.
        if self.playback == Playback::Playing && !engine.is_dragging() {
            let due = self.timer.poll(now_ms);
            if due.is_some() {
                self.fire(now_ms);
            }
        }
    }

    /// Entry point for hosts that run their own timers instead of calling [`Controller::tick`]:
    /// schedule a callback for [`Controller::pending_timer`] and hand its token back here when it
    /// fires. Firings from a cancelled schedule are ignored.
    pub fn on_timer_fired(&mut self, token: TimerToken, now_ms: u64) {
        if !self.timer.is_current(token) {
            trace!("stale autoplay firing ignored");
            return;
        }
        self.timer.start(now_ms);
        self.fire(now_ms);
    }

    /// Token of the pending autoplay firing, if any. Changes whenever autoplay restarts, so a
    /// host-side callback holding an older token is stale.
    pub fn pending_timer(&self) -> Option<TimerToken> {
        self.timer.pending_token()
    }

    fn fire(&mut self, now_ms: u64) {
        if self.playback != Playback::Playing {
            return;
        }
        let event = match &mut self.engine {
            EngineSlot::Ready(engine) => engine.advance(),
            _ => return,
        };
        if let Some(event) = event {
            self.commit(event, now_ms);
        }
    }

    pub fn pointer_down(&mut self, x: f32, now_ms: u64) {
        if !self.config.draggable {
            return;
        }
        if let EngineSlot::Ready(engine) = &mut self.engine {
            trace!("drag start at {}ms", now_ms);
            engine.pointer_down(x);
        }
    }

    pub fn pointer_move(&mut self, x: f32) {
        if let EngineSlot::Ready(engine) = &mut self.engine {
            engine.pointer_move(x);
        }
    }

    /// Ends a drag. Counts as a manual action: the autoplay interval starts over.
    pub fn pointer_up(&mut self, x: f32, now_ms: u64) -> Option<TransitionEvent> {
        let EngineSlot::Ready(engine) = &mut self.engine else {
            return None;
        };
        if !engine.is_dragging() {
            return None;
        }
        let event = engine.pointer_up(x);
        self.restart_autoplay(now_ms);
        if let Some(event) = event {
            self.commit(event, now_ms);
        }
        event
    }

    fn navigate(
        &mut self,
        now_ms: u64,
        transition: impl FnOnce(&mut TransitionEngine) -> Option<TransitionEvent>,
    ) -> Option<TransitionEvent> {
        if self.is_transition_in_flight(now_ms) {
            debug!("navigation ignored, transition in flight");
            return None;
        }
        let EngineSlot::Ready(engine) = &mut self.engine else {
            return None;
        };
        let event = transition(engine);
        self.restart_autoplay(now_ms);
        if let Some(event) = event {
            self.commit(event, now_ms);
        }
        event
    }

    fn commit(&mut self, event: TransitionEvent, now_ms: u64) {
        debug_assert!(event.to_index < self.slide_count);
        self.current_index = event.to_index;
        self.last_transition_ms = Some(now_ms);
        info!("slide {} -> {} ({:?})", event.from_index, event.to_index, event.trigger);
        self.events.push_back(event);
    }

    fn restart_autoplay(&mut self, now_ms: u64) {
        if self.playback == Playback::Playing {
            self.timer.start(now_ms);
        }
    }

    /// Moves between `Playing` and `Paused` to match the hover flag.
    fn sync_playback(&mut self, now_ms: u64) {
        if !self.is_ready() {
            return;
        }
        let should_play = !self.hovered || !self.config.pause_on_hover;
        match (self.playback, should_play) {
            (Playback::Playing, false) => {
                self.frozen_progress = self.timer.elapsed_fraction(now_ms);
                self.timer.stop();
                self.playback = Playback::Paused;
                debug!("autoplay paused");
            }
            (Playback::Paused, true) => {
                self.timer.start(now_ms);
                self.frozen_progress = 0.0;
                self.playback = Playback::Playing;
                debug!("autoplay resumed");
            }
            _ => {}
        }
    }
}
