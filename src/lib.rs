//! Autoplay carousel: a slide registry, an autoplay timer, a circular scroll engine and the
//! controller that ties them together, plus a headless presentation layer.
//!
//! The raylib window that paints it lives in the `carousel` binary.

pub mod config;
pub mod constants;
pub mod controller;
pub mod engine;
pub mod error;
pub mod registry;
pub mod timer;
pub mod view;

pub use config::{CarouselConfig, HeightPreset};
pub use controller::{CarouselState, Controller, Playback};
pub use engine::{TransitionEngine, TransitionEvent, Trigger};
pub use error::{ConfigurationError, EngineInitError, RegistryError};
pub use registry::{Manifest, SlideDescriptor, SlideRegistry};
pub use timer::{AutoplayTimer, TimerToken};
