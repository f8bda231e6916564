pub const WINDOW_WIDTH: i32 = 1280;           // Default window width
pub const WINDOW_HEIGHT: i32 = 720;           // Default window height
pub const FPS: u32 = 60;                      // Frames per second

pub const DEFAULT_AUTOPLAY_MS: u64 = 4500;    // Time each slide is shown before advancing (ms)
pub const DEFAULT_TRANSITION_MS: u64 = 450;   // Scroll duration and manual debounce window (ms)
pub const CAPTION_DURATION_MS: f32 = 500.0;   // Caption enter/exit animation (ms)
pub const CAPTION_RISE_PX: f32 = 16.0;        // Caption slides up this far while entering

pub const PROGRESS_BAR_HEIGHT: f32 = 4.0;
pub const DOT_SIZE: f32 = 10.0;
pub const DOT_ACTIVE_WIDTH: f32 = 24.0;
pub const DOT_GAP: f32 = 8.0;
pub const BUTTON_SIZE: f32 = 46.0;
pub const EDGE_MARGIN: f32 = 16.0;
pub const GLYPH_WIDTH: f32 = 0.58;            // Approximate glyph advance relative to font size
