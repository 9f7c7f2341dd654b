//! DOM ids, asset paths and render tuning for the browser front-end.
//!
//! Scene and camera tuning lives in `birthday_core::constants`; this module
//! only names things the page and the GPU pipeline need.

// Canvas / pages
pub const SCENE_CANVAS_ID: &str = "scene-canvas";
pub const BIRTHDAY_CANVAS_ID: &str = "birthday-canvas";
pub const PAGE_ATTR: &str = "data-page";

// Loading overlay
pub const OVERLAY_ID: &str = "clouds-overlay";
pub const OVERLAY_TEXT_ID: &str = "loading-text";
pub const STATUS_HOUSE_ID: &str = "status-house";
pub const STATUS_CAT_ID: &str = "status-cat";

// Debug log and error page
pub const DEBUG_OVERLAY_ID: &str = "debug-overlay";
pub const DEBUG_LOG_ID: &str = "debug-log";
pub const ERROR_PAGE_ID: &str = "error-page";
pub const ERROR_MESSAGE_ID: &str = "error-message";
pub const ERROR_LOG_ID: &str = "error-log";
pub const RETRY_BUTTON_ID: &str = "retry-button";
pub const HIDDEN_CLASS: &str = "hidden";

// Zoom affordances
pub const EXIT_BUTTON_ID: &str = "zoom-exit";
pub const HOVER_CLASS: &str = "house-hover";

// Camera control panel
pub const PANEL_APPLY_ID: &str = "panel-apply";
pub const PANEL_CAPTURE_ID: &str = "panel-capture";
pub const PANEL_SAVE_ID: &str = "panel-save";
pub const PANEL_LOAD_ID: &str = "panel-load";
pub const PANEL_POSITION_IDS: [&str; 3] = ["panel-pos-x", "panel-pos-y", "panel-pos-z"];
pub const PANEL_TARGET_IDS: [&str; 3] = ["panel-target-x", "panel-target-y", "panel-target-z"];
pub const PANEL_STEP_ID: &str = "panel-step";
/// Nudge buttons carry `data-handle`, `data-axis` and `data-dir`.
pub const PANEL_NUDGE_CLASS: &str = "panel-nudge";

// Diagnostics page
pub const PROBE_OUTPUT_ID: &str = "probe-output";
pub const BROWSER_OUTPUT_ID: &str = "browser-output";
pub const RELOAD_BUTTON_ID: &str = "reload-button";
pub const BACK_BUTTON_ID: &str = "back-button";
pub const MAIN_PAGE_URL: &str = "/";

// Assets
pub const HOUSE_GLTF: &str = "/cardboard_house/scene.gltf";
pub const CAT_GLTF: &str = "/cat_model/scene.gltf";

// Rendering
pub const SPHERE_SEGMENTS: u32 = 32;
pub const SPHERE_RINGS: u32 = 16;
pub const SNOW_SEGMENTS: u32 = 6;
pub const SNOW_RINGS: u32 = 4;
pub const BLOOM_THRESHOLD: f32 = 1.0;
pub const BLOOM_STRENGTH: f32 = 0.9;
pub const HOVER_EMISSIVE: f32 = 0.25;
pub const HOUSE_ROUGHNESS: f32 = 0.25;
pub const CAT_ROUGHNESS: f32 = 0.5;
pub const GROUND_ROUGHNESS: f32 = 0.9;
pub const INITIAL_INSTANCE_CAPACITY: usize = 1024;
