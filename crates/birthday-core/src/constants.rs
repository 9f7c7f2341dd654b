use glam::Vec3;

// Shared scene/camera tuning constants used by the web frontend and tests.

// Camera home pose and projection
pub const HOME_POSITION: Vec3 = Vec3::new(155.1, 24.66, 13.16);
pub const HOME_TARGET: Vec3 = Vec3::new(104.09, 9.01, -71.42);
pub const FOV_Y_DEGREES: f32 = 45.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 2000.0;

// Click-to-zoom destination, close to the front door of the house
pub const ZOOM_POSITION: Vec3 = Vec3::new(38.0, -2.0, 46.0);
pub const ZOOM_FOCUS: Vec3 = Vec3::new(0.0, -12.0, 0.0);
pub const ZOOM_DURATION_MS: f64 = 3000.0;

// Orbit controller limits
pub const ORBIT_MIN_DISTANCE: f32 = 10.0;
pub const ORBIT_MAX_DISTANCE: f32 = 400.0;
pub const ORBIT_MIN_POLAR: f32 = std::f32::consts::PI * 0.05;
pub const ORBIT_MAX_POLAR: f32 = std::f32::consts::PI * 0.45;
pub const ORBIT_ROTATE_SPEED: f32 = 0.8;
pub const ORBIT_ZOOM_SPEED: f32 = 1.2;
pub const ORBIT_DAMPING: f32 = 0.07;

// Models
pub const HOUSE_Y: f32 = -19.8;
pub const HOUSE_SCALE: f32 = 9.0;
pub const HOUSE_YAW: f32 = std::f32::consts::FRAC_PI_4;
pub const HOUSE_LIGHTEN: f32 = 1.4; // HSL lightness multiplier for house materials
pub const CAT_POSITION: Vec3 = Vec3::new(-50.0, -17.0, 0.0);
pub const CAT_YAW: f32 = std::f32::consts::FRAC_PI_3;
pub const CAT_TARGET_EXTENT: f32 = 3.0; // largest side of the cat after scaling
pub const CAT_LIGHTEN: f32 = 1.2;

// Ground
pub const GROUND_Y: f32 = -20.0;
pub const GROUND_SIZE: f32 = 800.0;
pub const GROUND_TEXTURE_SIZE: u32 = 512;
pub const GROUND_TEXTURE_REPEAT: f32 = 10.0;
pub const GROUND_SPECKLES: usize = 2000;
pub const GROUND_STROKES: usize = 30;

// Sky
pub const SUN_POSITION: Vec3 = Vec3::new(100.0, 80.0, -150.0);
pub const SUN_RADIUS: f32 = 25.0;
pub const SUN_BASE_INTENSITY: f32 = 2.3;
pub const SUN_PULSE_AMPLITUDE: f32 = 0.3;
pub const SUN_PULSE_RATE: f32 = 0.3;

pub const CLOUD_COUNT: usize = 20;
pub const CLOUD_WRAP_X: f32 = 300.0; // clouds leaving at -X re-enter at +X
pub const CLOUD_DRIFT_PER_TICK: f32 = 0.02;
pub const CLOUD_BOB_AMPLITUDE: f32 = 0.03;
pub const CLOUD_ROLL_AMPLITUDE: f32 = 0.02;

pub const SNOW_COUNT: usize = 400;
pub const SNOW_HALF_EXTENT: f32 = 200.0;
pub const SNOW_TOP: f32 = 140.0;

// Fog
pub const FOG_NEAR: f32 = 40.0;
pub const FOG_FAR: f32 = 400.0;

// Palette (sunset theme)
pub const CANVAS_BACKGROUND: &str = "#FF7E5F";
pub const FOG_COLOR: &str = "#734B5E";
pub const GROUND_COLOR: &str = "#4A4969";
pub const GROUND_TEXTURE_COLOR: &str = "#5A556A";
pub const GROUND_DARK: &str = "#3D3B54";
pub const GROUND_LIGHT: &str = "#625F7B";
pub const GROUND_STROKE: &str = "#5D5A70";
pub const SUN_COLOR: &str = "#FF3F00";
pub const CLOUD_COLOR: &str = "#FFA07A";
pub const SNOW_COLORS: [&str; 7] = [
    "#ffffff", "#FFF8E1", "#FFF3CD", "#FFF0F5", "#FFFAFA", "#FFE4E1", "#FAF0E6",
];

// Lights: (direction towards light, color, intensity)
pub const AMBIENT_COLOR: &str = "#FFD6A5";
pub const AMBIENT_INTENSITY: f32 = 0.8;
pub const HEMI_SKY_COLOR: &str = "#FFD180";
pub const HEMI_INTENSITY: f32 = 0.8;
pub const KEY_LIGHT_COLOR: &str = "#FF9E80";
pub const KEY_LIGHT_INTENSITY: f32 = 1.5;
pub const FILL_LIGHT_POSITION: Vec3 = Vec3::new(50.0, 50.0, 25.0);
pub const FILL_LIGHT_COLOR: &str = "#FFAB91";
pub const FILL_LIGHT_INTENSITY: f32 = 0.5;
pub const RIM_LIGHT_POSITION: Vec3 = Vec3::new(-50.0, 30.0, -20.0);
pub const RIM_LIGHT_COLOR: &str = "#B388FF";
pub const RIM_LIGHT_INTENSITY: f32 = 0.4;

// Loading overlay timing
pub const OVERLAY_READY_DELAY_MS: f64 = 500.0;
pub const OVERLAY_ANIMATE_DELAY_MS: f64 = 100.0;
pub const OVERLAY_CLEAR_AFTER_MS: f64 = 3000.0;

// Control panel
pub const DEFAULT_PANEL_STEP: f32 = 1.0;
pub const BOOKMARK_KEY: &str = "birthday-scene.camera-bookmark";

/// Runtime values the viewer is built from.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub home_position: Vec3,
    pub home_target: Vec3,
    pub zoom_position: Vec3,
    pub zoom_focus: Vec3,
    pub zoom_duration_ms: f64,
    pub cloud_count: usize,
    pub snow_count: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            home_position: HOME_POSITION,
            home_target: HOME_TARGET,
            zoom_position: ZOOM_POSITION,
            zoom_focus: ZOOM_FOCUS,
            zoom_duration_ms: ZOOM_DURATION_MS,
            cloud_count: CLOUD_COUNT,
            snow_count: SNOW_COUNT,
        }
    }
}
