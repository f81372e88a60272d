// Shared tuning constants used by both web and native frontends.

// Particle field
pub const PARTICLE_COUNT: usize = 150;
pub const MAX_PARTICLE_COUNT: usize = 1000; // pair search is quadratic
pub const CONNECTION_DISTANCE: f32 = 140.0; // pair edges drawn below this distance
pub const POINTER_LINK_FACTOR: f32 = 1.5; // pointer edges reach 1.5x further than pair edges
pub const POINTER_DISTANCE: f32 = 200.0; // attraction radius around the pointer
pub const ATTRACTION: f32 = 0.02; // velocity impulse at zero distance, per frame
pub const MAX_INITIAL_SPEED: f32 = 0.2; // per-axis, units per frame

// Particle appearance
pub const BASE_SIZE_MIN: f32 = 1.0;
pub const BASE_SIZE_MAX: f32 = 2.5;
pub const PULSE_SPEED_MIN: f32 = 0.03; // radians per frame
pub const PULSE_SPEED_MAX: f32 = 0.05;
pub const PULSE_AMPLITUDE: f32 = 0.4;
pub const MIN_RADIUS: f32 = 0.5;

// Connection graph styling
pub const EDGE_ALPHA: f32 = 0.15; // alpha of a zero-length pair edge
pub const POINTER_EDGE_ALPHA: f32 = 0.2;
pub const EDGE_WIDTH: f32 = 0.8;

// Pointer smoothing spring
pub const SPRING_STIFFNESS: f32 = 50.0;
pub const SPRING_DAMPING: f32 = 20.0;
pub const SPRING_REST_DELTA: f32 = 0.01; // px; below this the spring counts as settled
pub const SPRING_STABILITY_MARGIN: f32 = 0.9; // fraction of the largest stable Euler step
pub const SPRING_MAX_SUBSTEPS: u32 = 16;

// Parallax orbs
pub const ORB_DRIFT: f32 = 50.0; // max offset in px either side of the anchor

// Static layers
pub const GRID_CELL_PX: u32 = 32;
pub const GRID_LINE_PX: u32 = 1;

// Frame timing
pub const MAX_FRAME_DT_SEC: f32 = 0.05; // clamp for the spring step after a stall
pub const DEFAULT_FRAME_DT_SEC: f32 = 1.0 / 60.0;

// Viewport
pub const MIN_FIELD_VIEWPORT_WIDTH: f32 = 768.0; // below this only the orbs are shown
