// DOM hooks and presentation constants for the web frontend

// Element ids the page provides (created on demand when missing)
pub const CANVAS_ID: &str = "backdrop-canvas";
pub const ORB_LAYER_ID: &str = "backdrop-orbs";
pub const ORB_ID_PREFIX: &str = "backdrop-orb-";
pub const GRID_ID: &str = "backdrop-grid";
pub const VIGNETTE_ID: &str = "backdrop-vignette";

// Stacking, back to front: grid, orbs, canvas, vignette
pub const GRID_Z_INDEX: i32 = -13;
pub const ORB_Z_INDEX: i32 = -12;
pub const CANVAS_Z_INDEX: i32 = -11;
pub const VIGNETTE_Z_INDEX: i32 = -10;
