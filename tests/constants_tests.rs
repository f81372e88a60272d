// Host-side tests for web frontend constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn element_ids_are_distinct() {
    let ids = [CANVAS_ID, ORB_LAYER_ID, GRID_ID, VIGNETTE_ID];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.starts_with(ORB_ID_PREFIX));
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn background_layers_sit_behind_content_in_order() {
    assert!(GRID_Z_INDEX < ORB_Z_INDEX);
    assert!(ORB_Z_INDEX < CANVAS_Z_INDEX);
    assert!(CANVAS_Z_INDEX < VIGNETTE_Z_INDEX);
    assert!(VIGNETTE_Z_INDEX < 0);
}
