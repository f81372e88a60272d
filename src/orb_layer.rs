use backdrop_core::{OrbSpec, Palette};
use glam::Vec2;
use web_sys as web;

use crate::constants::{
    GRID_ID, GRID_Z_INDEX, ORB_ID_PREFIX, ORB_LAYER_ID, ORB_Z_INDEX, VIGNETTE_ID, VIGNETTE_Z_INDEX,
};
use crate::css;
use crate::dom;

/// DOM elements standing in for the parallax orbs.
#[derive(Clone)]
pub struct OrbElements {
    elements: Vec<web::Element>,
}

impl OrbElements {
    /// Find or create one element per orb under the orb layer container and
    /// give each its static style.
    pub fn build(document: &web::Document, orbs: &[OrbSpec], palette: &Palette) -> Option<Self> {
        let layer = dom::element_or_create(document, "div", ORB_LAYER_ID)?;
        dom::set_style(&layer, "pointer-events", "none");
        let mut elements = Vec::with_capacity(orbs.len());
        for (i, spec) in orbs.iter().enumerate() {
            let id = format!("{ORB_ID_PREFIX}{i}");
            let el = match document.get_element_by_id(&id) {
                Some(el) => el,
                None => {
                    let el = document.create_element("div").ok()?;
                    el.set_id(&id);
                    _ = layer.append_child(&el);
                    el
                }
            };
            let color = palette.orbs[spec.palette_index % palette.orbs.len()];
            _ = el.set_attribute("style", &css::orb_style(spec, color, ORB_Z_INDEX));
            elements.push(el);
        }
        Some(Self { elements })
    }

    pub fn apply(&self, offsets: &[Vec2]) {
        for (el, off) in self.elements.iter().zip(offsets) {
            dom::set_style(el, "transform", &css::translate(*off));
        }
    }

    pub fn remove(&self) {
        for el in &self.elements {
            el.remove();
        }
    }
}

/// The static grid beneath the orbs and the vignette above the canvas.
pub struct StaticLayers {
    grid: web::Element,
    vignette: web::Element,
}

impl StaticLayers {
    pub fn build(document: &web::Document, palette: &Palette) -> Option<Self> {
        let grid = dom::element_or_create(document, "div", GRID_ID)?;
        _ = grid.set_attribute("style", &css::grid_style(palette, GRID_Z_INDEX));
        let vignette = dom::element_or_create(document, "div", VIGNETTE_ID)?;
        _ = vignette.set_attribute("style", &css::vignette_style(palette, VIGNETTE_Z_INDEX));
        Some(Self { grid, vignette })
    }

    pub fn remove(&self) {
        self.grid.remove();
        self.vignette.remove();
    }
}
