// Pure string builders for the styles the web frontend writes.
// Kept free of web-sys so host-side tests can include this file.

use backdrop_core::{Anchor, OrbSpec, Palette, Rgba, GRID_CELL_PX, GRID_LINE_PX};
use glam::Vec2;

/// `data-connection-distance` is exposed by `DOMStringMap` as
/// `connectionDistance`.
pub fn dataset_key(kebab: &str) -> String {
    let mut out = String::with_capacity(kebab.len());
    let mut upper = false;
    for ch in kebab.chars() {
        if ch == '-' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Static style of one orb: placement, size, blur and colour.
pub fn orb_style(spec: &OrbSpec, color: Rgba, z_index: i32) -> String {
    let (h_prop, h_pct) = match spec.horizontal {
        Anchor::Start(p) => ("left", p),
        Anchor::End(p) => ("right", p),
    };
    let (v_prop, v_pct) = match spec.vertical {
        Anchor::Start(p) => ("top", p),
        Anchor::End(p) => ("bottom", p),
    };
    format!(
        "position:fixed;{h_prop}:{h_pct}%;{v_prop}:{v_pct}%;width:{d}px;height:{d}px;\
         border-radius:9999px;filter:blur({b}px);opacity:{o};background:{c};\
         pointer-events:none;z-index:{z};will-change:transform;",
        d = spec.diameter_px,
        b = spec.blur_px,
        o = spec.opacity,
        c = color.hex(),
        z = z_index,
    )
}

/// Full-viewport line grid drawn beneath the orbs.
pub fn grid_style(palette: &Palette, z_index: i32) -> String {
    let c = palette.grid_line;
    format!(
        "position:fixed;inset:0;pointer-events:none;z-index:{z_index};opacity:{o};\
         background-image:linear-gradient(to right, {c} {w}px, transparent {w}px),\
         linear-gradient(to bottom, {c} {w}px, transparent {w}px);\
         background-size:{s}px {s}px;",
        o = palette.grid_opacity,
        w = GRID_LINE_PX,
        s = GRID_CELL_PX,
    )
}

/// Radial vignette over the canvas, transparent at the centre.
pub fn vignette_style(palette: &Palette, z_index: i32) -> String {
    format!(
        "position:fixed;inset:0;pointer-events:none;z-index:{z_index};\
         background:radial-gradient(circle at center, transparent 0%, {} 100%);",
        palette.vignette
    )
}

#[inline]
pub fn translate(offset: Vec2) -> String {
    format!("translate3d({:.2}px, {:.2}px, 0)", offset.x, offset.y)
}

#[inline]
pub fn display(visible: bool) -> &'static str {
    if visible {
        "block"
    } else {
        "none"
    }
}
