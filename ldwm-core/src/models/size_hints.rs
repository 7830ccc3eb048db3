//! ICCCM size hints and the geometry solver that honours them.
use super::{Client, Handle, Xyhw};
use serde::{Deserialize, Serialize};

/// Normalised `WM_NORMAL_HINTS` of a client. Zero means "not set".
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct SizeHints {
    pub base_w: i32,
    pub base_h: i32,
    pub inc_w: i32,
    pub inc_h: i32,
    pub min_w: i32,
    pub min_h: i32,
    pub max_w: i32,
    pub max_h: i32,
    /// Minimum aspect ratio, as height / width.
    pub min_aspect: f32,
    /// Maximum aspect ratio, as width / height.
    pub max_aspect: f32,
}

impl SizeHints {
    /// A client is fixed when its minimum and maximum sizes are set and equal.
    pub fn is_fixed(&self) -> bool {
        self.max_w != 0
            && self.min_w != 0
            && self.max_h != 0
            && self.min_h != 0
            && self.max_w == self.min_w
            && self.max_h == self.min_h
    }
}

/// Everything besides the client itself that bounds a geometry request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HintBounds {
    pub screen_w: i32,
    pub screen_h: i32,
    pub work_area: Xyhw,
    pub bar_height: i32,
    /// Respect size hints for tiled clients too.
    pub resize_hints: bool,
    /// The active layout has no arrange step.
    pub floating_layout: bool,
}

/// Constrains a requested geometry for `client`.
///
/// With `interact` the window may not leave the screen entirely; otherwise it may not leave the
/// usable area of the monitor. Size hints are applied when enabled globally, when the client
/// floats, or when the layout does not arrange. Returns the constrained geometry and whether it
/// differs from the client's current geometry.
pub fn constrain<H: Handle>(
    client: &Client<H>,
    request: Xyhw,
    interact: bool,
    bounds: &HintBounds,
) -> (Xyhw, bool) {
    let Xyhw {
        mut x,
        mut y,
        mut w,
        mut h,
    } = request;
    let bw = client.border;

    w = w.max(1);
    h = h.max(1);
    if interact {
        if x > bounds.screen_w {
            x = bounds.screen_w - client.width();
        }
        if y > bounds.screen_h {
            y = bounds.screen_h - client.height();
        }
        if x + w + 2 * bw < 0 {
            x = 0;
        }
        if y + h + 2 * bw < 0 {
            y = 0;
        }
    } else {
        let wa = bounds.work_area;
        if x >= wa.right() {
            x = wa.right() - client.width();
        }
        if y >= wa.bottom() {
            y = wa.bottom() - client.height();
        }
        if x + w + 2 * bw <= wa.x {
            x = wa.x;
        }
        if y + h + 2 * bw <= wa.y {
            y = wa.y;
        }
    }
    h = h.max(bounds.bar_height);
    w = w.max(bounds.bar_height);

    if bounds.resize_hints || client.is_floating || bounds.floating_layout {
        (w, h) = apply_hints(&client.hints, w, h);
    }

    let result = Xyhw::new(x, y, w, h);
    (result, result != client.geometry)
}

fn apply_hints(hints: &SizeHints, mut w: i32, mut h: i32) -> (i32, i32) {
    // ICCCM 4.1.2.3: base size doubles as minimum when only one of them is given.
    let base_is_min = hints.base_w == hints.min_w && hints.base_h == hints.min_h;
    if !base_is_min {
        w -= hints.base_w;
        h -= hints.base_h;
    }
    if hints.min_aspect > 0.0 && hints.max_aspect > 0.0 {
        if hints.max_aspect < w as f32 / h as f32 {
            w = (h as f32 * hints.max_aspect + 0.5) as i32;
        } else if hints.min_aspect < h as f32 / w as f32 {
            h = (w as f32 * hints.min_aspect + 0.5) as i32;
        }
    }
    if base_is_min {
        w -= hints.base_w;
        h -= hints.base_h;
    }
    if hints.inc_w != 0 {
        w -= w % hints.inc_w;
    }
    if hints.inc_h != 0 {
        h -= h % hints.inc_h;
    }
    w = (w + hints.base_w).max(hints.min_w);
    h = (h + hints.base_h).max(hints.min_h);
    if hints.max_w != 0 {
        w = w.min(hints.max_w);
    }
    if hints.max_h != 0 {
        h = h.min(hints.max_h);
    }
    (w, h)
}
