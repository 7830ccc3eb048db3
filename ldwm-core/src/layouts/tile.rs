use crate::models::{Handle, Xyhw};
use crate::state::State;

/// Master column on the left, stack column on the right, each split evenly top to bottom.
///
/// Every slot is `remaining height / remaining slots` so the division remainder ends up in the
/// last client of each column. `padding` insets every client and separates the columns.
pub fn update<H: Handle>(state: &mut State<H>, padding: i32) {
    let tagset = state.monitor.tagset();
    let n = state.monitor.clients.tiled(tagset).count() as i32;
    if n == 0 {
        return;
    }

    let wa = state.monitor.work_area;
    let nmaster = state.monitor.nmaster;
    let gaps = if state.single_gap && n != 1 { 1 } else { 2 };
    let master_w = if n > nmaster {
        if nmaster > 0 {
            (wa.w as f32 * state.monitor.mfact) as i32
        } else {
            0
        }
    } else {
        wa.w
    };

    let (mut my, mut ty) = (0, 0);
    let mut i = 0;
    let mut cursor = state
        .monitor
        .clients
        .next_tiled(state.monitor.clients.head(), tagset);
    while let Some(id) = cursor {
        let bw = state.monitor.clients[id].border;
        if i < nmaster {
            let h = (wa.h - my) / (n.min(nmaster) - i);
            let geometry = Xyhw::new(
                wa.x + padding,
                wa.y + my + padding,
                master_w - gaps * (bw + padding),
                h - 2 * (bw + padding),
            );
            state.resize(id, geometry, false);
            my += state.monitor.clients[id].height() + padding;
        } else {
            let h = (wa.h - ty) / (n - i);
            let geometry = Xyhw::new(
                wa.x + master_w + padding,
                wa.y + ty + padding,
                wa.w - master_w - 2 * (bw + padding),
                h - 2 * (bw + padding),
            );
            state.resize(id, geometry, false);
            ty += state.monitor.clients[id].height() + gaps * padding - (2 - gaps) * bw;
        }
        i += 1;
        cursor = state
            .monitor
            .clients
            .next_tiled(state.monitor.clients.next_of(id), tagset);
    }
}
