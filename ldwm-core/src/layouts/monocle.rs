use crate::models::{Handle, Xyhw};
use crate::state::State;

/// Layout which gives every tiled window the whole usable area, stacked behind each other.
/// The symbol shows how many windows are visible.
pub fn update<H: Handle>(state: &mut State<H>) {
    let tagset = state.monitor.tagset();
    let visible = state.monitor.clients.visible(tagset).count();
    if visible > 0 {
        state.monitor.set_symbol(&format!("[{visible}]"));
    }

    let wa = state.monitor.work_area;
    let mut cursor = state
        .monitor
        .clients
        .next_tiled(state.monitor.clients.head(), tagset);
    while let Some(id) = cursor {
        let bw = state.monitor.clients[id].border;
        state.resize(id, Xyhw::new(wa.x, wa.y, wa.w - 2 * bw, wa.h - 2 * bw), false);
        cursor = state
            .monitor
            .clients
            .next_tiled(state.monitor.clients.next_of(id), tagset);
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{ClientId, Manager};

    #[test]
    fn every_client_fills_the_usable_area() {
        let mut manager = Manager::new_test(vec![]);
        manager.state.monitor.set_layout(Some(3));
        let ids: Vec<ClientId> = (1..=4).map(|h| manager.state.add_test_client(h)).collect();
        manager.state.arrange();

        assert_eq!(manager.state.monitor.ltsymbol, "[4]");
        let wa = manager.state.monitor.work_area;
        for id in ids {
            let client = &manager.state.monitor.clients[id];
            assert_eq!((client.geometry.x, client.geometry.y), (wa.x, wa.y));
            assert_eq!((client.width(), client.height()), (wa.w, wa.h));
        }
    }

    #[test]
    fn symbol_counts_floating_clients_too() {
        let mut manager = Manager::new_test(vec![]);
        manager.state.monitor.set_layout(Some(3));
        let floating = manager.state.add_test_client(1);
        manager.state.monitor.clients[floating].is_floating = true;
        manager.state.add_test_client(2);
        manager.state.arrange();
        assert_eq!(manager.state.monitor.ltsymbol, "[2]");
    }

    #[test]
    fn empty_view_keeps_the_configured_symbol() {
        let mut manager = Manager::new_test(vec![]);
        manager.state.monitor.set_layout(Some(3));
        manager.state.arrange();
        assert_eq!(manager.state.monitor.ltsymbol, "[M]");
    }
}
