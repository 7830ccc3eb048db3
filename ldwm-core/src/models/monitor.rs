//! The managed output region and its view state.
use super::{ClientId, ClientRegistry, Handle, Pertag, TagMask, Xyhw};
use crate::layouts::LayoutId;

/// Longest layout symbol shown in the bar, in bytes.
const MAX_SYMBOL_LEN: usize = 15;

#[derive(Debug)]
pub struct Monitor<H: Handle> {
    /// Full output area.
    pub screen: Xyhw,
    /// Output area minus the bar.
    pub work_area: Xyhw,
    pub bar_y: i32,
    pub show_bar: bool,
    pub top_bar: bool,
    pub tagset: [TagMask; 2],
    pub seltags: usize,
    pub lt: [LayoutId; 2],
    pub sellt: usize,
    pub mfact: f32,
    pub nmaster: i32,
    pub ltsymbol: String,
    pub pertag: Pertag,
    pub clients: ClientRegistry<H>,
}

impl<H: Handle> Monitor<H> {
    pub fn new(
        tag_count: usize,
        layout_count: usize,
        mfact: f32,
        nmaster: i32,
        show_bar: bool,
        top_bar: bool,
    ) -> Self {
        let lt = [0, 1 % layout_count.max(1)];
        Self {
            screen: Xyhw::default(),
            work_area: Xyhw::default(),
            bar_y: 0,
            show_bar,
            top_bar,
            tagset: [TagMask::single(0); 2],
            seltags: 0,
            lt,
            sellt: 0,
            mfact,
            nmaster,
            ltsymbol: String::new(),
            pertag: Pertag::new(tag_count, nmaster, mfact, lt, 0),
            clients: ClientRegistry::default(),
        }
    }

    /// The active tag set.
    pub fn tagset(&self) -> TagMask {
        self.tagset[self.seltags]
    }

    /// The active layout.
    pub fn layout(&self) -> LayoutId {
        self.lt[self.sellt]
    }

    pub fn sel(&self) -> Option<ClientId> {
        self.clients.selected()
    }

    pub fn set_symbol(&mut self, symbol: &str) {
        let mut end = symbol.len().min(MAX_SYMBOL_LEN);
        while !symbol.is_char_boundary(end) {
            end -= 1;
        }
        self.ltsymbol = symbol[..end].to_owned();
    }

    /// Recomputes the usable area and bar position from the output area.
    pub fn update_bar_pos(&mut self, bar_height: i32) {
        self.work_area.y = self.screen.y;
        self.work_area.h = self.screen.h;
        if self.show_bar {
            self.work_area.h -= bar_height;
            if self.top_bar {
                self.bar_y = self.work_area.y;
                self.work_area.y += bar_height;
            } else {
                self.bar_y = self.work_area.y + self.work_area.h;
            }
        } else {
            self.bar_y = -bar_height;
        }
    }

    /// Adopts a new screen size. Returns whether the output area changed.
    pub fn update_geometry(&mut self, screen_w: i32, screen_h: i32, bar_height: i32) -> bool {
        if self.screen.w == screen_w && self.screen.h == screen_h {
            return false;
        }
        self.screen.w = screen_w;
        self.screen.h = screen_h;
        self.work_area.x = self.screen.x;
        self.work_area.w = screen_w;
        self.update_bar_pos(bar_height);
        true
    }

    /// Switches to `mask` (clamped to `all`). An empty mask returns to the previous view.
    /// Returns false when the view is already active.
    pub fn view(&mut self, mask: TagMask, all: TagMask) -> bool {
        let mask = mask & all;
        if mask == self.tagset() {
            return false;
        }
        self.seltags ^= 1;
        if mask.is_empty() {
            std::mem::swap(&mut self.pertag.curtag, &mut self.pertag.prevtag);
        } else {
            self.pertag.prevtag = self.pertag.curtag;
            self.tagset[self.seltags] = mask;
            self.pertag.curtag = if mask == all {
                0
            } else {
                mask.lowest().map_or(0, |i| i + 1)
            };
        }
        self.load_pertag();
        true
    }

    /// Toggles `delta` (clamped to `all`) in the active view. The current tag stays current as
    /// long as it remains visible. Returns false when the result would show no tag.
    pub fn toggle_view(&mut self, delta: TagMask, all: TagMask) -> bool {
        let tagset = self.tagset() ^ (delta & all);
        if tagset.is_empty() {
            return false;
        }
        let curtag = self.pertag.curtag;
        if tagset == all {
            self.pertag.prevtag = curtag;
            self.pertag.curtag = 0;
        } else if curtag == 0 || !tagset.contains(curtag - 1) {
            self.pertag.prevtag = curtag;
            self.pertag.curtag = tagset.lowest().map_or(0, |i| i + 1);
        }
        self.tagset[self.seltags] = tagset;
        self.load_pertag();
        true
    }

    fn load_pertag(&mut self) {
        let cur = self.pertag.curtag;
        self.nmaster = self.pertag.nmasters[cur];
        self.mfact = self.pertag.mfacts[cur];
        self.sellt = self.pertag.sellts[cur];
        self.lt[self.sellt] = self.pertag.ltidxs[cur][self.sellt];
        self.lt[self.sellt ^ 1] = self.pertag.ltidxs[cur][self.sellt ^ 1];
    }

    pub fn inc_nmaster(&mut self, delta: i32) {
        let cur = self.pertag.curtag;
        self.nmaster = (self.nmaster + delta).max(0);
        self.pertag.nmasters[cur] = self.nmaster;
    }

    /// Values below 1.0 adjust the factor, values from 1.0 set it to `value - 1.0`.
    /// Factors outside 0.1..=0.9 are rejected.
    pub fn set_mfact(&mut self, value: f32) -> bool {
        let mfact = if value < 1.0 {
            value + self.mfact
        } else {
            value - 1.0
        };
        if !(0.1..=0.9).contains(&mfact) {
            return false;
        }
        let cur = self.pertag.curtag;
        self.mfact = mfact;
        self.pertag.mfacts[cur] = mfact;
        true
    }

    /// Selects `layout` in the current slot, or flips to the other slot when `layout` is none
    /// or differs from the active one.
    pub fn set_layout(&mut self, layout: Option<LayoutId>) {
        let cur = self.pertag.curtag;
        if layout.is_none() || layout != Some(self.layout()) {
            self.pertag.sellts[cur] ^= 1;
            self.sellt = self.pertag.sellts[cur];
        }
        if let Some(layout) = layout {
            self.pertag.ltidxs[cur][self.sellt] = layout;
        }
        self.lt[self.sellt] = self.pertag.ltidxs[cur][self.sellt];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MockHandle;

    const ALL: TagMask = TagMask(0b111);

    fn monitor() -> Monitor<MockHandle> {
        let mut monitor = Monitor::new(3, 4, 0.55, 1, true, true);
        monitor.update_geometry(1920, 1080, 20);
        monitor
    }

    #[test]
    fn bar_reserves_the_top_strip() {
        let monitor = monitor();
        assert_eq!(monitor.bar_y, 0);
        assert_eq!(monitor.work_area, Xyhw::new(0, 20, 1920, 1060));
    }

    #[test]
    fn bottom_and_hidden_bars() {
        let mut monitor = monitor();
        monitor.top_bar = false;
        monitor.update_bar_pos(20);
        assert_eq!(monitor.bar_y, 1060);
        assert_eq!(monitor.work_area, Xyhw::new(0, 0, 1920, 1060));

        monitor.show_bar = false;
        monitor.update_bar_pos(20);
        assert_eq!(monitor.bar_y, -20);
        assert_eq!(monitor.work_area, Xyhw::new(0, 0, 1920, 1080));
    }

    #[test]
    fn same_size_is_not_a_change() {
        let mut monitor = monitor();
        assert!(!monitor.update_geometry(1920, 1080, 20));
        assert!(monitor.update_geometry(1280, 1024, 20));
        assert_eq!(monitor.work_area, Xyhw::new(0, 20, 1280, 1004));
    }

    #[test]
    fn toggle_view_keeps_current_tag_while_visible() {
        let mut monitor = monitor();
        monitor.inc_nmaster(2);
        assert!(monitor.toggle_view(TagMask::single(1), ALL));
        assert_eq!(monitor.tagset(), TagMask(0b011));
        assert_eq!(monitor.pertag.curtag, 1);
        assert_eq!(monitor.nmaster, 3);
    }

    #[test]
    fn toggle_view_moves_to_lowest_remaining_tag() {
        let mut monitor = monitor();
        assert!(monitor.toggle_view(TagMask::single(1), ALL));
        assert_eq!(monitor.pertag.curtag, 1);
        assert!(monitor.toggle_view(TagMask::single(0), ALL));
        assert_eq!(monitor.tagset(), TagMask(0b010));
        assert_eq!(monitor.pertag.curtag, 2);
        assert_eq!(monitor.pertag.prevtag, 1);
    }

    #[test]
    fn shrinking_the_all_tags_view_leaves_index_zero_behind() {
        let mut monitor = monitor();
        assert!(monitor.toggle_view(TagMask(0b110), ALL));
        assert_eq!(monitor.pertag.curtag, 0);
        assert!(monitor.toggle_view(TagMask::single(0), ALL));
        assert_eq!(monitor.tagset(), TagMask(0b110));
        assert_eq!(monitor.pertag.curtag, 2);
        assert_eq!(monitor.pertag.prevtag, 0);
    }

    #[test]
    fn toggle_view_to_every_tag_uses_index_zero() {
        let mut monitor = monitor();
        assert!(monitor.toggle_view(TagMask(0b110), ALL));
        assert_eq!(monitor.pertag.curtag, 0);
    }

    #[test]
    fn toggle_view_never_empties_the_view() {
        let mut monitor = monitor();
        assert!(!monitor.toggle_view(TagMask::single(0), ALL));
        assert_eq!(monitor.tagset(), TagMask::single(0));
        assert_eq!(monitor.pertag.curtag, 1);
    }

    #[test]
    fn view_selects_lowest_tag_index() {
        let mut monitor = monitor();
        assert!(monitor.view(TagMask(0b110), ALL));
        assert_eq!(monitor.tagset(), TagMask(0b110));
        assert_eq!(monitor.pertag.curtag, 2);
        assert_eq!(monitor.pertag.prevtag, 1);
        assert!(!monitor.view(TagMask(0b110), ALL));
    }

    #[test]
    fn view_of_every_tag_uses_index_zero() {
        let mut monitor = monitor();
        assert!(monitor.view(TagMask::ALL, ALL));
        assert_eq!(monitor.tagset(), ALL);
        assert_eq!(monitor.pertag.curtag, 0);
    }

    #[test]
    fn view_round_trip_restores_settings() {
        let mut monitor = monitor();
        monitor.inc_nmaster(1);
        assert!(monitor.set_mfact(0.1));
        monitor.set_layout(Some(3));
        let before = (monitor.nmaster, monitor.mfact, monitor.layout(), monitor.sellt);

        monitor.view(TagMask::single(2), ALL);
        assert_eq!(monitor.nmaster, 1);
        assert!((monitor.mfact - 0.55).abs() < f32::EPSILON);
        monitor.inc_nmaster(4);

        monitor.view(TagMask::EMPTY, ALL);
        assert_eq!(monitor.tagset(), TagMask::single(0));
        assert_eq!(
            (monitor.nmaster, monitor.mfact, monitor.layout(), monitor.sellt),
            before
        );

        monitor.view(TagMask::EMPTY, ALL);
        assert_eq!(monitor.tagset(), TagMask::single(2));
        assert_eq!(monitor.nmaster, 5);
    }

    #[test]
    fn mfact_is_bounded() {
        let mut monitor = monitor();
        assert!(monitor.set_mfact(-0.05));
        assert!((monitor.mfact - 0.5).abs() < 1e-6);
        assert!(monitor.set_mfact(1.3));
        assert!((monitor.mfact - 0.3).abs() < 1e-6);
        assert!(!monitor.set_mfact(1.95));
        assert!(!monitor.set_mfact(-0.25));
        assert!((monitor.mfact - 0.3).abs() < 1e-6);
    }

    #[test]
    fn nmaster_never_goes_negative() {
        let mut monitor = monitor();
        monitor.inc_nmaster(-5);
        assert_eq!(monitor.nmaster, 0);
        assert_eq!(monitor.pertag.nmasters[1], 0);
    }

    #[test]
    fn set_layout_toggles_between_slots() {
        let mut monitor = monitor();
        assert_eq!(monitor.lt, [0, 1]);
        monitor.set_layout(None);
        assert_eq!(monitor.layout(), 1);
        monitor.set_layout(None);
        assert_eq!(monitor.layout(), 0);

        monitor.set_layout(Some(2));
        assert_eq!(monitor.sellt, 1);
        assert_eq!(monitor.layout(), 2);
        // choosing the active layout again keeps the slot
        monitor.set_layout(Some(2));
        assert_eq!(monitor.sellt, 1);
        assert_eq!(monitor.pertag.ltidxs[1], [0, 2]);
    }

    #[test]
    fn symbols_are_bounded() {
        let mut monitor = monitor();
        monitor.set_symbol("[a very long layout symbol]");
        assert_eq!(monitor.ltsymbol.len(), MAX_SYMBOL_LEN);
    }
}
