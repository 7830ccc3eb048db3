//! Everything the engine knows about the screen, its clients and the configuration it runs with.
use crate::config::{Config, Keybind, Mousebind};
use crate::layouts::{Arrangement, Layout};
use crate::models::{HintBounds, Mode, Monitor, Rule, TagMask, Tags, Xyhw};
use crate::{DisplayAction, DisplayEvent, Handle};
use std::collections::VecDeque;

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug)]
pub struct State<H: Handle> {
    pub monitor: Monitor<H>,
    pub tags: Tags,
    pub layouts: Vec<Layout>,
    pub rules: Vec<Rule>,
    pub bar_height: i32,
    /// Horizontal padding around bar text, one font height.
    pub text_pad: i32,
    pub border_width: i32,
    pub padding: i32,
    pub snap: i32,
    pub single_gap: bool,
    pub resize_hints: bool,
    pub mode: Mode<H>,
    /// Events that arrived during a drag and wait for the button release.
    pub deferred: Vec<DisplayEvent<H>>,
    /// Last known pointer position on the root window.
    pub pointer: (i32, i32),
    pub status_text: String,
    pub running: bool,
    /// The bar shows stale content.
    pub bar_dirty: bool,
    pub actions: VecDeque<DisplayAction<H>>,
    pub keybinds: Vec<Keybind>,
    pub mousebinds: Vec<Mousebind>,
}

impl<H: Handle> State<H> {
    pub(crate) fn new(config: &impl Config, screen: (i32, i32), font_height: i32) -> Self {
        let mut layouts = config.layouts();
        if layouts.is_empty() {
            tracing::warn!("No layouts configured, using the built-in ones");
            layouts = Layout::defaults();
        }
        let tags = Tags::new(config.create_list_of_tag_labels());
        let bar_height = font_height + 2;

        let mut monitor = Monitor::new(
            tags.len(),
            layouts.len(),
            config.mfact(),
            config.nmaster(),
            config.show_bar(),
            config.top_bar(),
        );
        monitor.set_symbol(&layouts[0].symbol);
        monitor.update_geometry(screen.0, screen.1, bar_height);

        Self {
            monitor,
            tags,
            layouts,
            rules: config.rules(),
            bar_height,
            text_pad: font_height,
            border_width: config.border_width(),
            padding: config.padding(),
            snap: config.snap(),
            single_gap: config.single_gap(),
            resize_hints: config.resize_hints(),
            mode: Mode::default(),
            deferred: Vec::new(),
            pointer: (0, 0),
            status_text: default_status(),
            running: true,
            bar_dirty: true,
            actions: VecDeque::new(),
            keybinds: config.keybinds(),
            mousebinds: config.mousebinds(),
        }
    }

    /// Every configured tag.
    pub fn all_tags(&self) -> TagMask {
        self.tags.mask()
    }

    /// How the active layout arranges.
    pub fn arrangement(&self) -> Arrangement {
        self.layouts
            .get(self.monitor.layout())
            .map_or(Arrangement::Floating, |layout| layout.arrangement)
    }

    pub fn hint_bounds(&self) -> HintBounds {
        HintBounds {
            screen_w: self.monitor.screen.w,
            screen_h: self.monitor.screen.h,
            work_area: self.monitor.work_area,
            bar_height: self.bar_height,
            resize_hints: self.resize_hints,
            floating_layout: !self.arrangement().arranges(),
        }
    }

    /// Shows the active layout's own symbol.
    pub(crate) fn reset_symbol(&mut self) {
        if let Some(layout) = self.layouts.get(self.monitor.layout()) {
            let symbol = layout.symbol.clone();
            self.monitor.set_symbol(&symbol);
        }
    }

    /// Places the bar window where the monitor expects it.
    pub(crate) fn move_bar(&mut self) {
        let wa = self.monitor.work_area;
        self.actions.push_back(DisplayAction::MoveResizeBar(Xyhw::new(
            wa.x,
            self.monitor.bar_y,
            wa.w,
            self.bar_height,
        )));
    }
}

/// Status text shown when the root window has no name.
pub fn default_status() -> String {
    format!("ldwm-{}", crate::VERSION)
}

#[cfg(test)]
impl State<crate::models::MockHandle> {
    /// Manages a bare client on the current view, without any display actions.
    pub(crate) fn add_test_client(
        &mut self,
        handle: crate::models::MockHandle,
    ) -> crate::models::ClientId {
        let mut client = crate::models::Client::new(crate::models::WindowHandle(handle));
        client.tags = self.monitor.tagset();
        client.border = self.border_width;
        let id = self.monitor.clients.insert(client);
        self.monitor.clients.attach(id);
        self.monitor.clients.attach_stack(id);
        id
    }
}

#[cfg(test)]
mod tests {
    use crate::layouts::Arrangement;
    use crate::models::{Manager, TagMask, Xyhw};

    #[test]
    fn starts_on_the_first_tag_with_the_first_layout() {
        let manager = Manager::new_test(vec!["1".to_owned(), "2".to_owned()]);
        let state = &manager.state;
        assert_eq!(state.monitor.tagset(), TagMask::single(0));
        assert_eq!(state.all_tags(), TagMask(0b11));
        assert_eq!(state.arrangement(), Arrangement::Tile);
        assert_eq!(state.monitor.ltsymbol, "[]=");
        assert_eq!(state.bar_height, 18);
        assert_eq!(state.monitor.work_area, Xyhw::new(0, 18, 1920, 1062));
        assert!(state.status_text.starts_with("ldwm-"));
    }

    #[test]
    fn missing_layouts_fall_back_to_the_defaults() {
        let manager = Manager::new_test_with(crate::config::TestConfig {
            layouts: vec![],
            ..Default::default()
        });
        assert_eq!(manager.state.layouts.len(), 4);
    }
}
