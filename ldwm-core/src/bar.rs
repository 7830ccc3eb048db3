//! Contents of the status bar and what a click on it hits.
//!
//! The engine decides what goes where; the display server only paints cells. Text widths come
//! from the display server's font.
use crate::models::{Handle, TagMask};
use crate::state::State;
use serde::{Deserialize, Serialize};

/// Regions a button binding can be attached to.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Click {
    TagBar,
    LtSymbol,
    StatusText,
    WinTitle,
    ClientWin,
    RootWin,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scheme {
    Normal,
    Selected,
    /// Normal colours swapped.
    Urgent,
    /// One of the status colour schemes, selected by bytes `0x01..=0x04` in the status text.
    Status(usize),
}

/// The small square in the corner of a cell.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Indicator {
    #[default]
    None,
    Filled,
    Outline,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub x: i32,
    pub w: i32,
    /// Nothing paints only the background.
    pub text: Option<String>,
    pub scheme: Scheme,
    /// Text is inset by half the font height on each side.
    pub padded: bool,
    pub indicator: Indicator,
}

/// A complete bar, painted cell by cell in order.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Bar {
    pub width: i32,
    pub height: i32,
    pub cells: Vec<Cell>,
}

fn color_code(ch: char) -> Option<usize> {
    let code = ch as u32;
    (1..=4).contains(&code).then(|| code as usize - 1)
}

/// The status text without colour switches.
pub fn strip_colors(text: &str) -> String {
    text.chars().filter(|&ch| color_code(ch).is_none()).collect()
}

/// Splits the status text at colour switches into `(scheme, text)` runs.
/// The last run is always present, even when empty.
pub fn status_segments(text: &str) -> Vec<(usize, &str)> {
    let mut segments = vec![];
    let mut scheme = 0;
    let mut start = 0;
    for (i, ch) in text.char_indices() {
        if let Some(next) = color_code(ch) {
            if i > start {
                segments.push((scheme, &text[start..i]));
            }
            scheme = next;
            start = i + ch.len_utf8();
        }
    }
    segments.push((scheme, &text[start..]));
    segments
}

impl Bar {
    pub fn build<H: Handle>(state: &State<H>, measure: impl Fn(&str) -> i32) -> Self {
        let textw = |text: &str| measure(text) + state.text_pad;
        let monitor = &state.monitor;
        let width = monitor.work_area.w;
        let tagset = monitor.tagset();
        let sel = monitor.sel().map(|id| &monitor.clients[id]);

        let (mut occupied, mut urgent) = (TagMask::EMPTY, TagMask::EMPTY);
        for id in monitor.clients.iter() {
            let client = &monitor.clients[id];
            occupied = occupied | client.tags;
            if client.is_urgent {
                urgent = urgent | client.tags;
            }
        }

        let mut cells = vec![];
        let mut x = 0;
        for (i, label) in state.tags.labels().iter().enumerate() {
            let w = textw(label);
            let scheme = if tagset.contains(i) {
                Scheme::Selected
            } else if urgent.contains(i) {
                Scheme::Urgent
            } else {
                Scheme::Normal
            };
            let indicator = if sel.is_some_and(|c| c.has_tag(i)) {
                Indicator::Filled
            } else if occupied.contains(i) {
                Indicator::Outline
            } else {
                Indicator::None
            };
            cells.push(Cell {
                x,
                w,
                text: Some(label.clone()),
                scheme,
                padded: true,
                indicator,
            });
            x += w;
        }

        let w = textw(&monitor.ltsymbol);
        cells.push(Cell {
            x,
            w,
            text: Some(monitor.ltsymbol.clone()),
            scheme: Scheme::Normal,
            padded: true,
            indicator: Indicator::None,
        });
        x += w;

        let status_x = (width - measure(&strip_colors(&state.status_text))).max(x);
        let mut sx = status_x;
        for (scheme, text) in status_segments(&state.status_text) {
            cells.push(Cell {
                x: sx,
                w: width - sx,
                text: Some(text.to_owned()),
                scheme: Scheme::Status(scheme),
                padded: false,
                indicator: Indicator::None,
            });
            sx += measure(text);
        }

        let w = status_x - x;
        if w > state.bar_height {
            cells.push(match sel {
                Some(client) => Cell {
                    x,
                    w,
                    text: Some(client.name.clone()),
                    scheme: Scheme::Selected,
                    padded: true,
                    indicator: if client.is_fixed {
                        Indicator::Filled
                    } else if client.is_floating {
                        Indicator::Outline
                    } else {
                        Indicator::None
                    },
                },
                None => Cell {
                    x,
                    w,
                    text: None,
                    scheme: Scheme::Normal,
                    padded: false,
                    indicator: Indicator::None,
                },
            });
        }

        Self {
            width,
            height: state.bar_height,
            cells,
        }
    }
}

/// Finds the bar region under `x`. Clicks on a tag cell also return that tag.
pub fn classify<H: Handle>(
    state: &State<H>,
    x: i32,
    measure: impl Fn(&str) -> i32,
) -> (Click, TagMask) {
    let textw = |text: &str| measure(text) + state.text_pad;
    let mut right = 0;
    for (i, label) in state.tags.labels().iter().enumerate() {
        right += textw(label);
        if x < right {
            return (Click::TagBar, TagMask::single(i));
        }
    }
    let click = if x < right + textw(&state.monitor.ltsymbol) {
        Click::LtSymbol
    } else if x > state.monitor.work_area.w - textw(&strip_colors(&state.status_text)) {
        Click::StatusText
    } else {
        Click::WinTitle
    };
    (click, TagMask::EMPTY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_servers::mock_display_server::CHAR_WIDTH;
    use crate::models::{Manager, MockHandle};

    fn measure(text: &str) -> i32 {
        text.chars().count() as i32 * CHAR_WIDTH
    }

    fn manager() -> Manager<MockHandle, crate::config::TestConfig, crate::display_servers::MockDisplayServer<MockHandle>> {
        Manager::new_test(vec!["1".to_owned(), "2".to_owned(), "3".to_owned()])
    }

    #[test]
    fn status_is_split_at_colour_switches() {
        let segments = status_segments("cpu\u{2}42%\u{1}\u{4}mem");
        assert_eq!(segments, vec![(0, "cpu"), (1, "42%"), (3, "mem")]);
        assert_eq!(status_segments(""), vec![(0, "")]);
        assert_eq!(strip_colors("a\u{3}b"), "ab");
    }

    #[test]
    fn tag_cells_show_selection_and_occupancy() {
        let mut manager = manager();
        let id = manager.state.add_test_client(1);
        manager.state.monitor.clients[id].tags = TagMask(0b011);
        let other = manager.state.add_test_client(2);
        manager.state.monitor.clients[other].tags = TagMask::single(2);
        manager.state.monitor.clients[other].is_urgent = true;
        manager.state.focus(Some(id));

        let bar = Bar::build(&manager.state, measure);
        let tags: Vec<&Cell> = bar.cells.iter().take(3).collect();
        assert_eq!(tags[0].scheme, Scheme::Selected);
        assert_eq!(tags[0].indicator, Indicator::Filled);
        assert_eq!(tags[1].scheme, Scheme::Normal);
        assert_eq!(tags[1].indicator, Indicator::Filled);
        assert_eq!(tags[2].scheme, Scheme::Urgent);
        assert_eq!(tags[2].indicator, Indicator::Outline);
        // every tag cell is its label plus the font padding
        assert_eq!(tags[1].x, tags[0].w);
        assert_eq!(tags[0].w, CHAR_WIDTH + manager.state.text_pad);
    }

    #[test]
    fn title_fills_the_space_before_the_status() {
        let mut manager = manager();
        manager.state.status_text = "status".to_owned();
        let id = manager.state.add_test_client(1);
        manager.state.monitor.clients[id].name = "xterm".to_owned();
        manager.state.monitor.clients[id].is_floating = true;
        manager.state.focus(Some(id));

        let bar = Bar::build(&manager.state, measure);
        let status = bar
            .cells
            .iter()
            .find(|c| c.scheme == Scheme::Status(0))
            .map(|c| c.x);
        assert_eq!(status, Some(bar.width - measure("status")));
        let title = bar.cells.last().map(|c| (c.text.clone(), c.x + c.w, c.indicator));
        assert_eq!(
            title,
            Some((Some("xterm".to_owned()), bar.width - measure("status"), Indicator::Outline))
        );
    }

    #[test]
    fn empty_title_cell_without_selection() {
        let manager = manager();
        let bar = Bar::build(&manager.state, measure);
        let title = bar.cells.last().map(|c| (c.text.clone(), c.scheme));
        assert_eq!(title, Some((None, Scheme::Normal)));
    }

    #[test]
    fn clicks_are_classified_by_region() {
        let mut manager = manager();
        manager.state.status_text = "status".to_owned();
        let state = &manager.state;
        let tag_w = CHAR_WIDTH + state.text_pad;
        assert_eq!(classify(state, 0, measure), (Click::TagBar, TagMask::single(0)));
        assert_eq!(classify(state, tag_w, measure), (Click::TagBar, TagMask::single(1)));
        assert_eq!(classify(state, 3 * tag_w, measure).0, Click::LtSymbol);
        assert_eq!(classify(state, 600, measure).0, Click::WinTitle);
        assert_eq!(classify(state, state.monitor.work_area.w - 1, measure).0, Click::StatusText);
    }
}
