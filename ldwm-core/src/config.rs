//! What the engine reads from the user's configuration.
use crate::bar::Click;
use crate::command::Command;
use crate::layouts::Layout;
use crate::models::Rule;
use crate::utils::modmask_lookup::{Button, ModMask};
use serde::{Deserialize, Serialize};

/// A key combination and the command it runs. Keys are X keysym names such as `Return`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Keybind {
    pub modmask: ModMask,
    pub key: String,
    pub command: Command,
}

/// A button combination on one of the clickable regions.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Mousebind {
    pub click: Click,
    pub modmask: ModMask,
    pub button: Button,
    pub command: Command,
}

/// Foreground and background of one colour scheme, as X colour specs.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorPair {
    pub foreground: String,
    pub background: String,
}

impl ColorPair {
    pub fn new(foreground: &str, background: &str) -> Self {
        Self {
            foreground: foreground.to_owned(),
            background: background.to_owned(),
        }
    }
}

/// Number of colour schemes selectable from the status text.
pub const STATUS_SCHEMES: usize = 4;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Theme {
    pub font: String,
    pub focused_border: String,
    pub normal_border: String,
    pub selected: ColorPair,
    pub normal: ColorPair,
    pub status: [ColorPair; STATUS_SCHEMES],
}

pub trait Config {
    fn create_list_of_tag_labels(&self) -> Vec<String>;

    fn rules(&self) -> Vec<Rule>;

    fn layouts(&self) -> Vec<Layout>;

    fn mfact(&self) -> f32;

    fn nmaster(&self) -> i32;

    /// Respect size hints for tiled clients too.
    fn resize_hints(&self) -> bool;

    fn border_width(&self) -> i32;

    /// Inset of clients in the gap layout.
    fn padding(&self) -> i32;

    /// Distance at which dragged windows snap to the screen edges.
    fn snap(&self) -> i32;

    /// Count borders and gaps between neighbours once instead of twice.
    fn single_gap(&self) -> bool;

    fn show_bar(&self) -> bool;

    fn top_bar(&self) -> bool;

    fn theme(&self) -> Theme;

    fn keybinds(&self) -> Vec<Keybind>;

    fn mousebinds(&self) -> Vec<Mousebind>;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[allow(clippy::module_name_repetitions, clippy::struct_excessive_bools)]
    pub struct TestConfig {
        pub tags: Vec<String>,
        pub rules: Vec<Rule>,
        pub layouts: Vec<Layout>,
        pub border_width: i32,
        pub padding: i32,
        pub snap: i32,
        pub single_gap: bool,
        pub resize_hints: bool,
        pub keybinds: Vec<Keybind>,
        pub mousebinds: Vec<Mousebind>,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                tags: vec![],
                rules: vec![],
                layouts: Layout::defaults(),
                border_width: 1,
                padding: 10,
                snap: 10,
                single_gap: true,
                resize_hints: false,
                keybinds: vec![],
                mousebinds: vec![
                    Mousebind {
                        click: Click::ClientWin,
                        modmask: ModMask::Super,
                        button: Button::Button1,
                        command: Command::MoveMouse,
                    },
                    Mousebind {
                        click: Click::ClientWin,
                        modmask: ModMask::Super,
                        button: Button::Button3,
                        command: Command::ResizeMouse,
                    },
                    Mousebind {
                        click: Click::TagBar,
                        modmask: ModMask::Zero,
                        button: Button::Button1,
                        command: Command::View(crate::models::TagMask::EMPTY),
                    },
                    Mousebind {
                        click: Click::LtSymbol,
                        modmask: ModMask::Zero,
                        button: Button::Button1,
                        command: Command::SetLayout(None),
                    },
                ],
            }
        }
    }

    impl Config for TestConfig {
        fn create_list_of_tag_labels(&self) -> Vec<String> {
            self.tags.clone()
        }
        fn rules(&self) -> Vec<Rule> {
            self.rules.clone()
        }
        fn layouts(&self) -> Vec<Layout> {
            self.layouts.clone()
        }
        fn mfact(&self) -> f32 {
            0.55
        }
        fn nmaster(&self) -> i32 {
            1
        }
        fn resize_hints(&self) -> bool {
            self.resize_hints
        }
        fn border_width(&self) -> i32 {
            self.border_width
        }
        fn padding(&self) -> i32 {
            self.padding
        }
        fn snap(&self) -> i32 {
            self.snap
        }
        fn single_gap(&self) -> bool {
            self.single_gap
        }
        fn show_bar(&self) -> bool {
            true
        }
        fn top_bar(&self) -> bool {
            true
        }
        fn theme(&self) -> Theme {
            Theme::default()
        }
        fn keybinds(&self) -> Vec<Keybind> {
            self.keybinds.clone()
        }
        fn mousebinds(&self) -> Vec<Mousebind> {
            self.mousebinds.clone()
        }
    }
}

#[cfg(test)]
pub(crate) use tests::TestConfig;
