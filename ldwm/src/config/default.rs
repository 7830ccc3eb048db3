use super::{Config, Keybind, Modifier, Mousebind, WindowRule, MODKEY};
use crate::BaseCommand;
use ldwm_core::bar::Click;
use ldwm_core::config::{ColorPair, Theme};
use ldwm_core::layouts::Layout;

const FONT: &str = "-*-terminus-medium-r-*-*-16-*-*-*-*-*-*-*";
const TERMINAL: &str = "urxvt";
/// Number of tags that get the default view and tag keys, bound to the digit keys.
const TAG_KEYS: usize = 9;

fn theme() -> Theme {
    Theme {
        font: FONT.to_owned(),
        focused_border: "#696969".to_owned(),
        normal_border: "#212121".to_owned(),
        selected: ColorPair::new("#696969", "#121212"),
        normal: ColorPair::new("#eeeeee", "#121212"),
        status: [
            ColorPair::new("#363636", "#121212"),
            ColorPair::new("#eeeeee", "#363636"),
            ColorPair::new("#121212", "#363636"),
            ColorPair::new("#eeeeee", "#121212"),
        ],
    }
}

fn dmenu(theme: &Theme) -> String {
    format!(
        "dmenu_run -fn '{}' -nb '{}' -nf '{}' -sb '{}' -sf '{}'",
        theme.font,
        theme.status[0].background,
        theme.status[0].foreground,
        theme.status[1].background,
        theme.status[1].foreground,
    )
}

fn key(modifier: Vec<&str>, key: &str, command: BaseCommand, value: &str) -> Keybind {
    Keybind {
        command,
        value: value.to_owned(),
        modifier: Some(Modifier::from(modifier)),
        key: key.to_owned(),
    }
}

fn button(
    click: Click,
    modifier: Option<Modifier>,
    button: &str,
    command: BaseCommand,
    value: &str,
) -> Mousebind {
    Mousebind {
        click,
        command,
        value: value.to_owned(),
        modifier,
        button: button.to_owned(),
    }
}

impl Default for Config {
    // We allow this because the binding table reads best as one list.
    #[allow(clippy::too_many_lines)]
    fn default() -> Self {
        let theme = theme();
        let tags: Vec<String> = ["1", "2", "3"].iter().map(|&t| t.to_owned()).collect();

        let mut keybind = vec![
            key(vec![MODKEY], "r", BaseCommand::Execute, &dmenu(&theme)),
            key(vec![MODKEY], "Return", BaseCommand::Execute, TERMINAL),
            key(vec![MODKEY], "b", BaseCommand::ToggleBar, ""),
            key(vec![MODKEY], "j", BaseCommand::FocusStack, "1"),
            key(vec![MODKEY], "k", BaseCommand::FocusStack, "-1"),
            key(vec![MODKEY], "i", BaseCommand::IncNMaster, "1"),
            key(vec![MODKEY], "d", BaseCommand::IncNMaster, "-1"),
            key(vec![MODKEY], "h", BaseCommand::SetMFact, "-0.05"),
            key(vec![MODKEY], "l", BaseCommand::SetMFact, "0.05"),
            key(vec![MODKEY, "Shift"], "Return", BaseCommand::Zoom, ""),
            // Back to the previous view.
            key(vec![MODKEY], "Tab", BaseCommand::View, ""),
            key(vec![MODKEY, "Shift"], "c", BaseCommand::KillClient, ""),
            key(vec![MODKEY], "t", BaseCommand::SetLayout, "0"),
            key(vec![MODKEY, "Shift"], "t", BaseCommand::SetLayout, "1"),
            key(vec![MODKEY], "f", BaseCommand::SetLayout, "2"),
            key(vec![MODKEY], "m", BaseCommand::SetLayout, "3"),
            key(vec![MODKEY], "space", BaseCommand::SetLayout, ""),
            key(vec![MODKEY, "Shift"], "space", BaseCommand::ToggleFloating, ""),
            key(vec![MODKEY], "0", BaseCommand::View, "all"),
            key(vec![MODKEY, "Shift"], "0", BaseCommand::Tag, "all"),
        ];

        for number in (1..=tags.len().min(TAG_KEYS)).map(|n| n.to_string()) {
            keybind.push(key(vec![MODKEY], &number, BaseCommand::View, &number));
            keybind.push(key(vec![MODKEY, "Control"], &number, BaseCommand::ToggleView, &number));
            keybind.push(key(vec![MODKEY, "Shift"], &number, BaseCommand::Tag, &number));
            keybind.push(key(
                vec![MODKEY, "Control", "Shift"],
                &number,
                BaseCommand::ToggleTag,
                &number,
            ));
        }

        keybind.push(key(vec![MODKEY, "Shift"], "q", BaseCommand::Quit, ""));

        let modkey = || Some(Modifier::from(MODKEY));
        let mousebind = vec![
            button(Click::LtSymbol, None, "1", BaseCommand::SetLayout, ""),
            button(Click::LtSymbol, None, "3", BaseCommand::SetLayout, "2"),
            button(Click::WinTitle, None, "2", BaseCommand::Zoom, ""),
            button(Click::StatusText, None, "2", BaseCommand::Execute, TERMINAL),
            button(Click::ClientWin, modkey(), "1", BaseCommand::MoveMouse, ""),
            button(Click::ClientWin, modkey(), "2", BaseCommand::ToggleFloating, ""),
            button(Click::ClientWin, modkey(), "3", BaseCommand::ResizeMouse, ""),
            // An empty tag value stands for the clicked tag.
            button(Click::TagBar, None, "1", BaseCommand::View, ""),
            button(Click::TagBar, None, "3", BaseCommand::ToggleView, ""),
            button(Click::TagBar, modkey(), "1", BaseCommand::Tag, ""),
            button(Click::TagBar, modkey(), "3", BaseCommand::ToggleTag, ""),
        ];

        Self {
            modkey: "Mod4".to_owned(),
            tags,
            mfact: 0.55,
            nmaster: 1,
            resize_hints: false,
            border_width: 1,
            padding: 10,
            snap: 10,
            single_gap: true,
            show_bar: true,
            top_bar: true,
            layouts: Layout::defaults(),
            window_rules: vec![WindowRule {
                class: Some("Firefox".to_owned()),
                tags: vec![2],
                floating: true,
                ..WindowRule::default()
            }],
            theme,
            keybind,
            mousebind,
        }
    }
}
