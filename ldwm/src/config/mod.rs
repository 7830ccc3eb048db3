//! `ldwm` general configuration

mod checks;
mod default;
mod keybind;

pub use self::keybind::{Keybind, Modifier, Mousebind, MODKEY};

use anyhow::{Context, Result};
use ldwm_core::config::Theme;
use ldwm_core::layouts::Layout;
use ldwm_core::models::{Rule, TagMask, MAX_TAGS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use xdg::BaseDirectories;

/// Selecting by `WM_CLASS` and/or window title, allow the user to define on which tags a window
/// should spawn and whether it floats.
///
/// # Example
///
/// In `config.toml`
///
/// ```toml
/// [[window_rules]]
/// class = "Gimp"
/// tags = [2]
/// floating = true
/// ```
///
/// windows whose class contains "Gimp" will spawn on tag 2 (1-indexed) and float.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct WindowRule {
    pub class: Option<String>,
    pub instance: Option<String>,
    pub title: Option<String>,
    /// Empty keeps the tags that are in view.
    #[serde(default)]
    pub tags: Vec<usize>,
    #[serde(default)]
    pub floating: bool,
}

impl WindowRule {
    /// # Errors
    ///
    /// Fails when a tag number is outside of the configured tags.
    pub fn try_convert_to_core_rule(&self, tag_count: usize) -> Result<Rule> {
        let tag_count = tag_count.min(MAX_TAGS);
        let mut tags = TagMask::EMPTY;
        for &tag in &self.tags {
            anyhow::ensure!(
                (1..=tag_count).contains(&tag),
                "tag {tag} does not exist, there are {tag_count} tags"
            );
            tags = tags | TagMask::single(tag - 1);
        }
        Ok(Rule {
            class: self.class.clone(),
            instance: self.instance.clone(),
            title: self.title.clone(),
            tags,
            floating: self.floating,
        })
    }
}

/// General configuration
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Modifier that `modkey` stands for in the bindings.
    pub modkey: String,
    pub tags: Vec<String>,
    /// Share of the screen width taken by the master area.
    pub mfact: f32,
    pub nmaster: i32,
    /// Respect size hints for tiled windows too.
    pub resize_hints: bool,
    pub border_width: i32,
    /// Space around windows in the gap layout.
    pub padding: i32,
    pub snap: i32,
    /// Count shared borders and padding between neighbours once.
    pub single_gap: bool,
    pub show_bar: bool,
    pub top_bar: bool,
    pub layouts: Vec<Layout>,
    pub window_rules: Vec<WindowRule>,
    pub theme: Theme,
    pub keybind: Vec<Keybind>,
    pub mousebind: Vec<Mousebind>,
}

/// Loads the configuration, falling back to the defaults when it cannot be read.
#[must_use]
pub fn load() -> Config {
    config_path()
        .and_then(|path| load_from_file(&path))
        .map_err(|err| tracing::error!("Error loading config: {:?}", err))
        .unwrap_or_default()
}

/// Location of `config.toml`, creating its directory when needed.
///
/// # Errors
///
/// Function will throw an error if `BaseDirectories` doesn't exist or if the user doesn't have
/// permissions to create the configuration directory.
pub fn config_path() -> Result<PathBuf> {
    let path = BaseDirectories::with_prefix("ldwm")?;
    let config_filename = path.place_config_file("config.toml")?;
    Ok(config_filename)
}

/// Reads the configuration at `path`. A missing file is written with the defaults.
///
/// # Errors
///
/// Function will throw an error if the file cannot be read (permissions, malformed file, etc.)
/// or the defaults cannot be saved (if it is the first time running `ldwm`).
pub fn load_from_file(path: &Path) -> Result<Config> {
    if path.exists() {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        let config =
            toml::from_str(&contents).with_context(|| format!("could not parse {}", path.display()))?;
        Ok(config)
    } else {
        let config = Config::default();
        let toml = toml::to_string(&config)?;
        fs::write(path, toml).with_context(|| format!("could not write {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote the default configuration");
        Ok(config)
    }
}

impl ldwm_core::Config for Config {
    fn create_list_of_tag_labels(&self) -> Vec<String> {
        self.tags.clone()
    }

    fn rules(&self) -> Vec<Rule> {
        self.window_rules
            .iter()
            .filter_map(|rule| {
                rule.try_convert_to_core_rule(self.tags.len())
                    .map_err(|err| tracing::warn!(?rule, "Skipping window rule: {:#}", err))
                    .ok()
            })
            .collect()
    }

    fn layouts(&self) -> Vec<Layout> {
        self.layouts.clone()
    }

    fn mfact(&self) -> f32 {
        self.mfact
    }

    fn nmaster(&self) -> i32 {
        self.nmaster
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
        self.show_bar
    }

    fn top_bar(&self) -> bool {
        self.top_bar
    }

    fn theme(&self) -> Theme {
        self.theme.clone()
    }

    fn keybinds(&self) -> Vec<ldwm_core::Keybind> {
        self.keybind
            .iter()
            .filter_map(|keybind| {
                keybind
                    .try_convert_to_core_keybind(self)
                    .map_err(|err| tracing::warn!(?keybind, "Skipping keybind: {:#}", err))
                    .ok()
            })
            .collect()
    }

    fn mousebinds(&self) -> Vec<ldwm_core::Mousebind> {
        self.mousebind
            .iter()
            .filter_map(|mousebind| {
                mousebind
                    .try_convert_to_core_mousebind(self)
                    .map_err(|err| tracing::warn!(?mousebind, "Skipping mousebind: {:#}", err))
                    .ok()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BaseCommand;
    use ldwm_core::layouts::Arrangement;
    use ldwm_core::Config as _;

    #[test]
    fn a_missing_file_is_created_from_the_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = load_from_file(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let reloaded = load_from_file(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn unset_fields_take_the_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "modkey = \"Mod1\"\nborder_width = 3\n").unwrap();

        let config = load_from_file(&path).unwrap();
        assert_eq!(config.modkey, "Mod1");
        assert_eq!(config.border_width, 3);
        assert_eq!(config.tags, Config::default().tags);
        assert_eq!(config.keybind, Config::default().keybind);
    }

    #[test]
    fn malformed_files_are_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "mfact = \"wide\"\n").unwrap();
        assert!(load_from_file(&path).is_err());
    }

    #[test]
    fn layouts_and_bindings_parse_from_toml() {
        let config: Config = toml::from_str(
            r#"
            tags = ["www", "dev"]

            [[layouts]]
            symbol = "[M]"
            arrangement = "monocle"

            [[keybind]]
            command = "View"
            value = "2"
            modifier = ["modkey", "Shift"]
            key = "w"
            "#,
        )
        .unwrap();
        assert_eq!(config.layouts(), vec![Layout::new("[M]", Arrangement::Monocle)]);
        let keybinds = config.keybinds();
        assert_eq!(keybinds.len(), 1);
        assert_eq!(keybinds[0].command, ldwm_core::Command::View(TagMask::single(1)));
    }

    #[test]
    fn invalid_bindings_are_skipped() {
        let mut config = Config::default();
        let valid = config.keybinds().len();
        config.keybind.push(Keybind {
            command: BaseCommand::View,
            value: "12".to_owned(),
            modifier: Some(MODKEY.into()),
            key: "F12".to_owned(),
        });
        assert_eq!(config.keybinds().len(), valid);
    }

    #[test]
    fn every_default_binding_converts() {
        let config = Config::default();
        assert_eq!(config.keybinds().len(), config.keybind.len());
        assert_eq!(config.mousebinds().len(), config.mousebind.len());
    }

    #[test]
    fn rules_turn_tag_numbers_into_masks() {
        let rule = WindowRule {
            class: Some("Gimp".to_owned()),
            tags: vec![1, 3],
            floating: true,
            ..WindowRule::default()
        };
        let converted = rule.try_convert_to_core_rule(3).unwrap();
        assert_eq!(converted.tags, TagMask(0b101));
        assert!(converted.floating);
        assert!(rule.try_convert_to_core_rule(2).is_err());
    }

    #[test]
    fn rule_tags_past_the_last_usable_tag_are_rejected() {
        let rule = WindowRule {
            tags: vec![MAX_TAGS + 2],
            ..WindowRule::default()
        };
        assert!(rule.try_convert_to_core_rule(40).is_err());

        let rule = WindowRule {
            tags: vec![MAX_TAGS],
            ..WindowRule::default()
        };
        let converted = rule.try_convert_to_core_rule(40).unwrap();
        assert_eq!(converted.tags, TagMask::single(MAX_TAGS - 1));
    }

    #[test]
    fn the_default_rule_floats_firefox_on_tag_two() {
        let rules = Config::default().rules();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].class.as_deref(), Some("Firefox"));
        assert_eq!(rules[0].tags, TagMask::single(1));
        assert!(rules[0].floating);
    }
}
