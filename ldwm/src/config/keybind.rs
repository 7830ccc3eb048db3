use super::Config;
use crate::BaseCommand;
use anyhow::{bail, ensure, Context, Result};
use ldwm_core::bar::Click;
use ldwm_core::layouts::Arrangement;
use ldwm_core::models::{TagMask, MAX_TAGS};
use ldwm_core::utils::modmask_lookup::{into_button, into_mod, Button, ModMask};
use ldwm_core::Command;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Name used in a modifier list for the configured `modkey`.
pub const MODKEY: &str = "modkey";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    pub command: BaseCommand,
    #[serde(default)]
    pub value: String,
    pub modifier: Option<Modifier>,
    pub key: String,
}

impl Keybind {
    /// # Errors
    ///
    /// Fails when the key is empty, a modifier is unknown or the value does not fit the command.
    pub fn try_convert_to_core_keybind(&self, config: &Config) -> Result<ldwm_core::Keybind> {
        ensure!(!self.key.is_empty(), "key must not be empty");
        Ok(ldwm_core::Keybind {
            modmask: modmask(self.modifier.as_ref(), &config.modkey)?,
            key: self.key.clone(),
            command: to_core_command(self.command, &self.value, config)?,
        })
    }
}

/// A button binding on one of the clickable regions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Mousebind {
    pub click: Click,
    pub command: BaseCommand,
    #[serde(default)]
    pub value: String,
    pub modifier: Option<Modifier>,
    /// `Button1` to `Button5`, or just the number.
    pub button: String,
}

impl Mousebind {
    /// # Errors
    ///
    /// Fails when the button or a modifier is unknown, or the value does not fit the command.
    pub fn try_convert_to_core_mousebind(&self, config: &Config) -> Result<ldwm_core::Mousebind> {
        let button = into_button(&self.button);
        ensure!(button != Button::Zero, "button `{}` is not valid", self.button);
        Ok(ldwm_core::Mousebind {
            click: self.click,
            modmask: modmask(self.modifier.as_ref(), &config.modkey)?,
            button,
            command: to_core_command(self.command, &self.value, config)?,
        })
    }
}

fn modmask(modifier: Option<&Modifier>, modkey: &str) -> Result<ModMask> {
    let mut mask = ModMask::Zero;
    for name in modifier.into_iter().flatten() {
        let resolved = if name == MODKEY { modkey } else { name.as_str() };
        if resolved == "None" {
            continue;
        }
        let bit = into_mod(resolved);
        ensure!(bit != ModMask::Zero, "modifier `{resolved}` is not valid");
        mask |= bit;
    }
    Ok(mask)
}

fn to_core_command(command: BaseCommand, value: &str, config: &Config) -> Result<Command> {
    if !command.takes_value() {
        ensure!(value.is_empty(), "{command:?} does not take a value");
    }
    Ok(match command {
        BaseCommand::Execute => {
            ensure!(!value.is_empty(), "value must not be empty");
            Command::Spawn(value.to_owned())
        }
        BaseCommand::FocusStack => {
            Command::FocusStack(i32::from_str(value).context("invalid direction for FocusStack")?)
        }
        BaseCommand::IncNMaster => {
            Command::IncNMaster(i32::from_str(value).context("invalid count for IncNMaster")?)
        }
        BaseCommand::SetMFact => {
            Command::SetMFact(f32::from_str(value).context("invalid factor for SetMFact")?)
        }
        BaseCommand::View => Command::View(tag_mask(value, config)?),
        BaseCommand::ToggleView => Command::ToggleView(tag_mask(value, config)?),
        BaseCommand::Tag => Command::Tag(tag_mask(value, config)?),
        BaseCommand::ToggleTag => Command::ToggleTag(tag_mask(value, config)?),
        BaseCommand::SetLayout => Command::SetLayout(layout_id(value, config)?),
        BaseCommand::Zoom => Command::Zoom,
        BaseCommand::KillClient => Command::KillClient,
        BaseCommand::ToggleFloating => Command::ToggleFloating,
        BaseCommand::ToggleBar => Command::ToggleBar,
        BaseCommand::MoveMouse => Command::MoveMouse,
        BaseCommand::ResizeMouse => Command::ResizeMouse,
        BaseCommand::Quit => Command::Quit,
    })
}

/// Tags are numbered from 1. Empty or `0` means "no tag given", `all` selects every tag.
fn tag_mask(value: &str, config: &Config) -> Result<TagMask> {
    match value {
        "" | "0" => Ok(TagMask::EMPTY),
        "all" => Ok(TagMask::ALL),
        number => {
            let tag = usize::from_str(number).context("invalid tag number")?;
            let tag_count = config.tags.len().min(MAX_TAGS);
            ensure!(
                (1..=tag_count).contains(&tag),
                "tag {tag} does not exist, there are {tag_count} tags"
            );
            Ok(TagMask::single(tag - 1))
        }
    }
}

/// A layout is picked by its position in `layouts` or by the name of its arrangement. Empty
/// flips to the previous layout.
fn layout_id(value: &str, config: &Config) -> Result<Option<usize>> {
    if value.is_empty() {
        return Ok(None);
    }
    if let Ok(index) = usize::from_str(value) {
        ensure!(index < config.layouts.len(), "there is no layout {index}");
        return Ok(Some(index));
    }
    let arrangement =
        Arrangement::from_str(value).context("could not parse layout for command SetLayout")?;
    match config
        .layouts
        .iter()
        .position(|layout| layout.arrangement == arrangement)
    {
        Some(index) => Ok(Some(index)),
        None => bail!("no configured layout uses `{value}`"),
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
#[serde(untagged)]
pub enum Modifier {
    Single(String),
    List(Vec<String>),
}

impl Modifier {
    pub fn sort_unstable(&mut self) {
        match self {
            Self::Single(_) => {}
            Self::List(modifiers) => modifiers.sort_unstable(),
        }
    }
}

impl IntoIterator for &Modifier {
    type Item = String;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        let ms = match self {
            Modifier::Single(m) => vec![m.clone()],
            Modifier::List(ms) => ms.clone(),
        };
        ms.into_iter()
    }
}

impl From<Vec<&str>> for Modifier {
    fn from(l: Vec<&str>) -> Self {
        Self::List(l.into_iter().map(str::to_owned).collect())
    }
}

impl From<&str> for Modifier {
    fn from(m: &str) -> Self {
        Self::Single(m.to_owned())
    }
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(modifier) => write!(f, "{modifier}"),
            Self::List(modifiers) => write!(f, "{}", modifiers.join("+")),
        }
    }
}
