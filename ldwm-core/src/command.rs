use crate::layouts::LayoutId;
use crate::models::TagMask;
use serde::{Deserialize, Serialize};

/// What a key or button binding does.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub enum Command {
    /// Run a shell command.
    Spawn(String),
    /// Focus the next (positive) or previous (negative) visible client.
    FocusStack(i32),
    IncNMaster(i32),
    /// Below 1.0 adjusts the master factor, from 1.0 up sets it to `value - 1.0`.
    SetMFact(f32),
    /// Move the selected client to the master slot, or swap it with the next tiled one.
    Zoom,
    /// Show the given tags. Empty returns to the previous view.
    View(TagMask),
    ToggleView(TagMask),
    /// Move the selected client to the given tags.
    Tag(TagMask),
    ToggleTag(TagMask),
    KillClient,
    /// Select a layout, or flip to the alternate one with `None`.
    SetLayout(Option<LayoutId>),
    ToggleFloating,
    ToggleBar,
    MoveMouse,
    ResizeMouse,
    Quit,
}

impl Command {
    /// Fills an empty tag argument with `mask`. Used for clicks on a tag cell.
    #[must_use]
    pub fn with_clicked_tag(self, mask: TagMask) -> Self {
        match self {
            Self::View(m) if m.is_empty() => Self::View(mask),
            Self::ToggleView(m) if m.is_empty() => Self::ToggleView(mask),
            Self::Tag(m) if m.is_empty() => Self::Tag(mask),
            Self::ToggleTag(m) if m.is_empty() => Self::ToggleTag(mask),
            other => other,
        }
    }
}
