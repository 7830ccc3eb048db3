//! Managed client information.
use super::{ClientId, SizeHints, TagMask, Xyhw};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Title used for clients that do not provide one.
pub const BROKEN: &str = "broken";
/// Longest title kept for a client, in bytes.
const MAX_TITLE_LEN: usize = 255;

/// A trait which backend specific window handles need to implement
pub trait Handle:
    Serialize + DeserializeOwned + Debug + Clone + Copy + PartialEq + Eq + Default + Send + 'static
{
}

/// A Backend-agnostic handle to a window used to identify it
///
/// # Serde
///
/// Using generics here with serde derive macros needs `#[serde(bound = "")]` wherever the
/// generic is declared, see <https://github.com/serde-rs/serde/issues/1296>.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowHandle<H>(#[serde(bound = "")] pub H)
where
    H: Handle;

/// Handle for testing purposes
#[cfg(test)]
pub type MockHandle = i32;
#[cfg(test)]
impl Handle for MockHandle {}

/// A managed top-level window.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone)]
pub struct Client<H: Handle> {
    pub handle: WindowHandle<H>,
    pub name: String,
    pub geometry: Xyhw,
    /// Geometry before the last resize, restored when leaving fullscreen.
    pub old_geometry: Xyhw,
    pub border: i32,
    pub old_border: i32,
    pub hints: SizeHints,
    pub tags: TagMask,
    pub is_fixed: bool,
    pub is_floating: bool,
    pub is_urgent: bool,
    pub never_focus: bool,
    pub is_fullscreen: bool,
    /// Floating state saved while fullscreen.
    pub old_state: bool,
    pub(crate) next: Option<ClientId>,
    pub(crate) snext: Option<ClientId>,
}

impl<H: Handle> Client<H> {
    #[must_use]
    pub fn new(handle: WindowHandle<H>) -> Self {
        Self {
            handle,
            name: BROKEN.to_owned(),
            geometry: Xyhw::default(),
            old_geometry: Xyhw::default(),
            border: 0,
            old_border: 0,
            hints: SizeHints::default(),
            tags: TagMask::single(0),
            is_fixed: false,
            is_floating: false,
            is_urgent: false,
            never_focus: false,
            is_fullscreen: false,
            old_state: false,
            next: None,
            snext: None,
        }
    }

    /// Sets the title, truncated on a character boundary. Empty titles become [`BROKEN`].
    pub fn set_title(&mut self, title: Option<&str>) {
        let title = title.unwrap_or_default();
        if title.is_empty() {
            self.name = BROKEN.to_owned();
            return;
        }
        let mut end = title.len().min(MAX_TITLE_LEN);
        while !title.is_char_boundary(end) {
            end -= 1;
        }
        self.name = title[..end].to_owned();
    }

    pub fn set_size_hints(&mut self, hints: SizeHints) {
        self.hints = hints;
        self.is_fixed = hints.is_fixed();
    }

    /// Width including both borders.
    pub const fn width(&self) -> i32 {
        self.geometry.w + 2 * self.border
    }

    /// Height including both borders.
    pub const fn height(&self) -> i32 {
        self.geometry.h + 2 * self.border
    }

    pub const fn is_visible(&self, tagset: TagMask) -> bool {
        self.tags.intersects(tagset)
    }

    pub fn tag(&mut self, tags: TagMask) {
        if !tags.is_empty() {
            self.tags = tags;
        }
    }

    pub fn has_tag(&self, index: usize) -> bool {
        self.tags.contains(index)
    }
}
