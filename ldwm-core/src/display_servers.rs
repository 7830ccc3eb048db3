#[cfg(test)]
pub(crate) mod mock_display_server;

use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::errors::Result;
use crate::models::{Handle, WindowInfo};
use crate::DisplayEvent;

use futures::prelude::*;
use std::pin::Pin;

#[cfg(test)]
pub use self::mock_display_server::MockDisplayServer;

pub trait DisplayServer<H: Handle> {
    /// Connects to the display and takes over window management.
    ///
    /// # Errors
    ///
    /// Fails when the display cannot be opened, another window manager is running or no font
    /// can be loaded.
    fn new(config: &impl Config) -> Result<Self>
    where
        Self: Sized;

    /// Width and height of the screen.
    fn screen_size(&self) -> (i32, i32);

    /// Ascent plus descent of the bar font.
    fn font_height(&self) -> i32;

    /// Rendered width of `text` in the bar font.
    fn text_width(&self, text: &str) -> i32;

    /// Top-level windows that were already mapped, transients last.
    fn scan(&mut self) -> Vec<WindowInfo<H>>;

    fn get_next_events(&mut self) -> Vec<DisplayEvent<H>>;

    fn execute_action(&mut self, _act: DisplayAction<H>) -> Option<DisplayEvent<H>> {
        None
    }

    fn wait_readable(&self) -> Pin<Box<dyn Future<Output = ()>>>;

    fn flush(&self);
}
