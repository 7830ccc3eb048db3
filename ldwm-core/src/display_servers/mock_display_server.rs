use super::Config;
use super::DisplayEvent;
use super::DisplayServer;
use crate::display_action::DisplayAction;
use crate::errors::Result;
use crate::models::{Handle, WindowInfo};

/// Width of every character in the mock font.
pub const CHAR_WIDTH: i32 = 8;
pub const FONT_HEIGHT: i32 = 16;

/// Records actions and replays queued events.
#[derive(Clone, Debug, Default)]
pub struct MockDisplayServer<H: Handle> {
    pub events: Vec<DisplayEvent<H>>,
    pub executed: Vec<DisplayAction<H>>,
    pub existing: Vec<WindowInfo<H>>,
    /// Refuse pointer grabs.
    pub grab_fails: bool,
}

impl<H: Handle> DisplayServer<H> for MockDisplayServer<H> {
    fn new(_: &impl Config) -> Result<Self> {
        Ok(Self {
            events: vec![],
            executed: vec![],
            existing: vec![],
            grab_fails: false,
        })
    }

    fn screen_size(&self) -> (i32, i32) {
        (1920, 1080)
    }

    fn font_height(&self) -> i32 {
        FONT_HEIGHT
    }

    fn text_width(&self, text: &str) -> i32 {
        text.chars().count() as i32 * CHAR_WIDTH
    }

    fn scan(&mut self) -> Vec<WindowInfo<H>> {
        std::mem::take(&mut self.existing)
    }

    fn get_next_events(&mut self) -> Vec<DisplayEvent<H>> {
        std::mem::take(&mut self.events)
    }

    fn execute_action(&mut self, act: DisplayAction<H>) -> Option<DisplayEvent<H>> {
        let reply = match act {
            DisplayAction::GrabPointer(_) if self.grab_fails => {
                Some(DisplayEvent::ChangeToNormalMode)
            }
            _ => None,
        };
        self.executed.push(act);
        reply
    }

    fn wait_readable(&self) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()>>> {
        Box::pin(futures::future::ready(()))
    }

    fn flush(&self) {}
}
