mod arrange_handler;
mod command_handler;
pub mod display_event_handler;
mod focus_handler;
mod goto_tag_handler;
mod mouse_combo_handler;
mod screen_resize_handler;
mod window_handler;
mod window_move_handler;
mod window_resize_handler;

use super::command::Command;
use super::config::Config;
use super::models::{ClientId, Handle, Manager, Mode, WindowHandle, Xyhw};
use super::DisplayEvent;
