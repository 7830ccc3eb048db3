use serde::{Deserialize, Serialize};

/// Names of the commands a binding in `config.toml` can run.
///
/// TOML cannot express `ldwm_core::Command` with its arguments in a readable way, so bindings
/// carry the command name and a separate `value` that is parsed and checked on conversion.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseCommand {
    Execute,
    FocusStack,
    IncNMaster,
    SetMFact,
    Zoom,
    View,
    ToggleView,
    Tag,
    ToggleTag,
    KillClient,
    SetLayout,
    ToggleFloating,
    ToggleBar,
    MoveMouse,
    ResizeMouse,
    Quit,
}

impl BaseCommand {
    /// Whether the command reads `value`.
    pub const fn takes_value(self) -> bool {
        matches!(
            self,
            Self::Execute
                | Self::FocusStack
                | Self::IncNMaster
                | Self::SetMFact
                | Self::View
                | Self::ToggleView
                | Self::Tag
                | Self::ToggleTag
                | Self::SetLayout
        )
    }
}
