//! Actions that can be bound to a global shortcut.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Every action the overlay exposes to global shortcuts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ShortcutAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    ToggleVisibility,
    ToggleClickThrough,
    NextStep,
    PreviousResponse,
    NextResponse,
    ScrollUp,
    ScrollDown,
}

impl ShortcutAction {
    pub const ALL: [Self; 11] = [
        Self::MoveUp,
        Self::MoveDown,
        Self::MoveLeft,
        Self::MoveRight,
        Self::ToggleVisibility,
        Self::ToggleClickThrough,
        Self::NextStep,
        Self::PreviousResponse,
        Self::NextResponse,
        Self::ScrollUp,
        Self::ScrollDown,
    ];

    /// Name used by the UI layer and the config file.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MoveUp => "moveUp",
            Self::MoveDown => "moveDown",
            Self::MoveLeft => "moveLeft",
            Self::MoveRight => "moveRight",
            Self::ToggleVisibility => "toggleVisibility",
            Self::ToggleClickThrough => "toggleClickThrough",
            Self::NextStep => "nextStep",
            Self::PreviousResponse => "previousResponse",
            Self::NextResponse => "nextResponse",
            Self::ScrollUp => "scrollUp",
            Self::ScrollDown => "scrollDown",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.name() == name)
    }

    /// Unit direction `(dx, dy)` for movement actions.
    #[must_use]
    pub const fn direction(self) -> Option<(i32, i32)> {
        match self {
            Self::MoveUp => Some((0, -1)),
            Self::MoveDown => Some((0, 1)),
            Self::MoveLeft => Some((-1, 0)),
            Self::MoveRight => Some((1, 0)),
            _ => None,
        }
    }
}

impl fmt::Display for ShortcutAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}
