//! Target window geometry per view and layout mode.
//!
//! The UI layer reports which view it is showing and whether it runs in the
//! compact or normal layout; this module maps that pair to the window size
//! the overlay should animate to.

use serde::{Deserialize, Serialize};

use crate::window::Size;

/// Layout density reported by the UI layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutMode {
    Compact,
    #[default]
    Normal,
}

impl LayoutMode {
    /// Parses the layout name reported by the UI. Anything other than
    /// `compact` is treated as the normal layout.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("compact") { Self::Compact } else { Self::Normal }
    }

    #[must_use]
    pub const fn is_compact(self) -> bool { matches!(self, Self::Compact) }

    /// Size used by views without a dedicated height.
    #[must_use]
    pub const fn base_size(self) -> Size {
        match self {
            Self::Compact => Size::new(600, 250),
            Self::Normal => Size::new(750, 350),
        }
    }
}

/// Heights for views taller than the base size, as `(compact, normal)`.
const VIEW_HEIGHTS: &[(&str, (u32, u32))] = &[
    ("customize", (400, 500)),
    ("settings", (400, 500)),
    ("help", (350, 450)),
    ("history", (350, 450)),
    ("advanced", (300, 400)),
];

/// Computes the window size for a view in the given layout.
///
/// Unknown views, as well as `main`, `assistant` and `onboarding`, use the
/// layout's base size. Width never depends on the view.
#[must_use]
pub fn compute_target_size(view: &str, layout: LayoutMode) -> Size {
    let base = layout.base_size();

    VIEW_HEIGHTS
        .iter()
        .find(|(name, _)| *name == view)
        .map_or(base, |(_, (compact, normal))| {
            let height = if layout.is_compact() { *compact } else { *normal };
            Size::new(base.width, height)
        })
}
