//! Display state and the controller that owns it
//!
//! The control panel never mutates the scene directly. It emits
//! [`ControlAction`]s, the [`SceneController`] applies them, and the apartment is
//! recomposed from the resulting [`DisplayState`] snapshot.

use crate::gfx::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FloorColor {
    #[default]
    Wood,
    Light,
    Dark,
}

impl FloorColor {
    pub const ALL: [FloorColor; 3] = [FloorColor::Wood, FloorColor::Light, FloorColor::Dark];

    pub fn color(self) -> Color {
        match self {
            FloorColor::Wood => Color::hex("#D2B48C"),
            FloorColor::Light => Color::hex("#E8E8E8"),
            FloorColor::Dark => Color::hex("#696969"),
        }
    }

    /// Button caption
    pub fn label(self) -> &'static str {
        match self {
            FloorColor::Wood => "Holzboden",
            FloorColor::Light => "Heller Boden",
            FloorColor::Dark => "Dunkler Boden",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WallColor {
    #[default]
    Beige,
    White,
    Lavender,
}

impl WallColor {
    pub const ALL: [WallColor; 3] = [WallColor::Beige, WallColor::White, WallColor::Lavender];

    pub fn color(self) -> Color {
        match self {
            WallColor::Beige => Color::hex("#F5F5DC"),
            WallColor::White => Color::hex("#FFFFFF"),
            WallColor::Lavender => Color::hex("#E6E6FA"),
        }
    }

    /// Button caption
    pub fn label(self) -> &'static str {
        match self {
            WallColor::Beige => "Beige Wände",
            WallColor::White => "Weiße Wände",
            WallColor::Lavender => "Lila Wände",
        }
    }
}

/// Everything the UI can change. Layout never depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayState {
    pub labels_visible: bool,
    pub floor_color: FloorColor,
    pub wall_color: WallColor,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            labels_visible: true,
            floor_color: FloorColor::default(),
            wall_color: WallColor::default(),
        }
    }
}

impl DisplayState {
    /// Every reachable state, for exhaustive checks
    pub fn all() -> impl Iterator<Item = DisplayState> {
        [true, false].into_iter().flat_map(|labels_visible| {
            FloorColor::ALL.into_iter().flat_map(move |floor_color| {
                WallColor::ALL.into_iter().map(move |wall_color| DisplayState {
                    labels_visible,
                    floor_color,
                    wall_color,
                })
            })
        })
    }
}

/// One button press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    ToggleLabels,
    SetFloorColor(FloorColor),
    SetWallColor(WallColor),
}

impl ControlAction {
    /// Whether this action's value is the current one, for button highlighting
    pub fn is_active(self, state: &DisplayState) -> bool {
        match self {
            ControlAction::ToggleLabels => state.labels_visible,
            ControlAction::SetFloorColor(color) => state.floor_color == color,
            ControlAction::SetWallColor(color) => state.wall_color == color,
        }
    }
}

/// Sole owner of the [`DisplayState`]
#[derive(Debug, Clone, Default)]
pub struct SceneController {
    state: DisplayState,
}

impl SceneController {
    pub fn new(state: DisplayState) -> Self {
        Self { state }
    }

    /// Immutable snapshot for composition
    pub fn state(&self) -> DisplayState {
        self.state
    }

    /// Applies an action; returns whether the state changed
    pub fn apply(&mut self, action: ControlAction) -> bool {
        let before = self.state;
        match action {
            ControlAction::ToggleLabels => self.state.labels_visible = !self.state.labels_visible,
            ControlAction::SetFloorColor(color) => self.state.floor_color = color,
            ControlAction::SetWallColor(color) => self.state.wall_color = color,
        }

        let changed = before != self.state;
        if changed {
            log::info!("display state changed by {:?}: {:?}", action, self.state);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = DisplayState::default();
        assert!(state.labels_visible);
        assert_eq!(state.floor_color.color(), Color::hex("#D2B48C"));
        assert_eq!(state.wall_color.color(), Color::hex("#F5F5DC"));
    }

    #[test]
    fn test_floor_colour_is_set_not_cycled() {
        for start in DisplayState::all() {
            for color in FloorColor::ALL {
                let mut controller = SceneController::new(start);
                let changed = controller.apply(ControlAction::SetFloorColor(color));
                let after = controller.state();

                assert_eq!(after.floor_color, color);
                assert_eq!(after.wall_color, start.wall_color);
                assert_eq!(after.labels_visible, start.labels_visible);
                assert_eq!(changed, start.floor_color != color);
            }
        }
    }

    #[test]
    fn test_wall_colour_is_set_not_cycled() {
        for start in DisplayState::all() {
            for color in WallColor::ALL {
                let mut controller = SceneController::new(start);
                controller.apply(ControlAction::SetWallColor(color));
                let after = controller.state();

                assert_eq!(after.wall_color, color);
                assert_eq!(after.floor_color, start.floor_color);
                assert_eq!(after.labels_visible, start.labels_visible);
            }
        }
    }

    #[test]
    fn test_toggle_twice_restores_labels() {
        for start in DisplayState::all() {
            let mut controller = SceneController::new(start);
            assert!(controller.apply(ControlAction::ToggleLabels));
            assert_eq!(controller.state().labels_visible, !start.labels_visible);
            assert!(controller.apply(ControlAction::ToggleLabels));
            assert_eq!(controller.state(), start);
        }
    }

    #[test]
    fn test_state_space_has_eighteen_states() {
        assert_eq!(DisplayState::all().count(), 18);
    }

    #[test]
    fn test_active_marks_current_value_only() {
        let state = DisplayState {
            labels_visible: false,
            floor_color: FloorColor::Dark,
            wall_color: WallColor::White,
        };
        assert!(!ControlAction::ToggleLabels.is_active(&state));
        assert!(ControlAction::SetFloorColor(FloorColor::Dark).is_active(&state));
        assert!(!ControlAction::SetFloorColor(FloorColor::Wood).is_active(&state));
        assert!(ControlAction::SetWallColor(WallColor::White).is_active(&state));
        assert!(!ControlAction::SetWallColor(WallColor::Lavender).is_active(&state));
    }
}
