// src/ui/panel.rs
//! Overlay panels for the floor plan
//!
//! The control panel is described by [`control_buttons`], a pure function of
//! the display state. The imgui functions below only draw that description and
//! report which buttons were clicked this frame.

use imgui::{Condition, StyleColor};

use crate::{
    config,
    floorplan::{ControlAction, DisplayState, FloorColor, WallColor},
};

pub const HINT: &str = "Interaktive 3D-Visualisierung | Rotieren mit Maus | Zoom mit Mausrad";
pub const ROOMS_HEADING: &str = "Räume";
pub const ROOMS: [&str; 4] = [
    "Wohnzimmer mit Sofa & TV",
    "Schlafzimmer mit Bett",
    "Küche modern ausgestattet",
    "Badezimmer mit Badewanne",
];
pub const CONTROLS_HEADING: &str = "Steuerung & Anpassungen";

const MARGIN: f32 = 20.0;
const ACTIVE_BUTTON: [f32; 4] = [0.23, 0.51, 0.96, 1.0];
const ACTIVE_BUTTON_HOVERED: [f32; 4] = [0.15, 0.39, 0.92, 1.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlButton {
    pub label: &'static str,
    pub action: ControlAction,
    pub active: bool,
}

/// Label toggle first, then the floor colours, then the wall colours
pub fn control_buttons(state: &DisplayState) -> Vec<ControlButton> {
    let toggle_label = if state.labels_visible {
        "Labels ausblenden"
    } else {
        "Labels einblenden"
    };

    std::iter::once((toggle_label, ControlAction::ToggleLabels))
        .chain(
            FloorColor::ALL
                .into_iter()
                .map(|color| (color.label(), ControlAction::SetFloorColor(color))),
        )
        .chain(
            WallColor::ALL
                .into_iter()
                .map(|color| (color.label(), ControlAction::SetWallColor(color))),
        )
        .map(|(label, action)| ControlButton {
            label,
            action,
            active: action.is_active(state),
        })
        .collect()
}

/// Draws all three overlays; returns the actions clicked this frame
pub fn floorplan_overlay(ui: &imgui::Ui, state: &DisplayState) -> Vec<ControlAction> {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return Vec::new();
    }

    title_panel(ui);
    rooms_panel(ui, display_size);
    controls_panel(ui, state, display_size)
}

fn title_panel(ui: &imgui::Ui) {
    ui.window("##title")
        .position([MARGIN, MARGIN], Condition::Always)
        .title_bar(false)
        .always_auto_resize(true)
        .movable(false)
        .build(|| {
            ui.text(config::TITLE);
            ui.text_disabled(HINT);
        });
}

fn rooms_panel(ui: &imgui::Ui, display_size: [f32; 2]) {
    ui.window("##rooms")
        .position(
            [MARGIN, display_size[1] - MARGIN],
            Condition::Always,
        )
        .position_pivot([0.0, 1.0])
        .title_bar(false)
        .always_auto_resize(true)
        .movable(false)
        .build(|| {
            ui.text(ROOMS_HEADING);
            ui.separator();
            for room in ROOMS {
                ui.bullet_text(room);
            }
        });
}

fn controls_panel(
    ui: &imgui::Ui,
    state: &DisplayState,
    display_size: [f32; 2],
) -> Vec<ControlAction> {
    let mut clicked = Vec::new();

    ui.window("##controls")
        .position([display_size[0] - MARGIN, MARGIN], Condition::Always)
        .position_pivot([1.0, 0.0])
        .title_bar(false)
        .always_auto_resize(true)
        .movable(false)
        .build(|| {
            ui.text(CONTROLS_HEADING);
            ui.separator();
            ui.spacing();

            for (i, button) in control_buttons(state).iter().enumerate() {
                // toggle, floors, walls each get their own row
                if i == 1 || i == 4 {
                    ui.spacing();
                } else if i > 0 {
                    ui.same_line();
                }

                let styles = button.active.then(|| {
                    (
                        ui.push_style_color(StyleColor::Button, ACTIVE_BUTTON),
                        ui.push_style_color(StyleColor::ButtonHovered, ACTIVE_BUTTON_HOVERED),
                    )
                });
                if ui.button(button.label) {
                    clicked.push(button.action);
                }
                if let Some((base, hovered)) = styles {
                    hovered.pop();
                    base.pop();
                }
            }
        });

    clicked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floorplan::SceneController;

    #[test]
    fn test_default_panel() {
        let buttons = control_buttons(&DisplayState::default());
        let labels: Vec<_> = buttons.iter().map(|b| b.label).collect();
        assert_eq!(
            labels,
            [
                "Labels ausblenden",
                "Holzboden",
                "Heller Boden",
                "Dunkler Boden",
                "Beige Wände",
                "Weiße Wände",
                "Lila Wände",
            ]
        );
        assert_eq!(buttons[0].action, ControlAction::ToggleLabels);
    }

    #[test]
    fn test_exactly_one_active_per_colour_group() {
        for state in DisplayState::all() {
            let buttons = control_buttons(&state);
            assert_eq!(buttons[1..4].iter().filter(|b| b.active).count(), 1);
            assert_eq!(buttons[4..7].iter().filter(|b| b.active).count(), 1);
            assert_eq!(buttons[0].active, state.labels_visible);
        }
    }

    #[test]
    fn test_toggle_label_follows_visibility() {
        let mut controller = SceneController::default();
        controller.apply(ControlAction::ToggleLabels);
        let buttons = control_buttons(&controller.state());
        assert_eq!(buttons[0].label, "Labels einblenden");
        assert!(!buttons[0].active);
    }

    #[test]
    fn test_clicking_a_button_activates_it() {
        let mut controller = SceneController::default();
        for button in control_buttons(&controller.state()).into_iter().skip(1) {
            controller.apply(button.action);
            let after = control_buttons(&controller.state());
            assert!(after.iter().any(|b| b.action == button.action && b.active));
        }
    }
}
