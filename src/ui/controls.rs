/// Adjustment controls: sliders, flip toggles, presets, and reset
///
/// Everything here only mutates state through messages; the widget tree is
/// rebuilt from the edit state on every view call.

use iced::widget::{button, checkbox, column, horizontal_space, row, slider, text, Column, Row};
use iced::{Alignment, Element};

use crate::state::edit::{Adjustment, Axis, EditState};
use crate::state::preset::Preset;
use crate::style::format_value;
use crate::Message;

/// The full controls panel, rendered only while an image is loaded
pub fn view(edit: &EditState) -> Element<'_, Message> {
    let header = row![
        text("Image Controls").size(20),
        horizontal_space(),
        button("Reset All").on_press(Message::ResetFilters).padding(8),
    ]
    .align_y(Alignment::Center);

    let mut sliders = Column::new().spacing(16);
    for adjustment in Adjustment::ALL {
        sliders = sliders.push(labeled_slider(edit, adjustment));
    }

    let flips = row![
        checkbox("Flip X", edit.flip_x)
            .on_toggle(|enabled| Message::FlipToggled(Axis::X, enabled)),
        checkbox("Flip Y", edit.flip_y)
            .on_toggle(|enabled| Message::FlipToggled(Axis::Y, enabled)),
    ]
    .spacing(24);

    let mut presets = Row::new().spacing(10);
    for preset in Preset::ALL {
        presets = presets.push(
            button(preset.label())
                .on_press(Message::ApplyPreset(preset))
                .padding(8),
        );
    }

    column![
        header,
        sliders,
        flips,
        text("Quick Presets").size(16),
        presets,
    ]
    .spacing(20)
    .into()
}

/// One slider with its live value label, e.g. "Brightness: 150%"
fn labeled_slider(edit: &EditState, adjustment: Adjustment) -> Element<'static, Message> {
    let value = edit.adjustment(adjustment);

    column![
        text(format!(
            "{}: {}{}",
            adjustment.label(),
            format_value(value),
            adjustment.unit()
        ))
        .size(14),
        slider(adjustment.range(), value, move |new_value| {
            Message::AdjustmentChanged(adjustment, new_value)
        })
        .step(adjustment.step()),
    ]
    .spacing(6)
    .into()
}
