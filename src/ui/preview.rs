/// The styled image preview and the no-image hint

use iced::widget::image::{Handle, Image};
use iced::widget::{column, container, text};
use iced::{ContentFit, Element, Length};

use crate::style::ImageStyle;
use crate::Message;

/// Maximum preview height, matching the fixed viewing area of the layout
const PREVIEW_HEIGHT: f32 = 400.0;

/// The preview card: the rendered image plus a readout of the style
/// descriptor currently applied to it
pub fn view<'a>(handle: &Handle, style: &ImageStyle) -> Element<'a, Message> {
    column![
        text("Image Preview").size(20),
        container(
            Image::new(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fixed(PREVIEW_HEIGHT)),
        )
        .width(Length::Fill)
        .center_x(Length::Fill)
        .padding(12),
        text(format!("filter: {}", style.filter)).size(12),
        text(format!("transform: {}", style.transform)).size(12),
    ]
    .spacing(8)
    .into()
}

/// Hint card shown before any image has been uploaded
pub fn empty_state<'a>() -> Element<'a, Message> {
    container(
        text(
            "Upload a manuscript image to view and manipulate it \
             with various filters and transformations.",
        )
        .size(16),
    )
    .width(Length::Fill)
    .center_x(Length::Fill)
    .padding(24)
    .into()
}
