use iced::widget::{Space, button, column, container, image, row, scrollable, text};
use iced::{Alignment, Element, Length};

use super::CANVAS_BG;
use crate::app::{App, Channel, Message};
use crate::widgets;

pub fn view(app: &App) -> Element<'_, Message> {
    let toolbar = row![
        text("Tonal").size(24),
        Space::new().width(Length::Fill),
        button("Open Image...").on_press(Message::OpenImage),
        button("Make Linear").on_press(Message::ResetCurves),
    ]
    .spacing(10)
    .padding(10)
    .align_y(Alignment::Center);

    let canvas_style = |_theme: &_| container::Style {
        background: Some(CANVAS_BG.into()),
        ..Default::default()
    };

    let image_view = if let Some(handle) = app.filtered_image() {
        container(
            image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .style(canvas_style)
        .width(Length::Fill)
        .height(Length::Fill)
    } else {
        container(text("Open an image to get started").size(16))
            .style(canvas_style)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
    };

    let mut editors = column![].spacing(10);
    for channel in Channel::ALL {
        editors = editors.push(
            column![
                text(channel.label()).size(14),
                widgets::curve_editor::view(channel, app.editor(channel)),
            ]
            .spacing(4),
        );
    }

    let sidebar = scrollable(editors.padding(10)).height(Length::Fill);

    let status = container(text(app.status_message()).size(12))
        .padding(5)
        .width(Length::Fill);

    let content = row![image_view, sidebar]
        .spacing(0)
        .width(Length::Fill)
        .height(Length::Fill);

    column![toolbar, content, status]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
