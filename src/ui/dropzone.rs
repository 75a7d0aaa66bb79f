use iced::widget::{button, column, container, text};
use iced::{Alignment, Border, Element, Length, Theme};

use crate::ui::{ACCENT, MUTED};
use crate::Message;

/// The drop target shown at the top of the window.
///
/// Files dragged over the window highlight the border, mirroring the
/// original dropzone's `active` styling; the button opens the native picker
/// as the alternative intake path.
pub fn dropzone(file_hovering: bool) -> Element<'static, Message> {
    let content = column![
        text("Drag & drop a thyroid image here").size(20),
        text("Ultrasound or pathology, PNG/JPEG").size(14).color(MUTED),
        button(text("Browse Files"))
            .on_press(Message::BrowsePressed)
            .padding([10, 24]),
    ]
    .spacing(12)
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .padding(40)
        .center_x(Length::Fill)
        .style(move |theme: &Theme| {
            let palette = theme.extended_palette();
            container::Style {
                border: Border {
                    color: if file_hovering {
                        ACCENT
                    } else {
                        palette.background.strong.color
                    },
                    width: 2.0,
                    radius: 12.0.into(),
                },
                background: if file_hovering {
                    Some(palette.background.weak.color.into())
                } else {
                    None
                },
                ..container::Style::default()
            }
        })
        .into()
}
