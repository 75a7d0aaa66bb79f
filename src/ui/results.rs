use iced::widget::{button, column, container, image, row, text};
use iced::{Alignment, Border, Color, Element, Length, Theme};

use crate::api::types::{format_percent, format_score};
use crate::state::session::{Alert, AlertKind, AnalysisView};
use crate::ui::{ACCENT, DANGER, MUTED};
use crate::Message;

/// Shown while an analyze request is in flight.
pub fn loader() -> Element<'static, Message> {
    container(
        column![
            text("Analyzing...").size(20).color(ACCENT),
            text("Running classification and Grad-CAM on the backend")
                .size(14)
                .color(MUTED),
        ]
        .spacing(8)
        .align_x(Alignment::Center),
    )
    .width(Length::Fill)
    .padding(30)
    .center_x(Length::Fill)
    .into()
}

/// The transient message banner, styled by severity.
pub fn alert_banner(alert: &Alert) -> Element<'static, Message> {
    let color = match alert.kind {
        AlertKind::Info => ACCENT,
        AlertKind::Error => DANGER,
    };

    container(text(alert.message.clone()).size(16).color(color))
        .width(Length::Fill)
        .padding(14)
        .center_x(Length::Fill)
        .style(move |_theme: &Theme| container::Style {
            border: Border {
                color,
                width: 1.0,
                radius: 8.0.into(),
            },
            ..container::Style::default()
        })
        .into()
}

/// The full results panel: image pair, prediction badge, metrics, and the
/// report download trigger.
pub fn results_panel(
    view: &AnalysisView,
    include_raw_score: bool,
    generating_report: bool,
) -> Element<'static, Message> {
    let images = row![
        captioned_image(view.original.clone(), "Original"),
        match &view.gradcam {
            Some(handle) => captioned_image(handle.clone(), "Grad-CAM Heatmap"),
            None => container(text("Grad-CAM unavailable for this image").color(MUTED))
                .width(Length::FillPortion(1))
                .padding(20)
                .center_x(Length::Fill)
                .into(),
        },
    ]
    .spacing(20);

    let mut metrics = row![
        metric("Confidence", format_percent(view.percent)),
        metric("Class", view.class_id.to_string()),
    ]
    .spacing(30);

    if include_raw_score {
        if let Some(score) = view.score {
            metrics = metrics.push(metric("Raw Score", format_score(score)));
        }
    }

    let download = if generating_report {
        button(text("Generating Report...")).padding([10, 24])
    } else {
        button(text("Download Clinical Report (DOCX)"))
            .on_press(Message::DownloadReport)
            .padding([10, 24])
    };

    column![
        prediction_badge(&view.label, view.is_malignant),
        images,
        metrics,
        download,
    ]
    .spacing(20)
    .align_x(Alignment::Center)
    .into()
}

/// The malignant/benign badge; red for malignant, teal for benign.
fn prediction_badge(label: &str, is_malignant: bool) -> Element<'static, Message> {
    let fill = if is_malignant { DANGER } else { ACCENT };

    container(text(label.to_string()).size(18).color(Color::WHITE))
        .padding([8, 20])
        .style(move |_theme: &Theme| container::Style {
            background: Some(fill.into()),
            border: Border {
                color: fill,
                width: 0.0,
                radius: 20.0.into(),
            },
            ..container::Style::default()
        })
        .into()
}

fn captioned_image(handle: image::Handle, caption: &str) -> Element<'static, Message> {
    column![
        image(handle).width(Length::Fixed(320.0)),
        text(caption.to_string()).size(14).color(MUTED),
    ]
    .spacing(6)
    .align_x(Alignment::Center)
    .into()
}

fn metric(name: &str, value: String) -> Element<'static, Message> {
    column![
        text(name.to_string()).size(13).color(MUTED),
        text(value).size(18),
    ]
    .spacing(2)
    .align_x(Alignment::Center)
    .into()
}
