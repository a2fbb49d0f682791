//! Fullscreen image overlay.
//!
//! Pure view: the gesture interpretation (tap-to-close vs. swipe-to-navigate)
//! lives in the parent update via the core's `FullscreenController`; this
//! module only reports raw pointer activity over the dimmed backdrop.

use iced::widget::{container, image, mouse_area};
use iced::{Color, Element, Length, Padding, Point};

#[derive(Debug, Clone)]
pub enum Message {
    Pressed,
    Moved(Point),
    Released,
}

/// The dimmed overlay showing `handle` at full size.
///
/// `drag_offset_px` shifts the image with the live gesture so the user sees
/// the swipe travel before it commits.
pub fn view(handle: &image::Handle, drag_offset_px: f32) -> Element<'_, Message> {
    let padding = Padding {
        top: 40.0,
        bottom: 40.0,
        left: 40.0 + drag_offset_px.max(0.0),
        right: 40.0 - drag_offset_px.min(0.0),
    };

    let picture = image(handle.clone())
        .width(Length::Fill)
        .height(Length::Fill);

    let backdrop = container(picture)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(padding)
        .style(|_theme| container::Style {
            background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.92).into()),
            ..container::Style::default()
        });

    mouse_area(backdrop)
        .on_press(Message::Pressed)
        .on_move(Message::Moved)
        .on_release(Message::Released)
        .into()
}
