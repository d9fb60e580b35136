//! Wall rendering: error list, brick columns, loading overlay
//!
//! Pure view code. Everything here is derived from `WallState` plus the
//! id -> display-handle map owned by the app; no state is mutated.

use std::collections::HashMap;

use iced::widget::{column, container, image, text, Column, Row, Space};
use iced::{Color, ContentFit, Element, Length};

use crate::state::layout::{Brick, WallGeometry};
use crate::state::wall::WallState;
use crate::Message;

/// The scrollable content area: errors replace the wall entirely; the
/// wall stays hidden while the first page of a query is still loading.
pub fn wall_view<'a>(
    wall: &'a WallState,
    geometry: &WallGeometry,
    handles: &'a HashMap<String, image::Handle>,
) -> Element<'a, Message> {
    if !wall.errors().is_empty() {
        return errors_view(wall.errors());
    }

    if wall.page() == 1 && wall.loading() {
        return Space::new(Length::Fill, Length::Shrink).into();
    }

    let columns = wall.columns().iter().map(|col| {
        Column::with_children(col.bricks.iter().map(|brick| brick_view(brick, handles)))
            .spacing(geometry.spacing)
            .into()
    });

    Row::with_children(columns)
        .spacing(geometry.spacing)
        .width(Length::Fill)
        .into()
}

/// One brick at its layout dimensions.
fn brick_view<'a>(brick: &Brick, handles: &'a HashMap<String, image::Handle>) -> Element<'a, Message> {
    match handles.get(&brick.id) {
        Some(handle) => image(handle.clone())
            .width(Length::Fixed(brick.width))
            .height(Length::Fixed(brick.height))
            .content_fit(ContentFit::Contain)
            .into(),
        // Handle missing (should not happen): hold the layout slot open.
        None => Space::new(Length::Fixed(brick.width), Length::Fixed(brick.height)).into(),
    }
}

fn errors_view(errors: &[String]) -> Element<'_, Message> {
    column(
        errors
            .iter()
            .map(|err| text(err.as_str()).color(Color::from_rgb(0.8, 0.1, 0.1)).into()),
    )
    .spacing(5)
    .into()
}

/// Translucent full-area overlay shown while a fetch is in flight.
pub fn loading_overlay<'a>() -> Element<'a, Message> {
    container(text("Ładowanie…").size(24))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(Color::from_rgba(1.0, 1.0, 1.0, 0.3).into()),
            ..container::Style::default()
        })
        .into()
}
