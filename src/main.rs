mod modal;
mod screen;
mod widget;

use log::LevelFilter;
use screen::GalleryScreen;

fn main() -> iced::Result {
    if let Err(err) = setup_logger() {
        eprintln!("failed to initialize logging: {err}");
    }

    let state = data::State::load();

    let window_size = state
        .window_size
        .map(|(width, height)| iced::Size::new(width, height))
        .unwrap_or_else(|| iced::Size::new(1024.0, 640.0));
    let window_position = state
        .window_position
        .map(|(x, y)| iced::window::Position::Specific(iced::Point::new(x, y)))
        .unwrap_or_default();

    iced::application(
        move || GalleryScreen::boot(state.clone()),
        GalleryScreen::update,
        GalleryScreen::view,
    )
    .title("Cardflow")
    .subscription(GalleryScreen::subscription)
    .theme(GalleryScreen::theme)
    .window(iced::window::Settings {
        size: window_size,
        position: window_position,
        min_size: Some(iced::Size::new(480.0, 320.0)),
        ..Default::default()
    })
    .run()
}

fn setup_logger() -> Result<(), data::log::Error> {
    let level = std::env::var("RUST_LOG")
        .ok()
        .map(|level| level.parse::<LevelFilter>())
        .transpose()?
        .unwrap_or(LevelFilter::Info);

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}] [{}] [{}] {message}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
            ));
        })
        .level(LevelFilter::Warn)
        .level_for("cardflow", level)
        .level_for("cardflow_carousel", level)
        .level_for("cardflow_data", level)
        .chain(std::io::stdout())
        .chain(data::log::file()?)
        .apply()?;

    Ok(())
}
