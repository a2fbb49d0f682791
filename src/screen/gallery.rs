//! The gallery screen: carousel, fullscreen overlay and file-drop imports.
//!
//! This is the composition layer: it owns the core controllers, feeds them
//! timestamps and gestures, and turns their descriptors into placed widgets.
//! All clock reads happen here; the core stays deterministic.

use std::path::PathBuf;
use std::time::Instant;

use iced::widget::{center, column, container, image, stack, text};
use iced::{Element, Event, Length, Point, Size, Subscription, Task, Theme, keyboard, window};
use log::{error, warn};

use carousel::config::SliderConfig;
use carousel::fullscreen::FullscreenController;
use carousel::keyboard::{self as nav, NavKey};
use carousel::position::card_position;
use carousel::slider::{DragOffset, SliderStateMachine};
use data::Gallery;

use crate::modal;
use crate::widget::carousel::{CarouselStrip, PlacedCard};
use crate::widget::motion::CardMotion;

/// Overlay pointer travel below this is a tap, not a swipe.
const TAP_SLOP_PX: f32 = 4.0;

/// Card height relative to its width.
const CARD_ASPECT: f32 = 0.7;

const TICK_INTERVAL: std::time::Duration = std::time::Duration::from_millis(16);

#[derive(Debug, Clone)]
pub enum Message {
    Tick(Instant),
    DragStarted,
    Dragged(DragOffset),
    DragEnded,
    CardClicked(usize),
    KeyPressed(NavKey),
    DeletePressed,
    Overlay(modal::fullscreen::Message),
    FileDropped(PathBuf),
    WindowFocused,
    WindowUnfocused,
    WindowResized(Size),
    WindowMoved(Point),
}

/// Raw pointer bookkeeping for the fullscreen overlay; the decision whether
/// it was a tap or a swipe belongs to the `FullscreenController`.
#[derive(Debug, Default)]
struct OverlayGesture {
    pressed: bool,
    origin: Option<Point>,
    offset_x: f32,
}

pub struct GalleryScreen {
    persisted: data::State,
    gallery: Gallery,
    slides: Vec<PathBuf>,
    handles: Vec<image::Handle>,
    slider: SliderStateMachine,
    fullscreen: FullscreenController,
    motion: Vec<CardMotion>,
    overlay: OverlayGesture,
    viewport: Size,
    last_tick: Option<Instant>,
    notice: Option<String>,
}

impl GalleryScreen {
    pub fn boot(persisted: data::State) -> (Self, Task<Message>) {
        let now = Instant::now();

        let gallery = Gallery::open(data::get_data_path("gallery"), persisted.read_only);
        let slides = gallery.list().unwrap_or_else(|err| {
            error!("failed to read gallery: {err}");
            Vec::new()
        });
        let handles = slide_handles(&slides);

        let config = SliderConfig {
            autoplay_interval: std::time::Duration::from_millis(persisted.autoplay_interval_ms),
            ..SliderConfig::default()
        };
        let mut slider = SliderStateMachine::new(config, slides.len(), now);

        let viewport = persisted
            .window_size
            .map(|(width, height)| Size::new(width, height))
            .unwrap_or_else(|| Size::new(1024.0, 640.0));
        slider.set_viewport(viewport.width.min(viewport.height) / 100.0);

        let motion = (0..slides.len())
            .map(|i| CardMotion::new(slider.card_descriptor(i).transform))
            .collect();

        (
            Self {
                persisted,
                gallery,
                slides,
                handles,
                slider,
                fullscreen: FullscreenController::new(),
                motion,
                overlay: OverlayGesture::default(),
                viewport,
                last_tick: None,
                notice: None,
            },
            Task::none(),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick(now) => {
                self.slider.poll(now);
                self.advance_motion(now);
            }
            Message::DragStarted => self.slider.start_drag(Instant::now()),
            Message::Dragged(offset) => self.slider.update_drag(offset),
            Message::DragEnded => self.slider.end_drag(Instant::now()),
            Message::CardClicked(index) => {
                let now = Instant::now();
                let is_center =
                    card_position(index, self.slider.current_index(), self.slides.len())
                        .is_center();

                if is_center {
                    self.fullscreen.open_at(index, now, &self.slider);
                } else {
                    self.slider.navigate_to(index, now);
                }
            }
            Message::KeyPressed(key) => {
                // The demo has no text inputs, so nothing can be "typing".
                nav::handle(key, false, Instant::now(), &mut self.slider, &mut self.fullscreen);
            }
            Message::DeletePressed => self.remove_current(),
            Message::Overlay(message) => self.update_overlay(message),
            Message::FileDropped(path) => match self.gallery.import(&path) {
                Ok(stored) => {
                    self.notice = None;
                    self.reload(Instant::now());
                    if let Some(index) =
                        self.slides.iter().position(|slide| slide == &stored)
                    {
                        self.slider.navigate_to(index, Instant::now());
                    }
                }
                Err(err) => {
                    warn!("import rejected: {err}");
                    self.notice = Some(err.to_string());
                }
            },
            Message::WindowFocused => self.slider.set_page_visible(true),
            Message::WindowUnfocused => {
                self.slider.set_page_visible(false);

                // No reliable exit hook once the runtime stops, so persist
                // whenever the window loses focus.
                self.persisted.window_size =
                    Some((self.viewport.width, self.viewport.height));
                if let Err(err) = self.persisted.save() {
                    warn!("failed to persist state: {err}");
                }
            }
            Message::WindowResized(size) => {
                self.viewport = size;
                self.slider.set_viewport(self.vmin());
            }
            Message::WindowMoved(position) => {
                self.persisted.window_position = Some((position.x, position.y));
            }
        }

        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let body: Element<'_, Message> = if self.handles.is_empty() {
            center(text("Drop images onto the window to start the slideshow").size(18)).into()
        } else {
            self.carousel()
        };

        let base: Element<'_, Message> = column![
            container(body).width(Length::Fill).height(Length::Fill),
            self.footer(),
        ]
        .spacing(8)
        .padding(12)
        .into();

        match self
            .fullscreen
            .open_index()
            .and_then(|index| self.handles.get(index))
        {
            Some(handle) => stack![
                base,
                modal::fullscreen::view(handle, self.fullscreen.drag_offset_px())
                    .map(Message::Overlay),
            ]
            .into(),
            None => base,
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let ticks = iced::time::every(TICK_INTERVAL).map(Message::Tick);

        let keys = keyboard::listen().filter_map(|event| {
            use keyboard::key::Named;

            let keyboard::Event::KeyPressed { key, .. } = event else {
                return None;
            };

            match key.as_ref() {
                keyboard::Key::Named(Named::ArrowLeft) => {
                    Some(Message::KeyPressed(NavKey::ArrowLeft))
                }
                keyboard::Key::Named(Named::ArrowRight) => {
                    Some(Message::KeyPressed(NavKey::ArrowRight))
                }
                keyboard::Key::Named(Named::Enter) => Some(Message::KeyPressed(NavKey::Enter)),
                keyboard::Key::Named(Named::Escape) => Some(Message::KeyPressed(NavKey::Escape)),
                keyboard::Key::Named(Named::Delete) => Some(Message::DeletePressed),
                _ => None,
            }
        });

        let window_events = iced::event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            Event::Window(window::Event::Focused) => Some(Message::WindowFocused),
            Event::Window(window::Event::Unfocused) => Some(Message::WindowUnfocused),
            Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size)),
            Event::Window(window::Event::Moved(position)) => Some(Message::WindowMoved(position)),
            _ => None,
        });

        Subscription::batch([ticks, keys, window_events])
    }

    pub fn theme(&self) -> Theme {
        Theme::TokyoNight
    }

    fn carousel(&self) -> Element<'_, Message> {
        let vmin = self.vmin();
        let config = self.slider.config();
        let total = self.handles.len();

        let cards = self.handles.iter().enumerate().map(|(index, handle)| {
            let transform = self
                .motion
                .get(index)
                .map(CardMotion::current)
                .unwrap_or_else(|| self.slider.card_descriptor(index).transform);
            let position = card_position(index, self.slider.current_index(), total);

            let width_px = config.card_size(position) * vmin * transform.scale;
            let placement = PlacedCard {
                x_offset_px: transform.x_offset * vmin,
                width_px,
                height_px: width_px * CARD_ASPECT,
                z_index: transform.z_index,
            };

            let card: Element<'_, Message> = image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .opacity(transform.opacity)
                .into();

            (card, placement)
        });

        CarouselStrip::new(
            cards,
            Message::DragStarted,
            Message::Dragged,
            Message::DragEnded,
            Message::CardClicked,
        )
        .draggable(total > 1)
        .into()
    }

    fn footer(&self) -> Element<'_, Message> {
        let line = match &self.notice {
            Some(notice) => notice.clone(),
            None if self.gallery.is_read_only() => {
                "gallery is read-only — imports and deletes are disabled".to_owned()
            }
            None => {
                "drag to swipe · click or enter for fullscreen · ←/→ navigate · \
                 del removes · drop image files to add"
                    .to_owned()
            }
        };

        text(line).size(13).into()
    }

    fn update_overlay(&mut self, message: modal::fullscreen::Message) {
        use modal::fullscreen::Message as Overlay;

        match message {
            Overlay::Pressed => {
                self.overlay = OverlayGesture {
                    pressed: true,
                    origin: None,
                    offset_x: 0.0,
                };
                self.fullscreen.start_drag();
            }
            Overlay::Moved(position) => {
                if self.overlay.pressed {
                    let origin = *self.overlay.origin.get_or_insert(position);
                    self.overlay.offset_x = position.x - origin.x;
                    self.fullscreen.update_drag(DragOffset {
                        x: position.x - origin.x,
                        y: position.y - origin.y,
                    });
                }
            }
            Overlay::Released => {
                let now = Instant::now();
                let was_tap = self.overlay.offset_x.abs() <= TAP_SLOP_PX;
                self.overlay = OverlayGesture::default();

                self.fullscreen.end_drag(now, &mut self.slider);
                if was_tap {
                    self.fullscreen.click(now, &mut self.slider);
                }
            }
        }
    }

    fn remove_current(&mut self) {
        if self.fullscreen.is_open() || self.slides.is_empty() {
            return;
        }

        let Some(name) = self
            .slides
            .get(self.slider.current_index())
            .and_then(|path| path.file_name())
            .and_then(|name| name.to_str())
            .map(str::to_owned)
        else {
            return;
        };

        match self.gallery.remove(&name) {
            Ok(()) => {
                self.notice = None;
                self.reload(Instant::now());
            }
            Err(err) => {
                warn!("remove rejected: {err}");
                self.notice = Some(err.to_string());
            }
        }
    }

    fn reload(&mut self, now: Instant) {
        match self.gallery.list() {
            Ok(slides) => self.slides = slides,
            Err(err) => {
                error!("failed to read gallery: {err}");
                return;
            }
        }

        self.handles = slide_handles(&self.slides);
        self.slider.set_total_slides(self.slides.len(), now);

        if self
            .fullscreen
            .open_index()
            .is_some_and(|index| index >= self.slides.len())
        {
            self.fullscreen.exit(None, now, &mut self.slider);
        }

        self.motion = (0..self.slides.len())
            .map(|i| CardMotion::new(self.slider.card_descriptor(i).transform))
            .collect();
    }

    fn advance_motion(&mut self, now: Instant) {
        let dt = self
            .last_tick
            .map(|last| now.saturating_duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last_tick = Some(now);

        let spring = if self.slider.is_transitioning() {
            self.slider.config().spring_transitioning
        } else {
            self.slider.config().spring_idle
        };
        let tracking = self.slider.is_dragging();

        for (index, motion) in self.motion.iter_mut().enumerate() {
            let target = self.slider.card_descriptor(index).transform;
            motion.step(&target, spring, dt, tracking);
        }
    }

    fn vmin(&self) -> f32 {
        self.viewport.width.min(self.viewport.height) / 100.0
    }
}

fn slide_handles(slides: &[PathBuf]) -> Vec<image::Handle> {
    slides.iter().map(image::Handle::from_path).collect()
}
