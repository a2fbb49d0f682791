//! The carousel strip widget.
//!
//! Lays out pre-styled card elements at the pixel placements derived from
//! the core's descriptors and owns the pointer gesture: a press inside a
//! card arms the gesture, crossing the drag slop promotes it to a drag
//! (publishing start/move/end), and a release without movement publishes a
//! click on the pressed card.  The widget itself holds no carousel state;
//! everything it reports flows back through messages.

use iced::{
    Element, Length, Point, Rectangle, Renderer, Size, Theme, Vector,
    advanced::{
        Clipboard, Layout, Shell, Widget,
        layout::{Limits, Node},
        renderer::Style,
        widget::{Tree, tree},
    },
    mouse::{Cursor, Interaction},
};

use carousel::slider::DragOffset;

/// Pointer travel in px before a press becomes a drag instead of a click.
const DRAG_SLOP: f32 = 4.0;

/// Pixel geometry for one card, already scaled by the view.
#[derive(Debug, Clone, Copy)]
pub struct PlacedCard {
    pub x_offset_px: f32,
    pub width_px: f32,
    pub height_px: f32,
    pub z_index: i32,
}

#[derive(Debug, Default)]
struct State {
    pressed_card: Option<usize>,
    origin: Option<Point>,
    dragging: bool,
}

pub struct CarouselStrip<'a, Message> {
    children: Vec<Element<'a, Message, Theme, Renderer>>,
    placements: Vec<PlacedCard>,
    draggable: bool,
    on_drag_start: Message,
    on_drag: Box<dyn Fn(DragOffset) -> Message + 'a>,
    on_drag_end: Message,
    on_card_click: Box<dyn Fn(usize) -> Message + 'a>,
}

impl<'a, Message> CarouselStrip<'a, Message>
where
    Message: Clone + 'a,
{
    pub fn new(
        cards: impl IntoIterator<Item = (Element<'a, Message, Theme, Renderer>, PlacedCard)>,
        on_drag_start: Message,
        on_drag: impl Fn(DragOffset) -> Message + 'a,
        on_drag_end: Message,
        on_card_click: impl Fn(usize) -> Message + 'a,
    ) -> Self {
        let (children, placements) = cards.into_iter().unzip();

        Self {
            children,
            placements,
            draggable: true,
            on_drag_start,
            on_drag: Box::new(on_drag),
            on_drag_end,
            on_card_click: Box::new(on_card_click),
        }
    }

    /// A single-card strip has nothing to swipe to; presses then only click.
    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    /// Card indices from the topmost stacking order down, for hit testing.
    fn hit_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.placements.len()).collect();
        order.sort_by_key(|&i| std::cmp::Reverse(self.placements[i].z_index));
        order
    }

    /// Indices in paint order, lowest stacking first.
    fn paint_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.placements.len()).collect();
        order.sort_by_key(|&i| self.placements[i].z_index);
        order
    }
}

impl<Message> Widget<Message, Theme, Renderer> for CarouselStrip<'_, Message>
where
    Message: Clone,
{
    fn children(&self) -> Vec<Tree> {
        self.children.iter().map(Tree::new).collect()
    }

    fn diff(&self, tree: &mut Tree) {
        tree.diff_children(&self.children);
    }

    fn size(&self) -> Size<Length> {
        Size::new(Length::Fill, Length::Fill)
    }

    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<State>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(State::default())
    }

    fn layout(&mut self, tree: &mut Tree, renderer: &Renderer, limits: &Limits) -> Node {
        let max_limits = limits.max();

        let children = self
            .children
            .iter_mut()
            .zip(&self.placements)
            .zip(&mut tree.children)
            .map(|((child, placement), tree)| {
                let card_limits = Limits::new(
                    Size::new(0.0, 0.0),
                    Size::new(placement.width_px, placement.height_px),
                );

                let x = (max_limits.width - placement.width_px) * 0.5 + placement.x_offset_px;
                let y = (max_limits.height - placement.height_px) * 0.5;

                child
                    .as_widget_mut()
                    .layout(tree, renderer, &card_limits)
                    .translate(Vector::new(x, y))
            })
            .collect();

        Node::with_children(max_limits, children)
    }

    fn update(
        &mut self,
        tree: &mut Tree,
        event: &iced::Event,
        layout: Layout<'_>,
        cursor: Cursor,
        renderer: &Renderer,
        clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        viewport: &Rectangle,
    ) {
        let state = tree.state.downcast_mut::<State>();

        if let iced::Event::Mouse(event) = event {
            match event {
                iced::mouse::Event::ButtonPressed(iced::mouse::Button::Left) => {
                    if let Some(position) = cursor.position() {
                        let card_layouts: Vec<_> = layout.children().collect();
                        let hit = self
                            .hit_order()
                            .into_iter()
                            .find(|&i| card_layouts[i].bounds().contains(position));

                        if hit.is_some() {
                            state.pressed_card = hit;
                            state.origin = Some(position);
                            state.dragging = false;
                        }
                    }
                }
                iced::mouse::Event::CursorMoved { .. } if state.pressed_card.is_some() => {
                    match (cursor.position(), state.origin) {
                        (Some(position), Some(origin)) => {
                            let offset = position - origin;

                            if !state.dragging
                                && self.draggable
                                && offset.x.hypot(offset.y) > DRAG_SLOP
                            {
                                state.dragging = true;
                                shell.publish(self.on_drag_start.clone());
                            }

                            if state.dragging {
                                shell.publish((self.on_drag)(DragOffset {
                                    x: offset.x,
                                    y: offset.y,
                                }));
                            }
                        }
                        _ => {
                            // Pointer left the window mid-gesture.
                            if state.dragging {
                                shell.publish(self.on_drag_end.clone());
                            }
                            *state = State::default();
                        }
                    }
                }
                iced::mouse::Event::ButtonReleased(iced::mouse::Button::Left)
                    if state.pressed_card.is_some() =>
                {
                    let pressed = state.pressed_card.take();
                    let was_drag = state.dragging;
                    *state = State::default();

                    if was_drag {
                        shell.publish(self.on_drag_end.clone());
                    } else if let Some(index) = pressed {
                        shell.publish((self.on_card_click)(index));
                    }
                }
                _ => {}
            }

            shell.request_redraw();
        }

        self.children
            .iter_mut()
            .zip(&mut tree.children)
            .zip(layout.children())
            .for_each(|((child, tree), layout)| {
                child.as_widget_mut().update(
                    tree,
                    event,
                    layout,
                    cursor,
                    renderer,
                    clipboard,
                    shell,
                    viewport,
                );
            });
    }

    fn draw(
        &self,
        tree: &Tree,
        renderer: &mut Renderer,
        theme: &Theme,
        style: &Style,
        layout: Layout<'_>,
        cursor: Cursor,
        viewport: &Rectangle,
    ) {
        let card_layouts: Vec<_> = layout.children().collect();

        for i in self.paint_order() {
            let card_layout = card_layouts[i];
            if !card_layout.bounds().intersects(viewport) {
                continue;
            }

            self.children[i].as_widget().draw(
                &tree.children[i],
                renderer,
                theme,
                style,
                card_layout,
                cursor,
                viewport,
            );
        }
    }

    fn mouse_interaction(
        &self,
        tree: &Tree,
        layout: Layout<'_>,
        cursor: Cursor,
        _viewport: &Rectangle,
        _renderer: &Renderer,
    ) -> Interaction {
        let state = tree.state.downcast_ref::<State>();

        if state.dragging {
            return Interaction::Grabbing;
        }

        let over_card = cursor.position().is_some_and(|position| {
            layout
                .children()
                .any(|child| child.bounds().contains(position))
        });

        if over_card {
            if self.draggable {
                Interaction::Grab
            } else {
                Interaction::Pointer
            }
        } else {
            Interaction::default()
        }
    }
}

impl<'a, Message> From<CarouselStrip<'a, Message>> for Element<'a, Message, Theme, Renderer>
where
    Message: Clone + 'a,
{
    fn from(strip: CarouselStrip<'a, Message>) -> Self {
        Self::new(strip)
    }
}
