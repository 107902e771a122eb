use iced::mouse;
use iced::widget::canvas::{self, Path, Stroke};
use iced::{Color, Element, Point, Rectangle, Renderer, Size, Theme};

use tonal_core::editor::{
    CurveEditor, DEFAULT_SURFACE, DragState, EditorFrame, HANDLE_RADIUS, HIT_SLACK,
};

use crate::app::{Channel, Message};
use crate::views::CANVAS_BG;

const AXIS_COLOR: Color = Color::from_rgb(0.5, 0.5, 0.5);
const HANDLE_FILL: Color = Color::from_rgb(0.8, 0.8, 0.8);
const HANDLE_STROKE: Color = Color::from_rgb(0.4, 0.4, 0.4);

/// One channel's editor surface.
///
/// Rendering works from a snapshot of the controller's geometry; all
/// pointer events are forwarded as messages and the drag logic stays in
/// [`CurveEditor`].
struct CurveCanvas {
    channel: Channel,
    color: Color,
    dragging: bool,
    frame: EditorFrame,
    handles: Vec<(f32, f32)>,
    polyline: Vec<(f32, f32)>,
}

impl canvas::Program<Message> for CurveCanvas {
    // Last surface size reported to the app.
    type State = Option<Size>;

    fn update(
        &self,
        state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        // Keep the controller's geometry in sync with the laid-out size.
        if *state != Some(bounds.size()) {
            *state = Some(bounds.size());
            return Some(canvas::Action::publish(Message::CurveResized(
                self.channel,
                bounds.size(),
            )));
        }

        match event {
            iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                Some(
                    canvas::Action::publish(Message::CurvePressed(self.channel, position))
                        .and_capture(),
                )
            }
            iced::Event::Mouse(mouse::Event::CursorMoved { .. }) if self.dragging => {
                // Track the pointer even when it leaves the surface, so
                // a drag can pin the value at 0 or 255.
                let position = cursor.position()?;
                Some(
                    canvas::Action::publish(Message::CurveDragged(
                        self.channel,
                        position.y - bounds.y,
                    ))
                    .and_capture(),
                )
            }
            iced::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
                if self.dragging =>
            {
                Some(canvas::Action::publish(Message::CurveReleased(self.channel)).and_capture())
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        frame.fill_rectangle(Point::ORIGIN, bounds.size(), CANVAS_BG);

        let f = self.frame;
        let axes = Path::new(|b| {
            b.move_to(Point::new(f.left, f.top));
            b.line_to(Point::new(f.left, f.bottom()));
            b.line_to(Point::new(f.right(), f.bottom()));
        });
        frame.stroke(&axes, Stroke::default().with_color(AXIS_COLOR));

        let curve = Path::new(|b| {
            let mut points = self.polyline.iter();
            if let Some(&(x, y)) = points.next() {
                b.move_to(Point::new(x, y));
                for &(x, y) in points {
                    b.line_to(Point::new(x, y));
                }
            }
        });
        frame.stroke(&curve, Stroke::default().with_color(self.color).with_width(1.5));

        for &(x, y) in &self.handles {
            let handle = Path::circle(Point::new(x, y), HANDLE_RADIUS);
            frame.fill(&handle, HANDLE_FILL);
            frame.stroke(&handle, Stroke::default().with_color(HANDLE_STROKE));
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.dragging {
            return mouse::Interaction::Grabbing;
        }
        if let Some(position) = cursor.position_in(bounds) {
            let reach = HANDLE_RADIUS + HIT_SLACK;
            let over_handle = self.handles.iter().any(|&(hx, hy)| {
                let dx = position.x - hx;
                let dy = position.y - hy;
                dx * dx + dy * dy <= reach * reach
            });
            if over_handle {
                return mouse::Interaction::Grab;
            }
        }
        mouse::Interaction::default()
    }
}

pub fn view<'a>(channel: Channel, editor: &CurveEditor) -> Element<'a, Message> {
    iced::widget::canvas(CurveCanvas {
        channel,
        color: channel.color(),
        dragging: matches!(editor.drag_state(), DragState::Dragging(_)),
        frame: editor.frame(),
        handles: editor.handle_positions(),
        polyline: editor.curve_polyline(),
    })
    .width(DEFAULT_SURFACE)
    .height(DEFAULT_SURFACE)
    .into()
}
