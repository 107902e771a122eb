use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use iced::{Element, Task, Theme};
use tracing::{debug, error, info};

use tonal_core::{CurveEditor, Lut, PixelBuffer, RecomputeGate, filter};

use crate::views;

/// Control points per channel curve; the supported range is 4 to 8.
const CONTROL_POINTS: usize = 6;

/// The three editable channels, in display (and LUT) order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Channel::Red => "Red",
            Channel::Green => "Green",
            Channel::Blue => "Blue",
        }
    }

    pub fn color(self) -> iced::Color {
        match self {
            Channel::Red => iced::Color::from_rgb(1.0, 0.25, 0.25),
            Channel::Green => iced::Color::from_rgb(0.25, 0.9, 0.25),
            Channel::Blue => iced::Color::from_rgb(0.35, 0.55, 1.0),
        }
    }
}

pub struct App {
    editors: [CurveEditor; 3],
    // Set by the model listeners; drained by request_filter.
    curves_dirty: Rc<Cell<bool>>,
    gate: RecomputeGate,
    source: Option<Arc<PixelBuffer>>,
    filtered: Option<iced::widget::image::Handle>,
    source_name: Option<String>,
    status_message: String,
}

#[derive(Debug, Clone)]
pub enum Message {
    // Commands
    OpenImage,
    ImageSelected(Option<PathBuf>),
    ImageLoaded(Result<Arc<PixelBuffer>, String>),
    ResetCurves,

    // Editor surfaces
    CurvePressed(Channel, iced::Point),
    CurveDragged(Channel, f32),
    CurveReleased(Channel),
    CurveResized(Channel, iced::Size),

    // Throttled recompute tick
    Recompute,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        let curves_dirty = Rc::new(Cell::new(false));

        let mut editors = Channel::ALL.map(|_| {
            CurveEditor::new(CONTROL_POINTS).expect("CONTROL_POINTS is within the supported range")
        });
        for editor in &mut editors {
            let dirty = Rc::clone(&curves_dirty);
            editor.model_mut().subscribe(move || dirty.set(true));
        }

        let app = Self {
            editors,
            curves_dirty,
            gate: RecomputeGate::new(),
            source: None,
            filtered: None,
            source_name: None,
            status_message: "Open an image to get started.".into(),
        };
        (app, Task::none())
    }

    pub fn title(&self) -> String {
        match &self.source_name {
            Some(name) => format!("Tonal - {name}"),
            None => "Tonal".into(),
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenImage => Task::perform(
                async {
                    let handle = rfd::AsyncFileDialog::new()
                        .set_title("Open an image")
                        .add_filter("Images", &["jpg", "jpeg", "png"])
                        .pick_file()
                        .await;
                    handle.map(|h| h.path().to_path_buf())
                },
                Message::ImageSelected,
            ),

            Message::ImageSelected(None) => Task::none(),

            Message::ImageSelected(Some(path)) => {
                self.status_message = format!("Loading {}...", path.display());
                self.source_name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().to_string());
                Task::perform(
                    async move {
                        load_source(&path)
                            .map(Arc::new)
                            .map_err(|err| err.to_string())
                    },
                    Message::ImageLoaded,
                )
            }

            Message::ImageLoaded(Ok(buffer)) => {
                self.status_message = format!("{}x{} image", buffer.width, buffer.height);
                self.source = Some(buffer);
                // A fresh image always needs a filtered pass, even if no
                // curve changed since the last one.
                self.curves_dirty.set(true);
                self.request_filter()
            }

            Message::ImageLoaded(Err(err)) => {
                error!(%err, "failed to load image");
                self.status_message = format!("Error loading image: {err}");
                Task::none()
            }

            Message::ResetCurves => {
                for editor in &mut self.editors {
                    editor.model_mut().reset_to_identity();
                }
                self.request_filter()
            }

            Message::CurvePressed(channel, point) => {
                self.editor_mut(channel).press(point.x, point.y);
                Task::none()
            }

            Message::CurveDragged(channel, py) => {
                self.editor_mut(channel).drag_to(py);
                self.request_filter()
            }

            Message::CurveReleased(channel) => {
                self.editor_mut(channel).release();
                Task::none()
            }

            Message::CurveResized(channel, size) => {
                self.editor_mut(channel).resize(size.width, size.height);
                Task::none()
            }

            Message::Recompute => {
                self.gate.disarm();
                self.apply_filter();
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        views::workspace::view(self)
    }

    pub fn editor(&self, channel: Channel) -> &CurveEditor {
        &self.editors[channel.index()]
    }

    fn editor_mut(&mut self, channel: Channel) -> &mut CurveEditor {
        &mut self.editors[channel.index()]
    }

    pub fn filtered_image(&self) -> Option<&iced::widget::image::Handle> {
        self.filtered.as_ref()
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Schedule at most one recompute for however many change
    /// notifications arrived since the last pass.
    fn request_filter(&mut self) -> Task<Message> {
        if !self.curves_dirty.replace(false) {
            return Task::none();
        }
        if self.source.is_none() {
            // Nothing to filter yet; the next image load picks up the
            // current curves.
            return Task::none();
        }
        if !self.gate.arm() {
            return Task::none();
        }
        Task::perform(async {}, |_| Message::Recompute)
    }

    /// Rebuild the three LUTs from the current models and remap the
    /// cached source into a fresh display buffer.
    fn apply_filter(&mut self) {
        let Some(source) = self.source.clone() else {
            return;
        };
        let t0 = Instant::now();

        let luts: [Lut; 3] =
            Channel::ALL.map(|channel| Lut::from_curve(self.editor(channel).model()));

        match filter::remap(&source, &luts[0], &luts[1], &luts[2]) {
            Ok(filtered) => {
                self.filtered = Some(iced::widget::image::Handle::from_rgba(
                    filtered.width,
                    filtered.height,
                    filtered.data,
                ));
                debug!(elapsed_ms = t0.elapsed().as_millis(), "filter applied");
            }
            Err(err) => {
                error!(%err, "filter failed");
                self.status_message = format!("Filter error: {err}");
            }
        }
    }
}

fn load_source(path: &Path) -> anyhow::Result<PixelBuffer> {
    let t0 = Instant::now();
    let decoded = image::open(path)?.to_rgba8();
    let (width, height) = decoded.dimensions();
    let buffer = PixelBuffer::from_rgba(width, height, decoded.into_raw())?;
    info!(
        elapsed_ms = t0.elapsed().as_millis(),
        width, height, "image loaded"
    );
    Ok(buffer)
}
