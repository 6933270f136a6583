use iced::widget::{button, column, container, horizontal_space, row, scrollable, text};
use iced::{Alignment, Element, Length, Task, Theme};
use rfd::FileDialog;
use std::sync::Arc;

mod gpu;
mod loader;
mod state;
mod style;
mod ui;

use gpu::RenderPipeline;
use loader::LoadError;
use state::data::LoadedImage;
use state::edit::{Adjustment, Axis, EditState};
use state::preset::Preset;

/// Main application state
struct Decipher {
    /// All edit state for the session
    edit: EditState,
    /// GPU pipeline for the current image, created after a successful load
    pipeline: Option<Arc<RenderPipeline>>,
    /// Rendered preview for the image widget
    preview: Option<iced::widget::image::Handle>,
    /// Monotonic upload sequence; load completions for anything but the
    /// latest request are discarded, so the last upload always wins
    upload_seq: u64,
    /// Sequence of the image currently committed to the edit state. The
    /// pipeline for this image stays welcome even after a newer pick has
    /// bumped `upload_seq`, since a failed load leaves this image on screen
    committed_seq: u64,
    /// Status line next to the upload button
    status: String,
    /// Dismissible error notice
    notice: Option<String>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked the "Choose Image" button
    PickImage,
    /// Background load finished for the given upload sequence
    ImageLoaded(u64, Result<LoadedImage, LoadError>),
    /// GPU pipeline became ready for the given upload sequence
    PipelineReady(u64, Result<Arc<RenderPipeline>, String>),
    /// A slider moved
    AdjustmentChanged(Adjustment, f32),
    /// A flip checkbox toggled
    FlipToggled(Axis, bool),
    /// "Reset All" was pressed
    ResetFilters,
    /// A preset button was pressed
    ApplyPreset(Preset),
    /// The error notice was dismissed
    DismissNotice,
}

impl Decipher {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        println!("🖋️  Decipher initialized");

        (
            Decipher {
                edit: EditState::new(),
                pipeline: None,
                preview: None,
                upload_seq: 0,
                committed_seq: 0,
                status: String::from("Ready. Upload an image to begin."),
                notice: None,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickImage => {
                // Native picker, filtered to image types.
                // Cancelling changes nothing.
                let file = FileDialog::new()
                    .set_title("Select an Image")
                    .add_filter("Images", loader::IMAGE_EXTENSIONS)
                    .pick_file();

                if let Some(path) = file {
                    self.upload_seq += 1;
                    let seq = self.upload_seq;
                    self.status = format!("Loading {}...", path.display());

                    return Task::perform(loader::load_image(path), move |result| {
                        Message::ImageLoaded(seq, result)
                    });
                }

                Task::none()
            }
            Message::ImageLoaded(seq, result) => {
                if seq != self.upload_seq {
                    // A newer upload started while this one was in flight
                    println!("⏭️  Discarding stale load (seq {}, latest {})", seq, self.upload_seq);
                    return Task::none();
                }

                match result {
                    Ok(loaded) => {
                        let rgba = loaded.rgba.clone();
                        let (width, height) = loaded.dimensions();
                        self.status = format!(
                            "Loaded {} ({}x{}, {}, {:.1} KB)",
                            loaded.filename,
                            width,
                            height,
                            loaded.mime,
                            loaded.byte_len as f64 / 1024.0
                        );
                        self.edit.set_image(loaded);

                        // The previous image's pipeline and preview are gone
                        // the moment a new image is committed
                        self.committed_seq = seq;
                        self.pipeline = None;
                        self.preview = None;

                        let initial = style::derive_style(&self.edit);
                        Task::perform(
                            RenderPipeline::new(rgba, width, height, initial),
                            move |result| Message::PipelineReady(seq, result.map(Arc::new)),
                        )
                    }
                    Err(error) => {
                        // Failed loads leave the edit state exactly as it was
                        self.status = String::from("Load failed.");
                        self.notice = Some(error.to_string());
                        Task::none()
                    }
                }
            }
            Message::PipelineReady(seq, result) => {
                if seq != self.committed_seq {
                    println!(
                        "⏭️  Discarding stale pipeline (seq {}, committed {})",
                        seq, self.committed_seq
                    );
                    return Task::none();
                }

                match result {
                    Ok(pipeline) => {
                        self.pipeline = Some(pipeline);
                        self.refresh_preview();
                    }
                    Err(error) => {
                        self.notice = Some(format!("Preview unavailable: {}", error));
                    }
                }

                Task::none()
            }
            Message::AdjustmentChanged(adjustment, value) => {
                // The controls are only rendered once an image is loaded, but
                // gate here too so the rule holds for every caller
                if !self.edit.has_image() {
                    return Task::none();
                }

                match self.edit.set_adjustment(adjustment, value) {
                    Ok(()) => self.refresh_preview(),
                    Err(error) => self.notice = Some(error.to_string()),
                }

                Task::none()
            }
            Message::FlipToggled(axis, enabled) => {
                if self.edit.has_image() {
                    self.edit.set_flip(axis, enabled);
                    self.refresh_preview();
                }
                Task::none()
            }
            Message::ResetFilters => {
                if self.edit.has_image() {
                    self.edit.reset_filters();
                    self.refresh_preview();
                }
                Task::none()
            }
            Message::ApplyPreset(preset) => {
                if self.edit.has_image() {
                    self.edit.apply_preset(preset);
                    self.refresh_preview();
                }
                Task::none()
            }
            Message::DismissNotice => {
                self.notice = None;
                Task::none()
            }
        }
    }

    /// Re-render the preview with a freshly derived style descriptor
    fn refresh_preview(&mut self) {
        let style = style::derive_style(&self.edit);

        if let Some(pipeline) = &self.pipeline {
            pipeline.update_uniforms(&style);
            let (width, height, bytes) = pipeline.render_to_bytes(&style);
            self.preview = Some(iced::widget::image::Handle::from_rgba(width, height, bytes));
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let style = style::derive_style(&self.edit);

        let upload = column![
            text("Upload Image").size(20),
            row![
                button("Choose Image...")
                    .on_press(Message::PickImage)
                    .padding(10),
                text(&self.status).size(14),
            ]
            .spacing(12)
            .align_y(Alignment::Center),
        ]
        .spacing(10);

        let mut page = column![text("Decipher").size(36), upload]
            .spacing(24)
            .padding(32)
            .max_width(900);

        if let Some(notice) = &self.notice {
            page = page.push(
                row![
                    text(notice).size(14),
                    horizontal_space(),
                    button("Dismiss").on_press(Message::DismissNotice).padding(6),
                ]
                .spacing(12)
                .align_y(Alignment::Center),
            );
        }

        if self.edit.has_image() {
            if let Some(handle) = &self.preview {
                page = page.push(ui::preview::view(handle, &style));
            } else {
                page = page.push(text("Rendering preview...").size(14));
            }
            page = page.push(ui::controls::view(&self.edit));
        } else {
            page = page.push(ui::preview::empty_state());
        }

        scrollable(
            container(page)
                .width(Length::Fill)
                .center_x(Length::Fill),
        )
        .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn main() -> iced::Result {
    iced::application("Decipher", Decipher::update, Decipher::view)
        .theme(Decipher::theme)
        .centered()
        .run_with(Decipher::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> Decipher {
        Decipher::new().0
    }

    fn loaded_image() -> LoadedImage {
        LoadedImage {
            rgba: Arc::new(vec![255; 16]),
            width: 2,
            height: 2,
            mime: "image/png".to_string(),
            filename: "folio.png".to_string(),
            byte_len: 16,
        }
    }

    #[test]
    fn test_adjustments_are_ignored_without_an_image() {
        let mut app = app();

        let _ = app.update(Message::AdjustmentChanged(Adjustment::Brightness, 150.0));
        let _ = app.update(Message::FlipToggled(Axis::Y, true));
        let _ = app.update(Message::ApplyPreset(Preset::Vintage));

        assert!(app.edit.is_unedited());
    }

    #[test]
    fn test_adjustments_apply_once_an_image_is_loaded() {
        let mut app = app();
        app.edit.set_image(loaded_image());

        let _ = app.update(Message::AdjustmentChanged(Adjustment::Brightness, 150.0));
        let _ = app.update(Message::FlipToggled(Axis::Y, true));

        assert_eq!(app.edit.brightness, 150.0);
        assert!(app.edit.flip_y);
        assert!(!app.edit.flip_x);
    }

    #[test]
    fn test_stale_load_completion_is_discarded() {
        let mut app = app();
        // A second upload (seq 2) superseded the first (seq 1)
        app.upload_seq = 2;

        let _ = app.update(Message::ImageLoaded(1, Ok(loaded_image())));

        assert!(!app.edit.has_image());
    }

    #[test]
    fn test_committed_pipeline_survives_a_superseded_failed_upload() {
        let mut app = app();

        // First image loads and commits as seq 1
        app.upload_seq = 1;
        let _ = app.update(Message::ImageLoaded(1, Ok(loaded_image())));
        assert_eq!(app.committed_seq, 1);

        // A second pick starts (seq 2) but its load fails, leaving the
        // first image on screen
        app.upload_seq = 2;
        let _ = app.update(Message::ImageLoaded(
            2,
            Err(LoadError::NotFound("missing.png".to_string())),
        ));
        assert!(app.edit.has_image());
        let _ = app.update(Message::DismissNotice);

        // The first image's pipeline result must still be accepted, not
        // discarded against the newer upload_seq
        let _ = app.update(Message::PipelineReady(
            1,
            Err("no adapter".to_string()),
        ));
        assert!(app.notice.is_some());
    }

    #[test]
    fn test_pipeline_for_an_uncommitted_upload_is_discarded() {
        let mut app = app();

        app.upload_seq = 1;
        let _ = app.update(Message::ImageLoaded(1, Ok(loaded_image())));

        // Seq 2 never committed an image, so its pipeline result is stale
        app.upload_seq = 2;
        let _ = app.update(Message::PipelineReady(
            2,
            Err("no adapter".to_string()),
        ));
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_committing_a_new_image_clears_the_old_preview() {
        let mut app = app();

        app.upload_seq = 1;
        let _ = app.update(Message::ImageLoaded(1, Ok(loaded_image())));
        app.preview = Some(iced::widget::image::Handle::from_rgba(2, 2, vec![0; 16]));

        app.upload_seq = 2;
        let _ = app.update(Message::ImageLoaded(2, Ok(loaded_image())));

        // The stale preview never shows under the new image's adjustments
        assert!(app.preview.is_none());
        assert_eq!(app.committed_seq, 2);
    }

    #[test]
    fn test_failed_load_surfaces_a_notice_and_keeps_state() {
        let mut app = app();
        app.upload_seq = 1;

        let _ = app.update(Message::ImageLoaded(
            1,
            Err(LoadError::NotFound("folio.png".to_string())),
        ));

        assert!(!app.edit.has_image());
        assert!(app.notice.is_some());

        let _ = app.update(Message::DismissNotice);
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_reset_message_restores_defaults() {
        let mut app = app();
        app.edit.set_image(loaded_image());

        let _ = app.update(Message::ApplyPreset(Preset::Grayscale));
        assert_eq!(app.edit.saturation, 0.0);

        let _ = app.update(Message::ResetFilters);
        assert!(app.edit.is_unedited());
        assert!(app.edit.has_image());
    }
}
