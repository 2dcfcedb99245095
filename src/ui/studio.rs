/// The Try-On Studio screen
///
/// Wraps the workflow state machine with the decoded image handles the
/// view needs. Everything here is dropped when the user goes back home.
use iced::widget::image::Handle;
use iced::widget::{button, column, container, image, row, text, text_input, Column, Space};
use iced::{Alignment, Element, Length, Theme};

use crate::error::{ApiError, IngestError};
use crate::media::DataUrl;
use crate::notice::Notice;
use crate::state::data::{ClothingMode, ImageSlot, RequestId, StudioEpoch, TryOnResult};
use crate::state::workflow::{Phase, TryOnWorkflow};
use crate::Message;

const URL_PLACEHOLDER: &str = "https://www.uniqlo.com/us/en/products/E467024-000/00";

const TIPS: [&str; 5] = [
    "• Use clear, well-lit photos with good contrast",
    "• Face the camera directly for better fitting",
    "• For URLs: Use direct product pages (not search results)",
    "• If URL fails: Save the clothing image and upload directly",
    "• Avoid busy backgrounds in your photos",
];

pub struct Studio {
    epoch: StudioEpoch,
    pub workflow: TryOnWorkflow,
    person_preview: Option<Handle>,
    clothing_preview: Option<Handle>,
    result_preview: Option<Handle>,
}

impl Studio {
    pub fn new(epoch: StudioEpoch) -> Self {
        Self {
            epoch,
            workflow: TryOnWorkflow::new(),
            person_preview: None,
            clothing_preview: None,
            result_preview: None,
        }
    }

    pub fn set_person_image(&mut self, image: DataUrl) {
        self.person_preview = preview_of(&image);
        self.workflow.set_person_image(image);
    }

    pub fn clear_person_image(&mut self) {
        self.person_preview = None;
        self.workflow.clear_person_image();
    }

    pub fn set_clothing_image(&mut self, image: DataUrl) {
        self.clothing_preview = preview_of(&image);
        self.workflow.set_clothing_image(image);
    }

    pub fn clear_clothing_image(&mut self) {
        self.clothing_preview = None;
        self.workflow.clear_clothing_image();
    }

    pub fn epoch(&self) -> StudioEpoch {
        self.epoch
    }

    /// Apply a finished file read. Reads started by an earlier studio visit
    /// are dropped whether they succeeded or not.
    pub fn image_loaded(
        &mut self,
        epoch: StudioEpoch,
        slot: ImageSlot,
        result: Result<DataUrl, IngestError>,
    ) -> Option<Notice> {
        if epoch != self.epoch {
            tracing::debug!(epoch = epoch.0, current = self.epoch.0, ?slot, "dropping stale image read");
            return None;
        }

        match result {
            Ok(image) => {
                match slot {
                    ImageSlot::Person => self.set_person_image(image),
                    ImageSlot::Clothing => self.set_clothing_image(image),
                }
                None
            }
            Err(e) => {
                tracing::warn!(?slot, error = %e, "image rejected");
                Some(Notice::from(&e))
            }
        }
    }

    pub fn clear_result_preview(&mut self) {
        self.result_preview = None;
    }

    /// Forward a request outcome to the workflow and refresh the preview
    pub fn finish(&mut self, id: RequestId, outcome: Result<TryOnResult, ApiError>) -> Option<Notice> {
        let notice = self.workflow.finish(id, outcome)?;
        self.result_preview = self.workflow.result().and_then(|r| preview_of(&r.image));
        Some(notice)
    }

    pub fn view<'a>(&'a self, notice: Option<&'a Notice>) -> Element<'a, Message> {
        let header = row![
            button(text("← Back to Home")).on_press(Message::BackToHome).style(button::text),
            column![
                text("Virtual Try-On Studio").size(32),
                text("Upload your photo and see how clothes look on you instantly").size(16),
            ]
            .spacing(4),
        ]
        .spacing(16)
        .align_y(Alignment::Center);

        let inputs = column![
            self.person_card(),
            self.clothing_card(),
            self.generate_button(),
        ]
        .spacing(20)
        .width(Length::FillPortion(1));

        let outputs = column![self.result_card(), tips_card()]
            .spacing(20)
            .width(Length::FillPortion(1));

        let mut content = column![header, row![inputs, outputs].spacing(24)].spacing(24);
        if let Some(notice) = notice {
            content = content.push(notice_view(notice));
        }

        container(content.padding(32))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn person_card(&self) -> Element<'_, Message> {
        let body: Element<'_, Message> = if self.workflow.person_image().is_some() {
            let mut col = Column::new().spacing(12).align_x(Alignment::Center);
            if let Some(handle) = &self.person_preview {
                col = col.push(image(handle.clone()).width(160.0).height(160.0));
            }
            col.push(button(text("Change Photo")).on_press(Message::ClearPersonImage).style(button::secondary))
                .into()
        } else {
            column![
                button(text("Click to upload")).on_press(Message::PickPersonImage),
                text("PNG, JPG up to 10MB").size(12),
            ]
            .spacing(8)
            .align_x(Alignment::Center)
            .into()
        };

        card(column![text("📷 Upload Your Photo").size(20), body].spacing(16))
    }

    fn clothing_card(&self) -> Element<'_, Message> {
        let mode = self.workflow.clothing_mode();
        let selector = row![
            mode_button("🔗 Product URL", ClothingMode::Url, mode),
            mode_button("⬆ Upload Image", ClothingMode::Upload, mode),
        ]
        .spacing(12);

        let body: Element<'_, Message> = match mode {
            ClothingMode::Url => column![
                text_input(URL_PLACEHOLDER, self.workflow.clothing_url())
                    .on_input(Message::ClothingUrlChanged)
                    .padding(10),
                text(
                    "Paste a link to any clothing product. Works best with: Uniqlo, Target, Walmart. \
                     If it doesn't work, try uploading the image directly."
                )
                .size(12),
            ]
            .spacing(8)
            .into(),
            ClothingMode::Upload if self.workflow.clothing_image().is_some() => {
                let mut col = Column::new().spacing(12).align_x(Alignment::Center);
                if let Some(handle) = &self.clothing_preview {
                    col = col.push(image(handle.clone()).width(128.0).height(128.0));
                }
                col.push(button(text("Change Image")).on_press(Message::ClearClothingImage).style(button::secondary))
                    .into()
            }
            ClothingMode::Upload => column![
                button(text("Upload clothing image")).on_press(Message::PickClothingImage),
                text("PNG, JPG up to 10MB").size(12),
            ]
            .spacing(8)
            .align_x(Alignment::Center)
            .into(),
        };

        card(column![text("🪄 Choose Clothing").size(20), selector, body].spacing(16))
    }

    fn generate_button(&self) -> Element<'_, Message> {
        let processing = self.workflow.is_processing();
        let label = if processing {
            "⏳ Generating Your Try-On..."
        } else {
            "🪄 Generate Virtual Try-On"
        };

        // Disabled while a request is in flight
        button(text(label).size(18).width(Length::Fill).align_x(Alignment::Center))
            .on_press_maybe((!processing).then_some(Message::Generate))
            .padding(14)
            .width(Length::Fill)
            .into()
    }

    fn result_card(&self) -> Element<'_, Message> {
        let mut title = row![text("Your Virtual Try-On").size(20), Space::with_width(Length::Fill)]
            .align_y(Alignment::Center);
        if let Some(result) = self.workflow.result() {
            title = title.push(text(format!("Generated in {}", result.processing_time)).size(12));
        }

        let body: Element<'_, Message> = match (self.workflow.phase(), self.workflow.result()) {
            (Phase::Processing, _) => column![
                text("⏳").size(40),
                text("Generating your virtual try-on...").size(18),
                text("This may take a few seconds").size(12),
            ]
            .spacing(8)
            .align_x(Alignment::Center)
            .into(),
            (Phase::Success, Some(_)) => {
                let mut col = Column::new().spacing(16).align_x(Alignment::Center);
                if let Some(handle) = &self.result_preview {
                    col = col.push(image(handle.clone()).height(384.0));
                }
                col.push(
                    row![
                        button(text("⬇ Download")).on_press(Message::Download).style(button::secondary),
                        button(text("↗ Share")).on_press(Message::Share).style(button::secondary),
                    ]
                    .spacing(16),
                )
                .into()
            }
            _ => column![
                text("🪄").size(40),
                text("Ready to see the magic?").size(18),
                text("Upload your photo and choose clothing to get started").size(12),
            ]
            .spacing(8)
            .align_x(Alignment::Center)
            .into(),
        };

        card(
            column![
                title,
                container(body)
                    .width(Length::Fill)
                    .height(Length::Fixed(420.0))
                    .center_x(Length::Fill)
                    .center_y(Length::Fixed(420.0)),
            ]
            .spacing(16),
        )
    }
}

fn preview_of(image: &DataUrl) -> Option<Handle> {
    image.decode().ok().map(Handle::from_bytes)
}

fn mode_button(label: &str, target: ClothingMode, active: ClothingMode) -> Element<'_, Message> {
    let style: fn(&Theme, button::Status) -> button::Style = if target == active {
        button::primary
    } else {
        button::secondary
    };
    button(text(label))
        .on_press(Message::SelectClothingMode(target))
        .style(style)
        .into()
}

fn tips_card<'a>() -> Element<'a, Message> {
    let mut col = Column::new().spacing(4).push(text("💡 Tips for best results:").size(16));
    for tip in TIPS {
        col = col.push(text(tip).size(13));
    }
    card(col)
}

fn card<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .padding(20)
        .width(Length::Fill)
        .style(container::rounded_box)
        .into()
}

pub fn notice_view(notice: &Notice) -> Element<'_, Message> {
    let style: fn(&Theme) -> text::Style = if notice.is_error() {
        text::danger
    } else {
        text::success
    };
    card(column![text(&notice.title).size(16).style(style), text(&notice.description).size(14)].spacing(4))
}
