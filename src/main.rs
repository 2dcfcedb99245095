use iced::{Element, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;

mod api;
mod config;
mod error;
mod export;
mod media;
mod notice;
mod state;
mod ui;

use api::ApiClient;
use config::AppConfig;
use error::{ApiError, IngestError};
use media::DataUrl;
use notice::Notice;
use state::data::{ClothingMode, ImageSlot, RequestId, StudioEpoch, TryOnResult};
use ui::studio::Studio;

/// Which screen is showing. The studio owns all workflow state, so
/// leaving it discards photos, inputs and results.
enum Screen {
    Landing,
    Studio(Studio),
}

/// Main application state
struct TryOnApp {
    config: AppConfig,
    /// None if the HTTP client could not be built
    client: Option<ApiClient>,
    screen: Screen,
    /// Latest transient notice
    notice: Option<Notice>,
    /// Backend reachability, shown in the footer
    backend_status: String,
    next_request: u64,
    next_studio: u64,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// "Start Try-On" on the landing screen
    OpenStudio,
    /// "Back to Home" in the studio
    BackToHome,
    BackendChecked(Result<(), ApiError>),

    PickPersonImage,
    ClearPersonImage,
    /// A picked file finished loading, tagged with the studio visit that asked for it
    ImageLoaded(StudioEpoch, ImageSlot, Result<DataUrl, IngestError>),

    SelectClothingMode(ClothingMode),
    ClothingUrlChanged(String),
    PickClothingImage,
    ClearClothingImage,

    Generate,
    GenerationFinished(RequestId, Result<TryOnResult, ApiError>),

    Download,
    DownloadFinished(Result<PathBuf, String>),
    Share,
}

impl TryOnApp {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = AppConfig::from_env().unwrap_or_else(|e| {
            tracing::error!(error = %e, "invalid configuration, using defaults");
            AppConfig::default()
        });
        tracing::info!(
            backend = %config.backend_url,
            share_url = %config.share_url,
            connect_timeout = ?config.connect_timeout,
            "🎨 Try-On Studio starting"
        );

        let (client, notice) = match ApiClient::new(&config) {
            Ok(client) => (Some(client), None),
            Err(e) => {
                tracing::error!(error = %e, "failed to build HTTP client");
                (None, Some(Notice::error("Backend unavailable", e.to_string())))
            }
        };

        let task = match &client {
            Some(client) => {
                let client = client.clone();
                Task::perform(async move { client.ping().await }, Message::BackendChecked)
            }
            None => Task::none(),
        };

        (
            TryOnApp {
                backend_status: format!("Connecting to {}...", config.backend_url),
                config,
                client,
                screen: Screen::Landing,
                notice,
                next_request: 0,
                next_studio: 0,
            },
            task,
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenStudio => {
                let epoch = StudioEpoch(self.next_studio);
                self.next_studio += 1;
                self.screen = Screen::Studio(Studio::new(epoch));
                self.notice = None;
                Task::none()
            }
            Message::BackToHome => {
                // Any in-flight request finishes against a dropped workflow
                // and is ignored
                self.screen = Screen::Landing;
                self.notice = None;
                Task::none()
            }
            Message::BackendChecked(result) => {
                self.backend_status = match result {
                    Ok(()) => {
                        tracing::info!(backend = %self.config.backend_url, "✅ backend reachable");
                        format!("Connected to {}", self.config.backend_url)
                    }
                    Err(e) => {
                        tracing::warn!(backend = %self.config.backend_url, error = %e, "backend health check failed");
                        format!("⚠️ Backend unreachable at {}", self.config.backend_url)
                    }
                };
                Task::none()
            }
            other => {
                if !matches!(self.screen, Screen::Studio(_)) {
                    tracing::debug!(?other, "ignoring studio message outside the studio");
                    return Task::none();
                }
                self.update_studio(other)
            }
        }
    }

    fn update_studio(&mut self, message: Message) -> Task<Message> {
        let Screen::Studio(studio) = &mut self.screen else {
            return Task::none();
        };

        match message {
            Message::PickPersonImage => load_picked(studio.epoch(), ImageSlot::Person, "Select Your Photo"),
            Message::ClearPersonImage => {
                studio.clear_person_image();
                Task::none()
            }

            Message::SelectClothingMode(mode) => {
                studio.workflow.set_clothing_mode(mode);
                Task::none()
            }
            Message::ClothingUrlChanged(url) => {
                studio.workflow.set_clothing_url(url);
                Task::none()
            }
            Message::PickClothingImage => {
                load_picked(studio.epoch(), ImageSlot::Clothing, "Select Clothing Image")
            }
            Message::ClearClothingImage => {
                studio.clear_clothing_image();
                Task::none()
            }
            Message::ImageLoaded(epoch, slot, result) => {
                if let Some(notice) = studio.image_loaded(epoch, slot, result) {
                    self.notice = Some(notice);
                }
                Task::none()
            }

            Message::Generate => {
                let id = RequestId(self.next_request);
                let request = match studio.workflow.begin_generate(id) {
                    Ok(request) => request,
                    Err(e) => {
                        tracing::info!(reason = %e, "generate blocked");
                        if let Some(notice) = Notice::for_validation(e) {
                            self.notice = Some(notice);
                        }
                        return Task::none();
                    }
                };
                self.next_request += 1;
                studio.clear_result_preview();

                let Some(client) = self.client.clone() else {
                    let err = ApiError::Transport("HTTP client unavailable".to_string());
                    return Task::done(Message::GenerationFinished(id, Err(err)));
                };
                self.notice = None;
                Task::perform(
                    async move { client.virtual_tryon(request).await },
                    move |outcome| Message::GenerationFinished(id, outcome),
                )
            }
            Message::GenerationFinished(id, outcome) => {
                if let Some(notice) = studio.finish(id, outcome) {
                    self.notice = Some(notice);
                }
                Task::none()
            }

            Message::Download => {
                let Some(result) = studio.workflow.result() else {
                    return Task::none();
                };
                Task::perform(
                    export::download::save_result(
                        result.image.clone(),
                        export::download::get_download_dir(),
                    ),
                    Message::DownloadFinished,
                )
            }
            Message::DownloadFinished(Ok(path)) => {
                self.notice = Some(Notice::success("Downloaded", format!("Saved to {}", path.display())));
                Task::none()
            }
            Message::DownloadFinished(Err(e)) => {
                tracing::error!(error = %e, "download failed");
                self.notice = Some(Notice::error("Download failed", e));
                Task::none()
            }
            Message::Share => {
                if studio.workflow.result().is_none() {
                    return Task::none();
                }
                let (task, notice) = export::share::share_link(&self.config.share_url);
                self.notice = Some(notice);
                task
            }

            Message::OpenStudio | Message::BackToHome | Message::BackendChecked(_) => Task::none(),
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        match &self.screen {
            Screen::Landing => ui::landing::view(&self.backend_status, self.notice.as_ref()),
            Screen::Studio(studio) => studio.view(self.notice.as_ref()),
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

/// Show the native image picker
fn pick_image(title: &str) -> Option<PathBuf> {
    FileDialog::new()
        .set_title(title)
        .add_filter("Images", media::ingest::IMAGE_EXTENSIONS)
        .pick_file()
}

/// Pick a file and read it in the background for the given studio visit
fn load_picked(epoch: StudioEpoch, slot: ImageSlot, title: &str) -> Task<Message> {
    match pick_image(title) {
        Some(path) => Task::perform(media::ingest::load_image_as_data_url(path), move |result| {
            Message::ImageLoaded(epoch, slot, result)
        }),
        None => Task::none(),
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    iced::application("Try-On Studio", TryOnApp::update, TryOnApp::view)
        .theme(TryOnApp::theme)
        .centered()
        .run_with(TryOnApp::new)
}
