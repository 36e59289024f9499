//! Main application window.
//!
//! One window, one flow: pick a folder, press Start, watch the log.
//! The pipeline runs synchronously on the update thread, so the window
//! blocks for the duration of the batch; live per-file progress is on
//! the console. That tradeoff is deliberate - there is no cancellation
//! surface mid-run.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use iced::widget::{button, column, container, row, scrollable, text};
use iced::{Element, Length, Task};

use modconv_core::config::Settings;
use modconv_core::logging::RunReporter;
use modconv_core::pipeline;

/// All messages the application can receive.
#[derive(Debug, Clone)]
pub enum Message {
    BrowseRoot,
    RootSelected(Option<PathBuf>),
    StartRun,
}

/// Main application state.
pub struct App {
    root: Option<PathBuf>,
    log: String,
    status: String,
    is_running: bool,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        let mut app = Self {
            root: None,
            log: String::new(),
            status: "Select a directory to begin".to_string(),
            is_running: false,
        };
        app.append_log(&format!(
            "MOD to MP4 converter started (core {})",
            modconv_core::version()
        ));
        (app, Task::none())
    }

    pub fn title(&self) -> String {
        "MOD to MP4 Converter".to_string()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::BrowseRoot => Task::perform(
                async {
                    rfd::AsyncFileDialog::new()
                        .set_title("Select Directory")
                        .pick_folder()
                        .await
                        .map(|f| f.path().to_path_buf())
                },
                Message::RootSelected,
            ),
            Message::RootSelected(Some(path)) => {
                self.append_log(&format!("Directory selected: {}", path.display()));
                self.status = "Ready to convert".to_string();
                self.root = Some(path);
                Task::none()
            }
            // dialog cancelled: no action taken
            Message::RootSelected(None) => Task::none(),
            Message::StartRun => {
                self.run_pipeline();
                Task::none()
            }
        }
    }

    /// Run the batch synchronously on the calling thread.
    fn run_pipeline(&mut self) {
        let Some(root) = self.root.clone() else {
            return;
        };

        self.is_running = true;
        self.status = format!("Converting {}", root.display());

        // The reporter callback fires while `self` is borrowed by the
        // run, so lines are buffered and drained afterwards.
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&lines);
        let reporter = RunReporter::with_callback(Box::new(move |line| {
            if let Ok(mut lines) = sink.lock() {
                lines.push(line.to_string());
            }
        }));

        let settings = Settings::default();
        let result = pipeline::run(&root, &settings, &reporter);

        if let Ok(mut lines) = lines.lock() {
            for line in lines.drain(..) {
                self.log.push_str(&line);
                self.log.push('\n');
            }
        }

        match result {
            Ok(summary) => {
                self.status = if summary.failed.is_empty() {
                    format!("Done: {}/{} converted", summary.converted, summary.seen)
                } else {
                    format!(
                        "Done: {}/{} converted, {} failed (see log)",
                        summary.converted,
                        summary.seen,
                        summary.failed.len()
                    )
                };
            }
            Err(e) => {
                tracing::error!("Run aborted: {}", e);
                self.append_log(&format!("Run aborted: {}", e));
                self.status = format!("Run aborted: {}", e);
            }
        }
        self.is_running = false;
    }

    pub fn view(&self) -> Element<'_, Message> {
        let selected = match &self.root {
            Some(path) => path.display().to_string(),
            None => "No directory selected".to_string(),
        };

        let pick_row = row![
            button(text("Select Directory").size(14))
                .on_press_maybe((!self.is_running).then_some(Message::BrowseRoot)),
            text(selected).size(14),
        ]
        .spacing(12);

        let start_enabled = self.root.is_some() && !self.is_running;
        let start_button = button(
            text(if self.is_running { "Converting..." } else { "Start" }).size(14),
        )
        .on_press_maybe(start_enabled.then_some(Message::StartRun));

        let log_panel = container(scrollable(text(&self.log).size(13)).height(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(8);

        let status_bar = text(&self.status).size(14);

        column![pick_row, start_button, log_panel, status_bar]
            .spacing(12)
            .padding(16)
            .into()
    }

    fn append_log(&mut self, message: &str) {
        self.log.push_str(message);
        self.log.push('\n');
    }
}
