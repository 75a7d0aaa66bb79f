use iced::widget::{column, container, scrollable, text};
use iced::{Alignment, Element, Event, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use std::time::Duration;

mod api;
mod error;
mod intake;
mod report;
mod state;
mod ui;

use api::client::Backend;
use api::types::AnalysisResult;
use error::AppError;
use intake::SelectedFile;
use state::session::{Alert, AnalysisView, Phase};
use state::settings::Settings;

/// How long transient alerts stay on screen before auto-dismissing.
const ALERT_TIMEOUT: Duration = Duration::from_secs(5);

/// Main application state
struct ThyroScan {
    /// Persisted client options (backend URL, display variant)
    settings: Settings,
    /// HTTP client for the diagnostic backend
    backend: Backend,
    /// Current phase of the analyze flow (idle / loading / results)
    phase: Phase,
    /// The image currently chosen; reused by the report flow
    selected: Option<SelectedFile>,
    /// Transient message banner, if any
    alert: Option<Alert>,
    /// Bumped per alert so an old dismiss timer can't clear a newer alert
    alert_seq: u64,
    /// Bumped per selection so a stale analyze response can't overwrite a
    /// newer one
    analysis_seq: u64,
    /// A file is being dragged over the window (dropzone highlight)
    file_hovering: bool,
    /// A report request is in flight; disables the download trigger
    generating_report: bool,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked the "Browse Files" button
    BrowsePressed,
    /// A file was dropped onto the window
    FileDropped(PathBuf),
    /// A dragged file entered the window
    FileHovered,
    /// The dragged file left the window without dropping
    FileHoverLeft,
    /// An analyze round trip finished; `seq` identifies which selection it
    /// belongs to
    AnalysisDone {
        seq: u64,
        outcome: Result<AnalysisResult, AppError>,
    },
    /// User clicked the report download trigger
    DownloadReport,
    /// A report round trip finished (path of the saved document on success)
    ReportDone(Result<PathBuf, AppError>),
    /// An alert's dismiss timer fired
    AlertExpired(u64),
}

impl ThyroScan {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load();
        let backend = Backend::new(&settings.backend_url);

        println!("🩺 ThyroScan client ready, backend at {}", settings.backend_url);

        (
            ThyroScan {
                settings,
                backend,
                phase: Phase::Idle,
                selected: None,
                alert: None,
                alert_seq: 0,
                analysis_seq: 0,
                file_hovering: false,
                generating_report: false,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::BrowsePressed => {
                // Show the native file picker dialog
                let picked = FileDialog::new()
                    .set_title("Select a thyroid image")
                    .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "gif", "tiff"])
                    .pick_file();

                match picked {
                    Some(path) => self.handle_selection(vec![path]),
                    None => Task::none(),
                }
            }

            Message::FileDropped(path) => {
                self.file_hovering = false;
                self.handle_selection(vec![path])
            }

            Message::FileHovered => {
                self.file_hovering = true;
                Task::none()
            }

            Message::FileHoverLeft => {
                self.file_hovering = false;
                Task::none()
            }

            Message::AnalysisDone { seq, outcome } => {
                if seq != self.analysis_seq {
                    // A newer file was selected while this request was in
                    // flight; its result would be stale.
                    println!("⏳ Ignoring stale analysis response (seq {})", seq);
                    return Task::none();
                }

                match outcome.and_then(AnalysisView::from_result) {
                    Ok(view) => {
                        println!(
                            "✅ Analysis complete: {} ({})",
                            view.label,
                            api::types::format_percent(view.percent)
                        );
                        self.phase = Phase::Results(view);

                        // Bring the results panel into view, like the
                        // original's smooth scrollIntoView
                        scrollable::snap_to(
                            main_scroll_id(),
                            scrollable::RelativeOffset::END,
                        )
                    }
                    Err(err) => {
                        eprintln!("❌ Analysis failed: {}", err.detail());
                        self.phase = Phase::Idle;
                        self.show_error(&err)
                    }
                }
            }

            Message::DownloadReport => {
                if self.generating_report {
                    return Task::none();
                }

                let Some(file) = self.selected.clone() else {
                    return self.show_error(&AppError::NoFileSelected);
                };

                self.generating_report = true;
                println!("📄 Generating report for {}", file.name);

                let backend = self.backend.clone();
                let strategy = self.settings.filename_strategy;

                Task::perform(
                    async move {
                        let bytes = backend.report(&file).await?;
                        report::save_report(bytes, report::download_dir(), strategy).await
                    },
                    Message::ReportDone,
                )
            }

            Message::ReportDone(outcome) => {
                // The trigger is restored on every outcome
                self.generating_report = false;

                match outcome {
                    Ok(path) => {
                        println!("📄 Report saved to {}", path.display());
                        self.show_info("Clinical report downloaded successfully.")
                    }
                    Err(err) => {
                        eprintln!("❌ Report failed: {}", err.detail());
                        self.show_error(&err)
                    }
                }
            }

            Message::AlertExpired(seq) => {
                if self.alert.as_ref().map(|a| a.seq) == Some(seq) {
                    self.alert = None;
                }
                Task::none()
            }
        }
    }

    /// Shared selection handler for both intake paths (drop and picker).
    ///
    /// Takes the first file of the list, validates it, and dispatches the
    /// analyze request. Validation failures abort before any request is
    /// sent and leave the current phase untouched.
    fn handle_selection(&mut self, paths: Vec<PathBuf>) -> Task<Message> {
        let file = match SelectedFile::from_paths(&paths) {
            Ok(file) => file,
            Err(AppError::NoFileSelected) => return Task::none(),
            Err(err) => return self.show_error(&err),
        };

        println!("🔬 Analyzing {}", file.name);

        // Reset UI: hide prior results and alerts, show the loader
        self.selected = Some(file.clone());
        self.alert = None;
        self.phase = Phase::Loading;

        self.analysis_seq += 1;
        let seq = self.analysis_seq;
        let backend = self.backend.clone();

        Task::perform(
            async move { backend.analyze(&file).await },
            move |outcome| Message::AnalysisDone { seq, outcome },
        )
    }

    /// Show an error alert and schedule its dismissal.
    fn show_error(&mut self, err: &AppError) -> Task<Message> {
        self.alert_seq += 1;
        self.alert = Some(Alert::error(err, self.alert_seq));
        self.dismiss_later(self.alert_seq)
    }

    /// Show an info alert and schedule its dismissal.
    fn show_info(&mut self, message: &str) -> Task<Message> {
        self.alert_seq += 1;
        self.alert = Some(Alert::info(message, self.alert_seq));
        self.dismiss_later(self.alert_seq)
    }

    fn dismiss_later(&self, seq: u64) -> Task<Message> {
        Task::perform(
            async move {
                tokio::time::sleep(ALERT_TIMEOUT).await;
                seq
            },
            Message::AlertExpired,
        )
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let mut content = column![
            text("Thyroid Cancer Detection System").size(34),
            text("Upload a thyroid medical image (ultrasound/pathology) for AI-powered cancer detection")
                .size(16)
                .color(ui::MUTED),
            ui::dropzone::dropzone(self.file_hovering),
        ]
        .spacing(24)
        .padding(40)
        .align_x(Alignment::Center)
        .max_width(900);

        if let Some(alert) = &self.alert {
            content = content.push(ui::results::alert_banner(alert));
        }

        if self.phase.is_loading() {
            content = content.push(ui::results::loader());
        }

        if let Some(view) = self.phase.results() {
            content = content.push(ui::results::results_panel(
                view,
                self.settings.include_raw_score,
                self.generating_report,
            ));
        }

        scrollable(
            container(content)
                .width(Length::Fill)
                .center_x(Length::Fill),
        )
        .id(main_scroll_id())
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    /// Listen for window-level drag-and-drop events
    fn subscription(&self) -> Subscription<Message> {
        iced::event::listen_with(|event, _status, _window| match event {
            Event::Window(iced::window::Event::FileDropped(path)) => {
                Some(Message::FileDropped(path))
            }
            Event::Window(iced::window::Event::FileHovered(_)) => Some(Message::FileHovered),
            Event::Window(iced::window::Event::FilesHoveredLeft) => {
                Some(Message::FileHoverLeft)
            }
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    iced::application(
        "Thyroid Cancer Detection System",
        ThyroScan::update,
        ThyroScan::view,
    )
    .subscription(ThyroScan::subscription)
    .theme(ThyroScan::theme)
    .centered()
    .run_with(ThyroScan::new)
}

fn main_scroll_id() -> scrollable::Id {
    scrollable::Id::new("main-scroll")
}

#[cfg(test)]
mod tests {
    use super::*;
    use state::session::TINY_PNG_B64;

    fn test_app() -> ThyroScan {
        ThyroScan {
            settings: Settings::default(),
            backend: Backend::new("http://127.0.0.1:8000"),
            phase: Phase::Idle,
            selected: None,
            alert: None,
            alert_seq: 0,
            analysis_seq: 0,
            file_hovering: false,
            generating_report: false,
        }
    }

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            original_image: TINY_PNG_B64.to_string(),
            gradcam_image: Some(TINY_PNG_B64.to_string()),
            label: "Malignant (Cancerous)".to_string(),
            is_malignant: true,
            score: Some(0.975),
            percent: 97.5,
            class_id: 1,
        }
    }

    fn alert_message(app: &ThyroScan) -> Option<&str> {
        app.alert.as_ref().map(|a| a.message.as_str())
    }

    #[test]
    fn test_non_image_rejected_before_any_request() {
        let mut app = test_app();
        let _ = app.update(Message::FileDropped(PathBuf::from("/tmp/notes.txt")));

        // Never left Idle, so no analyze task was dispatched
        assert!(!app.phase.is_loading());
        assert!(app.selected.is_none());
        assert_eq!(app.analysis_seq, 0);
        assert_eq!(
            alert_message(&app),
            Some("Please upload a valid medical image file.")
        );
    }

    #[test]
    fn test_valid_selection_enters_loading() {
        let mut app = test_app();
        let _ = app.update(Message::FileDropped(PathBuf::from("/scans/nodule.png")));

        assert!(app.phase.is_loading());
        assert_eq!(app.selected.as_ref().unwrap().name, "nodule.png");
        assert!(app.alert.is_none());
        assert_eq!(app.analysis_seq, 1);
    }

    #[test]
    fn test_successful_analysis_renders_results() {
        let mut app = test_app();
        let _ = app.update(Message::FileDropped(PathBuf::from("/scans/nodule.png")));

        let _ = app.update(Message::AnalysisDone {
            seq: app.analysis_seq,
            outcome: Ok(sample_result()),
        });

        let view = app.phase.results().expect("results should be shown");
        assert!(view.is_malignant);
        assert_eq!(api::types::format_percent(view.percent), "97.50%");
        assert!(view.gradcam.is_some());
    }

    #[test]
    fn test_failed_analysis_hides_loader_and_alerts() {
        let mut app = test_app();
        let _ = app.update(Message::FileDropped(PathBuf::from("/scans/nodule.png")));

        let _ = app.update(Message::AnalysisDone {
            seq: app.analysis_seq,
            outcome: Err(AppError::Analysis("analyze returned status 503".into())),
        });

        assert!(!app.phase.is_loading());
        assert!(app.phase.results().is_none());
        assert_eq!(
            alert_message(&app),
            Some("Diagnostic analysis failed. Please try again.")
        );
    }

    #[test]
    fn test_stale_analysis_response_is_discarded() {
        let mut app = test_app();
        let _ = app.update(Message::FileDropped(PathBuf::from("/scans/first.png")));
        let first_seq = app.analysis_seq;
        let _ = app.update(Message::FileDropped(PathBuf::from("/scans/second.png")));

        // The slow response for the first file arrives after the second
        // selection; it must not overwrite the newer flow.
        let _ = app.update(Message::AnalysisDone {
            seq: first_seq,
            outcome: Ok(sample_result()),
        });

        assert!(app.phase.is_loading());
        assert_eq!(app.selected.as_ref().unwrap().name, "second.png");
    }

    #[test]
    fn test_new_selection_resets_results_and_alerts() {
        let mut app = test_app();
        let _ = app.update(Message::FileDropped(PathBuf::from("/scans/first.png")));
        let _ = app.update(Message::AnalysisDone {
            seq: app.analysis_seq,
            outcome: Ok(sample_result()),
        });
        assert!(app.phase.results().is_some());

        let _ = app.update(Message::FileDropped(PathBuf::from("/scans/second.png")));

        assert!(app.phase.is_loading());
        assert!(app.phase.results().is_none());
        assert!(app.alert.is_none());
    }

    #[test]
    fn test_drop_and_picker_selection_are_equivalent() {
        // The drop path goes through the FileDropped message; the picker
        // path calls the same selection handler directly.
        let mut dropped = test_app();
        let _ = dropped.update(Message::FileDropped(PathBuf::from("/scans/nodule.png")));

        let mut picked = test_app();
        let _ = picked.handle_selection(vec![PathBuf::from("/scans/nodule.png")]);

        assert_eq!(dropped.selected, picked.selected);
        assert!(dropped.phase.is_loading() && picked.phase.is_loading());

        let _ = dropped.update(Message::AnalysisDone {
            seq: dropped.analysis_seq,
            outcome: Ok(sample_result()),
        });
        let _ = picked.update(Message::AnalysisDone {
            seq: picked.analysis_seq,
            outcome: Ok(sample_result()),
        });

        let a = dropped.phase.results().unwrap();
        let b = picked.phase.results().unwrap();
        assert_eq!(a.label, b.label);
        assert_eq!(a.percent, b.percent);
        assert_eq!(a.class_id, b.class_id);
    }

    #[test]
    fn test_report_requires_a_selected_file() {
        let mut app = test_app();
        let _ = app.update(Message::DownloadReport);

        assert!(!app.generating_report);
        assert_eq!(
            alert_message(&app),
            Some("No file available for report generation.")
        );
    }

    #[test]
    fn test_report_trigger_restored_on_both_outcomes() {
        let mut app = test_app();
        let _ = app.update(Message::FileDropped(PathBuf::from("/scans/nodule.png")));

        let _ = app.update(Message::DownloadReport);
        assert!(app.generating_report);

        let _ = app.update(Message::ReportDone(Ok(PathBuf::from(
            "/downloads/Thyroid_Report_1700000000000.docx",
        ))));
        assert!(!app.generating_report);
        assert_eq!(
            alert_message(&app),
            Some("Clinical report downloaded successfully.")
        );

        let _ = app.update(Message::DownloadReport);
        assert!(app.generating_report);

        let _ = app.update(Message::ReportDone(Err(AppError::Report(
            "report returned status 500".into(),
        ))));
        assert!(!app.generating_report);
        assert_eq!(alert_message(&app), Some("Report generation failed."));
    }

    #[test]
    fn test_second_download_ignored_while_generating() {
        let mut app = test_app();
        let _ = app.update(Message::FileDropped(PathBuf::from("/scans/nodule.png")));
        let _ = app.update(Message::DownloadReport);
        let seq_before = app.alert_seq;

        let _ = app.update(Message::DownloadReport);

        assert!(app.generating_report);
        assert_eq!(app.alert_seq, seq_before);
    }

    #[test]
    fn test_alert_dismissal_ignores_stale_timers() {
        let mut app = test_app();
        let _ = app.show_error(&AppError::InvalidFileType);
        let first = app.alert_seq;
        let _ = app.show_info("Clinical report downloaded successfully.");
        let second = app.alert_seq;

        // The first alert's timer fires after it was already replaced
        let _ = app.update(Message::AlertExpired(first));
        assert!(app.alert.is_some());

        let _ = app.update(Message::AlertExpired(second));
        assert!(app.alert.is_none());
    }

    #[test]
    fn test_hover_toggles_dropzone_highlight() {
        let mut app = test_app();
        let _ = app.update(Message::FileHovered);
        assert!(app.file_hovering);
        let _ = app.update(Message::FileHoverLeft);
        assert!(!app.file_hovering);
    }
}
