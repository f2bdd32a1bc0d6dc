use std::path::PathBuf;

use arboard::Clipboard;
use client_core::{result_view, ClientSettings, ResultDisplay, SelectedFile};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::reducer::SessionState;
use crate::ui::widgets;

const PAGE_TITLE: &str = "DNA Pattern Matching";
const PAGE_DESCRIPTION: &str = "Upload a DNA sequence in a text file to find the best match in our \
database. This application uses advanced algorithms to analyze the sequence and provides a \
detailed analysis, including matching percentage, random match probability (RMP), and other key \
metrics.";

#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    pub settings: ClientSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileSlot {
    Primary,
    Reference,
}

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    settings: ClientSettings,
    session: SessionState,

    // Cached "name (size)" labels, refreshed on each pick.
    primary_summary: Option<String>,
    reference_summary: Option<String>,
}

fn default_upload_dir() -> Option<PathBuf> {
    dirs::document_dir()
        .or_else(dirs::download_dir)
        .or_else(dirs::desktop_dir)
        .or_else(dirs::home_dir)
}

impl DesktopGuiApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            settings: startup.settings,
            session: SessionState::default(),
            primary_summary: None,
            reference_summary: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.session.apply(event);
        }
    }

    fn pick_file(&self, slot: FileSlot) -> Option<PathBuf> {
        let (label, extensions) = match slot {
            FileSlot::Primary => ("DNA sequence", &self.settings.primary_extensions),
            FileSlot::Reference => ("Sequence list", &self.settings.reference_extensions),
        };
        let mut dialog = rfd::FileDialog::new();
        if !extensions.is_empty() {
            dialog = dialog.add_filter(label, extensions.as_slice());
        }
        dialog = dialog.add_filter("All files", &["*"]);
        if let Some(dir) = default_upload_dir() {
            dialog = dialog.set_directory(dir);
        }
        dialog.pick_file()
    }

    fn choose(&mut self, slot: FileSlot) {
        let Some(path) = self.pick_file(slot) else {
            return;
        };
        let file = SelectedFile::from_path(path);
        let summary = Some(widgets::file_summary(&file));
        match slot {
            FileSlot::Primary => {
                self.primary_summary = summary;
                self.session.choose_primary(file);
            }
            FileSlot::Reference => {
                self.reference_summary = summary;
                self.session.choose_reference(Some(file));
            }
        }
    }

    fn copy_result_to_clipboard(&mut self, display: &ResultDisplay) {
        let text = display.to_lines().join("\n");
        let copied = Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
        match copied {
            Ok(()) => self.session.status = "Result copied to clipboard".to_string(),
            Err(err) => self.session.apply(UiEvent::Error(UiError::from_message(
                UiErrorContext::Clipboard,
                format!("could not copy result: {err}"),
            ))),
        }
    }

    fn show_file_row(&mut self, ui: &mut egui::Ui, slot: FileSlot, enabled: bool) {
        let (heading, summary) = match slot {
            FileSlot::Primary => (
                "Upload the DNA Sequence for Matching and Analysis",
                self.primary_summary.clone(),
            ),
            FileSlot::Reference => (
                "Upload DNA Sequence List to be matched against (Optional)",
                self.reference_summary.clone(),
            ),
        };

        ui.label(egui::RichText::new(heading).strong().size(16.0));
        ui.horizontal(|ui| {
            if ui
                .add_enabled(enabled, egui::Button::new("Choose file..."))
                .clicked()
            {
                self.choose(slot);
            }
            match &summary {
                Some(summary) => {
                    ui.label(summary.as_str());
                    if slot == FileSlot::Reference
                        && ui.add_enabled(enabled, egui::Button::new("Clear")).clicked()
                    {
                        self.reference_summary = None;
                        self.session.choose_reference(None);
                    }
                }
                None => {
                    ui.weak("No file chosen");
                }
            }
        });
        ui.add_space(10.0);
    }

    fn show_page(&mut self, ui: &mut egui::Ui) {
        let display = result_view::render(self.session.submission.outcome());
        let submit_enabled = display.submit_enabled();

        ui.add_space(24.0);
        ui.heading(egui::RichText::new(PAGE_TITLE).size(30.0));
        ui.add_space(8.0);
        ui.label(PAGE_DESCRIPTION);
        ui.add_space(16.0);

        if let Some(banner) = self.session.status_banner.clone() {
            if widgets::status_banner(ui, &banner) {
                self.session.dismiss_banner();
            }
            ui.add_space(10.0);
        }

        self.show_file_row(ui, FileSlot::Primary, submit_enabled);
        self.show_file_row(ui, FileSlot::Reference, submit_enabled);

        ui.horizontal(|ui| {
            let label = if submit_enabled { "Submit" } else { "Submitting..." };
            if ui
                .add_enabled(submit_enabled, egui::Button::new(label).min_size(egui::vec2(120.0, 32.0)))
                .clicked()
            {
                self.session.request_submit(&self.cmd_tx);
            }
            if !submit_enabled {
                ui.add(egui::Spinner::new());
            }
        });

        ui.add_space(16.0);
        widgets::result_panel(ui, &display);

        if matches!(display, ResultDisplay::Report { .. }) {
            ui.add_space(8.0);
            if ui.button("Copy result").clicked() {
                self.copy_result_to_clipboard(&display);
            }
        }
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.weak(self.session.status.as_str());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(self.settings.server_url.as_str());
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.set_max_width(600.0);
                        self.show_page(ui);
                    });
                });
        });

        if self.session.submission.is_pending() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }
}
