//! Small rendering helpers shared by the page sections.

use client_core::{ResultDisplay, SelectedFile};
use eframe::egui;

use crate::controller::reducer::{StatusBanner, StatusBannerSeverity};

pub fn human_readable_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes < KB {
        return format!("{bytes} B");
    }
    if bytes < MB {
        return format_scaled_unit(bytes, KB, "KB");
    }
    if bytes < GB {
        return format_scaled_unit(bytes, MB, "MB");
    }
    format_scaled_unit(bytes, GB, "GB")
}

fn format_scaled_unit(bytes: u64, unit_size: u64, unit_label: &str) -> String {
    let value = bytes as f64 / unit_size as f64;
    let value_text = format!("{value:.1}");
    let compact_value = value_text.strip_suffix(".0").unwrap_or(&value_text);
    format!("{compact_value} {unit_label}")
}

/// "name (size)" for a chosen file, or just the name when the size is unknown.
pub fn file_summary(file: &SelectedFile) -> String {
    match file.size_hint() {
        Some(size) => format!("{} ({})", file.name(), human_readable_bytes(size)),
        None => file.name().to_string(),
    }
}

/// Returns `true` when the user dismissed the banner.
pub fn status_banner(ui: &mut egui::Ui, banner: &StatusBanner) -> bool {
    let (fill, stroke) = match banner.severity {
        StatusBannerSeverity::Warning => (
            egui::Color32::from_rgb(104, 86, 38),
            egui::Stroke::new(1.0, egui::Color32::from_rgb(182, 150, 70)),
        ),
        StatusBannerSeverity::Error => (
            egui::Color32::from_rgb(111, 53, 53),
            egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
        ),
    };

    let mut dismissed = false;
    egui::Frame::NONE
        .fill(fill)
        .stroke(stroke)
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Dismiss").clicked() {
                        dismissed = true;
                    }
                });
            });
        });
    dismissed
}

pub fn result_panel(ui: &mut egui::Ui, display: &ResultDisplay) {
    match display {
        ResultDisplay::Empty => {}
        ResultDisplay::Busy => {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new());
                ui.label(client_core::result_view::BUSY_TEXT);
            });
        }
        ResultDisplay::Error { message } => {
            ui.label(
                egui::RichText::new(format!("Error: {message}"))
                    .heading()
                    .color(ui.visuals().error_fg_color),
            );
        }
        ResultDisplay::Report {
            best_match,
            analysis,
        } => {
            for group in [best_match, analysis] {
                ui.add_space(8.0);
                ui.label(egui::RichText::new(format!("{}:", group.title)).heading());
                egui::Grid::new(("result_group", group.title))
                    .num_columns(2)
                    .striped(true)
                    .show(ui, |ui| {
                        for field in &group.fields {
                            ui.label(egui::RichText::new(field.label).strong());
                            ui.label(field.value.as_str());
                            ui.end_row();
                        }
                    });
            }
        }
    }
}
