// MonitorApp - egui front end
//
// Single window: the numeric readout (red when the latest value exceeds
// the threshold), the threshold entry with its commit button, the rolling
// strip-chart, and the reset action. Each frame runs one refresh tick and
// re-arms the next repaint after the configured interval, so ticks are
// periodic and never overlap.

use std::time::Duration;

use eframe::egui;
use egui_plot::{Line, Plot, PlotBounds, PlotPoints};

use crate::config::DisplayConfig;
use crate::context::MonitorContext;
use crate::display::DisplayState;
use crate::reader::ReaderHandle;

pub struct MonitorApp {
    context: MonitorContext,
    display: DisplayState,
    threshold_entry: String,
    refresh_interval: Duration,
    value_floor: i32,
    value_ceiling: i32,
    // Kept alive for the window's lifetime; dropping it stops the reader
    // thread and with it the serial connection
    _reader: ReaderHandle,
}

impl MonitorApp {
    pub fn new(context: MonitorContext, reader: ReaderHandle, display: &DisplayConfig) -> Self {
        let threshold_entry = context.threshold().to_string();
        Self {
            context,
            display: DisplayState::new(),
            threshold_entry,
            refresh_interval: Duration::from_millis(display.refresh_interval_ms),
            value_floor: display.value_floor,
            value_ceiling: display.value_ceiling,
            _reader: reader,
        }
    }

    fn value_label(&self) -> egui::RichText {
        let text = egui::RichText::new(format!(
            "Value: {}",
            self.display.latest().unwrap_or(0)
        ))
        .size(24.0);
        if self.display.is_out_of_range() {
            text.color(egui::Color32::RED)
        } else {
            text
        }
    }

    fn show_chart(&self, ui: &mut egui::Ui) {
        let series = self.display.series();
        let points: PlotPoints = series
            .iter()
            .enumerate()
            .map(|(i, &value)| [i as f64, value as f64])
            .collect();

        Plot::new("samples")
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                // Fixed vertical range, horizontal range tracking the
                // series length
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [0.0, self.value_floor as f64],
                    [series.len().max(1) as f64, self.value_ceiling as f64],
                ));
                plot_ui.line(Line::new(points));
            });
    }
}

impl eframe::App for MonitorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.context.tick(&mut self.display);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(self.value_label());
            });

            ui.horizontal(|ui| {
                ui.label("Threshold:");
                ui.add(egui::TextEdit::singleline(&mut self.threshold_entry).desired_width(64.0));
                if ui.button("Set").clicked() {
                    // Invalid input is rejected silently, keeping the
                    // prior threshold
                    self.context.set_threshold(&self.threshold_entry);
                }
            });

            self.show_chart(ui);

            if ui.button("Reset").clicked() {
                self.context.reset(&mut self.display);
            }
        });

        ctx.request_repaint_after(self.refresh_interval);
    }
}
