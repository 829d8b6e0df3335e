use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use sensor_monitor::app::MonitorApp;
use sensor_monitor::buffer::SampleBuffer;
use sensor_monitor::config::{AppConfig, DEFAULT_CONFIG_PATH};
use sensor_monitor::context::MonitorContext;
use sensor_monitor::reader::SampleReader;
use sensor_monitor::source::SerialLineSource;
use sensor_monitor::threshold::ThresholdPolicy;

#[derive(Parser, Debug)]
#[command(
    name = "sensor_monitor",
    about = "Serial sensor monitor with threshold display and strip-chart"
)]
struct Cli {
    /// Serial port to read from (overrides the config file)
    #[arg(long)]
    port: Option<String>,

    /// Baud rate (overrides the config file)
    #[arg(long)]
    baud: Option<u32>,

    /// Path to the JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => AppConfig::load_from_file(path),
        None => AppConfig::load_from_file(DEFAULT_CONFIG_PATH),
    };
    if let Some(port) = cli.port {
        config.serial.port = port;
    }
    if let Some(baud) = cli.baud {
        config.serial.baud_rate = baud;
    }

    info!(
        "[Main] opening {} at {} baud",
        config.serial.port, config.serial.baud_rate
    );
    let source = SerialLineSource::open(
        &config.serial.port,
        config.serial.baud_rate,
        config.read_timeout(),
    )
    .with_context(|| format!("failed to open serial port {}", config.serial.port))?;

    let (reader, samples) = SampleReader::spawn(source, config.buffer.channel_capacity);
    let context = MonitorContext::new(
        SampleBuffer::new(config.buffer.capacity),
        ThresholdPolicy::new(config.display.default_threshold),
        samples,
    );
    let app = MonitorApp::new(context, reader, &config.display);

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([800.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Sensor Monitor",
        native_options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|err| anyhow::anyhow!("UI loop failed: {err}"))
}
