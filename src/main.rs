#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use tracing_subscriber::prelude::*;

use stage_progress::app::config::StagedProgressConfig;

const APP_NAME: &str = "stage-progress";

/// `<data_dir>/logs`, created on demand
fn log_dir() -> Option<PathBuf> {
    let dir = directories::ProjectDirs::from("com", "", APP_NAME)?
        .data_dir()
        .join("logs");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

fn init_logging() {
    let Some(log_path) = log_dir().map(|dir| dir.join("stage-progress.log")) else {
        eprintln!("Could not create log directory, logging disabled");
        return;
    };

    let file = match OpenOptions::new().append(true).create(true).open(&log_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to open log file {:?}: {}", log_path, e);
            return;
        }
    };

    // RUST_LOG overrides the default levels
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("stage_progress=debug,eframe=info,egui=warn,wgpu=warn")
    });

    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(move || {
                file.try_clone()
                    .expect("Failed to clone log file handle")
            })
            .with_ansi(false),
    );

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return;
    }

    // eframe and winit log through the `log` crate
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize log-to-tracing bridge: {}", e);
    }

    tracing::info!("Logging initialized to: {:?}", log_path);
}

/// Record panics in the log and in `crash.log`, then defer to the default hook
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let payload = panic_info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("unknown panic");
        let location = panic_info
            .location()
            .map(ToString::to_string)
            .unwrap_or_else(|| "unknown location".to_string());

        tracing::error!(%location, "Panic: {}", message);

        if let Some(crash_log) = log_dir().map(|dir| dir.join("crash.log")) {
            let entry = format!(
                "=== {} {} {} ({}) ===\n{} at {}\n{}\n",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                APP_NAME,
                env!("CARGO_PKG_VERSION"),
                env!("GIT_COMMIT"),
                message,
                location,
                std::backtrace::Backtrace::force_capture()
            );
            if let Ok(mut file) = OpenOptions::new().append(true).create(true).open(&crash_log) {
                let _ = file.write_all(entry.as_bytes());
            }
        }

        default_hook(panic_info);
    }));
}

/// Config from the first CLI argument, else the standard location
fn load_config(args: &[String]) -> StagedProgressConfig {
    let path = args
        .get(1)
        .map(PathBuf::from)
        .or_else(StagedProgressConfig::default_path);

    let Some(path) = path else {
        tracing::warn!("No config location available, using defaults");
        return StagedProgressConfig::default();
    };

    match StagedProgressConfig::load_or_default(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{:#}", e);
            StagedProgressConfig::default()
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    setup_panic_handler();

    let args: Vec<String> = std::env::args().collect();
    tracing::info!(
        "stage-progress {} ({}) starting, args: {:?}",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_COMMIT"),
        args
    );

    let config = load_config(&args);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 220.0])
            .with_min_inner_size([300.0, 160.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Stage Progress",
        native_options,
        Box::new(|cc| Ok(Box::new(stage_progress::DemoApp::new(cc, config)))),
    )?;

    Ok(())
}
