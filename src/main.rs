//! ErrorLookup: describe Windows error codes using the message tables of
//! system modules.
//!
//! Entry point: initialises structured logging and launches the eframe
//! application window.

// Hide the console window in release builds on Windows.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod app_actions;
mod app_update;
mod core;
mod export;
mod ui;
mod util;

use std::path::{Path, PathBuf};

use tracing_subscriber::Layer as _;

use app::ErrorLookupApp;
use util::constants;

#[cfg(windows)]
mod single_instance {
    use windows::core::w;
    use windows::Win32::Foundation::{CloseHandle, GetLastError, ERROR_ALREADY_EXISTS, HANDLE};
    use windows::Win32::System::Threading::CreateMutexW;

    /// Holds the single-instance mutex for the lifetime of the process.
    pub struct SingleInstanceGuard {
        handle: HANDLE,
    }

    impl Drop for SingleInstanceGuard {
        fn drop(&mut self) {
            unsafe {
                let _ = CloseHandle(self.handle);
            }
        }
    }

    /// Returns `Some(guard)` for the first instance, `None` if another
    /// instance already holds the mutex.
    pub fn acquire() -> Option<SingleInstanceGuard> {
        let handle = unsafe { CreateMutexW(None, true, w!("Local\\ErrorLookup_SingleInstance")) };
        match handle {
            Ok(h) => {
                if unsafe { GetLastError() } == ERROR_ALREADY_EXISTS {
                    unsafe {
                        let _ = CloseHandle(h);
                    }
                    None
                } else {
                    Some(SingleInstanceGuard { handle: h })
                }
            }
            Err(_) => None,
        }
    }

    pub fn notify_already_running() {
        use windows::Win32::UI::WindowsAndMessaging::{MessageBoxW, MB_ICONINFORMATION, MB_OK};
        unsafe {
            MessageBoxW(
                None,
                w!("ErrorLookup is already running."),
                w!("ErrorLookup"),
                MB_OK | MB_ICONINFORMATION,
            );
        }
    }
}

fn main() -> eframe::Result<()> {
    #[cfg(windows)]
    let _instance_guard = match single_instance::acquire() {
        Some(guard) => guard,
        None => {
            single_instance::notify_already_running();
            return Ok(());
        }
    };

    // Dual-layer logging: stderr (env-controlled) + file (always debug).
    // The file log lives at %LOCALAPPDATA%\ErrorLookup\logs\errorlookup.log.
    let log_dir = init_log_dir();
    init_logging(&log_dir);

    tracing::info!("{} v{} starting", constants::APP_NAME, constants::APP_VERSION);
    if let Some(dir) = &log_dir {
        tracing::info!("Log file: {}", dir.join(constants::LOG_FILE_NAME).display());
    }

    // Parse the bundled database before run_native() so the creator
    // closure is trivial and the first frame paints immediately.
    let icon = load_app_icon();
    let pre_init = app::PreInitState::build();

    let mut viewport = egui::ViewportBuilder::default()
        .with_title(format!("{} v{}", constants::APP_NAME, constants::APP_VERSION))
        .with_inner_size([760.0, 460.0])
        .with_min_inner_size([480.0, 300.0]);

    if let Some(icon) = icon {
        viewport = viewport.with_icon(icon);
    }

    let options = eframe::NativeOptions {
        viewport,
        persist_window: true,
        ..Default::default()
    };

    eframe::run_native(
        constants::APP_NAME,
        options,
        Box::new(move |cc| Ok(Box::new(ErrorLookupApp::from_pre_init(cc, pre_init)))),
    )
}

/// `%LOCALAPPDATA%\ErrorLookup\logs`, created on demand, with an
/// oversized log moved aside. `None` means stderr-only logging.
fn init_log_dir() -> Option<PathBuf> {
    let log_dir = PathBuf::from(std::env::var_os("LOCALAPPDATA")?)
        .join(constants::APP_DATA_DIR)
        .join(constants::LOG_DIR);
    std::fs::create_dir_all(&log_dir).ok()?;
    rotate_log(&log_dir);
    Some(log_dir)
}

fn rotate_log(log_dir: &Path) {
    let current = log_dir.join(constants::LOG_FILE_NAME);
    let too_big = std::fs::metadata(&current)
        .map(|m| m.len() > constants::MAX_LOG_FILE_SIZE)
        .unwrap_or(false);
    if too_big {
        if let Err(e) = std::fs::rename(&current, log_dir.join(constants::LOG_FILE_BACKUP_NAME)) {
            eprintln!("log rotation failed: {e}");
        }
    }
}

/// stderr honours `RUST_LOG` (default `info`); the file, when it can be
/// opened, always records `debug`.
fn init_logging(log_dir: &Option<PathBuf>) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        );

    let file_layer = log_dir
        .as_ref()
        .and_then(|dir| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join(constants::LOG_FILE_NAME))
                .ok()
        })
        .map(|file| {
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .with_filter(EnvFilter::new("debug"))
        });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();
}

/// Window icon decoded from the ICO that `build.rs` generates.
fn load_app_icon() -> Option<std::sync::Arc<egui::IconData>> {
    static ICO_BYTES: &[u8] = include_bytes!("../assets/icon.ico");

    let png = largest_ico_image(ICO_BYTES)?;
    let rgba = image::load_from_memory(png).ok()?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Some(std::sync::Arc::new(egui::IconData {
        rgba: rgba.into_raw(),
        width,
        height,
    }))
}

/// Image data of the largest entry in an ICO file. Entries whose data lies
/// outside the file are ignored.
fn largest_ico_image(ico: &[u8]) -> Option<&[u8]> {
    let count = usize::from(u16::from_le_bytes([*ico.get(4)?, *ico.get(5)?]));
    let entries = ico.get(6..6 + count * 16)?;

    entries
        .chunks_exact(16)
        .filter_map(|e| {
            // A stored dimension of 0 means 256.
            let side = |b: u8| if b == 0 { 256 } else { u32::from(b) };
            let area = side(e[0]) * side(e[1]);
            let size = u32::from_le_bytes([e[8], e[9], e[10], e[11]]) as usize;
            let offset = u32::from_le_bytes([e[12], e[13], e[14], e[15]]) as usize;
            let data = ico.get(offset..offset.checked_add(size)?)?;
            Some((area, data))
        })
        .max_by_key(|(area, _)| *area)
        .map(|(_, data)| data)
}
