// YouTube Downloader - main.rs
//
// Command-line entry point. Handles:
// 1. CLI argument parsing
// 2. App-data folder resolution and config.toml loading
// 3. Logging initialisation (debug flag, config level, optional log file)
// 4. Dispatch to the tool, platform and download-preflight operations

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use ytdownloader::app::plan::DownloadPlanner;
use ytdownloader::app::settings::{self, Settings, SettingsStore};
use ytdownloader::app::tool::ToolAvailability;
use ytdownloader::platform::{self, identity::Platform, launch, paths};
use ytdownloader::util::{self, error::Result};

/// YouTube Downloader - media tool status, platform paths and download
/// preflight.
#[derive(Parser, Debug)]
#[command(name = "ytdownloader", version, about)]
struct Cli {
    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show whether FFmpeg is installed and its version.
    Status,

    /// List the quality presets available with the current tool status.
    Formats,

    /// Show the platform, well-known folders and terminal launcher.
    Paths,

    /// Open a folder in the file manager, or a file with its default app.
    Open {
        path: PathBuf,

        /// Open as a file rather than revealing a folder.
        #[arg(long)]
        file: bool,
    },

    /// Open the FFmpeg installation guide in the browser.
    Guide,

    /// Print a filesystem-safe version of a name.
    Sanitize { name: String },

    /// Validate a download request and print the yt-dlp arguments.
    Plan {
        url: String,

        /// Quality preset (defaults to the last one used).
        #[arg(short = 'q', long)]
        quality: Option<String>,

        /// Output folder (defaults to the saved download folder).
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // config.toml decides how logging is set up, so the app-data folder is
    // resolved first and any fallback is reported once logging is running.
    let app_data_result = paths::try_ensure_folder(paths::app_data_folder());
    let app_data = app_data_result
        .as_ref()
        .map(PathBuf::clone)
        .unwrap_or_else(|_| PathBuf::from(util::constants::FALLBACK_APP_DATA_DIR));
    let (config, config_warnings) = platform::config::load_config(&app_data);

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    tracing::info!(
        version = util::constants::APP_VERSION,
        platform = %Platform::current(),
        debug = cli.debug,
        "{} starting",
        util::constants::APP_NAME
    );
    if let Err(e) = &app_data_result {
        paths::log_app_data_fallback(e);
    }
    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    let mut tool = ToolAvailability::from_config(&config);

    match run(cli.command, &mut tool, &app_data) {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, tool: &mut ToolAvailability, app_data: &Path) -> Result<ExitCode> {
    match command {
        Command::Status => {
            println!("{}", tool.status_text());
            println!("colour: {}", tool.status_color().as_str());
            if !tool.is_available(false) {
                println!();
                println!("{}", tool.warning_message());
            }
        }

        Command::Formats => {
            for option in tool.supported_formats() {
                println!("{:<8} {}", option.code, option.label);
            }
        }

        Command::Paths => {
            let app_data_folder = paths::app_data_folder()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(unavailable)".to_string());
            println!("platform:        {}", Platform::current());
            println!("download folder: {}", paths::default_download_folder().display());
            println!("app data folder: {app_data_folder}");
            println!("in use:          {}", app_data.display());
            println!("packaged:        {}", paths::is_packaged_executable());
            println!(
                "terminal:        {}",
                launch::terminal_command().unwrap_or("(none)")
            );
        }

        Command::Open { path, file } => {
            let opened = if file {
                launch::open_file(&path)
            } else {
                launch::open_folder(&path)
            };
            if !opened {
                eprintln!("Could not open '{}'", path.display());
                return Ok(ExitCode::FAILURE);
            }
        }

        Command::Guide => {
            if !tool.open_installation_guide() {
                eprintln!("Could not open a browser. Visit: {}", tool.guide_url());
                return Ok(ExitCode::FAILURE);
            }
        }

        Command::Sanitize { name } => {
            println!("{}", paths::safe_filename(&name));
        }

        Command::Plan {
            url,
            quality,
            output,
        } => {
            let mut store =
                SettingsStore::load(settings::settings_path(app_data), Settings::default());
            let quality = quality.unwrap_or_else(|| store.settings().last_quality.clone());
            let output = output.unwrap_or_else(|| store.settings().output_path.clone());

            let plan = DownloadPlanner::new(tool, store.settings().cookie_options()).plan(
                &url,
                &quality,
                &output.to_string_lossy(),
            )?;

            if let Some(warning) = &plan.tool_warning {
                eprintln!("{warning}");
                eprintln!();
            }
            println!("video id: {}", plan.video_id);
            println!("quality:  {}", plan.quality.label());
            println!(
                "output:   {} ({})",
                plan.output_dir.display(),
                plan.output_dir_status.message()
            );
            println!("yt-dlp {}", plan.ytdlp_args.join(" "));

            let code = plan.quality.code().to_string();
            if let Err(e) = store.update(|s| s.last_quality = code, true) {
                tracing::warn!(error = %e, "Could not save last used quality");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
