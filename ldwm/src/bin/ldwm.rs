//! Starts the ldwm window manager on the X display named by `DISPLAY`.

use clap::Parser;
use ldwm_core::Manager;
use std::process::ExitCode;
use xlib_display_server::{XlibDisplayServer, XlibWindowHandle};

const GIT_HASH: &str = git_version::git_version!(fallback = "unknown");

#[derive(Debug, Parser)]
#[command(about, disable_version_flag = true)]
struct LdwmCli {
    /// Print the version and exit
    #[arg(short, long)]
    version: bool,

    /// Check the configuration file and exit
    #[arg(long)]
    check: bool,

    /// Print more details while checking
    #[arg(long, requires = "check")]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = LdwmCli::parse();

    if cli.version {
        println!("ldwm-{} ({GIT_HASH})", ldwm_core::VERSION);
        return ExitCode::SUCCESS;
    }

    if cli.check {
        return check(cli.verbose);
    }

    let _log_guard = ldwm::logging::setup_logging();
    tracing::info!("ldwm-{} booting...", ldwm_core::VERSION);

    let config = ldwm::load();

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(err) => {
            eprintln!("ldwm: couldn't init Tokio runtime: {err}");
            return ExitCode::FAILURE;
        }
    };
    let _rt_guard = rt.enter();

    let mut manager =
        match Manager::<XlibWindowHandle, ldwm::Config, XlibDisplayServer>::new(config) {
            Ok(manager) => manager,
            Err(err) => {
                tracing::error!("Could not start: {}", err);
                eprintln!("ldwm: {err}");
                return ExitCode::FAILURE;
            }
        };

    manager.register_child_hook();
    rt.block_on(manager.start_event_loop());
    tracing::info!("Completed");
    ExitCode::SUCCESS
}

fn check(verbose: bool) -> ExitCode {
    println!("\x1b[0;94m::\x1b[0m ldwm version: {}", ldwm_core::VERSION);
    println!("\x1b[0;94m::\x1b[0m ldwm git hash: {GIT_HASH}");
    println!("\x1b[0;94m::\x1b[0m Loading configuration . . .");

    let loaded = ldwm::config_path().and_then(|path| {
        if verbose {
            println!("    Reading {}", path.display());
        }
        ldwm::load_from_file(&path)
    });
    let config = match loaded {
        Ok(config) => {
            println!("\x1b[0;92m    -> Configuration loaded OK \x1b[0m");
            config
        }
        Err(err) => {
            println!("\x1b[1;91mERROR:\x1b[0m\x1b[1m Configuration failed. Reason: {err:?}\x1b[0m");
            return ExitCode::FAILURE;
        }
    };
    if verbose {
        println!("{config:#?}");
    }

    if config.check(verbose) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
