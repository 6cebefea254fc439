use clap::Parser;
use log::{debug, info, warn};

use flappyhawk_app::cli::Args;
use flappyhawk_app::session;
use flappyhawk_app::AppError;
use flappyhawk_persistence::{settings, RunLog, SettingsStore};

fn main() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let settings_dir = args
        .settings_dir
        .clone()
        .or_else(settings::default_dir)
        .unwrap_or_else(|| {
            warn!("No config directory available, keeping settings in the working directory");
            ".".into()
        });
    let mut settings = SettingsStore::load(&settings_dir);
    session::apply_overrides(&args, &mut settings)?;

    let config = session::build_config(&args, &settings)?;
    info!(
        "Starting {:?} run (seed {}, up to {}s)",
        config.mode, config.seed, args.seconds
    );
    debug!("Config: {}", serde_json::to_string(&config)?);
    let summary = session::play(
        config,
        session::loop_options(&args),
        session::default_controller(&args),
    )?;

    let log = match &args.log_dir {
        Some(dir) => RunLog::in_dir(dir)?,
        None => RunLog::resolve()?,
    };
    let record = session::record_run(summary, &mut settings, &log)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
