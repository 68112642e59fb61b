use appliance_energy::config::{self, Config, OutputFormat, ProfileKind, DEFAULT_FAKE_DAYS};
use appliance_energy::models::profile::Profile;
use appliance_energy::services::fake_profile::{self, FakeOptions};
use appliance_energy::services::loader::load_profile;
use appliance_energy::services::report::Report;
use log::{error, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::PathBuf;

#[derive(Debug)]
struct LoadedEnvFile {
    path: PathBuf,
    explicit: bool,
}

fn obtain_profile(cfg: &Config) -> Result<Profile, String> {
    if let Some(path) = cfg.profile_path.as_ref() {
        let profile = load_profile(path).map_err(|e| format!("loading {} failed: {}", path.display(), e))?;
        info!("Loaded profile from {} ({} event(s))", path.display(), profile.events.len());
        return Ok(profile);
    }

    let seed = cfg
        .fake_seed
        .ok_or_else(|| "no profile path or fake seed configured".to_string())?;
    let options = FakeOptions::default();
    Ok(match cfg.profile_kind {
        ProfileKind::Month => fake_profile::seeded_month(seed, &options, DEFAULT_FAKE_DAYS),
        ProfileKind::Day => fake_profile::day_profile(&mut SmallRng::seed_from_u64(seed), &options),
    })
}

pub fn run() -> Result<(), String> {
    // 1) Load config
    let cfg = Config::from_env()?;
    info!(
        "Config loaded (profile={}, kind={:?}, report_day={}, fake_seed={}, output={:?})",
        cfg.profile_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string()),
        cfg.profile_kind,
        cfg.report_day.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
        cfg.fake_seed.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string()),
        cfg.output,
    );

    // 2) Read or generate the profile
    let profile = obtain_profile(&cfg)?;

    // 3) Compute
    let report = match cfg.profile_kind {
        ProfileKind::Day => Report::for_day(&profile),
        ProfileKind::Month => Report::for_month(&profile, cfg.report_day),
    };

    // 4) Render
    let rendered = match cfg.output {
        OutputFormat::Text => report.to_text(&profile),
        OutputFormat::Json => report.to_json().map_err(|e| format!("rendering report failed: {}", e))?,
    };
    println!("{}", rendered.trim_end());

    Ok(())
}

fn configure_env_from_cli() -> Result<Option<LoadedEnvFile>, String> {
    let mut args = std::env::args_os();
    args.next(); // skip program name

    let mut env_file: Option<PathBuf> = None;
    while let Some(arg) = args.next() {
        let path = match arg.to_str() {
            Some("--env-file") => args
                .next()
                .map(PathBuf::from)
                .ok_or_else(|| "`--env-file` requires a path argument".to_string())?,
            Some(s) if s.starts_with("--env-file=") => match &s["--env-file=".len()..] {
                "" => return Err("`--env-file` requires a path argument".to_string()),
                p => PathBuf::from(p),
            },
            Some("--") => break,
            Some(other) => return Err(format!("unrecognised argument: {}", other)),
            None => return Err("argument contains invalid UTF-8".to_string()),
        };
        if env_file.replace(path).is_some() {
            return Err("`--env-file` provided more than once".to_string());
        }
    }

    if let Some(path) = env_file {
        if !path.is_file() {
            return Err(format!("env file not found: {}", path.display()));
        }
        config::load_env_file(&path)?;
        return Ok(Some(LoadedEnvFile { path, explicit: true }));
    }

    let cwd = std::env::current_dir().map_err(|e| format!("unable to read current directory: {}", e))?;
    let default_path = cwd.join(".env");
    if !default_path.is_file() {
        return Ok(None);
    }
    config::load_env_file(&default_path)?;
    Ok(Some(LoadedEnvFile {
        path: default_path,
        explicit: false,
    }))
}

fn main() {
    let loaded_env = match configure_env_from_cli() {
        Ok(info) => info,
        Err(err) => {
            eprintln!("fatal: {}", err);
            std::process::exit(1);
        }
    };

    // Init logging after environment so RUST_LOG from .env is respected.
    let default_filter = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(default_filter)
        .format_timestamp_secs()
        .target(env_logger::Target::Stderr)
        .init();

    if let Some(info) = loaded_env.as_ref() {
        let origin = if info.explicit { "CLI-specified" } else { "default" };
        info!("Environment loaded from {} .env file: {}", origin, info.path.display());
    }

    info!(
        "appliance-energy {} (git {}) starting",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_TIME_GIT_HASH")
    );
    if let Err(e) = run() {
        error!("fatal: {}", e);
        std::process::exit(1);
    }
}
