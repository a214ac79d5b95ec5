// Ubermap CLI
// Grabs one keyboard and runs the navigation/pointer layers on it

use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;

use ubermap_core::{
    list_keyboards, resolve_device_path, AcquireOptions, Config, DeviceAllowList, DeviceHandle,
    EventLoop, MappingTable, MonotonicClock, Preset, Translator,
};

/// Home-row navigation and pointer layers for any Linux keyboard
#[derive(Parser, Debug)]
#[command(name = "ubermap")]
#[command(version)]
#[command(about = "Home-row navigation and pointer layers for any Linux keyboard", long_about = None)]
struct Args {
    /// Input device path or keyboard name
    #[arg(short, long, value_name = "PATH|NAME")]
    device: Option<String>,

    /// TOML configuration file (default: ~/.config/ubermap/config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Built-in mapping to start from
    #[arg(long, value_name = "full|minimal|empty")]
    preset: Option<Preset>,

    /// Only run on devices whose name contains NAME (repeatable)
    #[arg(long, value_name = "NAME")]
    allow: Vec<String>,

    /// Debug logging and per-event tracing
    #[arg(short, long)]
    verbose: bool,

    /// Validate config and exit
    #[arg(long)]
    check_config: bool,

    /// List available keyboard devices
    #[arg(long)]
    list_devices: bool,
}

fn default_filter(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "info"
    }
}

fn init_logging(debug: bool) {
    let env = env_logger::Env::default().default_filter_or(default_filter(debug));
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();
}

/// `--verbose` or `[general] debug`: drives both the log filter and the
/// translator's per-event trace.
fn debug_enabled(args: &Args, config: &Config) -> bool {
    args.verbose || config.debug()
}

fn load_config(args: &Args) -> Result<Config> {
    match &args.config {
        Some(path) => Config::from_toml_path(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Config::load_default().context("failed to load default config"),
    }
}

/// Effective preset, policy and allow-list: CLI over config over preset.
fn resolve_policy(args: &Args, config: &Config) -> Result<(Preset, MappingTable, DeviceAllowList)> {
    let preset = args.preset.unwrap_or_else(|| config.preset());
    let table = config
        .mapping_table(Some(preset))
        .context("invalid mapping configuration")?;
    let allow = if args.allow.is_empty() {
        config.allow_list(preset)
    } else {
        DeviceAllowList::new(args.allow.iter().cloned())
    };
    Ok((preset, table, allow))
}

fn list_devices() -> Result<()> {
    let keyboards = list_keyboards();
    if keyboards.is_empty() {
        bail!("no keyboard devices found (are you in the 'input' group?)");
    }
    println!("Found {} keyboard device(s):", keyboards.len());
    for (index, info) in keyboards.iter().enumerate() {
        println!("  {}: {} ({})", index, info.name, info.path.display());
    }
    Ok(())
}

fn check_config(args: &Args, config: &Config) -> Result<()> {
    let (preset, table, allow) = resolve_policy(args, config)?;
    println!("Configuration is valid");
    println!("  preset:       {}", preset);
    println!("  direct map:   {} entries", table.direct.len());
    match table.mod_key {
        Some(key) => println!("  modifier key: {} ({} entries)", key, table.modifier.len()),
        None => println!("  modifier key: disabled"),
    }
    match table.mouse_key {
        Some(key) => println!("  mouse key:    {} ({} entries)", key, table.mouse.len()),
        None => println!("  mouse key:    disabled"),
    }
    if allow.is_empty() {
        println!("  allow-list:   any device");
    } else {
        println!("  allow-list:   {:?}", allow.patterns());
    }
    Ok(())
}

fn run(args: &Args, config: &Config, debug: bool) -> Result<()> {
    let (preset, table, allow) = resolve_policy(args, config)?;

    let query = args
        .device
        .as_deref()
        .or_else(|| config.device())
        .context("no input device given (use --device or [devices] device)")?;
    let path = resolve_device_path(query)?;
    log::info!("Using preset {} on {}", preset, path.display());

    let translator = Translator::new(table)?.with_debug(debug);

    // The flag is set before the pipe is written, so a woken loop sees it.
    let shutdown = Arc::new(AtomicBool::new(false));
    let (wake_read, wake_write) = UnixStream::pair().context("failed to create signal pipe")?;
    for signal in [signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(&shutdown))
            .context("failed to install signal handler")?;
        signal_hook::low_level::pipe::register(signal, wake_write.try_clone()?)
            .context("failed to install signal pipe")?;
    }

    let options = AcquireOptions {
        allow,
        ..AcquireOptions::default()
    };
    let mut device = DeviceHandle::acquire(&path, &options)
        .with_context(|| format!("failed to acquire {}", path.display()))?;
    device
        .set_wake_fd(wake_read)
        .context("failed to watch signal pipe")?;

    let mut event_loop = EventLoop::with_shutdown_flag(translator, shutdown);
    let clock = MonotonicClock::new();
    let result = event_loop.run(&mut device, &clock);
    device.release();

    result.context("event loop failed")
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.list_devices {
        init_logging(args.verbose);
        return list_devices();
    }

    let config = load_config(&args)?;
    let debug = debug_enabled(&args, &config);
    init_logging(debug);
    if let Some(path) = &config.source_path {
        log::info!("Loaded config {}", path.display());
    }

    if args.check_config {
        return check_config(&args, &config);
    }

    run(&args, &config, debug)
}
