// Artsey CLI
// Chorded-keyboard simulator: eight keys in, ARTSEY layout output on the console

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;

use artsey_core::event::{event_queue, DEFAULT_QUEUE_CAPACITY};
use artsey_core::settings::DEFAULT_LAYOUT_PATH;
use artsey_core::{
    build_layout_table, build_position_map, load_layout, parse_keys, Backend, ComboResolver,
    ConsoleSink, DeviceReader, Dispatcher, Hand, InputResult, Key, LayoutTable, PositionMap,
    Settings, SpecialKey, StopReason, TerminalSource,
};

/// ARTSEY chorded-keyboard simulator
#[derive(Parser, Debug)]
#[command(name = "artsey")]
#[command(version)]
#[command(about = "Type ARTSEY chords on an ordinary keyboard", long_about = None)]
struct Args {
    /// Eight keys: top row left to right, then the bottom row
    #[arg(value_name = "KEYS")]
    keys: Vec<String>,

    /// Which hand the layout is played with
    #[arg(long, value_name = "HAND")]
    hand: Option<Hand>,

    /// Layout document (YAML, or TOML by extension)
    #[arg(short, long, value_name = "PATH")]
    layout: Option<PathBuf>,

    /// Where key events come from
    #[arg(short, long, value_name = "BACKEND")]
    backend: Option<Backend>,

    /// Keyboards to read with the evdev backend (can be used multiple times)
    #[arg(short, long, value_name = "DEVICE")]
    devices: Vec<String>,

    /// Grab evdev keyboards so keys do not reach other applications
    #[arg(long)]
    grab: bool,

    /// Key whose release ends the session
    #[arg(long, value_name = "NAME")]
    exit_key: Option<SpecialKey>,

    /// Settings file (default: ~/.config/artsey/settings.toml)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Validate the layout, print a summary and exit
    #[arg(long)]
    check_config: bool,

    /// List available keyboard devices
    #[arg(long)]
    list_devices: bool,
}

/// Command line merged over the settings file
#[derive(Debug, Clone, PartialEq)]
struct RunConfig {
    keys: Vec<Key>,
    hand: Hand,
    layout: PathBuf,
    backend: Backend,
    devices: Vec<String>,
    grab: bool,
    exit_key: SpecialKey,
}

impl RunConfig {
    /// Command line first, then settings, then built-in defaults
    fn resolve(args: &Args, settings: &Settings) -> anyhow::Result<Self> {
        let key_names: &[String] = if !args.keys.is_empty() {
            &args.keys
        } else {
            settings.keys().unwrap_or_default()
        };
        let keys = parse_keys(key_names)?;

        let layout = args
            .layout
            .clone()
            .or_else(|| settings.layout_path().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LAYOUT_PATH));

        let devices = if !args.devices.is_empty() {
            args.devices.clone()
        } else {
            settings.devices().to_vec()
        };

        Ok(Self {
            keys,
            hand: args.hand.or(settings.hand()).unwrap_or_default(),
            layout,
            backend: args.backend.or(settings.backend()).unwrap_or_default(),
            devices,
            grab: args.grab || settings.grab().unwrap_or(false),
            exit_key: args
                .exit_key
                .or(settings.exit_key())
                .unwrap_or(SpecialKey::Escape),
        })
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    match path {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("Could not load settings from {}", path.display())),
        None => Settings::load_default().context("Could not load default settings"),
    }
}

/// Position map and layout table for a session
fn build_table(config: &RunConfig) -> anyhow::Result<(PositionMap, LayoutTable)> {
    let position_map = build_position_map(&config.keys)?;
    let raw = load_layout(&config.layout, config.hand)
        .with_context(|| format!("Could not load layout {}", config.layout.display()))?;
    let table = build_layout_table(&raw, &position_map)
        .with_context(|| format!("Invalid layout {}", config.layout.display()))?;
    Ok((position_map, table))
}

fn print_summary(config: &RunConfig, position_map: &PositionMap, table: &LayoutTable) {
    println!("Layout: {} ({} hand)", config.layout.display(), config.hand);
    let keys: Vec<String> = position_map.keys().iter().map(Key::to_string).collect();
    println!("  {}", keys[..4].join(" "));
    println!("  {}", keys[4..].join(" "));
    println!(
        "{} layer(s), {} chord(s):",
        table.len(),
        table.mapping_count()
    );
    for layer in table.layers() {
        println!("  {}: {}", layer.name(), layer.len());
    }
    println!("Configuration is valid");
}

fn list_devices() -> anyhow::Result<()> {
    let devices = DeviceReader::list_devices().context("Error finding keyboard devices")?;
    println!("Found {} keyboard device(s):", devices.len());
    for device in &devices {
        match &device.path {
            Some(path) => println!("  {}: {} ({})", device.index, device.name, path),
            None => println!("  {}: {}", device.index, device.name),
        }
    }
    Ok(())
}

fn install_signal_handler(running: Arc<AtomicBool>) {
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    match Signals::new([SIGINT, SIGTERM]) {
        Ok(mut signals) => {
            std::thread::spawn(move || {
                if let Some(signal) = signals.forever().next() {
                    log::debug!("Received signal {}, shutting down", signal);
                    running.store(false, Ordering::SeqCst);
                }
            });
        }
        Err(e) => log::warn!("Could not install signal handler: {}", e),
    }
}

fn run(config: RunConfig, position_map: PositionMap, table: LayoutTable) -> anyhow::Result<()> {
    let running = Arc::new(AtomicBool::new(true));
    install_signal_handler(running.clone());

    let (sender, receiver) = event_queue(DEFAULT_QUEUE_CAPACITY);
    let source = match config.backend {
        Backend::Evdev => {
            let reader = DeviceReader::open(&config.devices, config.grab)
                .context("Could not open keyboard devices")?;
            reader.check_keys(position_map.keys());
            log::debug!("Reading from {} device(s)", reader.device_count());
            reader.spawn(sender, running.clone())
        }
        Backend::Terminal => {
            if config.grab || !config.devices.is_empty() {
                log::warn!("--grab and --devices only apply to the evdev backend");
            }
            TerminalSource::open()
                .context("Could not set up the terminal")?
                .spawn(sender, running.clone())
        }
    };

    let mut sink = ConsoleSink::stdout().raw_mode(config.backend == Backend::Terminal);
    sink.banner(config.exit_key)?;

    let resolver = ComboResolver::new(Arc::new(table)).with_exit_key(config.exit_key);
    let mut dispatcher = Dispatcher::new(resolver, sink);
    let reason = dispatcher.run(&receiver, &running);
    log::debug!("Stopping: {:?}", reason);

    // Hanging up lets the source thread exit and restore the terminal
    running.store(false, Ordering::SeqCst);
    drop(receiver);
    let source_result: InputResult<()> = match source.join() {
        Ok(result) => result,
        Err(_) => bail!("Input thread panicked"),
    };
    source_result.context("Input source failed")?;

    if reason == StopReason::ExitKey {
        println!();
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Doesn't need a layout or keys
    if args.list_devices {
        return list_devices();
    }

    let settings = load_settings(args.settings.as_deref())?;
    let config = RunConfig::resolve(&args, &settings)?;
    let (position_map, table) = build_table(&config)?;

    if args.check_config {
        print_summary(&config, &position_map, &table);
        return Ok(());
    }

    run(config, position_map, table)
}
