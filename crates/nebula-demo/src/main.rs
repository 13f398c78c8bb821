//! Headless driver for the web UI plugin.
//!
//! Loads `config.ron` and the plugin settings, places the configured panels on
//! a small Earth-Moon system and runs a fixed-step tick loop with an observer
//! orbiting Earth. Configuration can be overridden via CLI flags.
//! Run with `cargo run -p nebula-demo -- --ticks 300`.

mod clock;
mod solar;

use std::error::Error;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use nebula_config::{CliArgs, Config, SideBarItem, SpaceItem, WebUiSettings, default_config_dir};
use nebula_scene::{AnchorRegistry, ObserverModel, ScalePolicy};
use nebula_ui::{CursorSink, HeadlessCursor, HeadlessGui};
use nebula_web_ui::{HostContext, Plugin, WebUiPlugin};
use tracing::{error, info, warn};

use clock::{FIXED_DT, SimulationClock};
use solar::{EARTH_RADII, OrbitingObserver};

/// Simulated seconds per real second.
const TIME_WARP: f64 = 60.0;
/// Ticks between item reports.
const REPORT_EVERY: u64 = 60;
/// Ticks between settings file checks.
const RELOAD_EVERY: u64 = 300;

fn example_settings() -> WebUiSettings {
    let panel = |center: &str, frame: &str, longitude, latitude, html: &str| SpaceItem {
        center: center.to_string(),
        frame: frame.to_string(),
        longitude,
        latitude,
        elevation: 10.0,
        scale: 1.0,
        width: 800,
        height: 600,
        html: html.to_string(),
    };

    WebUiSettings {
        sidebar_items: vec![SideBarItem {
            name: "Docs".to_string(),
            icon: "menu_book".to_string(),
            html: "<iframe src='https://example.org/docs'></iframe>".to_string(),
        }],
        space_items: vec![
            panel("Earth", "IAU_Earth", 0.0, 0.0, "<p>hi</p>"),
            panel(
                "Earth",
                "IAU_Earth",
                -122.1,
                45.3,
                "<h1>Mount Hood</h1><p>3429 m</p>",
            ),
            panel("Moon", "IAU_Moon", 23.47, 0.67, "<p>Tranquility Base</p>"),
        ],
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);
    if let Err(e) = config.validate() {
        eprintln!("Invalid config after CLI overrides: {e}, using defaults");
        config = Config::default();
    }

    if let Err(e) = nebula_log::init_logging(&config) {
        eprintln!("Failed to initialise logging: {e}");
    }

    match run(&config, &config_dir, args.ticks) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Demo failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, config_dir: &Path, ticks: u64) -> Result<(), Box<dyn Error>> {
    let settings_path = config.web_ui_settings_path(config_dir);
    let mut settings = WebUiSettings::load(&settings_path)?;
    let from_file = !(settings.sidebar_items.is_empty() && settings.space_items.is_empty());
    if !from_file {
        info!("No web UI items configured, using built-in examples");
        settings = example_settings();
    }

    let bodies = solar::bodies();
    let mut anchors = solar::frames()?;
    let observer = OrbitingObserver {
        radius: EARTH_RADII.equatorial + 400_000.0,
        period: 5_560.0,
        inclination: 51.6_f64.to_radians(),
    };
    let mut gui = HeadlessGui::new();
    let cursor: Arc<dyn CursorSink> = Arc::new(HeadlessCursor::new());
    let scale = &config.graphics.observer_scale;

    let mut host = HostContext {
        bodies: &bodies,
        anchors: &mut anchors,
        observer: &observer,
        gui: &mut gui,
        cursor,
        simulation_time: 0.0,
        widget_scale: config.graphics.widget_scale,
        scale_policy: ScalePolicy {
            reference_distance: scale.reference_distance,
            min_factor: scale.min_factor,
            max_factor: scale.max_factor,
        },
    };

    let mut plugin = WebUiPlugin::from_config(settings, config);
    let started = Instant::now();
    plugin.init(&mut host)?;
    info!(
        "Placed {} space items in {:.1}ms",
        plugin.items().len(),
        started.elapsed().as_secs_f64() * 1000.0
    );

    let mut clock = SimulationClock::new(TIME_WARP);
    let mut updates = 0u64;
    let mut next_reload = RELOAD_EVERY;
    let mut last_frame = Instant::now();

    while updates < ticks {
        let frame_start = Instant::now();
        let frame_time = frame_start.duration_since(last_frame).as_secs_f64();
        last_frame = frame_start;

        clock.advance(frame_time, |_, sim_time| {
            if updates >= ticks {
                return;
            }
            host.simulation_time = sim_time;
            plugin.update(&mut host);
            updates += 1;
            if updates % REPORT_EVERY == 0 {
                report(&plugin, &host, sim_time);
            }
        });

        if from_file && updates >= next_reload {
            poll_settings(&mut plugin, &mut host, &settings_path);
            next_reload += RELOAD_EVERY;
        }

        let budget = Duration::from_secs_f64(FIXED_DT);
        if let Some(remaining) = budget.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }

    info!(
        "Ran {updates} ticks, {:.0}s of simulation time",
        clock.sim_time()
    );
    plugin.deinit(&mut host);
    Ok(())
}

fn report(plugin: &WebUiPlugin, host: &HostContext<'_>, sim_time: f64) {
    for (index, item) in plugin.items().iter().enumerate() {
        let anchor = item.anchor();
        match host.anchors.anchor_world_position(anchor, sim_time) {
            Ok(world) => info!(
                "t={sim_time:.0}s item {index} on {}: {:.0} km from observer, scale {:.2}",
                anchor.center(),
                host.observer.distance_to(world, sim_time) / 1000.0,
                anchor.anchor_scale()
            ),
            Err(e) => warn!("t={sim_time:.0}s item {index}: {e}"),
        }
    }
}

fn poll_settings(plugin: &mut WebUiPlugin, host: &mut HostContext<'_>, path: &Path) {
    let changed = match plugin.settings().reload(path) {
        Ok(changed) => changed,
        Err(e) => {
            warn!("Failed to re-read {}: {e}", path.display());
            return;
        }
    };
    if let Some(settings) = changed
        && let Err(e) = plugin.reload(settings, host)
    {
        warn!("Keeping previous web UI settings: {e}");
    }
}
