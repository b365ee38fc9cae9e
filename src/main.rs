use std::net::SocketAddr;
use std::time::{Duration, Instant};

use macroquad::prelude::*;

use forest_live_map::config::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use forest_live_map::input::InputSignals;
use forest_live_map::network::UdpListener;
use forest_live_map::render::{MacroquadSurface, MapAssets};
use forest_live_map::{MapConfig, RunState, Scheduler};

fn window_conf(config: &MapConfig) -> Conf {
    Conf {
        window_title: "Forest Live Map".to_string(),
        window_width: config.window_size as i32,
        window_height: config.window_size as i32,
        window_resizable: false,
        platform: macroquad::miniquad::conf::Platform {
            // Frame pacing is done by hand at the configured FPS
            swap_interval: Some(0),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn main() {
    env_logger::init();

    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC: {}", panic_info);
        if let Some(location) = panic_info.location() {
            eprintln!("  at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    log::info!("Forest Live Map v{}", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = match MapConfig::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    macroquad::Window::from_config(window_conf(&config), run(config));
}

async fn run(config: MapConfig) {
    // Route window close through the scheduler so teardown happens once
    prevent_quit();

    let assets = match MapAssets::load(&config.assets).await {
        Ok(assets) => assets,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let listener = match UdpListener::bind(SocketAddr::new(config.bind_address, config.port)) {
        Ok(listener) => listener,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let mut scheduler = Scheduler::new(&config, Some(listener));
    let frame_period = Duration::from_secs_f64(config.frame_period_secs());

    loop {
        let frame_start = Instant::now();

        let mut surface = MacroquadSurface::new(&assets);
        if scheduler.tick(InputSignals::poll(), &mut surface, get_time()) == RunState::Stopped {
            break;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_period {
            std::thread::sleep(frame_period - elapsed);
        }

        next_frame().await;
    }

    log::info!("Live map stopped");
}
