use std::{process::ExitCode, time::Instant};

use crate::{
    abs::App,
    config::Config,
    frame_loop::{FrameLoop, shutdown},
    scene::Scene,
};

mod abs;
mod config;
mod error;
mod frame_loop;
mod geometry;
mod logging;
mod scene;
mod transform;

fn main() -> ExitCode {
    let config_path = Config::default_path();
    let (config, config_warning) = Config::load(config_path.as_deref());
    logging::init(&config.log_level);
    if let Some(warning) = config_warning {
        log::warn!("{warning}");
    }
    log::debug!("config: {config:?}");

    let mut app = match App::new(&config.window) {
        Ok(app) => app,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut scene = match Scene::new(&app.gl, &config) {
        Ok(scene) => Some(scene),
        Err(e) => {
            log::error!("scene initialization failed: {e}");
            log::error!("nothing will be drawn; close the window to exit");
            None
        }
    };
    let scene_ok = scene.is_some();

    let mut frame_loop = FrameLoop::new();
    frame_loop.run(&mut app, scene.as_mut(), Instant::now());
    shutdown(frame_loop, app, scene);

    if scene_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
