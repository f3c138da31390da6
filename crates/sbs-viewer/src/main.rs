use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sbs_engine::camera::{StereoCameraConfig, StereoMode};
use sbs_engine::compositor::{ClearColors, ViewMode};
use sbs_engine::config::{PhysicalPosition, PhysicalSize};
use sbs_engine::coords::SurfaceSize;
use sbs_engine::logging::{init_logging, LoggingConfig};
use sbs_engine::scene::ScenePreset;
use sbs_engine::{Runtime, ViewerConfig, WindowConfig};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum SceneArg {
    Demo,
    Cube,
}

impl SceneArg {
    fn to_preset(self) -> ScenePreset {
        match self {
            SceneArg::Demo => ScenePreset::Demo,
            SceneArg::Cube => ScenePreset::Cube,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum StereoArg {
    Parallel,
    Asymmetric,
}

impl StereoArg {
    fn to_mode(self) -> StereoMode {
        match self {
            StereoArg::Parallel => StereoMode::ParallelAxis,
            StereoArg::Asymmetric => StereoMode::asymmetric(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Side-by-side stereo viewport for SBS display glasses")]
struct Args {
    /// Start with the per-eye alignment pattern instead of the scene.
    #[arg(long)]
    test_pattern: bool,

    #[arg(long, value_enum, default_value_t = SceneArg::Demo)]
    scene: SceneArg,

    #[arg(long, value_enum, default_value_t = StereoArg::Parallel)]
    stereo: StereoArg,

    /// Interpupillary distance in meters.
    #[arg(long, default_value_t = StereoCameraConfig::DEFAULT_IPD)]
    ipd: f32,

    /// Vertical field of view in degrees.
    #[arg(long, default_value_t = StereoCameraConfig::DEFAULT_FOV_Y_DEG)]
    fov: f32,

    #[arg(long, default_value_t = StereoCameraConfig::DEFAULT_NEAR)]
    near: f32,

    #[arg(long, default_value_t = StereoCameraConfig::DEFAULT_FAR)]
    far: f32,

    /// Full surface width; each eye gets half.
    #[arg(long, default_value_t = SurfaceSize::SBS_1080P.width)]
    width: u32,

    #[arg(long, default_value_t = SurfaceSize::SBS_1080P.height)]
    height: u32,

    /// Window position as `X,Y` in desktop pixels.
    #[arg(long, value_parser = parse_position, default_value = "2560,0")]
    position: (i32, i32),

    /// Place the window on the monitor whose name contains this string.
    #[arg(long)]
    monitor: Option<String>,

    /// Decorated window instead of borderless.
    #[arg(long)]
    windowed: bool,

    #[arg(long)]
    no_vsync: bool,

    /// Seed for the scene's random stream.
    #[arg(long)]
    seed: Option<u64>,

    /// `env_logger` filter, e.g. `info,sbs_engine=debug`.
    #[arg(long)]
    log: Option<String>,
}

fn parse_position(s: &str) -> Result<(i32, i32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad X in {s:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad Y in {s:?}: {e}"))?;
    Ok((x, y))
}

/// The IPD the camera actually uses, when it differs from `requested`.
fn ipd_adjustment(requested: f32, camera: &StereoCameraConfig) -> Option<f32> {
    (camera.ipd() != requested).then_some(camera.ipd())
}

impl Args {
    fn into_config(self) -> Result<ViewerConfig> {
        let surface = SurfaceSize::new(self.width, self.height);
        anyhow::ensure!(
            surface.is_valid(),
            "--width/--height {}x{} leave no pixels for one eye",
            self.width,
            self.height
        );
        anyhow::ensure!(self.ipd.is_finite() && self.ipd > 0.0, "--ipd must be positive, got {}", self.ipd);

        let camera = StereoCameraConfig::new(self.ipd, self.fov, self.near, self.far, surface.eye_aspect())
            .context("invalid camera parameters")?;
        if let Some(ipd) = ipd_adjustment(self.ipd, &camera) {
            log::warn!("--ipd {} is below the minimum, using {ipd:.3}m", self.ipd);
        }
        let scene = self.scene.to_preset();

        let defaults = ViewerConfig::default();
        Ok(ViewerConfig {
            window: WindowConfig {
                size: PhysicalSize::new(self.width, self.height),
                position: Some(PhysicalPosition::new(self.position.0, self.position.1)),
                monitor: self.monitor,
                decorated: self.windowed,
                ..WindowConfig::default()
            },
            camera,
            stereo: self.stereo.to_mode(),
            scene,
            view: if self.test_pattern {
                ViewMode::TestPattern
            } else {
                ViewMode::Scene
            },
            seed: self.seed,
            clear: ClearColors::for_preset(scene),
            gpu: defaults.gpu.clone().with_vsync(!self.no_vsync),
            logging: LoggingConfig {
                env_filter: self.log,
                ..LoggingConfig::default()
            },
            ..defaults
        })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig {
        env_filter: args.log.clone(),
        ..LoggingConfig::default()
    });
    let config = args.into_config()?;

    log::info!(
        "IPD {:.3}m, FOV {:.0}°, clip {}..{}",
        config.camera.ipd(),
        config.camera.fov_y_deg(),
        config.camera.near(),
        config.camera.far()
    );
    log::info!("keys: Esc/Q quit, +/- IPD, M stereo model, T test pattern");

    Runtime::run(config)
}
