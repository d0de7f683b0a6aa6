use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use terrain_follow::{DemoConfig, DemoError};

/// Marker that follows terrain height sampled from a heightmap
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Heightmap image (red channel = height)
    heightmap: Option<PathBuf>,

    /// JSON scene config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target frame rate
    #[arg(long)]
    fps: Option<u32>,
}

impl Cli {
    fn into_config(self) -> Result<DemoConfig, DemoError> {
        let mut config = match &self.config {
            Some(path) => DemoConfig::load(path)?,
            None => DemoConfig::default(),
        };

        if let Some(heightmap) = self.heightmap {
            config.terrain.heightmap = heightmap;
        }
        if let Some(fps) = self.fps {
            config.window.target_fps = fps;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = Cli::parse().into_config().and_then(terrain_follow::run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrain_follow::core::ConfigError;

    #[test]
    fn test_cli_overrides_defaults() {
        let config = Cli::parse_from(["terrain-follow", "maps/canyon.png", "--fps", "30"])
            .into_config()
            .unwrap();
        assert_eq!(config.terrain.heightmap, PathBuf::from("maps/canyon.png"));
        assert_eq!(config.window.target_fps, 30);
        assert_eq!(config.player, DemoConfig::default().player);
    }

    #[test]
    fn test_cli_without_args_is_default() {
        let config = Cli::parse_from(["terrain-follow"]).into_config().unwrap();
        assert_eq!(config, DemoConfig::default());
    }

    #[test]
    fn test_cli_overrides_are_validated() {
        let err = Cli::parse_from(["terrain-follow", "--fps", "0"]).into_config().unwrap_err();
        assert!(matches!(err, DemoError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let path = std::env::temp_dir().join(format!("terrain_follow_cli_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "window": { "target_fps": 24 }, "player": { "step": 0.5 } }"#).unwrap();

        let args: Vec<std::ffi::OsString> = vec![
            "terrain-follow".into(),
            "--config".into(),
            path.clone().into_os_string(),
            "--fps".into(),
            "90".into(),
        ];
        let config = Cli::parse_from(args).into_config();
        std::fs::remove_file(&path).ok();

        let config = config.unwrap();
        assert_eq!(config.window.target_fps, 90);
        assert_eq!(config.player.step, 0.5);
    }
}
