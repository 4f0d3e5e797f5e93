// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_MODEL_PATH: &str = "model.glb";
pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

#[derive(Parser, Debug, Clone)]
#[command(name = "glb-viewer")]
#[command(about = "Interactive viewer for the first mesh of a GLB/glTF file", long_about = None)]
pub struct Cli {
    /// Model file to load
    #[arg(default_value = DEFAULT_MODEL_PATH)]
    pub path: PathBuf,

    /// Initial window width
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Initial window height
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["glb-viewer"]);
        assert_eq!(cli.path, PathBuf::from("model.glb"));
        assert_eq!((cli.width, cli.height), (800, 600));
    }

    #[test]
    fn test_positional_path_and_size() {
        let cli = Cli::parse_from(["glb-viewer", "scenes/duck.glb", "--width", "1024", "--height", "768"]);
        assert_eq!(cli.path, PathBuf::from("scenes/duck.glb"));
        assert_eq!((cli.width, cli.height), (1024, 768));
    }

    #[test]
    fn test_extra_positional_rejected() {
        assert!(Cli::try_parse_from(["glb-viewer", "a.glb", "b.glb"]).is_err());
    }
}
