use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "cairn", version, about = "Procedural voxel world generation and chunk streaming")]
pub struct Cli {
    /// Worldgen TOML; built-in defaults when omitted.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured seed.
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub seed: Option<i32>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a single block and show its column.
    Block(BlockArgs),
    /// Generate one chunk and print a material histogram.
    Chunk(ChunkArgs),
    /// Slide a world map window along +x and report slot reuse.
    Walk(WalkArgs),
    /// Stream chunks around a center through the worker pool into a world map.
    Stream(StreamArgs),
    /// Dump the per-face texture table.
    Textures,
    /// Encode a generated chunk as a wire frame and decode it back.
    Frame(FrameArgs),
}

#[derive(Debug, Args)]
pub struct BlockArgs {
    #[arg(allow_negative_numbers = true)]
    pub x: i32,
    #[arg(allow_negative_numbers = true)]
    pub y: i32,
    #[arg(allow_negative_numbers = true)]
    pub z: i32,
}

#[derive(Debug, Args)]
pub struct ChunkArgs {
    #[arg(allow_negative_numbers = true)]
    pub cx: i32,
    #[arg(allow_negative_numbers = true)]
    pub cy: i32,
    #[arg(allow_negative_numbers = true)]
    pub cz: i32,
}

#[derive(Debug, Args)]
pub struct WalkArgs {
    #[arg(long, default_value_t = 8)]
    pub steps: u32,
    /// Window edge length in chunks (power of two).
    #[arg(long, default_value_t = 4)]
    pub extent: usize,
    /// Chunk z of the window center.
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub cz: i32,
}

#[derive(Debug, Args)]
pub struct StreamArgs {
    #[arg(long, default_value_t = 1)]
    pub radius: i32,
    /// 0 uses every available core.
    #[arg(long, default_value_t = 0)]
    pub workers: usize,
    #[arg(long, default_value_t = 4)]
    pub extent: usize,
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub cz: i32,
    /// Give up on outstanding chunks after this many seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

#[derive(Debug, Args)]
pub struct FrameArgs {
    #[arg(allow_negative_numbers = true)]
    pub cx: i32,
    #[arg(allow_negative_numbers = true)]
    pub cy: i32,
    #[arg(allow_negative_numbers = true)]
    pub cz: i32,
    /// Also write the encoded bytes here.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_coordinates_parse() {
        let cli = Cli::try_parse_from(["cairn", "--seed", "-7", "block", "-5", "12", "-300"]).unwrap();
        assert_eq!(cli.seed, Some(-7));
        match cli.command {
            Command::Block(b) => assert_eq!((b.x, b.y, b.z), (-5, 12, -300)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn stream_defaults() {
        let cli = Cli::try_parse_from(["cairn", "stream"]).unwrap();
        let Command::Stream(s) = cli.command else {
            panic!("expected stream");
        };
        assert_eq!((s.radius, s.workers, s.extent, s.cz), (1, 0, 4, 1));
        assert!(cli.config.is_none());
    }
}
