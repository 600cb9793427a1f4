//! Command-line interface definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use swatchset_core::DEFAULT_SEGMENT_COLOR;
use swatchset_render::Orientation;

#[derive(Debug, Parser)]
#[command(name = "swatchset", version, about = "Edit color palettes and export them as PNG swatches")]
pub struct Cli {
    /// Config file (defaults to the platform config directory).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding palette state. Overrides the config file.
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage segment sets.
    #[command(subcommand)]
    Sets(SetsCommand),
    /// Manage segments of the active set.
    #[command(subcommand)]
    Segments(SegmentsCommand),
    /// Render the active set to a PNG.
    Export(ExportArgs),
}

#[derive(Debug, Subcommand)]
pub enum SetsCommand {
    /// List all sets; the active one is marked with `*`.
    List,
    /// Create a set and make it active.
    Create { name: String },
    /// Rename a set.
    Rename {
        /// Set id or name.
        set: String,
        name: String,
    },
    /// Delete a set.
    Delete {
        /// Set id or name.
        set: String,
    },
    /// Make a set active.
    Use {
        /// Set id or name.
        set: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum SegmentsCommand {
    /// List segments of the active set.
    List,
    /// Append a segment.
    Add {
        title: String,
        #[arg(long, default_value = DEFAULT_SEGMENT_COLOR)]
        color: String,
    },
    /// Change a segment's color and/or title.
    Update {
        /// Segment id or 1-based position.
        segment: String,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        title: Option<String>,
    },
    /// Delete one or more segments.
    Delete {
        /// Segment ids or 1-based positions.
        #[arg(required = true, num_args = 1..)]
        segments: Vec<String>,
    },
    /// Move a segment to another position (1-based).
    Move { from: usize, to: usize },
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Image width in pixels (100-3000).
    #[arg(long)]
    pub width: Option<u32>,
    /// Image height in pixels (100-3000).
    #[arg(long)]
    pub height: Option<u32>,
    #[arg(long, value_enum)]
    pub orientation: Option<OrientationArg>,
    /// Draw bands only, without titles and color codes.
    #[arg(long)]
    pub no_titles: bool,
    /// Export only these segments (ids or 1-based positions).
    #[arg(long = "select", value_name = "SEGMENT", num_args = 1..)]
    pub select: Vec<String>,
    /// Output directory. Overrides the config file.
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrientationArg {
    Horizontal,
    Vertical,
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Horizontal => Orientation::Horizontal,
            OrientationArg::Vertical => Orientation::Vertical,
        }
    }
}
