use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::device::DeviceKind;
use crate::orientation::Orientation;
use crate::pointer::Positioning;

#[derive(Parser)]
#[command(name = "rm-pointer")]
#[command(about = "Drive a host pointer from reMarkable pen input")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// File to read raw input_event records from ("-" for stdin)
    #[arg(long, short, env = "RMPOINTER_INPUT")]
    pub input: Option<String>,

    /// Tablet model (rm2, rmpp)
    #[arg(long, value_parser = clap::value_parser!(DeviceKind))]
    pub device: Option<DeviceKind>,

    /// Screen orientation (portrait, landscape-right, landscape-left, inverted)
    #[arg(long, value_parser = clap::value_parser!(Orientation))]
    pub orientation: Option<Orientation>,

    /// How pen positions move the pointer (absolute, relative)
    #[arg(long, value_parser = clap::value_parser!(Positioning))]
    pub positioning: Option<Positioning>,

    /// Double-click interval in milliseconds
    #[arg(long)]
    pub double_click_ms: Option<u64>,

    /// Path to config file
    #[arg(long, env = "RMPOINTER_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print synthesized pointer events instead of posting them
    Dump,
}
