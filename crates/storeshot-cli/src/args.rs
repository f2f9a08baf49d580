//! Command-line argument definitions for the Storeshot CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input images, the copy, the device
//! pose, the palette, the output path, configuration file and logging
//! verbosity.

use clap::Parser;

use storeshot::{
    device::Orientation,
    screen::{Position, TabletLayoutVariant},
};

/// Command-line arguments for the Storeshot compositor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the raw UI screenshot (PNG or JPEG)
    #[arg(long)]
    pub screenshot: String,

    /// Optional background image; a gradient is drawn when omitted
    #[arg(long)]
    pub background: Option<String>,

    /// Heading text
    #[arg(long)]
    pub heading: String,

    /// Subheading text
    #[arg(long, default_value = "")]
    pub subheading: String,

    /// Device preset id, e.g. iphone-6.7 or ipad-13
    #[arg(short, long, default_value = "iphone-6.7")]
    pub device: String,

    /// Device placement (center, left, right)
    #[arg(long, default_value = "center")]
    pub position: Position,

    /// Tilt the device toward the text
    #[arg(long)]
    pub tilt: bool,

    /// Let the screenshot fill the canvas with no device frame
    #[arg(long)]
    pub full_bleed: bool,

    /// Tablet layout variant; only used with tablet presets
    #[arg(long)]
    pub tablet_layout: Option<TabletLayoutVariant>,

    /// Canvas orientation (portrait, landscape)
    #[arg(long, default_value = "portrait")]
    pub orientation: Orientation,

    /// Bottom color of the fallback background gradient
    #[arg(long, default_value = "#0a84ff")]
    pub primary: String,

    /// Top color of the fallback background gradient
    #[arg(long, default_value = "#5e5ce6")]
    pub accent: String,

    /// Heading color
    #[arg(long, default_value = "#ffffff")]
    pub text: String,

    /// Subheading color
    #[arg(long, default_value = "#ebebf5")]
    pub subtext: String,

    /// Path to the output PNG file
    #[arg(short, long, default_value = "out.png")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_flags_parse_through_from_str() {
        let args = Args::try_parse_from([
            "storeshot",
            "--screenshot",
            "shot.png",
            "--heading",
            "Work anywhere",
            "--position",
            "left",
            "--tablet-layout",
            "ui-forward",
            "--orientation",
            "landscape",
        ])
        .unwrap();
        assert_eq!(args.position, Position::Left);
        assert_eq!(args.tablet_layout, Some(TabletLayoutVariant::UiForward));
        assert_eq!(args.orientation, Orientation::Landscape);
        assert_eq!(args.device, "iphone-6.7");
    }

    #[test]
    fn test_unknown_position_is_rejected() {
        let result = Args::try_parse_from([
            "storeshot",
            "--screenshot",
            "shot.png",
            "--heading",
            "Hi",
            "--position",
            "top",
        ]);
        assert!(result.is_err());
    }
}
