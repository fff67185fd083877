//! Clap derive structures for the `cgx-wanbfd` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// cgx-wanbfd -- bulk-set BFD, LQM and BWM on matching WAN interfaces
#[derive(Debug, Parser)]
#[command(
    name = "cgx-wanbfd",
    version,
    about = "Bulk-update BFD mode, LQM and BWM on CloudGenix WAN interfaces",
    long_about = "Finds every WAN interface whose circuit name contains the match text\n\
        (case-insensitive) across all spoke sites of the tenant, shows what\n\
        matched, and after confirmation sets the BFD mode and optionally\n\
        toggles link-quality monitoring and bandwidth monitoring."
)]
pub struct Cli {
    #[command(flatten)]
    pub change: ChangeOpts,

    #[command(flatten)]
    pub auth: AuthOpts,

    #[command(flatten)]
    pub global: GlobalOpts,
}

// ── Change selection ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ChangeOpts {
    /// Text to match in circuit names (case-insensitive substring)
    #[arg(long = "matchtext", short = 'm')]
    pub match_text: String,

    /// BFD mode to set on every matched circuit
    #[arg(long, short = 'b')]
    pub bfd_mode: BfdModeArg,

    /// Link-quality monitoring
    #[arg(long, short = 'l', default_value = "nochange")]
    pub lqm: ToggleArg,

    /// Bandwidth monitoring
    #[arg(long, short = 'w', default_value = "nochange")]
    pub bwm: ToggleArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BfdModeArg {
    /// Aggressive BFD timers
    Aggressive,
    /// Standard BFD timers
    #[value(name = "non_aggressive")]
    NonAggressive,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ToggleArg {
    /// Leave the current setting alone
    Nochange,
    /// Enable
    On,
    /// Disable
    Off,
}

// ── Authentication ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AuthOpts {
    /// Auth token (takes precedence over every other source)
    #[arg(long, short = 't')]
    pub token: Option<String>,

    /// File containing an auth token
    #[arg(long = "authtokenfile", short = 'f', value_name = "PATH")]
    pub token_file: Option<PathBuf>,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Controller API URL (overrides config)
    #[arg(long, short = 'c')]
    pub controller: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k')]
    pub insecure: bool,

    /// Also scan sites with the HUB cluster role
    #[arg(long)]
    pub include_hub_sites: bool,

    /// Apply without asking for confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// When to use color output
    #[arg(long, default_value = "auto")]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}
