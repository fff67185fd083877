//! Terminal rendering of run progress.
//!
//! Everything here goes to stdout; diagnostics go through tracing to stderr.

use std::io::{self, IsTerminal};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use cgx_core::change::display_value;
use cgx_core::{
    ApplySummary, ChangeRequest, CoreError, FieldChange, LabelInfo, MatchRecord, Reporter, Site,
    Tenant, WanInterface,
};

use crate::cli::ColorMode;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

#[derive(Debug, Clone, Copy)]
struct Palette {
    enabled: bool,
}

impl Palette {
    fn heading(self, text: &str) -> String {
        if self.enabled { text.bold().to_string() } else { text.to_owned() }
    }

    fn good(self, text: &str) -> String {
        if self.enabled { text.green().to_string() } else { text.to_owned() }
    }

    fn bad(self, text: &str) -> String {
        if self.enabled { text.red().to_string() } else { text.to_owned() }
    }

    fn note(self, text: &str) -> String {
        if self.enabled { text.yellow().to_string() } else { text.to_owned() }
    }
}

// ── Review table ─────────────────────────────────────────────────────

#[derive(Tabled)]
struct MatchRow {
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "Circuit")]
    circuit: String,
    #[tabled(rename = "BFD")]
    bfd_mode: String,
    #[tabled(rename = "LQM")]
    lqm: String,
    #[tabled(rename = "BWM")]
    bwm: String,
}

impl From<&MatchRecord> for MatchRow {
    fn from(r: &MatchRecord) -> Self {
        Self {
            site: r.site_name.clone(),
            circuit: r.circuit_name().to_owned(),
            bfd_mode: r.interface.bfd_mode.clone().unwrap_or_else(|| "-".into()),
            lqm: display_value(r.interface.lqm_enabled.as_ref()),
            bwm: r.interface.bw_config_mode.clone().unwrap_or_else(|| "-".into()),
        }
    }
}

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

// ── Reporter ─────────────────────────────────────────────────────────

pub struct TerminalReporter {
    palette: Palette,
}

impl TerminalReporter {
    pub fn new(color: bool) -> Self {
        Self {
            palette: Palette { enabled: color },
        }
    }
}

impl Reporter for TerminalReporter {
    fn tenant(&mut self, tenant: &Tenant) {
        let name = tenant.name.as_deref().unwrap_or(&tenant.id);
        println!("{}", self.palette.heading(&format!("======== TENANT NAME {name} ========")));
    }

    fn site_skipped(&mut self, site: &Site, error: &CoreError) {
        let name = site.name.as_deref().unwrap_or(&site.id);
        println!("{}", self.palette.note(&format!("Skipping site {name}: {error}")));
    }

    fn matched(&mut self, site: &Site, interface: &WanInterface, label: &LabelInfo) {
        let dash = || "-".to_owned();
        println!(
            "Found Circuit Match at SITE: {}",
            self.palette.heading(site.name.as_deref().unwrap_or(&site.id))
        );
        println!(
            "  Circuit Name        : {}",
            interface.name.clone().unwrap_or_else(dash)
        );
        println!("  Circuit Category    : {}", label.name);
        println!("  Circuit Label       : {}", label.label);
        println!("  Circuit Description : {}", label.description);
        println!(
            "  Circuit BFD MODE    : {}",
            interface.bfd_mode.clone().unwrap_or_else(dash)
        );
        println!(
            "  Circuit LQM Enabled : {}",
            display_value(interface.lqm_enabled.as_ref())
        );
        println!(
            "  Circuit BWM MODE    : {}",
            interface.bw_config_mode.clone().unwrap_or_else(dash)
        );
        println!();
    }

    fn review(&mut self, matches: &[MatchRecord], request: &ChangeRequest) {
        let rows: Vec<MatchRow> = matches.iter().map(MatchRow::from).collect();
        println!("{}", render_table(&rows));
        println!(
            "Changing {} circuit(s) to {}",
            matches.len(),
            self.palette.heading(&request.summary())
        );
    }

    fn declined(&mut self) {
        println!("{}", self.palette.bad("CHANGES ABORTED!"));
    }

    fn changing(&mut self, record: &MatchRecord, changes: &[FieldChange]) {
        println!(
            "Site ID: {} Circuit: {} ({})",
            record.site_id,
            record.circuit_name(),
            record.interface_id()
        );
        for change in changes {
            let line = change.to_string();
            if matches!(change, FieldChange::BwmIgnored { .. }) {
                println!("      {}", self.palette.note(&line));
            } else {
                println!("      {line}");
            }
        }
    }

    fn outcome(&mut self, record: &MatchRecord, result: Result<(), &CoreError>) {
        match result {
            Ok(()) => {
                let mode = record.interface.bfd_mode.as_deref().unwrap_or("-");
                println!(" {}", self.palette.good(&format!("Success, BFD Mode now {mode}")));
            }
            Err(e) => println!(" {}", self.palette.bad(&format!("Failed to make change: {e}"))),
        }
        println!();
    }

    fn finished(&mut self, summary: &ApplySummary) {
        let text = format!("Updated {}, failed {}", summary.updated, summary.failed);
        if summary.failed == 0 {
            println!("{}", self.palette.good(&text));
        } else {
            println!("{}", self.palette.bad(&text));
        }
    }
}
