// ── Match-then-bulk-update workflow ──
//
// Discovery, confirmation, mutation, teardown. Each stage works on a
// `RunContext` that owns the match records for one invocation; nothing is
// global and nothing outlives the run.

use tracing::{debug, info, warn};

use cgx_api::WanInterface;

use crate::change::{ChangeRequest, apply_change};
use crate::error::CoreError;
use crate::labels::LabelIndex;
use crate::matching::{circuit_matches, site_is_eligible};
use crate::prompt::{Prompter, confirm};
use crate::report::Reporter;
use crate::session::ControllerSession;

/// Everything one run needs to know, fixed before the session opens.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Case-insensitive substring searched for in circuit names.
    pub match_text: String,
    pub request: ChangeRequest,
    /// Skip sites whose cluster role is `HUB`.
    pub exclude_hub_sites: bool,
    /// Apply without asking.
    pub assume_yes: bool,
}

/// A matched interface and the site that owns it.
#[derive(Debug, Clone)]
pub struct MatchRecord {
    pub site_id: String,
    pub site_name: String,
    pub interface: WanInterface,
}

impl MatchRecord {
    pub fn interface_id(&self) -> &str {
        &self.interface.id
    }

    pub fn circuit_name(&self) -> &str {
        self.interface.name.as_deref().unwrap_or_default()
    }
}

/// Per-run submission counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub updated: usize,
    pub failed: usize,
}

/// How a run ended, short of a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Changes were submitted (some may have failed).
    Applied(ApplySummary),
    /// The operator said no.
    Declined,
    /// No circuit matched; nothing to ask about.
    NothingMatched,
}

// ── RunContext ───────────────────────────────────────────────────────

/// State threaded through the stages of a single run.
pub struct RunContext<'a, S> {
    session: &'a S,
    config: &'a RunConfig,
    labels: LabelIndex,
    matches: Vec<MatchRecord>,
}

impl<'a, S: ControllerSession> RunContext<'a, S> {
    pub fn new(session: &'a S, config: &'a RunConfig) -> Self {
        Self {
            session,
            config,
            labels: LabelIndex::default(),
            matches: Vec::new(),
        }
    }

    /// Matches in discovery order: sites as listed, then interfaces as
    /// listed within each site.
    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    /// Fetch tenant, labels and sites, then collect matching interfaces.
    ///
    /// Tenant and site enumeration failures are fatal. A label fetch failure
    /// only degrades the display; a per-site interface fetch failure skips
    /// that site.
    pub async fn discover(&mut self, reporter: &mut impl Reporter) -> Result<(), CoreError> {
        let tenant = self.session.fetch_tenant().await.map_err(|e| {
            CoreError::TenantUnavailable {
                payload: CoreError::payload_text(&e),
            }
        })?;
        info!(tenant = tenant.name.as_deref().unwrap_or(&tenant.id), "tenant resolved");
        reporter.tenant(&tenant);

        match self.session.fetch_wan_interface_labels().await {
            Ok(labels) => self.labels = labels.into_iter().collect(),
            Err(e) => warn!(error = %e, "could not fetch wan interface labels"),
        }
        debug!(labels = self.labels.len(), "label index built");

        let sites = self.session.fetch_sites().await.map_err(|e| {
            CoreError::SitesUnavailable {
                payload: CoreError::payload_text(&e),
            }
        })?;
        info!(sites = sites.len(), "sites enumerated");

        for site in &sites {
            if !site_is_eligible(site, self.config.exclude_hub_sites) {
                debug!(site_id = %site.id, "skipping hub site");
                continue;
            }

            let interfaces = match self.session.fetch_wan_interfaces(&site.id).await {
                Ok(interfaces) => interfaces,
                Err(e) => {
                    warn!(site_id = %site.id, error = %e, "could not list wan interfaces");
                    reporter.site_skipped(site, &CoreError::from(e));
                    continue;
                }
            };

            for interface in interfaces {
                let name = interface.name.as_deref().unwrap_or_default();
                if !circuit_matches(name, &self.config.match_text) {
                    continue;
                }
                let label = self.labels.resolve(interface.label_id.as_deref());
                reporter.matched(site, &interface, &label);
                self.matches.push(MatchRecord {
                    site_id: site.id.clone(),
                    site_name: site.name.clone().unwrap_or_default(),
                    interface,
                });
            }
        }

        info!(matches = self.matches.len(), "discovery complete");
        Ok(())
    }

    /// Show the pending change and ask for the go-ahead.
    pub fn confirm(
        &self,
        prompter: &mut impl Prompter,
        reporter: &mut impl Reporter,
    ) -> Result<bool, CoreError> {
        reporter.review(&self.matches, &self.config.request);
        if self.config.assume_yes {
            info!("confirmation skipped (--yes)");
            return Ok(true);
        }
        confirm(prompter)
    }

    /// Patch and submit every match, in order. Failures are reported and the
    /// batch carries on; nothing is retried or rolled back.
    pub async fn apply(&mut self, reporter: &mut impl Reporter) -> ApplySummary {
        let mut summary = ApplySummary::default();

        for record in &mut self.matches {
            let changes = apply_change(&mut record.interface, &self.config.request);
            reporter.changing(record, &changes);

            let result = self
                .session
                .submit_wan_interface(&record.site_id, &record.interface)
                .await
                .map_err(CoreError::from);

            match &result {
                Ok(()) => {
                    summary.updated += 1;
                    debug!(interface_id = %record.interface.id, "interface updated");
                }
                Err(e) => {
                    summary.failed += 1;
                    warn!(
                        interface_id = %record.interface.id,
                        error = %e,
                        "interface update failed"
                    );
                }
            }
            reporter.outcome(record, result.as_ref().map(|_| ()));
        }

        reporter.finished(&summary);
        summary
    }
}

// ── Entry point ──────────────────────────────────────────────────────

/// Run discovery, confirmation and mutation, then release the session.
///
/// The session is released exactly once, whether the run succeeds, is
/// declined, or fails partway. A failed logout is logged and ignored.
pub async fn run<S, P, R>(
    session: &S,
    config: &RunConfig,
    prompter: &mut P,
    reporter: &mut R,
) -> Result<RunOutcome, CoreError>
where
    S: ControllerSession,
    P: Prompter,
    R: Reporter,
{
    let outcome = drive(session, config, prompter, reporter).await;

    if let Err(e) = session.release().await {
        warn!(error = %e, "logout failed");
    }

    outcome
}

async fn drive<S, P, R>(
    session: &S,
    config: &RunConfig,
    prompter: &mut P,
    reporter: &mut R,
) -> Result<RunOutcome, CoreError>
where
    S: ControllerSession,
    P: Prompter,
    R: Reporter,
{
    let mut ctx = RunContext::new(session, config);
    ctx.discover(reporter).await?;

    if ctx.matches().is_empty() {
        return Ok(RunOutcome::NothingMatched);
    }

    if !ctx.confirm(prompter, reporter)? {
        reporter.declined();
        return Ok(RunOutcome::Declined);
    }

    let summary = ctx.apply(reporter).await;
    Ok(RunOutcome::Applied(summary))
}
