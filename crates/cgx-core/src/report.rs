// ── Progress reporting ──
//
// The workflow narrates what it finds and does through `Reporter`; the CLI
// renders it to the terminal. Every hook defaults to a no-op.

use cgx_api::{Site, Tenant, WanInterface};

use crate::change::{ChangeRequest, FieldChange};
use crate::error::CoreError;
use crate::labels::LabelInfo;
use crate::workflow::{ApplySummary, MatchRecord};

#[allow(unused_variables)]
pub trait Reporter {
    /// Tenant identity confirmed.
    fn tenant(&mut self, tenant: &Tenant) {}

    /// A site's interface listing failed; the site is skipped.
    fn site_skipped(&mut self, site: &Site, error: &CoreError) {}

    /// An interface matched the circuit name filter.
    fn matched(&mut self, site: &Site, interface: &WanInterface, label: &LabelInfo) {}

    /// Discovery finished; shown right before the confirmation prompt.
    fn review(&mut self, matches: &[MatchRecord], request: &ChangeRequest) {}

    /// The operator declined the change.
    fn declined(&mut self) {}

    /// About to submit one interface.
    fn changing(&mut self, record: &MatchRecord, changes: &[FieldChange]) {}

    /// Result of one submission.
    fn outcome(&mut self, record: &MatchRecord, result: Result<(), &CoreError>) {}

    /// All submissions done.
    fn finished(&mut self, summary: &ApplySummary) {}
}
