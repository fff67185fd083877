// cgx-core: match WAN interfaces by circuit name and apply a bulk
// BFD / LQM / BWM update through a controller session.

pub mod auth;
pub mod change;
pub mod error;
pub mod labels;
pub mod matching;
pub mod prompt;
pub mod report;
pub mod session;
pub mod workflow;

// ── Primary re-exports ──────────────────────────────────────────────
pub use auth::{Credential, CredentialSources, TokenSource, authenticate};
pub use change::{BfdMode, BwmState, ChangeRequest, FieldChange, Toggle, apply_change};
pub use error::CoreError;
pub use labels::{LabelIndex, LabelInfo};
pub use matching::{circuit_matches, site_is_eligible};
pub use prompt::{Prompter, confirm, parse_answer};
pub use report::Reporter;
pub use session::{Authenticator, ControllerSession};
pub use workflow::{ApplySummary, MatchRecord, RunConfig, RunContext, RunOutcome, run};

pub use cgx_api::{Site, Tenant, WanInterface, WanInterfaceLabel};
