// ── Field-level patch derivation ──
//
// Given a requested change and a fetched WAN interface, work out which
// fields to rewrite. Pure and idempotent: every target is an absolute
// value, never a flip of the current one.

use std::fmt;

use serde_json::Value;

use cgx_api::WanInterface;

/// `bw_config_mode` value for bandwidth monitoring enabled.
pub const BWM_ENABLED: &str = "manual";
/// `bw_config_mode` value for bandwidth monitoring disabled.
pub const BWM_DISABLED: &str = "manual_bwm_disabled";

// ── Requested values ─────────────────────────────────────────────────

/// Target BFD mode for every matched circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BfdMode {
    Aggressive,
    NonAggressive,
}

impl BfdMode {
    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aggressive => "aggressive",
            Self::NonAggressive => "non_aggressive",
        }
    }
}

impl fmt::Display for BfdMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional on/off toggle for LQM and BWM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Toggle {
    #[default]
    NoChange,
    On,
    Off,
}

impl Toggle {
    pub fn is_change(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoChange => "nochange",
            Self::On => "on",
            Self::Off => "off",
        })
    }
}

/// Bandwidth monitoring state derived from `bw_config_mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BwmState {
    On,
    Off,
    Unknown,
}

impl BwmState {
    /// `manual` → On, `manual_bwm_disabled` → Off, anything else → Unknown.
    pub fn from_config_mode(mode: Option<&str>) -> Self {
        match mode {
            Some(BWM_ENABLED) => Self::On,
            Some(BWM_DISABLED) => Self::Off,
            _ => Self::Unknown,
        }
    }
}

/// The bulk update requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeRequest {
    pub bfd_mode: BfdMode,
    pub lqm: Toggle,
    pub bwm: Toggle,
}

impl ChangeRequest {
    /// One-line description used in the confirmation prompt.
    pub fn summary(self) -> String {
        let mut out = format!("a BFD Mode of {}", self.bfd_mode);
        if self.lqm.is_change() {
            out.push_str(&format!(", LQM {}", self.lqm));
        }
        if self.bwm.is_change() {
            out.push_str(&format!(", BWM {}", self.bwm));
        }
        out
    }
}

// ── Derived changes ──────────────────────────────────────────────────

/// One field rewrite (or skipped rewrite) on a single interface.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    BfdMode { from: Option<String>, to: BfdMode },
    Lqm { from: Option<Value>, to: Toggle },
    Bwm { from: String, to: Toggle },
    /// BWM change requested but the current mode is not one we recognise.
    BwmIgnored { current: Option<String> },
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BfdMode { from, to } => write!(
                f,
                "Current BFD Mode {} changing to {to}",
                from.as_deref().unwrap_or("-")
            ),
            Self::Lqm { from, to } => write!(
                f,
                "Current LQM Mode {} changing to {to}",
                display_value(from.as_ref())
            ),
            Self::Bwm { from, to } => write!(f, "Current BWM Mode {from} changing to {to}"),
            Self::BwmIgnored { current } => write!(
                f,
                "Ignoring BWM Mode change due to unknown state: {}",
                current.as_deref().unwrap_or("-")
            ),
        }
    }
}

/// Render an optional JSON scalar without quotes.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".into(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Rewrite `iface` in place according to `request`.
///
/// BFD is always set. LQM and BWM are independent of each other and of BFD.
/// A BWM request against an unrecognised `bw_config_mode` leaves the field
/// untouched and is reported as [`FieldChange::BwmIgnored`].
pub fn apply_change(iface: &mut WanInterface, request: &ChangeRequest) -> Vec<FieldChange> {
    let mut changes = Vec::with_capacity(3);

    changes.push(FieldChange::BfdMode {
        from: iface.bfd_mode.clone(),
        to: request.bfd_mode,
    });
    iface.bfd_mode = Some(request.bfd_mode.as_str().to_owned());

    let lqm_value = match request.lqm {
        Toggle::NoChange => None,
        Toggle::On => Some("true"),
        Toggle::Off => Some("false"),
    };
    if let Some(value) = lqm_value {
        changes.push(FieldChange::Lqm {
            from: iface.lqm_enabled.clone(),
            to: request.lqm,
        });
        iface.lqm_enabled = Some(Value::String(value.to_owned()));
    }

    if request.bwm.is_change() {
        let state = BwmState::from_config_mode(iface.bw_config_mode.as_deref());
        if state == BwmState::Unknown {
            changes.push(FieldChange::BwmIgnored {
                current: iface.bw_config_mode.clone(),
            });
        } else {
            let target = if request.bwm == Toggle::On {
                BWM_ENABLED
            } else {
                BWM_DISABLED
            };
            changes.push(FieldChange::Bwm {
                from: iface.bw_config_mode.clone().unwrap_or_default(),
                to: request.bwm,
            });
            iface.bw_config_mode = Some(target.to_owned());
        }
    }

    changes
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn iface(bw_config_mode: &str) -> WanInterface {
        serde_json::from_value(json!({
            "id": "w1",
            "name": "LTE-Primary",
            "label_id": "l1",
            "bfd_mode": "aggressive",
            "lqm_enabled": true,
            "bw_config_mode": bw_config_mode,
            "_etag": 3
        }))
        .unwrap()
    }

    fn request(bfd_mode: BfdMode, lqm: Toggle, bwm: Toggle) -> ChangeRequest {
        ChangeRequest { bfd_mode, lqm, bwm }
    }

    #[test]
    fn bwm_state_derivation_is_total() {
        assert_eq!(BwmState::from_config_mode(Some("manual")), BwmState::On);
        assert_eq!(
            BwmState::from_config_mode(Some("manual_bwm_disabled")),
            BwmState::Off
        );
        assert_eq!(BwmState::from_config_mode(Some("auto")), BwmState::Unknown);
        assert_eq!(BwmState::from_config_mode(Some("")), BwmState::Unknown);
        assert_eq!(BwmState::from_config_mode(Some("Manual")), BwmState::Unknown);
        assert_eq!(BwmState::from_config_mode(None), BwmState::Unknown);
    }

    #[test]
    fn bfd_only_request_touches_only_bfd() {
        let mut w = iface("manual");
        let before = w.clone();
        let changes = apply_change(
            &mut w,
            &request(BfdMode::NonAggressive, Toggle::NoChange, Toggle::NoChange),
        );

        assert_eq!(changes.len(), 1);
        assert_eq!(w.bfd_mode.as_deref(), Some("non_aggressive"));
        assert_eq!(w.lqm_enabled, before.lqm_enabled);
        assert_eq!(w.bw_config_mode, before.bw_config_mode);
        assert_eq!(w.extra, before.extra);
    }

    #[test]
    fn lqm_off_leaves_bwm_alone() {
        let mut w = iface("manual");
        apply_change(&mut w, &request(BfdMode::Aggressive, Toggle::Off, Toggle::NoChange));

        assert_eq!(w.lqm_enabled, Some(json!("false")));
        assert_eq!(w.bw_config_mode.as_deref(), Some("manual"));
        assert_eq!(w.bfd_mode.as_deref(), Some("aggressive"));
    }

    #[test]
    fn lqm_on_writes_string_true() {
        let mut w = iface("manual");
        w.lqm_enabled = Some(json!(false));
        let changes = apply_change(
            &mut w,
            &request(BfdMode::Aggressive, Toggle::On, Toggle::NoChange),
        );

        assert_eq!(w.lqm_enabled, Some(json!("true")));
        assert!(changes.contains(&FieldChange::Lqm {
            from: Some(json!(false)),
            to: Toggle::On,
        }));
    }

    #[test]
    fn bwm_off_from_manual() {
        let mut w = iface("manual");
        let changes = apply_change(
            &mut w,
            &request(BfdMode::Aggressive, Toggle::NoChange, Toggle::Off),
        );

        assert_eq!(w.bw_config_mode.as_deref(), Some("manual_bwm_disabled"));
        assert!(changes.contains(&FieldChange::Bwm {
            from: "manual".into(),
            to: Toggle::Off,
        }));
    }

    #[test]
    fn bwm_on_from_disabled() {
        let mut w = iface("manual_bwm_disabled");
        apply_change(&mut w, &request(BfdMode::Aggressive, Toggle::NoChange, Toggle::On));
        assert_eq!(w.bw_config_mode.as_deref(), Some("manual"));
    }

    #[test]
    fn unknown_bwm_mode_is_never_coerced() {
        for toggle in [Toggle::On, Toggle::Off] {
            let mut w = iface("unknown_mode");
            let req = request(BfdMode::Aggressive, Toggle::NoChange, toggle);
            let changes = apply_change(&mut w, &req);

            assert_eq!(w.bw_config_mode.as_deref(), Some("unknown_mode"));
            assert!(changes.contains(&FieldChange::BwmIgnored {
                current: Some("unknown_mode".into()),
            }));
        }
    }

    #[test]
    fn null_fields_survive_serialization() {
        let fetched = json!({
            "id": "w1",
            "name": "LTE",
            "label_id": null,
            "bfd_mode": "aggressive",
            "lqm_enabled": null,
            "bw_config_mode": null,
            "_etag": 1
        });
        let mut w: WanInterface = serde_json::from_value(fetched.clone()).unwrap();

        let changes = apply_change(
            &mut w,
            &request(BfdMode::Aggressive, Toggle::NoChange, Toggle::On),
        );

        assert!(changes.contains(&FieldChange::BwmIgnored { current: None }));
        assert_eq!(serde_json::to_value(&w).unwrap(), fetched);
    }

    #[test]
    fn applying_twice_is_idempotent() {
        let req = request(BfdMode::NonAggressive, Toggle::Off, Toggle::Off);
        let mut once = iface("manual");
        apply_change(&mut once, &req);
        let mut twice = once.clone();
        apply_change(&mut twice, &req);

        assert_eq!(once, twice);
    }

    #[test]
    fn summary_mentions_requested_toggles_only() {
        let req = request(BfdMode::NonAggressive, Toggle::Off, Toggle::NoChange);
        let text = req.summary();
        assert!(text.contains("non_aggressive"));
        assert!(text.contains("LQM off"));
        assert!(!text.contains("BWM"));
    }

    #[test]
    fn ignored_change_message() {
        let change = FieldChange::BwmIgnored {
            current: Some("auto".into()),
        };
        assert_eq!(
            change.to_string(),
            "Ignoring BWM Mode change due to unknown state: auto"
        );
    }
}
