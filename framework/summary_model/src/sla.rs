use serde::{Deserialize, Serialize};

/// How far above the required compliance a tier must be to be shown in the highest colour tier.
pub const COMFORTABLE_MARGIN_PCT: f64 = 5.0;

/// One compliance measurement for one SLA tier within one scenario.
///
/// Records are produced by parsing a single line of simulator output and are not modified
/// afterwards. The percentages are reported by the simulator and are not recomputed here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlaRecord {
    /// The SLA tier, `SLA0` is `0`.
    pub tier_id: u32,
    /// The number of samples that violated the SLA.
    pub violation_count: u64,
    /// The number of samples observed for this tier.
    pub sample_count: u64,
    /// Share of samples in violation, 0 to 100. Informational only.
    pub violation_pct: f64,
    /// Share of samples that met the SLA, 0 to 100.
    pub compliance_pct: f64,
    /// The contractual compliance floor for the tier, 0 to 100.
    pub required_pct: f64,
}

impl SlaRecord {
    /// Whether this tier met its SLA. Meeting the requirement exactly is a pass.
    pub fn passed(&self) -> bool {
        self.compliance_pct >= self.required_pct
    }

    pub fn color_tier(&self) -> ColorTier {
        ColorTier::for_record(self)
    }
}

/// Presentation class for a rendered SLA cell.
///
/// This never feeds back into whether a scenario passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTier {
    /// Passed with at least [COMFORTABLE_MARGIN_PCT] to spare.
    High,
    /// Passed, but within [COMFORTABLE_MARGIN_PCT] of the requirement.
    Medium,
    /// Did not pass.
    Low,
}

impl ColorTier {
    pub fn for_record(record: &SlaRecord) -> Self {
        if !record.passed() {
            ColorTier::Low
        } else if record.compliance_pct >= record.required_pct + COMFORTABLE_MARGIN_PCT {
            ColorTier::High
        } else {
            ColorTier::Medium
        }
    }
}

#[cfg(test)]
pub(crate) fn record(tier_id: u32, compliance_pct: f64, required_pct: f64) -> SlaRecord {
    SlaRecord {
        tier_id,
        violation_count: 0,
        sample_count: 100,
        violation_pct: 100.0 - compliance_pct,
        compliance_pct,
        required_pct,
    }
}
