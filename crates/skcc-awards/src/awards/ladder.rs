use serde::{Deserialize, Serialize};

/// Label returned below the first tier of every ladder.
pub const NOT_YET: &str = "Not Yet";

/// Malformed ladder definitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LadderError {
    #[error("endorsement ladder has no tiers")]
    Empty,
    #[error("endorsement ladder thresholds must ascend: tier {index} ({threshold}) follows {previous}")]
    NonAscending {
        index: usize,
        previous: u64,
        threshold: u64,
    },
    #[error("endorsement ladder extension step must be positive")]
    ZeroStep,
}

/// One rung of an endorsement ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndorsementTier {
    pub threshold: u64,
    pub label: String,
}

impl EndorsementTier {
    pub fn new(threshold: u64, label: impl Into<String>) -> Self {
        Self {
            threshold,
            label: label.into(),
        }
    }
}

/// How extrapolated tiers are named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionLabel {
    /// `"<name> x<threshold / unit>"`, e.g. `Centurion x15` at 1500 with a unit of 100.
    Multiplier { name: String, unit: u64 },
    /// `"<name> <threshold>"`, e.g. `DXCC 325`.
    Count { name: String },
    /// `"<prefix><start + k * increment>"` for the k-th extrapolated step, e.g. `Px15`.
    Stride {
        prefix: String,
        start: u64,
        increment: u64,
    },
}

impl ExtensionLabel {
    fn render(&self, threshold: u64, steps_past_last: u64) -> String {
        match self {
            Self::Multiplier { name, unit } => format!("{name} x{}", threshold / (*unit).max(1)),
            Self::Count { name } => format!("{name} {threshold}"),
            Self::Stride {
                prefix,
                start,
                increment,
            } => format!(
                "{prefix}{}",
                start.saturating_add(steps_past_last.saturating_mul(*increment))
            ),
        }
    }
}

/// Award-specific continuation past the last explicit tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LadderExtension {
    pub step: u64,
    pub label: ExtensionLabel,
}

/// Ordered threshold-to-label mapping with an optional extrapolation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndorsementLadder {
    tiers: Vec<EndorsementTier>,
    extension: Option<LadderExtension>,
}

impl EndorsementLadder {
    pub fn new(tiers: Vec<EndorsementTier>) -> Result<Self, LadderError> {
        if tiers.is_empty() {
            return Err(LadderError::Empty);
        }

        for (index, pair) in tiers.windows(2).enumerate() {
            if pair[1].threshold <= pair[0].threshold {
                return Err(LadderError::NonAscending {
                    index: index + 1,
                    previous: pair[0].threshold,
                    threshold: pair[1].threshold,
                });
            }
        }

        Ok(Self {
            tiers,
            extension: None,
        })
    }

    /// Ladder of `count` tiers spaced `unit` apart, labelled `name`, `name x2`, ... `name x<count>`.
    pub fn multiples(name: &str, unit: u64, count: u64) -> Result<Self, LadderError> {
        if unit == 0 {
            return Err(LadderError::ZeroStep);
        }

        let tiers = (1..=count)
            .map(|multiple| {
                let label = if multiple == 1 {
                    name.to_string()
                } else {
                    format!("{name} x{multiple}")
                };
                EndorsementTier::new(unit * multiple, label)
            })
            .collect();

        Self::new(tiers)
    }

    pub fn with_extension(mut self, step: u64, label: ExtensionLabel) -> Result<Self, LadderError> {
        if step == 0 {
            return Err(LadderError::ZeroStep);
        }
        self.extension = Some(LadderExtension { step, label });
        Ok(self)
    }

    pub fn tiers(&self) -> &[EndorsementTier] {
        &self.tiers
    }

    pub fn extension(&self) -> Option<&LadderExtension> {
        self.extension.as_ref()
    }

    pub fn first_threshold(&self) -> u64 {
        self.tiers[0].threshold
    }

    fn last_threshold(&self) -> u64 {
        self.tiers[self.tiers.len() - 1].threshold
    }

    /// Highest label whose threshold does not exceed `count`.
    pub fn level_for(&self, count: u64) -> String {
        if count < self.first_threshold() {
            return NOT_YET.to_string();
        }

        let last = self.last_threshold();
        if let Some(extension) = &self.extension {
            if count >= last.saturating_add(extension.step) {
                let steps = (count - last) / extension.step;
                return extension
                    .label
                    .render(last + steps * extension.step, steps);
            }
        }

        self.tiers
            .iter()
            .take_while(|tier| tier.threshold <= count)
            .last()
            .map(|tier| tier.label.clone())
            .unwrap_or_else(|| NOT_YET.to_string())
    }

    /// Smallest threshold strictly greater than `count`, or `None` once a ladder
    /// without extension is exhausted or the next step would not fit in a `u64`.
    pub fn next_threshold_for(&self, count: u64) -> Option<u64> {
        if let Some(tier) = self.tiers.iter().find(|tier| tier.threshold > count) {
            return Some(tier.threshold);
        }

        let last = self.last_threshold();
        self.extension
            .as_ref()
            .and_then(|extension| {
                ((count - last) / extension.step + 1)
                    .checked_mul(extension.step)
                    .and_then(|offset| last.checked_add(offset))
            })
    }

    /// Explicit tiers followed by `extra` extrapolated ones, for requirement listings.
    pub fn listing(&self, extra: usize) -> Vec<EndorsementTier> {
        let mut tiers = self.tiers.clone();
        if let Some(extension) = &self.extension {
            let last = self.last_threshold();
            tiers.extend((1..=extra as u64).map(|k| {
                let threshold = last.saturating_add(k.saturating_mul(extension.step));
                EndorsementTier::new(threshold, extension.label.render(threshold, k))
            }));
        }
        tiers
    }
}
