use super::domain::{AwardId, AwardRequirements, ContactRecord};
use super::ladder::{EndorsementTier, LadderError};
use super::report::ProgressReport;
use super::rules::{
    CanadianMapleRule, CenturionRule, DxccRule, PrefixRule, RagChewRule, SenatorRule,
    SkccDxRule, TribuneRule, TripleKeyRule, WacRule, WasRule,
};
use super::{AwardContext, AwardRule};

/// Errors raised while looking up or assembling an award.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AwardError {
    #[error("unknown award '{name}'")]
    UnknownAward { name: String },
    #[error("malformed endorsement ladder: {0}")]
    MalformedLadder(#[from] LadderError),
}

/// Name-to-rule dispatch for every supported award.
#[derive(Debug, Clone, Copy, Default)]
pub struct AwardRegistry;

impl AwardRegistry {
    pub fn new() -> Self {
        Self
    }

    /// Every award in display order.
    pub fn awards(&self) -> [AwardId; 13] {
        AwardId::ordered()
    }

    /// Case-insensitive lookup; whitespace, `_`, `-` and a leading `SKCC` are ignored.
    pub fn lookup(&self, name: &str) -> Result<AwardId, AwardError> {
        let normalized = normalize(name);
        let award = match normalized.as_str() {
            "centurion" => AwardId::Centurion,
            "tribune" => AwardId::Tribune,
            "senator" => AwardId::Senator,
            "was" | "workedallstates" => AwardId::Was,
            "wac" | "workedallcontinents" => AwardId::Wac,
            "canadianmaple" | "maple" => AwardId::CanadianMaple,
            "pfx" | "prefix" | "prefixes" | "prefixpoints" => AwardId::Pfx,
            "ragchew" => AwardId::RagChew,
            "triplekey" => AwardId::TripleKey,
            "dxcc" | "dxccmixed" | "mixed" => AwardId::DxccMixed,
            "dxcccw" => AwardId::DxccCw,
            "dxq" | "dxqso" => AwardId::Dxq,
            "dxc" | "dxcountry" => AwardId::Dxc,
            _ => {
                return Err(AwardError::UnknownAward {
                    name: name.to_string(),
                })
            }
        };
        Ok(award)
    }

    pub fn resolve(&self, name: &str) -> Result<Box<dyn AwardRule>, AwardError> {
        self.rule_for(self.lookup(name)?)
    }

    pub fn rule_for(&self, award: AwardId) -> Result<Box<dyn AwardRule>, AwardError> {
        let rule: Box<dyn AwardRule> = match award {
            AwardId::Centurion => Box::new(CenturionRule::new()?),
            AwardId::Tribune => Box::new(TribuneRule::new()?),
            AwardId::Senator => Box::new(SenatorRule::new()?),
            AwardId::Was => Box::new(WasRule::new()),
            AwardId::Wac => Box::new(WacRule::new()),
            AwardId::CanadianMaple => Box::new(CanadianMapleRule::new()),
            AwardId::Pfx => Box::new(PrefixRule::new()?),
            AwardId::RagChew => Box::new(RagChewRule::new()?),
            AwardId::TripleKey => Box::new(TripleKeyRule::new()),
            AwardId::DxccMixed => Box::new(DxccRule::mixed()?),
            AwardId::DxccCw => Box::new(DxccRule::cw()?),
            AwardId::Dxq => Box::new(SkccDxRule::qso()?),
            AwardId::Dxc => Box::new(SkccDxRule::country()?),
        };
        Ok(rule)
    }

    /// Resolve `name` and pin `ctx` to it.
    pub fn bind(&self, name: &str, ctx: AwardContext) -> Result<BoundAward, AwardError> {
        Ok(BoundAward {
            rule: self.resolve(name)?,
            ctx,
        })
    }
}

fn normalize(name: &str) -> String {
    let folded: String = name
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect();
    match folded.strip_prefix("skcc") {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => folded,
    }
}

/// A rule with its collaborators already applied.
pub struct BoundAward {
    rule: Box<dyn AwardRule>,
    ctx: AwardContext,
}

impl BoundAward {
    pub fn id(&self) -> AwardId {
        self.rule.id()
    }

    pub fn context(&self) -> &AwardContext {
        &self.ctx
    }

    pub fn validate(&self, record: &ContactRecord) -> bool {
        self.rule.validate(record, &self.ctx)
    }

    /// Records that individually count toward the award.
    pub fn filter<'a>(&self, records: &'a [ContactRecord]) -> Vec<&'a ContactRecord> {
        records
            .iter()
            .filter(|record| self.validate(record))
            .collect()
    }

    pub fn calculate_progress(&self, records: &[ContactRecord]) -> ProgressReport {
        self.rule.calculate_progress(records, &self.ctx)
    }

    pub fn requirements(&self) -> AwardRequirements {
        self.rule.requirements()
    }

    pub fn endorsement_tiers(&self) -> Vec<EndorsementTier> {
        self.rule.endorsement_tiers()
    }
}

impl std::fmt::Debug for BoundAward {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundAward")
            .field("award", &self.rule.id())
            .field("ctx", &self.ctx)
            .finish()
    }
}
