mod canadian_maple;
mod centurion;
pub(crate) mod common;
mod continents;
mod dx;
mod prefix;
mod rag_chew;
mod senator;
mod tribune;
mod triple_key;
mod wac;
mod was;

pub use canadian_maple::{CanadianMapleRule, MapleTier, CORE_BANDS, HF_BANDS, PROVINCES, TERRITORIES};
pub use centurion::{CenturionRule, CENTURION_REQUIREMENT};
pub use common::SPECIAL_EVENT_CALLS;
pub use continents::{continent_for_callsign, Continent};
pub use dx::{DxTally, DxccMode, DxccRule, SkccDxRule, MARITIME_MOBILE_LIMIT_NM};
pub use prefix::{extract_prefix, PrefixRule, PFX_STEP};
pub use rag_chew::{RagChewRule, MIN_CONTACT_MINUTES, RAG_CHEW_BASE_MINUTES};
pub use senator::{SenatorRule, SENATOR_REQUIREMENT, TRIBUNE_X8_REQUIREMENT};
pub use tribune::{TribuneRule, TRIBUNE_REQUIREMENT};
pub use triple_key::{TripleKeyRule, MEMBERS_PER_KEY};
pub use wac::WacRule;
pub use was::{WasRule, US_STATES};
