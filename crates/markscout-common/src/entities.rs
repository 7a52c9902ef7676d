/// Conflict record types produced by the research extractors.
/// Every record is built once from a single search hit and never mutated.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Severity / status enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Critical => "CRITICAL",
            RiskLevel::High     => "HIGH",
            RiskLevel::Medium   => "MEDIUM",
            RiskLevel::Low      => "LOW",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filing status of a trademark application as inferred from result text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrademarkStatus {
    Registered,
    Pending,
    Objected,
    Opposed,
    Abandoned,
}

impl TrademarkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrademarkStatus::Registered => "REGISTERED",
            TrademarkStatus::Pending    => "PENDING",
            TrademarkStatus::Objected   => "OBJECTED",
            TrademarkStatus::Opposed    => "OPPOSED",
            TrademarkStatus::Abandoned  => "ABANDONED",
        }
    }
}

impl std::fmt::Display for TrademarkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompanyStatus {
    Active,
    Inactive,
    Dissolved,
    Unknown,
}

impl CompanyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyStatus::Active    => "ACTIVE",
            CompanyStatus::Inactive  => "INACTIVE",
            CompanyStatus::Dissolved => "DISSOLVED",
            CompanyStatus::Unknown   => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for CompanyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Trademark filing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TrademarkConflict {
    pub name: String,
    pub source: String,         // e.g. "IP India", "Trademarking.in", "Web Search"
    pub conflict_type: String,  // trademark_application | international
    pub application_number: Option<String>,
    pub status: Option<TrademarkStatus>,
    pub owner: Option<String>,
    pub class_number: Option<String>,
    pub filing_date: Option<String>,
    pub similarity_score: Option<String>, // HIGH | MEDIUM | LOW
    pub industry_overlap: Option<String>,
    pub geographic_overlap: Option<String>,
    pub risk_level: RiskLevel,
    pub details: Option<String>,
    pub url: Option<String>,
}

// ---------------------------------------------------------------------------
// Company registration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CompanyConflict {
    pub name: String,
    pub cin: Option<String>, // Corporate Identification Number
    pub status: CompanyStatus,
    pub incorporation_date: Option<String>,
    pub industry: Option<String>,
    pub state: Option<String>,
    pub source: String,
    pub overlap_analysis: Option<String>,
    pub risk_level: RiskLevel,
    pub url: Option<String>,
}

// ---------------------------------------------------------------------------
// Common-law (unregistered) usage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CommonLawConflict {
    pub name: String,
    pub platform: String,
    pub industry_match: bool,
    pub url: String,
    pub snippet: String,
    pub risk_type: String, // always "common_law"
    pub risk_level: RiskLevel,
}

// ---------------------------------------------------------------------------
// Legal precedent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct LegalPrecedent {
    pub case_name: String,
    pub court: Option<String>,
    pub year: Option<String>,
    pub relevance: String,
    pub outcome: Option<String>,
    pub key_principle: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
}
