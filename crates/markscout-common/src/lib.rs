//! markscout-common: Shared types, errors, and configuration used across all markscout crates.

pub mod error;
pub mod entities;
pub mod research_config;
pub mod sandbox;

// Re-export commonly used types
pub use entities::{
    CommonLawConflict, CompanyConflict, CompanyStatus, LegalPrecedent, RiskLevel,
    TrademarkConflict, TrademarkStatus,
};
pub use error::{MarkscoutError, Result};
pub use research_config::{ExecutionConfig, ResearchConfig, SearchConfig, SearchProviderKind};
