//! markscout-research: Trademark conflict research pipeline.
//! Covers the whole research run:
//! - Nice classification lookup
//! - Phonetic variant expansion
//! - Search query strategy
//! - Batched, failure-tolerant retrieval against a search provider
//! - Heuristic conflict extraction (trademarks, companies, common law, precedents)
//! - Prompt-ready rendering of the findings

pub mod classification;
pub mod phonetic;
pub mod queries;
pub mod models;
pub mod sources;
pub mod retrieval;
pub mod extract;
pub mod summary;
pub mod pipeline;

pub use pipeline::{conduct_trademark_research, ResearchProgress, ResearchRequest};
pub use models::{Classification, RawHit, SearchHit, TrademarkResearchResult};
pub use retrieval::{RetrievalConfig, RetrievalEngine, RetrievalOutcome};
pub use sources::{build_provider, MockSearchProvider, SearchProvider};
pub use summary::{create_search_summary, format_brief, format_research_for_prompt};
