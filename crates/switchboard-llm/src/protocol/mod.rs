//! Wire format types for upstream provider APIs
//!
//! Pure serde structs matching each provider's JSON format. They are only
//! used at the adapter boundary.

pub mod anthropic;
pub mod openai;
