// Reviewer: class-based TF-IDF keyword ranking for movie reviews
//
// This is the library root. Each module corresponds to one stage of the
// load -> aggregate -> count -> weight -> rank -> save pipeline.

pub mod config;
pub mod corpus;
pub mod ctfidf;
pub mod error;
pub mod output;
pub mod pipeline;
