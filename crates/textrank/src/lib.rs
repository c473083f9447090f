pub mod graph;
pub mod outline;
pub mod rank;
pub mod summarizer;

pub use graph::SimilarityGraph;
pub use outline::generate_topic_outline;
pub use rank::rank;
pub use summarizer::{extract_key_points, summarize};
