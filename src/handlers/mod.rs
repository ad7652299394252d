mod health;
mod metrics;
mod votes;

pub use health::health_handler;
pub use metrics::metrics_handler;
pub use votes::{get_votes_handler, post_votes_handler};
