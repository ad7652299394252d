use crate::extract::VoteExtractor;
use crate::fetch::VoteSource;
use crate::rate_limit::RateLimiter;

// app's shared state
pub struct AppState {
    pub rate_limiter: RateLimiter,
    pub source: VoteSource,
    pub extractor: VoteExtractor,
}
