use clap::Parser;
use std::time::Duration;

pub const DEFAULT_VOTE_URL: &str =
    "https://www.nrsr.sk/web/Default.aspx?sid=schodze/hlasovanie/hlasovanie";

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "vote-gateway")]
#[command(about = "Rate limited JSON gateway for parliamentary vote results")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    // Upstream results page, the vote id is appended as `ID`
    #[arg(long, default_value = DEFAULT_VOTE_URL)]
    pub vote_url: String,

    // Rate limit max requests per window
    #[arg(long, default_value_t = 10)]
    pub rate_limit: u32,

    // Rate limit window in seconds (30 minutes)
    #[arg(long, default_value_t = 1800)]
    pub rate_window: u64,

    // Upstream fetch timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub fetch_timeout: u64,

    // Static docs served under /docs
    #[arg(long, default_value = "dist")]
    pub docs_dir: String,
}

impl Args {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn rate_window(&self) -> Duration {
        Duration::from_secs(self.rate_window)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }
}
