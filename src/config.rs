use clap::Parser;
use std::convert::Infallible;
use std::time::Duration;

// Runtime mode, production restricts CORS origins and turns on HSTS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Development,
    Production,
}

impl Mode {
    pub fn is_production(self) -> bool {
        self == Mode::Production
    }

    // Only the exact value "production" switches modes, anything else is development
    pub fn parse(raw: &str) -> Result<Mode, Infallible> {
        Ok(if raw == "production" {
            Mode::Production
        } else {
            Mode::Development
        })
    }
}

// CLI argument structure, every flag falls back to an environment variable
#[derive(Parser, Debug, Clone)]
#[command(name = "todo-service")]
#[command(about = "In-memory todo REST service")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    // Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "APP_ENV", value_parser = Mode::parse, default_value = "development")]
    pub mode: Mode,

    // Origins allowed by CORS in production (comma-separated)
    // Example: "https://app.example.com,https://admin.example.com"
    #[arg(long, env = "ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,

    // Rate limit max requests per window
    #[arg(long, env = "RATE_LIMIT_MAX", default_value_t = 100)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, env = "RATE_LIMIT_WINDOW_SECS", default_value_t = 900)]
    pub rate_window: u64,

    // How often expired rate limit entries are swept, in seconds
    #[arg(long, env = "RATE_LIMIT_SWEEP_SECS", default_value_t = 60)]
    pub sweep_interval: u64,

    // Max accepted request body in bytes
    #[arg(long, env = "BODY_LIMIT_BYTES", default_value_t = 10 * 1024 * 1024)]
    pub body_limit: usize,
}

impl Args {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval.max(1))
    }
}

// Plain settings, tests build this without going through clap
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub mode: Mode,
    pub allowed_origins: Vec<String>,
    pub rate_limit: u32,
    pub rate_window: Duration,
    pub body_limit: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Development,
            allowed_origins: Vec::new(),
            rate_limit: 100,
            rate_window: Duration::from_secs(15 * 60),
            body_limit: 10 * 1024 * 1024,
        }
    }
}

impl From<&Args> for ServiceConfig {
    fn from(args: &Args) -> Self {
        Self {
            mode: args.mode,
            allowed_origins: args
                .allowed_origins
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            rate_limit: args.rate_limit,
            rate_window: Duration::from_secs(args.rate_window),
            body_limit: args.body_limit,
        }
    }
}
