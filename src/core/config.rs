use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub swagger: SwaggerConfig,
    pub fact_check: FactCheckConfig,
    pub performance: PerformanceConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Connection settings for a single fact-checking provider
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl ProviderConfig {
    /// A provider is only queried when an API key is configured
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Third-party fact-check providers configuration
#[derive(Debug, Clone)]
pub struct FactCheckConfig {
    pub snopes: ProviderConfig,
    pub factcheck_org: ProviderConfig,
    pub politifact: ProviderConfig,
    pub request_timeout: Duration,
}

/// Resource sampling and request profiling settings
#[derive(Debug, Clone)]
pub struct PerformanceConfig {
    pub sample_interval: Duration,
    pub history_size: usize,
    pub slow_request_threshold: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            fact_check: FactCheckConfig::from_env()?,
            performance: PerformanceConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 60 * 1024 * 1024; // 60MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "VeritasAI API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Content verification and deepfake detection API".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl FactCheckConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 10;

    pub fn from_env() -> Result<Self, String> {
        let timeout_secs = env::var("FACT_CHECK_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "FACT_CHECK_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            snopes: provider_from_env("SNOPES", "https://api.snopes.com/v1"),
            factcheck_org: provider_from_env("FACTCHECK_ORG", "https://api.factcheck.org/v1"),
            politifact: provider_from_env("POLITIFACT", "https://api.politifact.org/v1"),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Configuration with every provider disabled
    pub fn disabled() -> Self {
        let provider = |base_url: &str| ProviderConfig {
            api_key: None,
            base_url: base_url.to_string(),
        };

        Self {
            snopes: provider("https://api.snopes.com/v1"),
            factcheck_org: provider("https://api.factcheck.org/v1"),
            politifact: provider("https://api.politifact.org/v1"),
            request_timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl PerformanceConfig {
    const DEFAULT_SAMPLE_INTERVAL_SECS: u64 = 5;
    const DEFAULT_HISTORY_SIZE: usize = 1000;
    const DEFAULT_SLOW_REQUEST_MS: u64 = 1000;

    pub fn from_env() -> Result<Self, String> {
        let sample_interval_secs = env::var("PERFORMANCE_SAMPLE_INTERVAL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_SAMPLE_INTERVAL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "PERFORMANCE_SAMPLE_INTERVAL_SECS must be a valid number".to_string())?;

        let history_size = env::var("PERFORMANCE_HISTORY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_HISTORY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "PERFORMANCE_HISTORY_SIZE must be a valid number".to_string())?;

        let slow_request_ms = env::var("PERFORMANCE_SLOW_REQUEST_MS")
            .unwrap_or_else(|_| Self::DEFAULT_SLOW_REQUEST_MS.to_string())
            .parse::<u64>()
            .map_err(|_| "PERFORMANCE_SLOW_REQUEST_MS must be a valid number".to_string())?;

        if sample_interval_secs == 0 {
            return Err("PERFORMANCE_SAMPLE_INTERVAL_SECS must be greater than 0".to_string());
        }
        if history_size == 0 {
            return Err("PERFORMANCE_HISTORY_SIZE must be greater than 0".to_string());
        }

        Ok(Self {
            sample_interval: Duration::from_secs(sample_interval_secs),
            history_size,
            slow_request_threshold: Duration::from_millis(slow_request_ms),
        })
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            sample_interval: Duration::from_secs(Self::DEFAULT_SAMPLE_INTERVAL_SECS),
            history_size: Self::DEFAULT_HISTORY_SIZE,
            slow_request_threshold: Duration::from_millis(Self::DEFAULT_SLOW_REQUEST_MS),
        }
    }
}

fn provider_from_env(prefix: &str, default_base_url: &str) -> ProviderConfig {
    let api_key = env::var(format!("{}_API_KEY", prefix))
        .ok()
        .filter(|s| !s.is_empty());
    let base_url =
        env::var(format!("{}_BASE_URL", prefix)).unwrap_or_else(|_| default_base_url.to_string());

    ProviderConfig { api_key, base_url }
}
