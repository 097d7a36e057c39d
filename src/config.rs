/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, AUTH_*, LOG_*, METRICS_*, HTTP_*)
 * - 設定値のバリデーション (不正なら起動失敗)
 * - blacklist 系はここでは文字列のまま持ち、正規化は services 側で行う
 */
use std::collections::HashMap;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use jsonwebtoken::Algorithm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<String>) -> Self {
        match value
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Authentication is enabled iff a secret is set.
    pub secret: Option<String>,
    pub algorithm: Algorithm,
    pub leeway_seconds: u64,
    pub blacklist: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub blacklist: Vec<String>,
    pub full_blacklist: Vec<String>,
    pub variables_blacklist: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Instrumentation is enabled iff a namespace is set.
    pub namespace: Option<String>,
    pub subsystem: String,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub body_limit_bytes: usize,
    pub timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            body_limit_bytes: 1024 * 1024,
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
    pub http: HttpConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (environment, test map, ...).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let secret = lookup("AUTH_SECRET").filter(|s| !s.is_empty());

        let algorithm = match lookup("AUTH_ALGORITHM") {
            Some(v) => parse_hmac_algorithm(&v).ok_or(ConfigError::Invalid("AUTH_ALGORITHM"))?,
            None => Algorithm::HS512,
        };

        let leeway_seconds = parse_or("AUTH_LEEWAY_SECONDS", &lookup, 0)?;

        let auth = AuthConfig {
            secret,
            algorithm,
            leeway_seconds,
            blacklist: parse_list(&lookup("AUTH_BLACKLIST").unwrap_or_default()),
        };

        let logging = LoggingConfig {
            enabled: parse_bool("LOG_ENABLED", &lookup, true)?,
            blacklist: parse_list(&lookup("LOG_BLACKLIST").unwrap_or_default()),
            full_blacklist: parse_list(&lookup("LOG_FULL_BLACKLIST").unwrap_or_default()),
            variables_blacklist: parse_variables_blacklist(
                &lookup("LOG_VARIABLES_BLACKLIST").unwrap_or_default(),
            )
            .ok_or(ConfigError::Invalid("LOG_VARIABLES_BLACKLIST"))?,
        };

        let metrics = MetricsConfig {
            namespace: lookup("METRICS_NAMESPACE").filter(|s| !s.trim().is_empty()),
            subsystem: lookup("METRICS_SUBSYSTEM").unwrap_or_else(|| "graphql".to_string()),
        };

        let defaults = HttpConfig::default();
        let http = HttpConfig {
            body_limit_bytes: parse_or(
                "HTTP_BODY_LIMIT_BYTES",
                &lookup,
                defaults.body_limit_bytes,
            )?,
            timeout_seconds: parse_or("HTTP_TIMEOUT_SECONDS", &lookup, defaults.timeout_seconds)?,
        };

        Ok(Self {
            addr,
            app_env,
            auth,
            logging,
            metrics,
            http,
        })
    }
}

fn parse_or<F, T>(key: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

fn parse_bool<F>(key: &'static str, lookup: &F, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid(key)),
        },
    }
}

fn parse_hmac_algorithm(value: &str) -> Option<Algorithm> {
    match value.trim().to_ascii_uppercase().as_str() {
        "HS256" => Some(Algorithm::HS256),
        "HS384" => Some(Algorithm::HS384),
        "HS512" => Some(Algorithm::HS512),
        _ => None,
    }
}

/// `a, b,,c` → `["a", "b", "c"]`
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// `login:password|otp,signup:password` → `{login: [password, otp], signup: [password]}`
fn parse_variables_blacklist(value: &str) -> Option<HashMap<String, Vec<String>>> {
    let mut out: HashMap<String, Vec<String>> = HashMap::new();
    for entry in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (method, variables) = entry.split_once(':')?;
        let method = method.trim();
        if method.is_empty() {
            return None;
        }
        out.entry(method.to_string()).or_default().extend(
            variables
                .split('|')
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        );
    }
    Some(out)
}
