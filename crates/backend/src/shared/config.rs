use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub proxy: ProxyConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub name: String,
    pub environment: String,
    /// В режиме отладки ответы с ошибками содержат текст ошибки Proxy API
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "Firebird Web Proxy".to_string(),
            environment: "development".to_string(),
            debug: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Пустой список - CORS не настраивается
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8001,
            allowed_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ProxyConfig {
    pub url: String,
    pub primary_token: String,
    pub fallback_token: String,
    pub timeout_secs: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            primary_token: String::new(),
            fallback_token: String::new(),
            timeout_secs: 30,
        }
    }
}

impl ProxyConfig {
    /// Непустые токены в порядке использования: основной, затем резервный
    pub fn tokens(&self) -> Vec<String> {
        [&self.primary_token, &self.fallback_token]
            .into_iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Конфигурация по умолчанию, встроенная в бинарник
const DEFAULT_CONFIG: &str = r#"
[app]
name = "Firebird Web Proxy"
environment = "development"
debug = true

[server]
host = "0.0.0.0"
port = 8001
allowed_origins = []

[proxy]
url = "http://localhost:8000"
primary_token = ""
fallback_token = ""
timeout_secs = 30
"#;

/// Загрузка конфигурации из config.toml
///
/// Порядок поиска:
/// 1. Рядом с исполняемым файлом (production)
/// 2. Иначе встроенная конфигурация по умолчанию
///
/// Поверх применяются переменные окружения, затем результат проверяется.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = read_config_file()?;
    config.apply_env_overrides(|key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

fn read_config_file() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)
                    .with_context(|| format!("Invalid config file {}", config_path.display()))?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

impl Config {
    /// Переопределение значений из переменных окружения
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("APP_NAME") {
            self.app.name = v;
        }
        if let Some(v) = lookup("APP_ENV") {
            self.app.environment = v;
        }
        if let Some(v) = lookup("APP_DEBUG") {
            self.app.debug = parse_bool(&v).with_context(|| format!("APP_DEBUG: {}", v))?;
        }
        if let Some(v) = lookup("APP_HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("APP_PORT") {
            self.server.port = v
                .trim()
                .parse()
                .with_context(|| format!("APP_PORT is not a valid port: {}", v))?;
        }
        if let Some(v) = lookup("ALLOWED_ORIGINS") {
            self.server.allowed_origins = split_origins(&v);
        }
        if let Some(v) = lookup("PROXY_API_URL") {
            self.proxy.url = v;
        }
        if let Some(v) = lookup("PROXY_PRIMARY_TOKEN") {
            self.proxy.primary_token = v;
        }
        if let Some(v) = lookup("PROXY_FALLBACK_TOKEN") {
            self.proxy.fallback_token = v;
        }
        if let Some(v) = lookup("PROXY_TIMEOUT") {
            self.proxy.timeout_secs = v
                .trim()
                .parse()
                .with_context(|| format!("PROXY_TIMEOUT is not a number of seconds: {}", v))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.proxy.url.trim().is_empty() {
            anyhow::bail!("Proxy API url is not configured (proxy.url / PROXY_API_URL)");
        }
        if self.proxy.tokens().is_empty() {
            anyhow::bail!(
                "No Proxy API token provided (PROXY_PRIMARY_TOKEN / PROXY_FALLBACK_TOKEN)"
            );
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected a boolean, got '{}'", other),
    }
}

fn split_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_loads() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 8001);
        assert_eq!(config.proxy.timeout_secs, 30);
        assert_eq!(config.app.environment, "development");
        assert!(config.server.allowed_origins.is_empty());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str("[proxy]\nurl = \"http://db\"\n").unwrap();
        assert_eq!(config.proxy.url, "http://db");
        assert_eq!(config.proxy.timeout_secs, 30);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_env_overrides() {
        let mut config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        config
            .apply_env_overrides(env(&[
                ("APP_ENV", "production"),
                ("APP_DEBUG", "false"),
                ("APP_PORT", "9000"),
                ("ALLOWED_ORIGINS", "http://a.ge, ,http://b.ge"),
                ("PROXY_PRIMARY_TOKEN", "p"),
                ("PROXY_TIMEOUT", "5"),
            ]))
            .unwrap();
        assert_eq!(config.app.environment, "production");
        assert!(!config.app.debug);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.allowed_origins, vec!["http://a.ge", "http://b.ge"]);
        assert_eq!(config.proxy.tokens(), vec!["p"]);
        assert_eq!(config.proxy.timeout_secs, 5);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let mut config = Config::default();
        assert!(config
            .apply_env_overrides(env(&[("APP_PORT", "http")]))
            .is_err());
    }

    #[test]
    fn test_validation_requires_a_token() {
        let mut config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert!(config.validate().is_err());

        config.proxy.fallback_token = "fallback".to_string();
        assert!(config.validate().is_ok());
        assert_eq!(config.proxy.tokens(), vec!["fallback"]);
    }

    #[test]
    fn test_tokens_order() {
        let proxy = ProxyConfig {
            primary_token: "a".to_string(),
            fallback_token: "b".to_string(),
            ..ProxyConfig::default()
        };
        assert_eq!(proxy.tokens(), vec!["a", "b"]);
    }
}
