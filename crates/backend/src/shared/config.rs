use anyhow::Context;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub frontend: FrontendConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid server address {}:{}", self.host, self.port))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FrontendConfig {
    /// Каталог со сборкой wasm и index.html
    pub dist_dir: String,
    /// Префикс URL, под которым смонтировано приложение
    pub base_path: String,
}

impl FrontendConfig {
    /// Базовый путь с одним ведущим слэшем без завершающего; "/" для корня
    pub fn base_path(&self) -> String {
        let trimmed = self.base_path.trim().trim_matches('/');
        format!("/{trimmed}")
    }
}

/// Конфигурация по умолчанию, встроенная в бинарник
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[frontend]
dist_dir = "dist"
base_path = "/user-management-app"
"#;

/// Load configuration from config.toml
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Current working directory
/// 3. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    let mut candidates = Vec::new();
    if let Some(exe_dir) = exe_dir() {
        candidates.push(exe_dir.join("config.toml"));
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join("config.toml"));
    }

    for config_path in candidates {
        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("cannot read {}", config_path.display()))?;
            return parse_config(&contents)
                .with_context(|| format!("invalid config in {}", config_path.display()));
        }
        tracing::debug!("config.toml not found at: {}", config_path.display());
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str(contents)?)
}

/// Определить каталог dist.
///
/// Абсолютный путь берётся как есть. Относительный ищется сначала рядом с
/// исполняемым файлом, затем в рабочем каталоге.
pub fn resolve_dist_dir(config: &Config) -> PathBuf {
    let dist = Path::new(&config.frontend.dist_dir);
    if dist.is_absolute() {
        return dist.to_path_buf();
    }

    if let Some(exe_dir) = exe_dir() {
        let next_to_exe = exe_dir.join(dist);
        if next_to_exe.is_dir() {
            return next_to_exe;
        }
    }

    dist.to_path_buf()
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.frontend.dist_dir, "dist");
        assert_eq!(config.frontend.base_path(), "/user-management-app");
        assert_eq!(
            config.server.socket_addr().unwrap(),
            "0.0.0.0:3000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_base_path_normalization() {
        let frontend = |base: &str| FrontendConfig {
            dist_dir: "dist".into(),
            base_path: base.into(),
        };
        assert_eq!(frontend("admin/users/").base_path(), "/admin/users");
        assert_eq!(frontend("//app").base_path(), "/app");
        assert_eq!(frontend("/").base_path(), "/");
        assert_eq!(frontend("").base_path(), "/");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(parse_config("[server]\nhost = \"localhost\"\n").is_err());

        let config = parse_config(
            "[server]\nhost = \"not an ip\"\nport = 80\n[frontend]\ndist_dir = \"d\"\nbase_path = \"/\"\n",
        )
        .unwrap();
        assert!(config.server.socket_addr().is_err());
    }

    #[test]
    fn test_absolute_dist_dir_is_kept() {
        let mut config = parse_config(DEFAULT_CONFIG).unwrap();
        let absolute = std::env::temp_dir().join("user-management-dist");
        config.frontend.dist_dir = absolute.display().to_string();
        assert_eq!(resolve_dist_dir(&config), absolute);
    }
}
