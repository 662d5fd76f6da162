use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_path: String,
    pub templates_dir: PathBuf,
    pub allowed_origins: Vec<String>,
    pub environment: String,
    /// Fallback origin, used only when there is no live request to read it from
    pub api_host: String,
    pub api_port: u16,
    pub api_protocol: String,
    /// Additional placeholder origins the page rewriter should recognize
    pub legacy_api_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8025".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "./data/app.db".to_string());

        let templates_dir = env::var("TEMPLATES_DIR")
            .unwrap_or_else(|_| "./templates".to_string())
            .into();

        let allowed_origins = split_list(&env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()));

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "localhost".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .map_err(|_| "Invalid API_PORT")?;

        let api_protocol = env::var("API_PROTOCOL")
            .unwrap_or_else(|_| "http".to_string())
            .to_ascii_lowercase();
        if api_protocol != "http" && api_protocol != "https" {
            return Err(format!("Invalid API_PROTOCOL: {api_protocol}"));
        }

        let legacy_api_origins = split_list(&env::var("LEGACY_API_ORIGINS").unwrap_or_default());

        Ok(Config {
            server_host,
            server_port,
            database_path,
            templates_dir,
            allowed_origins,
            environment,
            api_host,
            api_port,
            api_protocol,
            legacy_api_origins,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Whether CORS should accept any origin
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_skips_blanks() {
        assert_eq!(
            split_list(" http://a.test , ,http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_allows_any_origin() {
        let mut config = Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            database_path: String::new(),
            templates_dir: PathBuf::new(),
            allowed_origins: vec!["*".to_string()],
            environment: "test".to_string(),
            api_host: "localhost".to_string(),
            api_port: 8000,
            api_protocol: "http".to_string(),
            legacy_api_origins: Vec::new(),
        };
        assert!(config.allows_any_origin());

        config.allowed_origins = vec!["https://example.com".to_string()];
        assert!(!config.allows_any_origin());
        assert_eq!(config.server_address(), "127.0.0.1:0");
    }
}
