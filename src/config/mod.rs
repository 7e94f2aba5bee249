use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    /// Externally visible origin, used for redirects when a request carries no `Host`.
    pub public_url: String,
    pub frontend_url: String,
    pub tls_cert_path: Option<String>,
    pub tls_key_path: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("BACKEND_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            jwt_secret: env::var("JWT_SECRET")?,
            public_url: env::var("PUBLIC_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            tls_cert_path: env::var("TLS_CERT_PATH").ok(),
            tls_key_path: env::var("TLS_KEY_PATH").ok(),
        })
    }

    /// Scheme assumed for incoming requests that carry no `X-Forwarded-Proto`.
    pub fn default_scheme(&self) -> &str {
        if self.tls_enabled() || self.public_url.starts_with("https://") {
            "https"
        } else {
            "http"
        }
    }

    pub fn tls_enabled(&self) -> bool {
        self.tls_cert_path.is_some() && self.tls_key_path.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            database_url: "postgres://localhost/pulseboard".to_string(),
            database_max_connections: 5,
            host: "127.0.0.1".to_string(),
            port: 3000,
            jwt_secret: "secret".to_string(),
            public_url: "http://localhost:3000".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            tls_cert_path: None,
            tls_key_path: None,
        }
    }

    #[test]
    fn default_scheme_follows_public_url() {
        let mut cfg = config();
        assert_eq!(cfg.default_scheme(), "http");
        cfg.public_url = "https://pulse.example.com".to_string();
        assert_eq!(cfg.default_scheme(), "https");
    }

    #[test]
    fn tls_requires_cert_and_key() {
        let mut cfg = config();
        cfg.tls_cert_path = Some("cert.pem".to_string());
        assert!(!cfg.tls_enabled());
        cfg.tls_key_path = Some("key.pem".to_string());
        assert!(cfg.tls_enabled());
        assert_eq!(cfg.default_scheme(), "https");
    }
}
