use crate::auth::session::SessionConfig;

/// Default display name for the bootstrapped admin account.
const DEFAULT_ADMIN_NAME: &str = "Admin";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long to wait for the pool to drain after the server stops (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Session cookie settings.
    pub session: SessionConfig,
    /// Admin account to ensure at startup, when configured.
    pub admin: Option<AdminAccount>,
}

/// Credentials for the admin account created at startup.
#[derive(Clone)]
pub struct AdminAccount {
    pub phone: String,
    pub password: String,
    pub name: String,
}

impl std::fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccount")
            .field("phone", &self.phone)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `ADMIN_PHONE`          | unset (no bootstrap)       |
    /// | `ADMIN_PASSWORD`       | unset (no bootstrap)       |
    /// | `ADMIN_NAME`           | `Admin`                    |
    ///
    /// Session variables are documented on [`SessionConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            session: SessionConfig::from_env(),
            admin: admin_from_env(),
        }
    }
}

/// Both `ADMIN_PHONE` and `ADMIN_PASSWORD` must be non-empty to enable the bootstrap.
fn admin_from_env() -> Option<AdminAccount> {
    let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

    let phone = non_empty("ADMIN_PHONE")?;
    let password = non_empty("ADMIN_PASSWORD")?;
    let name = non_empty("ADMIN_NAME").unwrap_or_else(|| DEFAULT_ADMIN_NAME.to_string());

    Some(AdminAccount {
        phone: phone.trim().to_string(),
        password,
        name,
    })
}
