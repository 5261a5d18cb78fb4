use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// Connection parameters for the PostgreSQL server.
///
/// When `url` is set it wins over the individual parts.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub ssl_mode: PgSslMode,
    pub max_connections: u32,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".into(),
            port: 5432,
            database: "todoapp".into(),
            username: "postgres".into(),
            password: String::new(),
            ssl_mode: PgSslMode::Disable,
            max_connections: 20,
        }
    }
}

impl DbConfig {
    /// Build sqlx connect options from either the URL or the parts.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.url {
            return url.parse();
        }

        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.username)
            .password(&self.password)
            .ssl_mode(self.ssl_mode))
    }

    /// Human-readable target for log lines. Never includes the password.
    pub fn describe(&self) -> String {
        match &self.url {
            Some(_) => "DATABASE_URL".to_string(),
            None => format!(
                "{}@{}:{}/{}",
                self.username, self.host, self.port, self.database
            ),
        }
    }
}
