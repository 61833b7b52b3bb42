use std::path::PathBuf;

use super::parsing::{bind_address, cors_origins, environment, flag, jwt_algorithm, number, var, var_or};
use super::secret::{default_secret_path, load_or_create_secret_key};
use super::types::{
    ApiSettings, BindAddress, ConfigError, CorsSettings, DatabaseSettings, Environment,
    LimitSettings, RuntimeSettings, SecuritySettings, Settings, TelemetrySettings,
};

const MAX_POOL_CONNECTIONS: u32 = 200;
const DEFAULT_BODY_BYTES: usize = 1024 * 1024;

impl Settings {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let environment = environment(var("QUIZGRADE_ENV").or_else(|| var("ENVIRONMENT")));
        let strict_config = flag("QUIZGRADE_STRICT_CONFIG") || environment == Environment::Production;

        let settings = Self {
            bind: bind_address(var_or("QUIZGRADE_HOST", "0.0.0.0"), var_or("QUIZGRADE_PORT", "8000"))?,
            runtime: RuntimeSettings { environment, strict_config },
            api: ApiSettings {
                project_name: var_or("PROJECT_NAME", "Quizgrade API"),
                version: var_or("VERSION", env!("CARGO_PKG_VERSION")),
                prefix: var_or("API_V1_STR", "/api/v1"),
            },
            security: load_security()?,
            cors: CorsSettings { origins: cors_origins(var("BACKEND_CORS_ORIGINS"))? },
            database: DatabaseSettings {
                url: var("DATABASE_URL"),
                host: var_or("POSTGRES_SERVER", "localhost"),
                port: number("POSTGRES_PORT", 5432)?,
                user: var_or("POSTGRES_USER", "quizgrade"),
                password: var_or("POSTGRES_PASSWORD", ""),
                name: var_or("POSTGRES_DB", "quizgrade_db"),
                max_connections: number("DATABASE_MAX_CONNECTIONS", 20)?,
                acquire_timeout_secs: number("DATABASE_ACQUIRE_TIMEOUT_SECS", 30)?,
            },
            telemetry: TelemetrySettings {
                log_level: var_or("QUIZGRADE_LOG_LEVEL", "info"),
                json: flag("QUIZGRADE_LOG_JSON"),
                prometheus_enabled: flag("PROMETHEUS_ENABLED"),
            },
            limits: LimitSettings {
                max_body_bytes: number("QUIZGRADE_MAX_BODY_BYTES", DEFAULT_BODY_BYTES)?,
            },
        };

        settings.check()?;
        Ok(settings)
    }

    pub(crate) fn bind(&self) -> &BindAddress {
        &self.bind
    }

    pub(crate) fn api(&self) -> &ApiSettings {
        &self.api
    }

    pub(crate) fn security(&self) -> &SecuritySettings {
        &self.security
    }

    pub(crate) fn cors(&self) -> &CorsSettings {
        &self.cors
    }

    pub(crate) fn database(&self) -> &DatabaseSettings {
        &self.database
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    pub(crate) fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }

    pub(crate) fn limits(&self) -> LimitSettings {
        self.limits
    }

    fn check(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, value: String| ConfigError::InvalidValue { field, value };

        if self.api.prefix.len() < 2 || !self.api.prefix.starts_with('/') {
            return Err(invalid("API_V1_STR", self.api.prefix.clone()));
        }
        if self.security.token_ttl_minutes == 0 {
            return Err(invalid("ACCESS_TOKEN_EXPIRE_MINUTES", "0".to_string()));
        }
        if !(1..=MAX_POOL_CONNECTIONS).contains(&self.database.max_connections) {
            return Err(invalid("DATABASE_MAX_CONNECTIONS", self.database.max_connections.to_string()));
        }
        if self.limits.max_body_bytes == 0 {
            return Err(invalid("QUIZGRADE_MAX_BODY_BYTES", "0".to_string()));
        }

        if self.runtime.strict_config {
            if !self.security.secret_key_explicit {
                return Err(ConfigError::MissingSecret("SECRET_KEY"));
            }
            if self.database.url.is_none() && self.database.password.is_empty() {
                return Err(ConfigError::MissingSecret("POSTGRES_PASSWORD"));
            }
        }

        Ok(())
    }
}

fn load_security() -> Result<SecuritySettings, ConfigError> {
    let (secret_key, secret_key_explicit) = match var("SECRET_KEY") {
        Some(value) => (value, true),
        None => {
            let path = var("QUIZGRADE_SECRET_FILE").map(PathBuf::from).unwrap_or_else(default_secret_path);
            (load_or_create_secret_key(&path), false)
        }
    };

    Ok(SecuritySettings {
        secret_key,
        secret_key_explicit,
        token_ttl_minutes: number("ACCESS_TOKEN_EXPIRE_MINUTES", 10_080)?,
        algorithm: jwt_algorithm(&var_or("ALGORITHM", "HS256"))?,
    })
}
