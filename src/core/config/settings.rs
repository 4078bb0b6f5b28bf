use super::parsing::{
    env_optional, env_or_default, is_supported_document_extension, is_supported_image_extension,
    parse_bool, parse_cors_origins, parse_environment, parse_string_list, parse_u16, parse_u64,
};
use super::secret::load_or_create_secret_key;
use super::types::{
    AdminSettings, ApiSettings, CertificateSettings, ConfigError, CorsSettings, DatabaseSettings,
    IdentitySettings, RedisSettings, RuntimeSettings, S3Settings, SecuritySettings, ServerHost,
    ServerPort, ServerSettings, Settings, StorageSettings, TelemetrySettings,
};

impl Settings {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let host = env_or_default("TUTORA_HOST", "0.0.0.0");
        let port = env_or_default("TUTORA_PORT", "8000");

        let environment =
            parse_environment(env_optional("TUTORA_ENV").or_else(|| env_optional("ENVIRONMENT")));
        let strict_config =
            env_optional("TUTORA_STRICT_CONFIG").map(|value| parse_bool(&value)).unwrap_or(false)
                || environment.is_production();

        let project_name = env_or_default("PROJECT_NAME", "Tutora LMS API");
        let version = env_or_default("VERSION", env!("CARGO_PKG_VERSION"));
        let api_v1_str = env_or_default("API_V1_STR", "/api/v1");

        let secret_key = match env_optional("SECRET_KEY") {
            Some(value) => value,
            None => load_or_create_secret_key(),
        };

        let access_token_expire_minutes = parse_u64(
            "ACCESS_TOKEN_EXPIRE_MINUTES",
            env_or_default("ACCESS_TOKEN_EXPIRE_MINUTES", "10080"),
        )?;
        let algorithm = env_or_default("ALGORITHM", "HS256");

        let cors_origins = parse_cors_origins(env_optional("BACKEND_CORS_ORIGINS"))?;

        let postgres_server = env_or_default("POSTGRES_SERVER", "localhost");
        let postgres_port = parse_u16("POSTGRES_PORT", env_or_default("POSTGRES_PORT", "5432"))?;
        let postgres_user = env_or_default("POSTGRES_USER", "tutorasuperuser");
        let postgres_password = env_or_default("POSTGRES_PASSWORD", "");
        let postgres_db = env_or_default("POSTGRES_DB", "tutora_db");
        let database_url = env_optional("DATABASE_URL");

        let redis_host = env_or_default("REDIS_HOST", "localhost");
        let redis_port = parse_u16("REDIS_PORT", env_or_default("REDIS_PORT", "6379"))?;
        let redis_db = parse_u16("REDIS_DB", env_or_default("REDIS_DB", "0"))?;
        let redis_password = env_or_default("REDIS_PASSWORD", "");

        let max_upload_size_mb =
            parse_u64("MAX_UPLOAD_SIZE_MB", env_or_default("MAX_UPLOAD_SIZE_MB", "25"))?;
        let allowed_image_extensions =
            parse_string_list(env_optional("ALLOWED_IMAGE_EXTENSIONS"), &["jpg", "jpeg", "png"]);
        let allowed_document_extensions = parse_string_list(
            env_optional("ALLOWED_DOCUMENT_EXTENSIONS"),
            &["pdf", "doc", "docx", "ppt", "pptx"],
        );

        let s3_endpoint = env_or_default("S3_ENDPOINT", "https://storage.yandexcloud.net");
        let s3_access_key = env_or_default("S3_ACCESS_KEY", "");
        let s3_secret_key = env_or_default("S3_SECRET_KEY", "");
        let s3_bucket = env_or_default("S3_BUCKET", "tutora-media-storage");
        let s3_region = env_or_default("S3_REGION", "ru-central1");

        let certificate_prefix = env_or_default("CERTIFICATE_PREFIX", "TTI");
        let institution_name =
            env_or_default("INSTITUTION_NAME", "Tutora Medical And Technical Institute");
        let signatory_title = env_or_default("CERTIFICATE_SIGNATORY_TITLE", "Principal's Signature");

        let identity_enabled =
            env_optional("IDENTITY_PROVIDER_ENABLED").map(|value| parse_bool(&value)).unwrap_or(false);
        let identity_token_info_url = env_or_default("IDENTITY_PROVIDER_TOKEN_INFO_URL", "");
        let identity_timeout_seconds = parse_u64(
            "IDENTITY_PROVIDER_TIMEOUT_SECONDS",
            env_or_default("IDENTITY_PROVIDER_TIMEOUT_SECONDS", "10"),
        )?;

        let first_superuser_username = env_or_default("FIRST_SUPERUSER_USERNAME", "admin");
        let first_superuser_password = env_or_default("FIRST_SUPERUSER_PASSWORD", "");

        let log_level = env_or_default("TUTORA_LOG_LEVEL", "info");
        let json = env_optional("TUTORA_LOG_JSON").map(|value| parse_bool(&value)).unwrap_or(false);
        let prometheus_enabled =
            env_optional("PROMETHEUS_ENABLED").map(|value| parse_bool(&value)).unwrap_or(false);

        let settings = Self {
            server: ServerSettings {
                host: ServerHost::parse(host)?,
                port: ServerPort::parse(port)?,
            },
            runtime: RuntimeSettings { environment, strict_config },
            api: ApiSettings { project_name, version, api_v1_str },
            security: SecuritySettings { secret_key, access_token_expire_minutes, algorithm },
            cors: CorsSettings { origins: cors_origins },
            database: DatabaseSettings {
                postgres_server,
                postgres_port,
                postgres_user,
                postgres_password,
                postgres_db,
                database_url,
            },
            redis: RedisSettings {
                host: redis_host,
                port: redis_port,
                db: redis_db,
                password: redis_password,
            },
            storage: StorageSettings {
                max_upload_size_mb,
                allowed_image_extensions,
                allowed_document_extensions,
            },
            s3: S3Settings {
                endpoint: s3_endpoint,
                access_key: s3_access_key,
                secret_key: s3_secret_key,
                bucket: s3_bucket,
                region: s3_region,
            },
            certificate: CertificateSettings {
                number_prefix: certificate_prefix,
                institution_name,
                signatory_title,
            },
            identity: IdentitySettings {
                enabled: identity_enabled,
                token_info_url: identity_token_info_url,
                timeout_seconds: identity_timeout_seconds,
            },
            admin: AdminSettings { first_superuser_username, first_superuser_password },
            telemetry: TelemetrySettings { log_level, json, prometheus_enabled },
        };

        settings.validate()?;
        Ok(settings)
    }

    pub(crate) fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host.0, self.server.port.0)
    }

    pub(crate) fn server_host(&self) -> &str {
        &self.server.host.0
    }

    pub(crate) fn server_port(&self) -> u16 {
        self.server.port.0
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

    pub(crate) fn redis(&self) -> &RedisSettings {
        &self.redis
    }

    pub(crate) fn storage(&self) -> &StorageSettings {
        &self.storage
    }

    pub(crate) fn s3(&self) -> &S3Settings {
        &self.s3
    }

    pub(crate) fn certificate(&self) -> &CertificateSettings {
        &self.certificate
    }

    pub(crate) fn identity(&self) -> &IdentitySettings {
        &self.identity
    }

    pub(crate) fn admin(&self) -> &AdminSettings {
        &self.admin
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    pub(crate) fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.allowed_image_extensions.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "ALLOWED_IMAGE_EXTENSIONS",
                value: String::from("<empty>"),
            });
        }

        for extension in &self.storage.allowed_image_extensions {
            if !is_supported_image_extension(extension) {
                return Err(ConfigError::InvalidValue {
                    field: "ALLOWED_IMAGE_EXTENSIONS",
                    value: extension.clone(),
                });
            }
        }

        if self.storage.allowed_document_extensions.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "ALLOWED_DOCUMENT_EXTENSIONS",
                value: String::from("<empty>"),
            });
        }

        for extension in &self.storage.allowed_document_extensions {
            if !is_supported_document_extension(extension) {
                return Err(ConfigError::InvalidValue {
                    field: "ALLOWED_DOCUMENT_EXTENSIONS",
                    value: extension.clone(),
                });
            }
        }

        if self.certificate.number_prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "CERTIFICATE_PREFIX",
                value: String::from("<empty>"),
            });
        }

        if !(self.runtime.strict_config || self.runtime.environment.is_production()) {
            return Ok(());
        }

        if self.database.database_url.is_none() && self.database.postgres_password.is_empty() {
            return Err(ConfigError::MissingSecret("POSTGRES_PASSWORD"));
        }
        if self.s3.access_key.is_empty() || self.s3.secret_key.is_empty() {
            return Err(ConfigError::MissingSecret("S3_ACCESS_KEY/S3_SECRET_KEY"));
        }
        if self.admin.first_superuser_password.is_empty() {
            return Err(ConfigError::MissingSecret("FIRST_SUPERUSER_PASSWORD"));
        }
        if self.identity.enabled && self.identity.token_info_url.is_empty() {
            return Err(ConfigError::MissingSecret("IDENTITY_PROVIDER_TOKEN_INFO_URL"));
        }

        Ok(())
    }
}
