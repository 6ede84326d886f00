//! Configuration management for Ganudenu.
//!
//! Loads configuration from environment variables (after reading a `.env`
//! file when present). The container contract is: listen on all interfaces,
//! port 8080 unless `PORT` says otherwise, and enforce an API key only when
//! `API_KEY` is set.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Default listen port of the container.
pub const DEFAULT_PORT: u16 = 8080;

/// Default collage edge length in pixels.
pub const DEFAULT_COLLAGE_SIZE: u32 = 1080;
/// Smallest collage that still gives every grid tile a pixel.
pub const MIN_COLLAGE_SIZE: u32 = 3;

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration
pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Initialize configuration (call once at startup)
pub fn init() -> &'static Config {
    config()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub site: SiteConfig,
    pub storage: StorageConfig,
    pub media: MediaConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// Required value of the `x-api-key` header. `None` disables the check.
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Raw uploads, one directory per ad
    pub uploads_path: PathBuf,
    /// Publicly served output (collages, pages, copied photos, posts)
    pub generated_path: PathBuf,
    /// Largest accepted single image, in bytes
    pub max_image_size: usize,
}

#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Edge length of the square collage
    pub collage_size: u32,
    pub jpeg_quality: u8,
    pub font_path: Option<PathBuf>,
    pub generate_posts: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            server: ServerConfig {
                host: env_or("HOST", "0.0.0.0"),
                port: parse_port(env::var("PORT").ok().as_deref()),
            },
            auth: AuthConfig {
                api_key: non_empty(env::var("API_KEY").ok()),
            },
            site: SiteConfig {
                name: env_or("SITE_NAME", "Ganudenu.store"),
            },
            storage: StorageConfig {
                uploads_path: PathBuf::from(env_or("UPLOADS_PATH", "./uploads")),
                generated_path: PathBuf::from(env_or("GENERATED_PATH", "./generated")),
                max_image_size: env_or("MAX_IMAGE_SIZE", "10485760")
                    .parse()
                    .unwrap_or(10 * 1024 * 1024), // 10MB
            },
            media: MediaConfig {
                collage_size: parse_collage_size(env::var("COLLAGE_SIZE").ok().as_deref()),
                jpeg_quality: env_or("JPEG_QUALITY", "90")
                    .parse::<u8>()
                    .map(|q| q.clamp(1, 100))
                    .unwrap_or(90),
                font_path: non_empty(env::var("FONT_PATH").ok()).map(PathBuf::from),
                generate_posts: parse_bool(&env_or("GENERATE_POSTS", "true")),
            },
        }
    }

    /// Configuration rooted at a single data directory, with no API key.
    ///
    /// Used by tests and local tooling that should not touch the working
    /// directory.
    pub fn with_data_dir(root: &Path) -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: DEFAULT_PORT,
            },
            auth: AuthConfig::default(),
            site: SiteConfig {
                name: "Ganudenu.store".to_string(),
            },
            storage: StorageConfig {
                uploads_path: root.join("uploads"),
                generated_path: root.join("generated"),
                max_image_size: 10 * 1024 * 1024,
            },
            media: MediaConfig {
                collage_size: DEFAULT_COLLAGE_SIZE,
                jpeg_quality: 90,
                font_path: None,
                generate_posts: true,
            },
        }
    }

    /// Address string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Parse a port value, falling back to [`DEFAULT_PORT`] when missing or invalid.
pub fn parse_port(value: Option<&str>) -> u16 {
    match value.map(str::trim) {
        None | Some("") => DEFAULT_PORT,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid PORT {:?}, using {}", raw, DEFAULT_PORT);
            DEFAULT_PORT
        }),
    }
}

/// Parse the collage edge length. Missing or invalid values give
/// [`DEFAULT_COLLAGE_SIZE`]; anything below one pixel per tile is raised to
/// [`MIN_COLLAGE_SIZE`].
pub fn parse_collage_size(value: Option<&str>) -> u32 {
    let size = match value.map(str::trim) {
        None | Some("") => return DEFAULT_COLLAGE_SIZE,
        Some(raw) => match raw.parse::<u32>() {
            Ok(size) => size,
            Err(_) => {
                tracing::warn!("Invalid COLLAGE_SIZE {:?}, using {}", raw, DEFAULT_COLLAGE_SIZE);
                return DEFAULT_COLLAGE_SIZE;
            }
        },
    };

    if size < MIN_COLLAGE_SIZE {
        tracing::warn!("COLLAGE_SIZE {} too small, using {}", size, MIN_COLLAGE_SIZE);
        return MIN_COLLAGE_SIZE;
    }
    size
}

fn parse_bool(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
