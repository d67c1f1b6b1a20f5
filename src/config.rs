use crate::error::ConfigurationError;
use crate::util;
use std::env;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

fn default_mongodb_uri() -> String {
    env::var("MONGODB_URI").unwrap_or("mongodb://localhost:27017".to_string())
}

fn default_mongodb_db() -> String {
    env::var("MONGODB_DB_NAME").unwrap_or("coursedesk".to_string())
}

fn default_zoom_api_base() -> String {
    env::var("ZOOM_API_BASE").unwrap_or("https://api.zoom.us/v2".to_string())
}

fn default_zoom_token_url() -> String {
    env::var("ZOOM_TOKEN_URL").unwrap_or("https://zoom.us/oauth/token".to_string())
}

fn env_or_empty(key: &str) -> String {
    env::var(key).unwrap_or_default()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoomConfig {
    #[serde(default = "default_zoom_token_url")]
    pub token_url: String,
    #[serde(default = "default_zoom_api_base")]
    pub api_base: String,

    pub client_id: String,
    pub client_secret: String,
    pub account_id: String,
    /// Zoom user whose meetings/webinars are managed.
    pub user_id: String,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        ZoomConfig {
            token_url: default_zoom_token_url(),
            api_base: default_zoom_api_base(),
            client_id: env_or_empty("ZOOM_CLIENT_ID"),
            client_secret: env_or_empty("ZOOM_CLIENT_SECRET"),
            account_id: env_or_empty("ZOOM_ACCOUNT_ID"),
            user_id: env_or_empty("ZOOM_USER_ID"),
        }
    }
}

fn default_cloudinary_base() -> String {
    env::var("CLOUDINARY_BASE_URL").unwrap_or("https://res.cloudinary.com".to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudinaryConfig {
    #[serde(default = "default_cloudinary_base")]
    pub base_url: String,
    pub cloud_name: String,

    /// Public ids of the certificate background images.
    pub completion_background: String,
    pub attendance_background: String,
}

impl Default for CloudinaryConfig {
    fn default() -> Self {
        CloudinaryConfig {
            base_url: default_cloudinary_base(),
            cloud_name: env_or_empty("CLOUDINARY_CLOUD_NAME"),
            completion_background: env::var("CLOUDINARY_COMPLETION_BACKGROUND")
                .unwrap_or("certificates/completion".to_string()),
            attendance_background: env::var("CLOUDINARY_ATTENDANCE_BACKGROUND")
                .unwrap_or("certificates/attendance".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip)]
    file_path: PathBuf,

    #[serde(default = "default_mongodb_uri")]
    pub mongodb_uri: String,
    #[serde(default = "default_mongodb_db")]
    pub mongodb_db: String,

    #[serde(default)]
    pub zoom: ZoomConfig,
    #[serde(default)]
    pub cloudinary: CloudinaryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            file_path: config_dir().join("settings.yml"),
            mongodb_uri: default_mongodb_uri(),
            mongodb_db: default_mongodb_db(),
            zoom: ZoomConfig::default(),
            cloudinary: CloudinaryConfig::default(),
        }
    }
}

#[inline]
fn config_dir() -> PathBuf {
    PathBuf::from(env::var("CONFIG_DIR").unwrap_or("./config".to_string()))
}

impl Config {
    pub fn load() -> Result<Config, ConfigurationError> {
        let config_file = util::find_first_subpath(
            config_dir(),
            &["settings.yml", "settings.yaml"],
            Path::exists,
        )
        .ok_or_else(|| ConfigurationError::NotFound(config_dir()))?;

        let file = File::open(config_file)?;
        let config = serde_yaml::from_reader(BufReader::new(file))?;

        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigurationError> {
        let file = File::create(&self.file_path)?;
        let mut out = BufWriter::new(file);
        serde_yaml::to_writer(&mut out, self)?;
        out.flush()?;
        Ok(())
    }
}
