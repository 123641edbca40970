use std::{collections::HashMap, fs};

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_bind: String,
    pub upload_dir: String,
    pub jwt_secret: String,
    pub token_ttl_seconds: i64,
    pub admin_username: String,
    pub admin_password: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:3001".into(),
            upload_dir: "./uploads".into(),
            jwt_secret: "comfort-pondlike-secret-key".into(),
            token_ttl_seconds: 24 * 60 * 60,
            admin_username: "admin".into(),
            admin_password: "password".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("server.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            apply_file_config(&mut settings, &file_cfg);
        }
    }

    if let Ok(v) = std::env::var("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Ok(v) = std::env::var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Ok(v) = std::env::var("UPLOAD_DIR") {
        settings.upload_dir = v;
    }
    if let Ok(v) = std::env::var("APP__UPLOAD_DIR") {
        settings.upload_dir = v;
    }

    if let Ok(v) = std::env::var("JWT_SECRET") {
        settings.jwt_secret = v;
    }
    if let Ok(v) = std::env::var("APP__JWT_SECRET") {
        settings.jwt_secret = v;
    }

    if let Ok(v) = std::env::var("ADMIN_USERNAME") {
        settings.admin_username = v;
    }
    if let Ok(v) = std::env::var("ADMIN_PASSWORD") {
        settings.admin_password = v;
    }

    if let Ok(v) = std::env::var("APP__TOKEN_TTL_SECONDS") {
        if let Ok(parsed) = v.parse::<i64>() {
            settings.token_ttl_seconds = parsed;
        }
    }

    settings
}

fn apply_file_config(settings: &mut Settings, file_cfg: &HashMap<String, String>) {
    if let Some(v) = file_cfg.get("bind_addr") {
        settings.server_bind = v.clone();
    }
    if let Some(v) = file_cfg.get("upload_dir") {
        settings.upload_dir = v.clone();
    }
    if let Some(v) = file_cfg.get("jwt_secret") {
        settings.jwt_secret = v.clone();
    }
    if let Some(v) = file_cfg.get("admin_username") {
        settings.admin_username = v.clone();
    }
    if let Some(v) = file_cfg.get("admin_password") {
        settings.admin_password = v.clone();
    }
    if let Some(v) = file_cfg.get("token_ttl_seconds") {
        if let Ok(parsed) = v.parse::<i64>() {
            settings.token_ttl_seconds = parsed;
        }
    }
}
