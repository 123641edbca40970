use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use reqwest::multipart;
use shared::protocol::{
    DashboardStats, LoginResponse, SlideRecord, SocialIconRecord, UploadResponse,
};

#[derive(Parser, Debug)]
#[command(about = "Operator CLI for the Comfort & Pondlike content service")]
struct Cli {
    #[arg(long, default_value = "http://127.0.0.1:3001")]
    server_url: String,
    /// Bearer token from `adminctl login`; required for mutations.
    #[arg(long)]
    token: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        username: String,
        password: String,
    },
    ListSlides {
        /// Include disabled slides (needs a token).
        #[arg(long)]
        all: bool,
    },
    AddSlide {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "hero")]
        kind: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        order: Option<i64>,
        #[arg(long)]
        image: Option<std::path::PathBuf>,
    },
    DisableSlide {
        id: i64,
    },
    DeleteSlide {
        id: i64,
    },
    ListIcons,
    AddIcon {
        platform: String,
        url: String,
    },
    DeleteIcon {
        id: i64,
    },
    Upload {
        file: std::path::PathBuf,
        #[arg(long, default_value = "images")]
        upload_type: String,
    },
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let http = reqwest::Client::new();
    let base = cli.server_url.trim_end_matches('/').to_string();

    match cli.command {
        Command::Login { username, password } => {
            let response: LoginResponse = http
                .post(format!("{base}/api/login"))
                .json(&serde_json::json!({ "username": username, "password": password }))
                .send()
                .await?
                .error_for_status()
                .context("login rejected")?
                .json()
                .await?;
            println!("{}", response.token);
        }
        Command::ListSlides { all } => {
            let mut request = if all {
                http.get(format!("{base}/api/slider-content/admin"))
            } else {
                http.get(format!("{base}/api/slider-content"))
            };
            if let Some(token) = &cli.token {
                request = request.bearer_auth(token);
            }
            let slides: Vec<SlideRecord> = request
                .send()
                .await?
                .error_for_status()
                .context("listing rejected")?
                .json()
                .await?;
            for slide in slides {
                println!(
                    "#{:<4} [{}] order={} enabled={} {}",
                    slide.id.0,
                    match slide.kind {
                        shared::domain::SlideKind::Hero => "hero",
                        shared::domain::SlideKind::Product => "product",
                        shared::domain::SlideKind::Featured => "featured",
                    },
                    slide.position,
                    slide.enabled,
                    slide.title
                );
            }
        }
        Command::AddSlide {
            title,
            kind,
            description,
            order,
            image,
        } => {
            let mut form = multipart::Form::new()
                .text("title", title)
                .text("kind", kind)
                .text("description", description);
            if let Some(order) = order {
                form = form.text("order", order.to_string());
            }
            if let Some(path) = image {
                form = form.part("image", file_part(&path).await?);
            }
            let slide: SlideRecord = http
                .post(format!("{base}/api/slider-content"))
                .bearer_auth(require_token(&cli.token)?)
                .multipart(form)
                .send()
                .await?
                .error_for_status()
                .context("create rejected")?
                .json()
                .await?;
            println!("created slide id={}", slide.id.0);
        }
        Command::DisableSlide { id } => {
            let form = multipart::Form::new().text("enabled", "false");
            let slide: SlideRecord = http
                .put(format!("{base}/api/slider-content/{id}"))
                .bearer_auth(require_token(&cli.token)?)
                .multipart(form)
                .send()
                .await?
                .error_for_status()
                .context("update rejected")?
                .json()
                .await?;
            println!("slide id={} enabled={}", slide.id.0, slide.enabled);
        }
        Command::DeleteSlide { id } => {
            http.delete(format!("{base}/api/slider-content/{id}"))
                .bearer_auth(require_token(&cli.token)?)
                .send()
                .await?
                .error_for_status()
                .context("delete rejected")?;
            println!("deleted slide id={id}");
        }
        Command::ListIcons => {
            let icons: Vec<SocialIconRecord> = http
                .get(format!("{base}/api/social-icons"))
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            for icon in icons {
                println!(
                    "#{:<4} {:<12} enabled={} {}",
                    icon.id.0, icon.platform, icon.enabled, icon.url
                );
            }
        }
        Command::AddIcon { platform, url } => {
            let icon: SocialIconRecord = http
                .post(format!("{base}/api/social-icons"))
                .bearer_auth(require_token(&cli.token)?)
                .json(&serde_json::json!({ "platform": platform, "url": url }))
                .send()
                .await?
                .error_for_status()
                .context("create rejected")?
                .json()
                .await?;
            println!("created icon id={}", icon.id.0);
        }
        Command::DeleteIcon { id } => {
            http.delete(format!("{base}/api/social-icons/{id}"))
                .bearer_auth(require_token(&cli.token)?)
                .send()
                .await?
                .error_for_status()
                .context("delete rejected")?;
            println!("deleted icon id={id}");
        }
        Command::Upload { file, upload_type } => {
            let response: UploadResponse = http
                .post(format!("{base}/api/upload"))
                .bearer_auth(require_token(&cli.token)?)
                .multipart(
                    multipart::Form::new()
                        .text("upload_type", upload_type)
                        .part("file", file_part(&file).await?),
                )
                .send()
                .await?
                .error_for_status()
                .context("upload rejected")?
                .json()
                .await?;
            println!("{} ({} bytes)", response.url, response.size_bytes);
        }
        Command::Stats => {
            let stats: DashboardStats = http
                .get(format!("{base}/api/dashboard/stats"))
                .bearer_auth(require_token(&cli.token)?)
                .send()
                .await?
                .error_for_status()
                .context("stats rejected")?
                .json()
                .await?;
            println!(
                "slides: {}/{} enabled, icons: {}/{} enabled",
                stats.active_slides, stats.total_slides, stats.active_social_icons,
                stats.social_icons
            );
        }
    }

    Ok(())
}

fn require_token(token: &Option<String>) -> Result<&str> {
    match token {
        Some(token) => Ok(token),
        None => bail!("this command needs --token from `adminctl login`"),
    }
}

async fn file_part(path: &std::path::Path) -> Result<multipart::Part> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("cannot read '{}'", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload.bin")
        .to_string();
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Ok(multipart::Part::bytes(bytes)
        .file_name(filename)
        .mime_str(mime.as_ref())?)
}
