//! Command-line front end for Perla
//!
//! Creates invitations, renders their shareable artifacts, and
//! exercises the guard-side lookup stub from a terminal.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

use perla_artifact::{ArtifactFormat, ComposeOptions};
use perla_core::Invitation;
use perla_session::{
    download_notice, LookupConfig, LookupService, PipelineRenderer, SessionConfig,
    SessionController, Severity,
};
use perla_share::{detect, download, DesktopShareHost};
use perla_token::TokenEncoder;

#[derive(Parser)]
#[command(name = "perla")]
#[command(about = "Perla - invitation artifacts for Jardines de La Perla", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an invitation and save its shareable artifact
    Invite {
        /// Guest name (2-50 characters)
        #[arg(short, long)]
        name: String,

        /// Companion count (0-10)
        #[arg(short, long, default_value = "0")]
        guests: u8,

        /// Mark the guest as a frequent visitor
        #[arg(long)]
        frequent: bool,

        /// Directory the artifact is saved to
        #[arg(short, long, default_value = "invitaciones")]
        output: PathBuf,

        /// Artifact image format
        #[arg(long, value_enum, default_value = "png")]
        format: Format,
    },

    /// Resolve a scanned value against the (stubbed) guard lookup
    Lookup {
        /// Scanned token payload or raw invitation id
        scanned: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Png,
    Jpeg,
    Webp,
}

impl From<Format> for ArtifactFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Png => ArtifactFormat::Png,
            Format::Jpeg => ArtifactFormat::Jpeg,
            Format::Webp => ArtifactFormat::WebP,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Invite {
            name,
            guests,
            frequent,
            output,
            format,
        } => invite(name, guests, frequent, output, format.into()).await,
        Commands::Lookup { scanned } => lookup(&scanned).await,
    }
}

async fn invite(
    name: String,
    guests: u8,
    frequent: bool,
    output: PathBuf,
    format: ArtifactFormat,
) -> Result<()> {
    let invitation = Invitation::new(name, guests, frequent)?;

    let compose_options = ComposeOptions {
        format,
        ..ComposeOptions::default()
    };
    let controller = SessionController::new(
        Arc::new(PipelineRenderer::new(TokenEncoder::default(), compose_options)),
        SessionConfig::default(),
    );

    controller.show(invitation.clone());
    let state = controller.settled().await;

    let artifact = match state.phase.artifact() {
        Some(artifact) => Arc::clone(artifact),
        None => {
            if let Some(error) = state.phase.error() {
                tracing::error!(%error, "render failed");
            }
            bail!("no se pudo generar la invitación");
        }
    };

    print_terminal_qr(&invitation)?;
    println!("{}", invitation.title);
    println!("Para: {}", invitation.name);
    println!("Acompañantes: {}", invitation.guest_count);
    println!("{}", invitation.description);
    println!(
        "Creada hace {}",
        perla_core::timefmt::format_distance_to_now(invitation.created_at)
    );
    println!();

    let host = DesktopShareHost::new(&output);
    let capabilities = detect(&host, &artifact).await;
    tracing::debug!(?capabilities, "host capabilities");

    let result = download(&host, &invitation, &artifact).await;
    let notice = download_notice(&result);
    match notice.severity {
        Severity::Info => println!("{}", notice.title),
        Severity::Error => eprintln!("{}", notice.title),
    }
    if let Some(description) = notice.description {
        println!("{}", description);
    }
    result.context("la descarga falló")?;

    Ok(())
}

async fn lookup(scanned: &str) -> Result<()> {
    let service = LookupService::new(LookupConfig::default());
    let details = service.fetch(scanned).await;

    println!("Detalles de la invitación");
    println!("  Residente:  {}", details.resident_name);
    println!("  Invitado:   {}", details.guest_name);
    println!("  Invitados:  {}", details.guest_count);
    println!("  Estado:     {:?}", details.status);

    Ok(())
}

fn print_terminal_qr(invitation: &Invitation) -> Result<()> {
    use qrcode::render::unicode;
    use qrcode::{EcLevel, QrCode};

    let payload = perla_core::TokenPayload::from(invitation)
        .to_json()
        .context("no se pudo serializar el token")?;
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)
        .context("no se pudo generar el código QR")?;
    let rendered = code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .build();
    println!("{}", rendered);
    Ok(())
}
