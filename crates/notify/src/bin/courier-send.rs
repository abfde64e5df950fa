//! courier-send — dispatch a single email or SMS from the command line.
//!
//! Composition root: loads config, builds the provider clients once, and
//! wires them into the facade. Exits non-zero when the provider did not
//! accept the message.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use courier_notify::sendgrid::SendGridClient;
use courier_notify::store::{Channel, MemoryMessageStore, MessageRecord};
use courier_notify::twilio::TwilioClient;
use courier_notify::{
    CourierConfig, EmailDispatcher, NotificationRequest, NotificationService, SmsDispatcher,
};

// ── CLI ─────────────────────────────────────────────────────────────

/// Courier — send one notification through a configured provider.
#[derive(Parser, Debug)]
#[command(name = "courier-send", version, about)]
struct Cli {
    /// Path to courier.toml config file.
    #[arg(long, env = "COURIER_CONFIG", default_value = "config/courier.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send an email.
    Email {
        /// Recipient address.
        #[arg(long)]
        to: String,
        /// Subject line.
        #[arg(long)]
        subject: String,
        /// Message body (also used as the HTML variant).
        #[arg(long)]
        body: String,
        /// Sender address; the configured default is used when omitted.
        #[arg(long)]
        from: Option<String>,
        /// Sender display name.
        #[arg(long)]
        sender_name: Option<String>,
    },
    /// Send an SMS.
    Sms {
        /// Recipient phone number (national format, e.g. 08031234567).
        #[arg(long)]
        to: String,
        /// Message body.
        #[arg(long)]
        body: String,
        /// Sender identifier included in the message label.
        #[arg(long)]
        from: Option<String>,
    },
}

// ── main ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = CourierConfig::from_file(&cli.config)?;
    info!(path = %cli.config, "loaded courier config");

    let http = reqwest::Client::new();
    let email = EmailDispatcher::new(
        Arc::new(SendGridClient::new(config.sendgrid.api_key.clone(), http.clone())),
        config.sendgrid.email.clone(),
        config.sendgrid.name.clone(),
        config.messaging.retries,
    );
    let sms = SmsDispatcher::new(
        Arc::new(TwilioClient::new(
            config.twilio.accounts_id.clone(),
            config.twilio.auth_token.clone(),
            http,
        )),
        config.twilio.phone.clone(),
        config.messaging.retries,
    );
    let service = NotificationService::new(email, sms, Arc::new(MemoryMessageStore::new()));

    let (channel, request) = match cli.command {
        Command::Email {
            to,
            subject,
            body,
            from,
            sender_name,
        } => (
            Channel::Email,
            NotificationRequest {
                from,
                sender_name,
                to,
                subject,
                body,
            },
        ),
        Command::Sms { to, body, from } => (
            Channel::Sms,
            NotificationRequest {
                from,
                sender_name: None,
                to,
                subject: String::new(),
                body,
            },
        ),
    };

    let delivered = match channel {
        Channel::Email => service.send_email(&request).await,
        Channel::Sms => service.send_sms(&request).await,
    };

    service
        .add_message(MessageRecord::new(
            channel,
            request.to.clone(),
            request.body.clone(),
            delivered,
        ))
        .await?;

    if delivered {
        info!(to = %request.to, "notification accepted by provider");
        Ok(())
    } else {
        tracing::error!(to = %request.to, "notification not delivered");
        std::process::exit(1);
    }
}
