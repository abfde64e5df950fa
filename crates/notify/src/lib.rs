//! Outbound notification dispatch with bounded retry.
//!
//! This crate provides:
//! - `EmailDispatcher` and `SmsDispatcher` wrapping third-party delivery APIs
//! - `EmailApi` / `SmsApi` traits for pluggable provider clients
//! - `SendGridClient` and `TwilioClient` provider implementations
//! - `MessageStore` trait for message history persistence
//! - `NotificationService` facade composing dispatchers and store

pub mod config;
pub mod email;
pub mod error;
pub mod provider;
pub mod request;
pub mod sendgrid;
pub mod service;
pub mod sms;
pub mod store;
pub mod twilio;

pub use config::CourierConfig;
pub use email::EmailDispatcher;
pub use error::NotifyError;
pub use request::NotificationRequest;
pub use service::NotificationService;
pub use sms::SmsDispatcher;
