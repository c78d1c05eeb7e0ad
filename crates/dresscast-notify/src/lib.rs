//! Delivery of rendered reports
//!
//! The pipeline hands a finished subject and body to a [`Notifier`]; the
//! SMTP implementation mails it, the console one prints it for dry runs.

pub mod smtp;

pub use smtp::SmtpNotifier;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Could not build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP failure: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

pub type NotifyResult<T> = Result<T, NotifyError>;

/// Delivery channel for a rendered report
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, subject: &str, body: &str, recipient: &str) -> NotifyResult<()>;
}

/// Subject line for the daily report mail
pub fn subject_for(date: NaiveDate) -> String {
    format!(
        "Dresscast: Weather & Outfit Report for {}",
        date.format("%Y-%m-%d")
    )
}

/// Wrap the rendered report in the mail greeting and sign-off
pub fn wrap_report(report_text: &str) -> String {
    format!(
        "Hello from Dresscast!\n\nHere's your daily weather and outfit recommendation:\n\n{}\n\nStay comfortable!\n",
        report_text.trim_end()
    )
}

/// Prints the mail to stdout instead of sending it
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn deliver(&self, subject: &str, body: &str, recipient: &str) -> NotifyResult<()> {
        println!("To: {recipient}\nSubject: {subject}\n\n{body}");
        Ok(())
    }
}
