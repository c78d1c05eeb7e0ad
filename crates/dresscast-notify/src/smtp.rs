//! SMTP delivery over STARTTLS

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::{Notifier, NotifyResult};

/// Sends reports through an SMTP relay on the submission port
///
/// The default deployment relays through Gmail with an app password; any
/// STARTTLS-capable relay works.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpNotifier {
    pub fn new(relay: &str, sender_email: &str, app_password: &str) -> NotifyResult<Self> {
        let credentials = Credentials::new(sender_email.to_string(), app_password.to_string());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(relay)?
            .credentials(credentials)
            .build();
        let sender: Mailbox = sender_email.parse()?;
        Ok(Self { transport, sender })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn deliver(&self, subject: &str, body: &str, recipient: &str) -> NotifyResult<()> {
        let message = Message::builder()
            .from(self.sender.clone())
            .to(recipient.parse()?)
            .subject(subject)
            .body(body.to_string())?;

        info!(%recipient, "sending report mail");
        self.transport.send(message).await?;
        Ok(())
    }
}
