//! Email delivery via the SendGrid v3 API.

use crate::error::AppError;
use serde_json::json;

const SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

pub struct SendGridMailer {
    client: reqwest::Client,
    api_key: String,
}

impl SendGridMailer {
    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        SendGridMailer { client, api_key }
    }

    /// Send one plain-text mail. Provider failures are terminal for the
    /// request; there is no retry.
    pub async fn send(
        &self,
        from: &str,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), AppError> {
        tracing::info!(%to, %subject, "sending mail");
        let payload = json!({
            "personalizations": [{"to": [{"email": to}]}],
            "from": {"email": from},
            "subject": subject,
            "content": [{"type": "text/plain", "value": body}]
        });
        let response = self
            .client
            .post(SEND_URL)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("mail to {to}: {e}")))?;
        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(%to, %subject, %status, "mail send failed");
            return Err(AppError::Provider(format!("mail to {to}: status {status}")));
        }
        tracing::info!(%to, %subject, "sent mail");
        Ok(())
    }
}
