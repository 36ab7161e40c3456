//! SMS delivery via the Twilio messages API.

use crate::error::AppError;

pub struct TwilioTexter {
    client: reqwest::Client,
    account_sid: String,
    auth_token: String,
}

impl TwilioTexter {
    pub fn new(client: reqwest::Client, account_sid: String, auth_token: String) -> Self {
        TwilioTexter {
            client,
            account_sid,
            auth_token,
        }
    }

    /// Send one SMS. Provider failures are terminal for the request; there is
    /// no retry.
    pub async fn send(&self, from: &str, to: &str, message: &str) -> Result<(), AppError> {
        let url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.account_sid
        );
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("From", from), ("To", to), ("Body", message)])
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("text to {to}: {e}")))?;
        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(%to, %status, "text send failed");
            return Err(AppError::Provider(format!("text to {to}: status {status}")));
        }
        tracing::info!(%to, "sent text");
        Ok(())
    }
}
