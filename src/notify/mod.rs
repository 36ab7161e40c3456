//! Notification dispatch: fixed message templates rendered per action and
//! delivered through the mail and SMS providers. The whole dispatcher is
//! gated on `NotifyConfig::enabled` and dormant by default.

pub mod mail;
pub mod text;

pub use mail::SendGridMailer;
pub use text::TwilioTexter;

use crate::config::NotifyConfig;
use crate::error::AppError;
use crate::model::{ActionKind, ActionRecord};

const HEART_BCC: &str = "~~NAME~~ at ~~EMAIL~~ and ~~PHONE~~ liked the property ~~LINK~~";
const HEART_MESSAGE: &str = "Hi ~~NAME~~, Your RealTour \u{2764}\u{fe0f} listing is here - ~~LINK~~";
const HEART_SUBJECT: &str = "RealTour \u{2764}\u{fe0f} listing!";
const MAIL_MESSAGE: &str = "~~NAME~~ at ~~EMAIL~~ and ~~PHONE~~ sent a mail about the property ~~LINK~~";
const TEXT_MESSAGE: &str = "~~NAME~~ at ~~EMAIL~~ and ~~PHONE~~ sent a text about the property ~~LINK~~";
const NEW_VIDEO_MESSAGE: &str = "New video uploaded to ~~LISTING_ID~~";
const NEW_VIDEO_SUBJECT: &str = "New video for approval";
const LISTING_SUBJECT: &str = "Listing email";

/// Substitute the placeholder tokens in one message template.
fn render(template: &str, rec: &ActionRecord, link: &str) -> String {
    template
        .replace("~~NAME~~", &rec.name)
        .replace("~~EMAIL~~", &rec.email)
        .replace("~~PHONE~~", &rec.phone)
        .replace("~~LINK~~", link)
}

pub struct Notifier {
    mail: SendGridMailer,
    text: TwilioTexter,
    from_email: String,
    from_phone: String,
    site_url: String,
}

impl Notifier {
    pub fn new(config: &NotifyConfig) -> Self {
        let client = reqwest::Client::new();
        Notifier {
            mail: SendGridMailer::new(client.clone(), config.sendgrid_api_key.clone()),
            text: TwilioTexter::new(
                client,
                config.twilio_account_sid.clone(),
                config.twilio_auth_token.clone(),
            ),
            from_email: config.from_email.clone(),
            from_phone: config.from_phone.clone(),
            site_url: config.site_url.clone(),
        }
    }

    fn details_link(&self, listing_id: &str) -> String {
        format!("{}/details/{}", self.site_url, listing_id)
    }

    /// Dispatch the messages for one stored action. `book` is stored only.
    /// The `text` action goes through the mail provider to the service
    /// address, as the original flow did.
    pub async fn dispatch(&self, rec: &ActionRecord) -> Result<(), AppError> {
        tracing::debug!(action = rec.action.as_str(), listing_id = %rec.listing_id, "dispatching");
        let link = self.details_link(&rec.listing_id);
        match rec.action {
            ActionKind::Heart => {
                let message = render(HEART_MESSAGE, rec, &link);
                let bcc = render(HEART_BCC, rec, &link);
                let bcc_subject = format!("{HEART_SUBJECT} from {}", rec.email);
                tokio::try_join!(
                    self.mail.send(&self.from_email, &self.from_email, &bcc_subject, &bcc),
                    self.mail.send(&self.from_email, &rec.email, HEART_SUBJECT, &message),
                    self.text.send(&self.from_phone, &rec.phone, &message),
                )?;
                Ok(())
            }
            ActionKind::Mail => {
                let message = render(MAIL_MESSAGE, rec, &link);
                self.mail
                    .send(&self.from_email, &self.from_email, LISTING_SUBJECT, &message)
                    .await
            }
            ActionKind::Text => {
                let message = render(TEXT_MESSAGE, rec, &link);
                self.mail
                    .send(&self.from_email, &self.from_email, LISTING_SUBJECT, &message)
                    .await
            }
            ActionKind::Book => Ok(()),
        }
    }

    /// Mail the service address that a listing has a new video to approve.
    pub async fn video_approval(&self, listing_id: &str) -> Result<(), AppError> {
        let message = NEW_VIDEO_MESSAGE.replace("~~LISTING_ID~~", listing_id);
        self.mail
            .send(&self.from_email, &self.from_email, NEW_VIDEO_SUBJECT, &message)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(action: ActionKind) -> ActionRecord {
        ActionRecord {
            action,
            email: "jo@x.com".into(),
            listing_id: "42".into(),
            name: "Jo".into(),
            notes: None,
            phone: "5551234567".into(),
        }
    }

    #[test]
    fn render_substitutes_all_tokens() {
        let rec = record(ActionKind::Mail);
        let out = render(MAIL_MESSAGE, &rec, "https://realtournetwork.com/details/42");
        assert_eq!(
            out,
            "Jo at jo@x.com and 5551234567 sent a mail about the property \
             https://realtournetwork.com/details/42"
        );
    }

    #[test]
    fn heart_message_greets_by_name() {
        let rec = record(ActionKind::Heart);
        let out = render(HEART_MESSAGE, &rec, "link");
        assert!(out.starts_with("Hi Jo,"));
        assert!(out.ends_with("- link"));
    }

    #[test]
    fn video_approval_embeds_listing_id() {
        let message = NEW_VIDEO_MESSAGE.replace("~~LISTING_ID~~", "mls-42");
        assert_eq!(message, "New video uploaded to mls-42");
    }
}
