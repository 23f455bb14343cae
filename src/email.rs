use anyhow::Result;
use askama::Template;
use serde::Serialize;
use time::OffsetDateTime;

use crate::{config::Config, contact::ContactSubmission};

/// The message as accepted by the provider's send endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct EmailPayload {
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

impl EmailPayload {
    pub fn compose(config: &Config, submission: &ContactSubmission) -> Result<Self> {
        let subject = submission.subject_or_default();
        let reply_subject = format!("Re: {}", subject);

        let html = HtmlBody {
            config,
            submission,
            reply_subject: &reply_subject,
            year: OffsetDateTime::now_utc().year(),
        }
        .render()?;

        let text = TextBody { submission }.render()?;

        Ok(Self {
            from: config.sender.clone(),
            to: vec![config.recipient.clone()],
            reply_to: submission.email.clone(),
            subject,
            html,
            text,
        })
    }
}

#[derive(Template)]
#[template(path = "contact.html")]
struct HtmlBody<'a> {
    config: &'a Config,
    submission: &'a ContactSubmission,
    reply_subject: &'a str,
    year: i32,
}

#[derive(Template)]
#[template(path = "contact.txt")]
struct TextBody<'a> {
    submission: &'a ContactSubmission,
}

mod filters {
    use std::fmt;

    use askama::Result;

    /// Turns line breaks into `<br>` and therefore expects already escaped input.
    pub fn break_lines<T: fmt::Display>(val: T) -> Result<String> {
        let val = val.to_string().replace("\r\n", "\n").replace('\n', "<br>");

        Ok(val)
    }
}
