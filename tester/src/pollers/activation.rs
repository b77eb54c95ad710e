//! Activation mail poller
//!
//! Activation and password reset mails carry a link of the form
//! `href="https://host/path?token=<value>">`. The poller drains or scans
//! unseen mail until such a link shows up.

use mail_parser::MessageParser;
use regex::Regex;
use std::sync::OnceLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::TesterResult;
use crate::runtime::{PollOutcome, RetryPolicy};
use crate::traits::Mailbox;

/// What to do with unseen mail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailMode {
    /// Mark everything seen and return `None`
    Clear,
    /// Return the token from the first mail that carries one
    Get,
}

fn link_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"href="(.*?)">"#).ok()).as_ref()
}

/// Token from the first link in the HTML body of a raw RFC 822 message
pub fn extract_token(raw: &[u8]) -> Option<String> {
    let message = MessageParser::default().parse(raw)?;
    let html = message.body_html(0)?;
    let url = link_pattern()?.captures(&html)?.get(1)?.as_str();
    let (_, token) = url.split_once("token=")?;
    (!token.is_empty()).then(|| token.to_string())
}

/// Poll the mailbox according to `mode`.
///
/// Mailbox errors and unparseable mails count as "nothing yet" and are
/// retried under `policy`.
pub async fn activation_token<M>(
    mailbox: &M,
    mode: EmailMode,
    policy: &RetryPolicy,
    cancel: &CancellationToken,
) -> TesterResult<Option<String>>
where
    M: Mailbox + ?Sized,
{
    policy
        .poll("activation mail", cancel, || async {
            let messages = match mailbox.fetch_unseen().await {
                Ok(messages) => messages,
                Err(e) => {
                    warn!(error = %e, "Mailbox unavailable, retrying");
                    return Ok(PollOutcome::Pending);
                }
            };

            if mode == EmailMode::Clear {
                info!("Cleared {} unseen mails", messages.len());
                return Ok(PollOutcome::Ready(None));
            }

            for raw in &messages {
                match extract_token(raw) {
                    Some(token) => {
                        debug!(token = %token, "Activation token found");
                        return Ok(PollOutcome::Ready(Some(token)));
                    }
                    None => warn!("can't get activate token from mail"),
                }
            }

            shared::logging::log_waiting("activation mail", &format!("{} unseen, no token yet", messages.len()));
            Ok(PollOutcome::Pending)
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TesterError;
    use crate::traits::MockMailbox;
    use assert_matches::assert_matches;
    use mockall::Sequence;
    use std::time::Duration;

    fn mail(html: &str) -> Vec<u8> {
        format!(
            "From: noreply@streammyiot.com\r\n\
             To: test.receiver@streammyiot.com\r\n\
             Subject: Enable IoT verification\r\n\
             MIME-Version: 1.0\r\n\
             Content-Type: text/html; charset=utf-8\r\n\
             \r\n\
             {html}\r\n"
        )
        .into_bytes()
    }

    fn activation_mail(token: &str) -> Vec<u8> {
        mail(&format!(
            r#"<p>Welcome</p><a href="https://streammyiot.com/ui/auth#/activate?token={token}">Activate</a>"#
        ))
    }

    fn policy() -> RetryPolicy {
        RetryPolicy::fixed(Duration::from_secs(3)).with_max_attempts(5)
    }

    #[test]
    fn test_extract_token_from_link() {
        assert_eq!(extract_token(&activation_mail("abc123")), Some("abc123".to_string()));
    }

    #[test]
    fn test_extract_token_without_link() {
        assert_eq!(extract_token(&mail("<p>No links here</p>")), None);
        assert_eq!(extract_token(&mail(r#"<a href="https://example.com/">x</a>"#)), None);
    }

    #[tokio::test]
    async fn test_clear_mode_returns_none() {
        let mut mailbox = MockMailbox::new();
        mailbox
            .expect_fetch_unseen()
            .times(1)
            .returning(|| Ok(vec![activation_mail("stale")]));

        let token = activation_token(&mailbox, EmailMode::Clear, &policy(), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(token, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_mode_retries_until_mail_arrives() {
        let mut mailbox = MockMailbox::new();
        let mut seq = Sequence::new();
        mailbox
            .expect_fetch_unseen()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(Vec::new()));
        mailbox
            .expect_fetch_unseen()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| {
                Err(TesterError::Mailbox {
                    message: "connection reset".to_string(),
                })
            });
        mailbox
            .expect_fetch_unseen()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(vec![b"not a mail".to_vec(), activation_mail("tok-42")]));

        let token = activation_token(&mailbox, EmailMode::Get, &policy(), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(token.as_deref(), Some("tok-42"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_mode_gives_up() {
        let mut mailbox = MockMailbox::new();
        mailbox.expect_fetch_unseen().returning(|| Ok(Vec::new()));

        let result = activation_token(&mailbox, EmailMode::Get, &policy(), &CancellationToken::new()).await;
        assert_matches!(result, Err(TesterError::Timeout { attempts: 5, .. }));
    }
}
