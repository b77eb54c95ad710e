//! IMAP mailbox access
//!
//! Each call opens a fresh TLS session, reads every unseen message received
//! since the configured date and logs out again. Fetching a message marks it
//! seen, so a message is returned at most once.

use async_imap::Session;
use async_native_tls::{TlsConnector, TlsStream};
use async_trait::async_trait;
use chrono::NaiveDate;
use futures_util::TryStreamExt;
use tokio::net::TcpStream;
use tracing::{debug, warn};

use crate::config::MailboxConfig;
use crate::error::{TesterError, TesterResult};
use crate::traits::Mailbox;

type ImapSession = Session<TlsStream<TcpStream>>;

const INBOX: &str = "INBOX";

/// IMAP search date, e.g. `20-May-2017`
pub fn imap_date(date: NaiveDate) -> String {
    date.format("%d-%b-%Y").to_string()
}

pub struct ImapMailbox {
    config: MailboxConfig,
}

impl ImapMailbox {
    pub fn new(config: MailboxConfig) -> Self {
        Self { config }
    }

    fn search_query(&self) -> String {
        format!("UNSEEN SINCE {}", imap_date(self.config.since))
    }

    async fn open(&self) -> TesterResult<ImapSession> {
        let tcp = TcpStream::connect((self.config.host.as_str(), self.config.port)).await?;
        let tls = TlsConnector::new()
            .connect(self.config.host.as_str(), tcp)
            .await
            .map_err(|e| TesterError::Mailbox {
                message: format!("TLS handshake with {} failed: {e}", self.config.host),
            })?;

        let client = async_imap::Client::new(tls);
        let session = client
            .login(&self.config.user, &self.config.password)
            .await
            .map_err(|(e, _client)| e)?;
        Ok(session)
    }

    async fn read_unseen(&self, session: &mut ImapSession) -> TesterResult<Vec<Vec<u8>>> {
        session.select(INBOX).await?;

        let query = self.search_query();
        let mut seqs: Vec<u32> = session.search(&query).await?.into_iter().collect();
        debug!(query = %query, matches = seqs.len(), "Mailbox search");
        if seqs.is_empty() {
            return Ok(Vec::new());
        }
        seqs.sort_unstable();

        let seq_set = seqs.iter().map(u32::to_string).collect::<Vec<_>>().join(",");
        let fetches: Vec<_> = session.fetch(seq_set, "RFC822").await?.try_collect().await?;

        Ok(fetches
            .iter()
            .filter_map(|f| f.body().map(<[u8]>::to_vec))
            .collect())
    }
}

#[async_trait]
impl Mailbox for ImapMailbox {
    async fn fetch_unseen(&self) -> TesterResult<Vec<Vec<u8>>> {
        let mut session = self.open().await?;
        let result = self.read_unseen(&mut session).await;

        if let Err(e) = session.logout().await {
            warn!(error = %e, "Mailbox logout failed");
        }
        result
    }
}
