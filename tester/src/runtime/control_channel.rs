//! Device control channel over WebSocket
//!
//! The device registers once, then a single reader task forwards every
//! actuation the platform pushes into an unbounded queue. Pushes arriving
//! while nobody is waiting stay queued, so the listener sees them in the
//! order they were sent.

use async_trait::async_trait;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, Stream, StreamExt};
use shared::{ActuationContent, ControlMessage, DeviceRegistration, SharedResult};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{timeout, Instant};
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use crate::error::{TesterError, TesterResult};
use crate::traits::ControlChannel;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct WsControlChannel {
    writer: SplitSink<WsStream, Message>,
    pushes: mpsc::UnboundedReceiver<SharedResult<ActuationContent>>,
    reader: JoinHandle<()>,
    push_timeout: Duration,
}

impl WsControlChannel {
    /// Connect and register `device_id` on the control channel.
    ///
    /// `push_timeout` bounds each [`ControlChannel::next_actuation`] wait.
    pub async fn connect(
        ws_url: &str,
        device_id: &str,
        device_token: &str,
        push_timeout: Duration,
    ) -> TesterResult<Self> {
        info!(url = %ws_url, device_id = %device_id, "Connecting control channel");

        let (stream, _response) = timeout(CONNECT_TIMEOUT, connect_async(ws_url))
            .await
            .map_err(|_| TesterError::WebSocket {
                message: format!("connect to {ws_url} timed out"),
            })??;

        let (mut writer, read) = stream.split();

        let registration = serde_json::to_string(&DeviceRegistration::new(device_id, device_token))?;
        writer.send(Message::Text(registration)).await?;

        let (tx, pushes) = mpsc::unbounded_channel();
        let reader = tokio::spawn(forward_actuations(read, tx));

        Ok(Self {
            writer,
            pushes,
            reader,
            push_timeout,
        })
    }
}

/// Forward every actuation frame, decodable or not, in arrival order
async fn forward_actuations<R>(mut read: R, tx: mpsc::UnboundedSender<SharedResult<ActuationContent>>)
where
    R: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
{
    while let Some(frame) = read.next().await {
        let text = match frame {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => {
                debug!("Control channel closed by server");
                break;
            }
            Ok(_) => continue,
            Err(e) => {
                warn!(error = %e, "Control channel read failed");
                break;
            }
        };

        let message = match ControlMessage::parse(&text) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, frame = %text, "Ignoring unparseable control frame");
                continue;
            }
        };

        let Some(actuation) = message.actuation() else {
            debug!(code = ?message.code, "Control frame without actuation");
            continue;
        };
        match &actuation {
            Ok(content) => debug!(component_id = ?content.component_id, "Actuation pushed"),
            Err(e) => warn!(error = %e, frame = %text, "Actuation frame could not be decoded"),
        }
        if tx.send(actuation).is_err() {
            break;
        }
    }
}

#[async_trait]
impl ControlChannel for WsControlChannel {
    async fn next_actuation(&mut self) -> TesterResult<ActuationContent> {
        let started = Instant::now();
        match timeout(self.push_timeout, self.pushes.recv()).await {
            Ok(Some(actuation)) => Ok(actuation?),
            Ok(None) => Err(TesterError::WebSocket {
                message: "control channel closed before actuation arrived".to_string(),
            }),
            Err(_) => Err(TesterError::Timeout {
                operation: "actuation push".to_string(),
                elapsed: started.elapsed(),
                attempts: 1,
            }),
        }
    }

    async fn close(&mut self) -> TesterResult<()> {
        self.reader.abort();
        self.pushes.close();
        if let Err(e) = self.writer.close().await {
            debug!(error = %e, "Control channel close handshake failed");
        }
        Ok(())
    }
}

impl Drop for WsControlChannel {
    fn drop(&mut self) {
        self.reader.abort();
    }
}
