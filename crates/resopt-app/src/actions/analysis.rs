//! Background analysis request

use std::sync::Arc;

use resopt_client::{AnalysisClient, AnalysisTransport};
use resopt_core::AnalysisRequest;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::message::Message;

/// Send `request` once and post the outcome as [`Message::AnalysisFinished`].
pub fn spawn_analysis<T>(
    submission: u64,
    request: AnalysisRequest,
    client: Arc<AnalysisClient<T>>,
    msg_tx: mpsc::Sender<Message>,
) -> JoinHandle<()>
where
    T: AnalysisTransport + Sync + 'static,
{
    tokio::spawn(async move {
        let outcome = client.submit(&request).await;
        if msg_tx
            .send(Message::AnalysisFinished {
                submission,
                outcome,
            })
            .await
            .is_err()
        {
            tracing::debug!("Receiver gone before submission {} finished", submission);
        }
    })
}
