//! Stage timers for the simulated progress timeline

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::message::Message;

/// Post `AdvanceStage { run }` after `delay`.
pub fn spawn_stage_timer(run: u64, delay: Duration, msg_tx: mpsc::Sender<Message>) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let _ = msg_tx.send(Message::AdvanceStage { run }).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let start = tokio::time::Instant::now();
        let (tx, mut rx) = mpsc::channel(1);
        spawn_stage_timer(7, Duration::from_secs(3), tx);

        tokio::time::sleep(Duration::from_millis(2_999)).await;
        assert!(rx.try_recv().is_err());

        assert!(matches!(rx.recv().await, Some(Message::AdvanceStage { run: 7 })));
        assert!(start.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_aborted_timer_never_fires() {
        let (tx, mut rx) = mpsc::channel(1);
        let handle = spawn_stage_timer(1, Duration::from_secs(3), tx);
        handle.abort();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
    }
}
