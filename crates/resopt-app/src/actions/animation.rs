//! Deferred half of a dial animation
//!
//! The renderer applies the tier color and the empty ring synchronously.
//! The task spawned here fills the ring after the stroke delay and ticks the
//! counter up to its target, posting each change back as a message.

use resopt_render::{DialUpdate, ScoreAnimation};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::message::Message;

pub fn spawn_dial_animation(
    submission: u64,
    animation: ScoreAnimation,
    msg_tx: mpsc::Sender<Message>,
) -> JoinHandle<()> {
    let kind = animation.kind;

    tokio::spawn(async move {
        let stroke = async {
            tokio::time::sleep(animation.stroke_delay()).await;
            msg_tx
                .send(Message::Dial {
                    submission,
                    kind,
                    update: animation.stroke_update(),
                })
                .await
                .is_ok()
        };

        let counter = async {
            let mut ticker = tokio::time::interval(animation.tick_interval());
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick completes immediately
            ticker.tick().await;

            for frame in animation.counter() {
                ticker.tick().await;
                let update = DialUpdate::Value(frame);
                if msg_tx
                    .send(Message::Dial {
                        submission,
                        kind,
                        update,
                    })
                    .await
                    .is_err()
                {
                    return false;
                }
            }
            true
        };

        let (stroked, counted) = tokio::join!(stroke, counter);
        if stroked && counted {
            let _ = msg_tx.send(Message::DialSettled { submission, kind }).await;
        } else {
            tracing::trace!("Dial {:?} animation abandoned", kind);
        }
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use resopt_core::ScoreKind;
    use resopt_render::{AnimationTiming, Tier};

    fn animation(target: f64) -> ScoreAnimation {
        ScoreAnimation {
            kind: ScoreKind::Skills,
            target,
            tier: Tier::for_score(target),
            timing: AnimationTiming::default(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_counter_ends_on_target_then_settles() {
        let (tx, mut rx) = mpsc::channel(256);
        spawn_dial_animation(2, animation(85.0), tx);

        let mut values = Vec::new();
        let mut strokes = Vec::new();
        loop {
            match rx.recv().await {
                Some(Message::Dial { update, .. }) => match update {
                    DialUpdate::Value(v) => values.push(v),
                    DialUpdate::Stroke { dash_offset } => strokes.push(dash_offset),
                    DialUpdate::Tier(_) => panic!("Tier is applied synchronously"),
                },
                Some(Message::DialSettled { submission, kind }) => {
                    assert_eq!(submission, 2);
                    assert_eq!(kind, ScoreKind::Skills);
                    break;
                }
                other => panic!("Unexpected message {other:?}"),
            }
        }

        assert_eq!(values.len(), 75);
        assert_eq!(values.last().map(String::as_str), Some("85"));
        assert_eq!(strokes.len(), 1);
        assert!((strokes[0] - animation(85.0).dash_offset()).abs() < f64::EPSILON);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stroke_waits_for_delay() {
        let start = tokio::time::Instant::now();
        let (tx, mut rx) = mpsc::channel(256);
        spawn_dial_animation(1, animation(50.0), tx);

        loop {
            if let Some(Message::Dial {
                update: DialUpdate::Stroke { .. },
                ..
            }) = rx.recv().await
            {
                break;
            }
        }
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_channel_stops_quietly() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let handle = spawn_dial_animation(1, animation(70.0), tx);
        assert!(handle.await.is_ok());
    }
}
