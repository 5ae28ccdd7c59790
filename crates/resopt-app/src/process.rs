//! Message processing
//!
//! Runs the TEA update loop for one incoming message, following up on any
//! chained messages and dispatching every resulting action.

use std::sync::Arc;

use resopt_client::{AnalysisClient, AnalysisTransport};
use resopt_render::ViewSink;
use tokio::sync::mpsc;

use crate::actions::handle_action;
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function
pub fn process_message<T>(
    state: &mut AppState,
    sink: &mut dyn ViewSink,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    client: &Arc<AnalysisClient<T>>,
) where
    T: AnalysisTransport + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, sink, m);

        if let Some(action) = result.action {
            if let Some(timer) = handle_action(action, msg_tx.clone(), client) {
                state.progress.arm(timer);
            }
        }

        // Continue with follow-up message
        msg = result.message;
    }
}
