use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use application::ports::in_::{CoordinatorService, CoordinatorSnapshot};
use domain::{PlayerId, SessionConfig};

use crate::tcp::TcpNotifier;

/// Everything the transport tells the coordinator. Handled strictly in
/// arrival order, one at a time.
#[derive(Debug)]
pub enum CoordinatorEvent {
    Connected {
        player_id: PlayerId,
        outbound: mpsc::UnboundedSender<String>,
    },
    Line {
        player_id: PlayerId,
        line: String,
    },
    Closed {
        player_id: PlayerId,
    },
    Snapshot {
        reply: oneshot::Sender<CoordinatorSnapshot>,
    },
}

pub type CoordinatorHandle = mpsc::UnboundedSender<CoordinatorEvent>;

/// Starts the task that owns all coordinator state. It stops once every
/// handle has been dropped.
pub fn spawn_coordinator(config: SessionConfig) -> (CoordinatorHandle, JoinHandle<()>) {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let notifier = Arc::new(TcpNotifier::new());
    let coordinator = CoordinatorService::new(notifier.clone(), config);

    let task = tokio::spawn(run(coordinator, notifier, events_rx));
    (events_tx, task)
}

async fn run(
    mut coordinator: CoordinatorService,
    notifier: Arc<TcpNotifier>,
    mut events: mpsc::UnboundedReceiver<CoordinatorEvent>,
) {
    info!("Coordinator started");
    while let Some(event) = events.recv().await {
        match event {
            CoordinatorEvent::Connected { player_id, outbound } => {
                notifier.register_player(player_id, outbound).await;
                coordinator.handle_connect(player_id);
            }
            CoordinatorEvent::Line { player_id, line } => {
                coordinator.handle_line(player_id, &line).await;
            }
            CoordinatorEvent::Closed { player_id } => {
                coordinator.handle_disconnect(player_id).await;
            }
            CoordinatorEvent::Snapshot { reply } => {
                if reply.send(coordinator.snapshot()).is_err() {
                    debug!("Snapshot requester went away");
                }
            }
        }
    }
    info!("Coordinator stopped");
}
