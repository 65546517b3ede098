use std::time::Duration;

use log::{error, info};
use tokio::select;
use tokio::sync::{mpsc, oneshot};

use crate::session::Session;

/// Background session watcher for long running commands. Revalidates the
/// stored token on an interval and reports once on the handle when the
/// session dies, then the task ends on its own.
pub struct SessionMonitor {
    session: Session,

    check_intv: Duration,

    expired_tx: mpsc::Sender<()>,
    shutdown_rx: oneshot::Receiver<()>,
}

pub struct MonitorHandle {
    /// Receives a single message when the session expired.
    pub expired: mpsc::Receiver<()>,

    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MonitorHandle {
    /// Stop the background task. Dropping the handle has the same effect.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl SessionMonitor {
    pub fn start(session: Session, check_intv: Duration) -> MonitorHandle {
        let (expired_tx, expired_rx) = mpsc::channel(1);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let monitor = Self {
            session,
            check_intv,
            expired_tx,
            shutdown_rx,
        };
        tokio::spawn(async move {
            monitor.main_loop().await;
        });

        MonitorHandle {
            expired: expired_rx,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    async fn main_loop(mut self) {
        info!(
            "Start session monitor, check interval {}s",
            self.check_intv.as_secs()
        );
        let mut check_intv = tokio::time::interval(self.check_intv);

        loop {
            select! {
                _ = check_intv.tick() => {
                    match self.session.validate() {
                        Ok(true) => {}
                        Ok(false) => {
                            info!("Session expired, stop the monitor");
                            let _ = self.expired_tx.send(()).await;
                            return;
                        }
                        // Store errors are transient, keep ticking
                        Err(e) => error!("Validate session error: {e:#}"),
                    }
                }

                _ = &mut self.shutdown_rx => {
                    info!("Session monitor shutdown");
                    return;
                }
            }
        }
    }
}
