use super::client::SessionClient;
use crate::ui::SessionView;
use anyhow::{Context, Result};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// UI command for the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    /// Stop any live session and exit the driver loop
    Shutdown,
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Cloneable front end to a running [`SessionDriver`]
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<Command>,
    views: watch::Receiver<SessionView>,
}

impl SessionHandle {
    pub async fn start(&self) -> Result<()> {
        self.send(Command::Start).await
    }

    pub async fn stop(&self) -> Result<()> {
        self.send(Command::Stop).await
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown).await
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .await
            .context("Session driver is no longer running")
    }

    /// Receiver that is notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.views.clone()
    }

    /// Latest published view
    pub fn view(&self) -> SessionView {
        self.views.borrow().clone()
    }
}

/// Runs a [`SessionClient`] on a single task
///
/// UI commands and realtime events are both consumed here, one at a time,
/// so start, stop and disconnect handling never interleave.
pub struct SessionDriver {
    client: SessionClient,
    commands: mpsc::Receiver<Command>,
    views: watch::Sender<SessionView>,
}

impl SessionDriver {
    pub fn new(client: SessionClient) -> (Self, SessionHandle) {
        let (command_tx, command_rx) = mpsc::channel(16);
        let (view_tx, view_rx) = watch::channel(client.view());

        let driver = Self {
            client,
            commands: command_rx,
            views: view_tx,
        };
        let handle = SessionHandle {
            commands: command_tx,
            views: view_rx,
        };

        (driver, handle)
    }

    /// Spawn the driver loop. The join handle yields the client back.
    pub fn spawn(client: SessionClient) -> (SessionHandle, JoinHandle<SessionClient>) {
        let (driver, handle) = Self::new(client);
        (handle, tokio::spawn(driver.run()))
    }

    pub async fn run(mut self) -> SessionClient {
        info!("Session driver started");

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(Command::Start) => {
                        if self.start().await == Flow::Exit {
                            break;
                        }
                    }
                    Some(Command::Stop) => self.client.stop().await,
                    Some(Command::Shutdown) | None => {
                        self.client.stop().await;
                        self.publish();
                        break;
                    }
                },
                event = self.client.next_event() => {
                    debug!("Realtime event: {:?}", event);
                    self.client.handle_event(event).await;
                }
            }

            self.publish();
        }

        info!("Session driver stopped");
        self.client
    }

    /// Run a start while still taking commands
    ///
    /// The cleared view is published before the token fetch. `Stop`
    /// abandons the attempt, `Shutdown` abandons it and ends the loop.
    async fn start(&mut self) -> Flow {
        let Some(mut pending) = self.client.begin_start() else {
            return Flow::Continue;
        };
        self.publish();

        loop {
            tokio::select! {
                outcome = &mut pending => {
                    self.client.finish_start(outcome);
                    return Flow::Continue;
                }
                command = self.commands.recv() => match command {
                    Some(Command::Start) => debug!("Start already in progress"),
                    Some(Command::Stop) => {
                        info!("Start abandoned by stop");
                        return Flow::Continue;
                    }
                    Some(Command::Shutdown) | None => {
                        info!("Start abandoned by shutdown");
                        self.publish();
                        return Flow::Exit;
                    }
                },
            }
        }
    }

    fn publish(&self) {
        let view = self.client.view();
        self.views.send_if_modified(|current| {
            if *current == view {
                false
            } else {
                *current = view;
                true
            }
        });
    }
}
