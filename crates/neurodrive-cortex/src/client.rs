//! Single-threaded driver tying a transport, the session sequencer and a
//! listener together.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use crate::error::{CortexError, Result};
use crate::listener::{dispatch, CortexListener, Requests};
use crate::rpc::IncomingMessage;
use crate::session::{CortexSession, SessionAction, SessionPhase};
use crate::transport::CortexTransport;

pub struct CortexClient<T> {
    transport: T,
    session: CortexSession,
}

impl<T: CortexTransport> CortexClient<T> {
    pub fn new(transport: T, session: CortexSession) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &CortexSession {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run the session until `shutdown` is set, the service closes the
    /// session or the socket, or the handshake fails.
    ///
    /// Each received message is handled to completion, listener callbacks
    /// included, before the next read.
    pub fn run<L: CortexListener + ?Sized>(
        &mut self,
        listener: &mut L,
        shutdown: &AtomicBool,
    ) -> Result<()> {
        let actions = self.session.start();
        self.execute(actions, listener)?;

        while !shutdown.load(Ordering::Relaxed) {
            let text = match self.transport.receive() {
                Ok(Some(text)) => text,
                Ok(None) => continue,
                Err(CortexError::ConnectionClosed) => {
                    info!("[CORTEX] Connection closed by the service");
                    return Ok(());
                }
                Err(e) => return Err(e),
            };

            let message = match IncomingMessage::parse(&text) {
                Ok(message) => message,
                Err(e) => {
                    warn!("[CORTEX] Dropping message: {}", e);
                    continue;
                }
            };

            let actions = self.session.handle(message);
            self.execute(actions, listener)?;

            match self.session.phase() {
                SessionPhase::Failed => {
                    let _ = self.transport.close();
                    return Err(CortexError::SessionFailed(
                        self.session.last_error().unwrap_or("unknown").to_string(),
                    ));
                }
                SessionPhase::Closed => break,
                _ => {}
            }
        }

        info!("[CORTEX] Closing connection");
        self.transport.close()
    }

    fn execute<L: CortexListener + ?Sized>(
        &mut self,
        actions: Vec<SessionAction>,
        listener: &mut L,
    ) -> Result<()> {
        for action in actions {
            match action {
                SessionAction::Send(request) => {
                    debug!("[CORTEX] -> {:?} #{}", request.method, request.id);
                    self.transport.send(&request)?;
                }
                SessionAction::Emit(event) => {
                    let outbox = {
                        let mut requests = Requests::new(&mut self.session);
                        dispatch(listener, &event, &mut requests);
                        requests.into_outbox()
                    };
                    for request in outbox {
                        debug!("[CORTEX] -> {:?} #{}", request.method, request.id);
                        self.transport.send(&request)?;
                    }
                }
            }
        }
        Ok(())
    }
}
