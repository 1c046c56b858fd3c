//! Bot requests on the async compute pool
//!
//! The HTTP call blocks, so it runs on [`AsyncComputeTaskPool`] and the
//! result is polled once per frame. Only one request is in flight; a new one
//! replaces the old, whose ticket the controller has already retired.

use crate::game::opponent::{OpponentMoveProvider, OpponentResult};
use crate::game::{BoardController, GameError, OpponentOutcome, OpponentRequest};
use bevy::prelude::*;
use bevy::tasks::{block_on, AsyncComputeTaskPool, Task};
use futures_lite::future;
use std::sync::Arc;

use super::systems::CuePlayed;

/// The bot the board asks for moves
#[derive(Resource, Clone)]
pub struct OpponentLink(pub Arc<dyn OpponentMoveProvider>);

impl OpponentLink {
    pub fn new<P: OpponentMoveProvider + 'static>(provider: P) -> Self {
        Self(Arc::new(provider))
    }
}

/// Bot request running in the background
#[derive(Resource)]
pub struct PendingOpponentMove {
    pub ticket: u64,
    pub task: Task<OpponentResult<String>>,
}

/// Start `request` on the compute pool
pub fn spawn_opponent_request(
    commands: &mut Commands,
    link: Option<&OpponentLink>,
    request: OpponentRequest,
) {
    let Some(link) = link else {
        error!(
            "[BOT] No bot configured, ticket {} cannot be answered",
            request.ticket
        );
        return;
    };

    let provider = Arc::clone(&link.0);
    let OpponentRequest {
        ticket, fen, depth, ..
    } = request;
    debug!("[BOT] Spawning request for ticket {}", ticket);

    let task = AsyncComputeTaskPool::get().spawn(async move { provider.request_move(&fen, depth) });
    commands.insert_resource(PendingOpponentMove { ticket, task });
}

/// Hand a finished bot answer to the controller
pub fn poll_opponent_task(
    mut commands: Commands,
    pending: Option<ResMut<PendingOpponentMove>>,
    controller: Option<ResMut<BoardController>>,
    mut cues: MessageWriter<CuePlayed>,
) {
    let Some(mut pending) = pending else {
        return;
    };
    if !pending.task.is_finished() {
        return;
    }

    let Some(response) = block_on(future::poll_once(&mut pending.task)) else {
        warn!("[BOT] Task reported finished but result not available");
        return;
    };
    commands.remove_resource::<PendingOpponentMove>();

    let Some(mut controller) = controller else {
        return;
    };
    match controller.resolve_opponent(pending.ticket, response) {
        Ok(OpponentOutcome::Replied(applied)) => {
            cues.write(CuePlayed(applied.cue));
        }
        Ok(OpponentOutcome::Hinted(hint)) => {
            info!("[BOT] Suggests {} -> {}", hint.from, hint.to);
        }
        Err(GameError::StaleResponse { .. }) => {}
        Err(e) => warn!("[BOT] Reply not applied: {}", e),
    }
}
