use crate::config::GameConfig;
use crate::error::ReplayError;
use crate::journal::InputJournal;
use crate::level::Dungeon;
use crate::session::Session;
use crate::types::SessionStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_status: SessionStatus,
    pub final_snapshot_hash: u64,
    pub final_round: u64,
}

/// Re-runs a recorded session from its seed and spawn. Every input must be
/// consumed by the time the session ends, and the session must end.
pub fn replay_to_end(
    dungeon: &Dungeon,
    config: &GameConfig,
    journal: &InputJournal,
) -> Result<ReplayResult, ReplayError> {
    let game = dungeon.create_game(journal.spawn, config, journal.seed)?;
    let mut session = Session::new(game, journal.spawn, config);
    let mut inputs = journal.inputs.iter();

    loop {
        let Some(record) = inputs.next() else {
            return Err(ReplayError::MissingInput);
        };
        if let Some(status) = session.step(record.input)? {
            let remaining = inputs.len();
            if remaining > 0 {
                return Err(ReplayError::TrailingInput { remaining });
            }
            log::debug!("replayed {} inputs to {status:?}", journal.inputs.len());
            return Ok(ReplayResult {
                final_status: status,
                final_snapshot_hash: session.game().snapshot_hash(),
                final_round: session.game().current_round(),
            });
        }
    }
}
