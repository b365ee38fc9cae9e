use crate::error::DecodeError;
use crate::game::{GameObject, MapState};

use super::protocol::{decode_datagram, InboundMessage};

/// What a single datagram did to the map state
#[derive(Debug)]
pub enum IngestOutcome {
    /// Action event: this many static objects were removed
    Cleared { removed: usize },
    /// State update stored. `enemies_evicted` is non-zero only when a player
    /// crossed between the overworld and the caves.
    Upserted { id: i64, enemies_evicted: usize },
    /// Payload could not be decoded; state untouched
    Dropped(DecodeError),
}

/// Decode a datagram and apply it. Never fails: malformed input is logged
/// and leaves the state as it was.
pub fn apply_datagram(state: &mut MapState, data: &[u8], now: f64) -> IngestOutcome {
    match decode_datagram(data) {
        Ok(message) => apply_message(state, message, now),
        Err(e) => {
            log::debug!("Dropping datagram ({} bytes): {}", data.len(), e);
            IngestOutcome::Dropped(e)
        }
    }
}

pub fn apply_message(state: &mut MapState, message: InboundMessage, now: f64) -> IngestOutcome {
    match message {
        InboundMessage::Action { action_type } => {
            let removed = state.objects.remove_static();
            log::debug!("Action {} cleared {} static objects", action_type, removed);
            IngestOutcome::Cleared { removed }
        }
        InboundMessage::State(object) => apply_state(state, object, now),
    }
}

fn apply_state(state: &mut MapState, object: GameObject, now: f64) -> IngestOutcome {
    // Enemies belong to one area; crossing into or out of the caves
    // invalidates all of them. Must run before the player record is replaced.
    let mut enemies_evicted = 0;
    if let Some(in_cave) = object.player_in_cave() {
        if in_cave != state.view.in_caves {
            enemies_evicted = state.objects.remove_enemies();
            log::info!(
                "Player {} the caves, evicted {} enemies",
                if in_cave { "entered" } else { "left" },
                enemies_evicted
            );
        }
    }

    let id = object.id;
    state.objects.upsert(object, now);
    state.view.follow(&object);

    IngestOutcome::Upserted { id, enemies_evicted }
}
