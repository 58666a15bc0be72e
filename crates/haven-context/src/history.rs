// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! History zone: trims client-supplied history to a sliding window.

use haven_core::{ChatRole, ChatTurn};
use tracing::debug;

/// Returns the last `limit` user/assistant turns in order.
///
/// System turns sent by the client are dropped so they cannot displace the
/// persona prompt. Empty turns are dropped as well.
pub fn recent_turns(history: &[ChatTurn], limit: usize) -> Vec<ChatTurn> {
    let usable: Vec<&ChatTurn> = history
        .iter()
        .filter(|turn| turn.role != ChatRole::System && !turn.content.trim().is_empty())
        .collect();

    let skip = usable.len().saturating_sub(limit);
    if skip > 0 || usable.len() != history.len() {
        debug!(
            received = history.len(),
            kept = usable.len() - skip,
            "history window applied"
        );
    }
    usable.into_iter().skip(skip).cloned().collect()
}
