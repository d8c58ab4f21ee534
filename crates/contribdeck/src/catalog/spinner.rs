// Copyright 2026 Contribdeck Project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::time::Duration;

/// How long a reveal-more control stays in its busy state.
pub const REVEAL_HOLD: Duration = Duration::from_millis(400);

/// Busy-state tracker for a reveal-more control. The hold is purely
/// perceptual feedback on the triggering control: it has no data dependency
/// and must never gate filtering or retrieval — callers apply the state
/// change immediately and only defer restoring the control.
#[derive(Debug, Default)]
pub struct RevealSpinner {
    busy: bool,
}

impl RevealSpinner {
    /// Mark the control busy. Returns false if it already is (the control is
    /// disabled while held, so a second activation is ignored).
    pub fn engage(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Wait out the fixed feedback hold.
    pub async fn hold(&self) {
        tokio::time::sleep(REVEAL_HOLD).await;
    }

    pub fn release(&mut self) {
        self.busy = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn hold_lasts_the_fixed_duration() {
        let start = tokio::time::Instant::now();
        let mut spinner = RevealSpinner::default();
        assert!(spinner.engage());
        assert!(!spinner.engage());
        spinner.hold().await;
        assert!(start.elapsed() >= REVEAL_HOLD);
        spinner.release();
        assert!(!spinner.is_busy());
        assert!(spinner.engage());
    }
}
