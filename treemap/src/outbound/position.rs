//! Position source replaying a fixed list of outcomes.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::GeoPoint;
use crate::domain::ports::{PositionError, PositionSource};

/// Returns queued outcomes in order, then reports the position unavailable.
#[derive(Debug, Default)]
pub struct ScriptedPositionSource {
    outcomes: Mutex<VecDeque<Result<GeoPoint, PositionError>>>,
}

impl ScriptedPositionSource {
    #[must_use]
    pub fn new(outcomes: impl IntoIterator<Item = Result<GeoPoint, PositionError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
        }
    }

    /// Outcomes not yet handed out.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl PositionSource for ScriptedPositionSource {
    async fn current_position(&self) -> Result<GeoPoint, PositionError> {
        let next = self
            .outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        next.unwrap_or_else(|| {
            debug!("position script exhausted");
            Err(PositionError::unavailable("position script exhausted"))
        })
    }
}
