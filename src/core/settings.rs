//! Demo settings kept in the `system_state` table.
//!
//! The selected phase survives restarts. When nothing has been stored yet the
//! restaurant's configured default applies, then Phase 1.

use crate::{
    core::phase::Phase,
    entities::{Restaurant, SystemState, system_state},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{Set, prelude::*};
use tracing::{info, warn};

const CURRENT_PHASE_KEY: &str = "current_phase";

/// Returns the phase the demo is currently showing.
///
/// # Errors
/// Returns an error if a database query fails.
pub async fn get_current_phase(db: &DatabaseConnection, restaurant_id: &str) -> Result<Phase> {
    let stored = SystemState::find()
        .filter(system_state::Column::Key.eq(CURRENT_PHASE_KEY))
        .one(db)
        .await?;

    if let Some(state) = stored {
        match state.value.parse::<i32>() {
            Ok(number) => match Phase::try_from(number) {
                Ok(phase) => return Ok(phase),
                Err(e) => warn!(error = %e, "Ignoring stored phase"),
            },
            Err(e) => warn!(value = %state.value, error = %e, "Ignoring unparseable stored phase"),
        }
    }

    let default_phase = Restaurant::find_by_id(restaurant_id)
        .one(db)
        .await?
        .and_then(|r| Phase::try_from(r.default_phase).ok())
        .unwrap_or_default();
    Ok(default_phase)
}

/// Stores the selected phase, replacing any earlier selection.
///
/// # Errors
/// Returns an error if the database write fails.
pub async fn set_current_phase<C>(db: &C, phase: Phase) -> Result<()>
where
    C: ConnectionTrait,
{
    let value = phase.number().to_string();
    let now = Utc::now();

    let existing = SystemState::find()
        .filter(system_state::Column::Key.eq(CURRENT_PHASE_KEY))
        .one(db)
        .await?;

    if let Some(state) = existing {
        let mut active_model: system_state::ActiveModel = state.into();
        active_model.value = Set(value);
        active_model.updated_at = Set(now);
        active_model.update(db).await?;
    } else {
        system_state::ActiveModel {
            key: Set(CURRENT_PHASE_KEY.to_string()),
            value: Set(value),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    info!(%phase, "Phase changed");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::PaginatorTrait;

    #[tokio::test]
    async fn test_phase_defaults_to_one() -> Result<()> {
        let db = setup_test_db().await?;
        assert_eq!(get_current_phase(&db, "nowhere").await?, Phase::One);
        Ok(())
    }

    #[tokio::test]
    async fn test_phase_falls_back_to_restaurant_default() -> Result<()> {
        let db = setup_test_db().await?;
        let restaurant = create_test_restaurant(&db, TEST_RESTAURANT_ID).await?;
        let mut active: crate::entities::restaurant::ActiveModel = restaurant.into();
        active.default_phase = Set(3);
        active.update(&db).await?;

        assert_eq!(get_current_phase(&db, TEST_RESTAURANT_ID).await?, Phase::Three);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_phase_persists_and_overwrites() -> Result<()> {
        let db = setup_test_db().await?;

        set_current_phase(&db, Phase::Two).await?;
        assert_eq!(get_current_phase(&db, TEST_RESTAURANT_ID).await?, Phase::Two);

        set_current_phase(&db, Phase::Three).await?;
        assert_eq!(get_current_phase(&db, TEST_RESTAURANT_ID).await?, Phase::Three);

        let rows = SystemState::find()
            .filter(system_state::Column::Key.eq(CURRENT_PHASE_KEY))
            .count(&db)
            .await?;
        assert_eq!(rows, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupt_stored_phase_is_ignored() -> Result<()> {
        let db = setup_test_db().await?;
        system_state::ActiveModel {
            key: Set(CURRENT_PHASE_KEY.to_string()),
            value: Set("9".to_string()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        assert_eq!(get_current_phase(&db, TEST_RESTAURANT_ID).await?, Phase::One);
        Ok(())
    }
}
