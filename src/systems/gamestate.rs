use bevy_ecs::prelude::*;
use log::{error, info};

use crate::resources::gamesession::GameSession;
use crate::resources::scores::ScoreKeeper;

pub fn session_is_playing(session: Res<GameSession>) -> bool {
    session.is_playing()
}

pub fn not_paused(session: Res<GameSession>) -> bool {
    !session.paused
}

/// Hand the final score to the score board, once per finished game.
pub fn record_final_score(mut session: ResMut<GameSession>, keeper: Option<ResMut<ScoreKeeper>>) {
    if !session.needs_score_recording() {
        return;
    }
    session.score_recorded = true;
    let Some(mut keeper) = keeper else {
        return;
    };
    match keeper.0.append_score(session.score) {
        Ok(()) => info!("recorded final score {}", session.score),
        Err(e) => error!("could not record final score: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::gameconfig::GameConfig;
    use crate::resources::gamesession::SessionStatus;
    use crate::resources::scores::MemoryScoreBoard;

    #[test]
    fn test_final_score_recorded_once() {
        let mut world = World::new();
        let mut session = GameSession::new(&GameConfig::new());
        session.score = 1200;
        world.insert_resource(session);
        world.insert_resource(ScoreKeeper(Box::new(MemoryScoreBoard::new())));

        world.run_system_cached(record_final_score).unwrap();
        assert!(world.resource::<ScoreKeeper>().0.top_scores().unwrap().is_empty());

        world.resource_mut::<GameSession>().status = SessionStatus::GameOver;
        world.run_system_cached(record_final_score).unwrap();
        world.run_system_cached(record_final_score).unwrap();
        assert_eq!(world.resource::<ScoreKeeper>().0.top_scores().unwrap(), vec![1200]);
        assert!(world.resource::<GameSession>().score_recorded);
    }
}
