//! Screen flow
//!
//! The presentation layer moves between screens only through
//! `Screen::transition`; anything not in the table is rejected.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::BossKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// Title with drifting fog
    #[default]
    Start,
    Intro,
    BossSelect,
    Playing,
    BossCleared,
    Death,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenEvent {
    Confirm,
    Back,
    ChooseBoss(BossKind),
    BossDefeated,
    PlayerDied,
    /// Retry the fight from the death screen
    Restart,
    /// Back to the title; quits the game from the title itself
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no transition from {from:?} on {event:?}")]
pub struct TransitionError {
    pub from: Screen,
    pub event: ScreenEvent,
}

impl Screen {
    pub fn transition(self, event: ScreenEvent) -> Result<Screen, TransitionError> {
        use Screen::*;
        use ScreenEvent as E;

        let next = match (self, event) {
            (Start, E::Confirm) => Intro,
            (Start, E::Quit) => Start,

            (Intro, E::Confirm) => BossSelect,
            (Intro, E::Back) => Start,

            (BossSelect, E::ChooseBoss(_)) => Playing,
            (BossSelect, E::Back) => Intro,

            (Playing, E::BossDefeated) => BossCleared,
            (Playing, E::PlayerDied) => Death,
            (Playing, E::Quit) => Start,

            (BossCleared, E::Confirm) => BossSelect,
            (BossCleared, E::Quit) => Start,

            (Death, E::Restart) => Playing,
            (Death, E::Back) => BossSelect,
            (Death, E::Quit) => Start,

            (from, event) => return Err(TransitionError { from, event }),
        };
        Ok(next)
    }

    /// Screens where the arena keeps simulating
    pub fn runs_arena(self) -> bool {
        matches!(self, Screen::Playing | Screen::Death)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut screen = Screen::default();
        for event in [
            ScreenEvent::Confirm,
            ScreenEvent::Confirm,
            ScreenEvent::ChooseBoss(BossKind::Pumpking),
            ScreenEvent::BossDefeated,
            ScreenEvent::Confirm,
        ] {
            screen = screen.transition(event).unwrap();
        }
        assert_eq!(screen, Screen::BossSelect);
    }

    #[test]
    fn test_death_and_retry() {
        let screen = Screen::Playing.transition(ScreenEvent::PlayerDied).unwrap();
        assert_eq!(screen, Screen::Death);
        assert!(screen.runs_arena());
        assert_eq!(screen.transition(ScreenEvent::Restart), Ok(Screen::Playing));
        assert_eq!(screen.transition(ScreenEvent::Quit), Ok(Screen::Start));
    }

    #[test]
    fn test_rejects_unknown_transition() {
        let err = Screen::Start.transition(ScreenEvent::BossDefeated).unwrap_err();
        assert_eq!(err.from, Screen::Start);
        assert_eq!(err.event, ScreenEvent::BossDefeated);
        assert_eq!(err.to_string(), "no transition from Start on BossDefeated");

        assert!(Screen::BossCleared.transition(ScreenEvent::PlayerDied).is_err());
        assert!(Screen::Intro.transition(ScreenEvent::ChooseBoss(BossKind::SpecterBride)).is_err());
    }
}
