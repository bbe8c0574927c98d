//! Proximity rules between agents.
//! This module exists so capture checks share one distance definition.
//! It does not own tile pickups; the player module applies those.

use super::*;

/// Half a cell on each axis. Positions are whole indices, so this means "same cell".
const CAPTURE_TOLERANCE: f32 = 0.5;

/// Euclidean distance between cell indices; sub-tile offsets are ignored.
pub fn distance_between(a: Pos, b: Pos) -> f32 {
    let dx = (a.x - b.x) as f32;
    let dy = (a.y - b.y) as f32;
    (dx * dx + dy * dy).sqrt()
}

pub fn capture_check(enemy: Pos, player: Pos) -> bool {
    ((enemy.x - player.x) as f32).abs() <= CAPTURE_TOLERANCE
        && ((enemy.y - player.y) as f32).abs() <= CAPTURE_TOLERANCE
}

pub(super) fn pet_capture_check(enemy: Pos, pet: Pos) -> bool {
    capture_check(enemy, pet)
}

impl Game {
    pub(super) fn enemy_proximity_checks(&mut self) {
        let enemy = self.state.enemy().pos;
        if capture_check(enemy, self.state.player().pos) {
            self.capture_player();
        } else if pet_capture_check(enemy, self.state.pet().pos) {
            self.capture_pet();
        }
    }

    fn capture_player(&mut self) {
        log::info!("player caught at {:?} on tick {}", self.state.player().pos, self.tick);
        self.log.push(LogEvent::PlayerCaptured);
        self.log.push(LogEvent::InputReset);
        self.log.push(LogEvent::PlaySound(sounds::JUMPSCARE));
        self.log.push(LogEvent::ScreenRequested(Screen::Jumpscare));
        self.finish(RunOutcome::Defeat(DefeatCause::Caught));
    }

    fn capture_pet(&mut self) {
        let lives = self.state.inventory.adjust(ItemKey::Lives, -1);
        log::info!("pet caught on tick {}, {lives} lives left", self.tick);
        self.log.push(LogEvent::PetCaptured);
        self.log.push(LogEvent::LivesChanged { lives });
        self.log.push(LogEvent::PlaySound(sounds::DEATH));
        self.transition(BehaviorState::Idle);

        let pet_id = self.state.pet_id;
        let pet = &mut self.state.agents[pet_id];
        pet.pos = pet.spawn;
        pet.offset = Offset::default();
        pet.heading = None;
        self.state.pet_called = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    #[test]
    fn capture_is_same_cell_only() {
        let cell = Pos { y: 10, x: 10 };
        assert!(capture_check(cell, cell));
        assert!(!capture_check(cell, Pos { y: 10, x: 11 }));
        assert!(!capture_check(cell, Pos { y: 9, x: 10 }));
        assert_eq!(distance_between(Pos { y: 0, x: 0 }, Pos { y: 3, x: 4 }), 5.0);
    }

    #[test]
    fn shared_cell_requests_jumpscare_exactly_once() {
        let mut game = open_arena_game(1, Pos { y: 10, x: 10 }, Pos { y: 1, x: 1 });
        let enemy_id = game.state.enemy_id;
        game.state.agents[enemy_id].pos = Pos { y: 10, x: 10 };

        let status = game.tick(&TickInput::default());
        assert_eq!(status, TickStatus::Finished(RunOutcome::Defeat(DefeatCause::Caught)));
        game.tick(&TickInput::default());

        let requests = game
            .log()
            .iter()
            .filter(|event| **event == LogEvent::ScreenRequested(Screen::Jumpscare))
            .count();
        assert_eq!(requests, 1);
        assert!(game.log().contains(&LogEvent::InputReset));
        assert!(game.log().contains(&LogEvent::PlaySound(sounds::JUMPSCARE)));
    }

    #[test]
    fn pet_capture_costs_a_life_and_resets_enemy() {
        let mut game = open_arena_game(1, Pos { y: 1, x: 1 }, Pos { y: 9, x: 9 });
        game.state.inventory.adjust(ItemKey::Lives, 1);
        let pet_id = game.state.pet_id;
        game.state.agents[pet_id].pos = Pos { y: 9, x: 9 };
        game.transition(BehaviorState::Chase);

        game.enemy_proximity_checks();

        assert_eq!(game.state.inventory.count(ItemKey::Lives), 1);
        assert_eq!(game.state.brain.state, BehaviorState::Idle);
        assert_eq!(game.state.pet().pos, game.state.pet().spawn);
        assert!(game.log().contains(&LogEvent::PlaySound(sounds::DEATH)));
        assert_eq!(game.outcome(), None);
    }

    #[test]
    fn last_life_lost_to_pet_capture_ends_the_run() {
        let mut game = open_arena_game(1, Pos { y: 1, x: 1 }, Pos { y: 9, x: 9 });
        let pet_id = game.state.pet_id;
        game.state.agents[pet_id].pos = Pos { y: 9, x: 9 };
        game.state.agents[pet_id].spawn = Pos { y: 5, x: 5 };

        let status = game.tick(&TickInput::default());

        assert_eq!(status, TickStatus::Finished(RunOutcome::Defeat(DefeatCause::OutOfLives)));
        assert!(game.log().contains(&LogEvent::ScreenRequested(Screen::LoseWin)));
    }
}
