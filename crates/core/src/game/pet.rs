//! Pet companion movement.
//! The pet sits still until the whistle calls it, then paths back to the player.

use super::*;

impl Game {
    pub(super) fn step_pet(&mut self) {
        if !self.state.pet_called {
            return;
        }
        let player = self.state.player().pos;
        let pet_id = self.state.pet_id;
        if distance_between(self.state.pet().pos, player) <= self.tuning.pet_follow_distance {
            self.state.pet_called = false;
            return;
        }
        let route = self.route_to(pet_id, player, Heuristic::Euclidean);
        if self.follow_route(pet_id, &route).is_none() {
            log::debug!("pet has no route to {player:?}; waiting");
        }
    }
}
