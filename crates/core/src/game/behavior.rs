//! Enemy finite-state machine.
//! This module exists so target selection and state transitions read as one table.
//! It does not own route search or micro-step collision rules.

use super::*;
use crate::tiles::Tile;

impl Game {
    pub(super) fn step_enemy(&mut self, whistle: bool) {
        self.state.brain.counter += 1;
        self.apply_global_overrides(whistle);

        match self.state.brain.state {
            BehaviorState::Idle => self.tick_idle(),
            BehaviorState::Patrol => self.tick_patrol(),
            BehaviorState::Chase => self.tick_chase(),
            BehaviorState::Hunting => self.tick_hunting(),
            BehaviorState::Stunned => self.tick_stunned(),
            BehaviorState::FlareFollow => self.tick_flare_follow(),
        }

        self.enemy_tile_effects();
        self.enemy_proximity_checks();
    }

    /// Moves the FSM to `to`. The counter is zeroed even on re-entry.
    pub(super) fn transition(&mut self, to: BehaviorState) {
        let brain = &mut self.state.brain;
        let from = brain.state;
        brain.state = to;
        brain.counter = 0;
        brain.route = Route::empty();
        brain.destination = None;
        if from != to {
            log::debug!("enemy {from:?} -> {to:?} at tick {}", self.tick);
            self.log.push(LogEvent::StateChanged { from, to });
        }
    }

    fn apply_global_overrides(&mut self, whistle: bool) {
        if self.state.brain.state == BehaviorState::FlareFollow {
            return;
        }
        if let Some(flare) = self.state.grid.find_first_tile_with_value(codes::FLARE_DROPPED) {
            self.transition(BehaviorState::FlareFollow);
            self.state.brain.flare_target = Some(flare);
            return;
        }
        if whistle {
            let player = self.state.player().pos;
            let route = self.route_to(self.state.enemy_id, player, Heuristic::Manhattan);
            self.transition(BehaviorState::Hunting);
            self.state.brain.last_known_player = player;
            self.state.brain.route = route;
        }
    }

    fn tick_idle(&mut self) {
        if self.state.brain.counter > self.tuning.idle_limit {
            self.transition(BehaviorState::Patrol);
            if self.roll(self.tuning.ambient_sound_odds) {
                self.log.push(LogEvent::PlaySound(sounds::ENEMY_GROWL));
            }
        }
    }

    fn tick_patrol(&mut self) {
        if self.roll(self.tuning.ambient_sound_odds) {
            self.log.push(LogEvent::PlaySound(sounds::ENEMY_GROWL_ALT));
        }
        if self.state.brain.counter > self.tuning.patrol_limit {
            self.transition(BehaviorState::Idle);
            return;
        }
        if self.chase_target().is_some() {
            self.transition(BehaviorState::Chase);
            return;
        }
        self.patrol_step();
    }

    /// Random walk: keep the current heading until it is blocked, then pick a
    /// fresh heading uniformly among those a probe move accepts.
    pub(super) fn patrol_step(&mut self) {
        let steps = self.tuning.steps_per_tile;
        let enemy_id = self.state.enemy_id;
        let heading = match self.state.agents[enemy_id].heading {
            Some(heading) => heading,
            None => match self.pick_patrol_heading() {
                Some(heading) => heading,
                None => return,
            },
        };
        let outcome = {
            let grid = &self.state.grid;
            movement::try_move(&mut self.state.agents[enemy_id], heading, grid, steps)
        };
        if outcome == MoveOutcome::Blocked {
            let next = self.pick_patrol_heading();
            self.state.agents[enemy_id].heading = next;
        }
    }

    fn pick_patrol_heading(&mut self) -> Option<Direction> {
        let steps = self.tuning.steps_per_tile;
        let enemy = self.state.enemy();
        let open: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|direction| movement::probe(enemy, *direction, &self.state.grid, steps))
            .collect();
        if open.is_empty() {
            return None;
        }
        let pick = (self.rng.next_u64() % open.len() as u64) as usize;
        Some(open[pick])
    }

    /// The player when in range, otherwise the pet when in range.
    pub(super) fn chase_target(&self) -> Option<Pos> {
        let enemy = self.state.enemy().pos;
        let radius = self.tuning.capture_radius;
        [self.state.player().pos, self.state.pet().pos]
            .into_iter()
            .find(|target| distance_between(enemy, *target) < radius)
    }

    fn tick_chase(&mut self) {
        let Some(target) = self.chase_target() else {
            self.transition(BehaviorState::Patrol);
            return;
        };
        let route = self.route_to(self.state.enemy_id, target, Heuristic::Euclidean);
        self.walk_enemy_route(route, target);
        self.log.push(LogEvent::PlaySound(sounds::ENEMY_ATTACK));
    }

    fn tick_hunting(&mut self) {
        if self.chase_target().is_some() {
            self.transition(BehaviorState::Chase);
            return;
        }
        let goal = self.state.brain.last_known_player;
        if self.state.enemy().pos == goal {
            self.transition(BehaviorState::Patrol);
            return;
        }
        let route = self.route_to(self.state.enemy_id, goal, Heuristic::Euclidean);
        if route.is_empty() {
            let from = self.state.enemy().pos;
            self.log.push(LogEvent::RouteExhausted { from, target: goal });
            self.transition(BehaviorState::Patrol);
            return;
        }
        self.walk_enemy_route(route, goal);
    }

    fn tick_stunned(&mut self) {
        if self.state.brain.counter > self.tuning.stunned_limit {
            self.transition(BehaviorState::Patrol);
            self.log.push(LogEvent::PlaySound(sounds::ENEMY_CRY));
        }
    }

    fn tick_flare_follow(&mut self) {
        if self.state.brain.counter > self.tuning.flare_limit {
            if let Some(flare) = self.state.brain.flare_target.take()
                && self.tile_code(flare) == codes::FLARE_DROPPED
            {
                self.set_tile(flare, codes::EMPTY);
            }
            self.transition(BehaviorState::Patrol);
            return;
        }
        if self.state.brain.flare_target.is_none() {
            self.state.brain.flare_target =
                self.state.grid.find_first_tile_with_value(codes::FLARE_DROPPED);
        }
        let Some(flare) = self.state.brain.flare_target else {
            return;
        };
        if distance_between(self.state.enemy().pos, flare) <= 1.0 {
            if self.tile_code(flare) == codes::FLARE_DROPPED {
                self.set_tile(flare, codes::EMPTY);
            }
            self.state.brain.flare_target = None;
            self.log.push(LogEvent::FlareConsumed { pos: flare });
            return;
        }
        let route = self.route_to(self.state.enemy_id, flare, Heuristic::Euclidean);
        self.walk_enemy_route(route, flare);
    }

    fn walk_enemy_route(&mut self, route: Route, target: Pos) {
        let enemy_id = self.state.enemy_id;
        if route.is_empty() {
            self.log.push(LogEvent::RouteExhausted { from: self.state.enemy().pos, target });
        }
        let step = self.follow_route(enemy_id, &route);
        self.state.brain.destination = step.map(|(destination, _)| destination);
        self.state.brain.route = route;
    }

    fn enemy_tile_effects(&mut self) {
        let pos = self.state.enemy().pos;
        match Tile::from_code(self.tile_code(pos)) {
            Tile::FlareDropped => {
                self.set_tile(pos, codes::EMPTY);
                if self.state.brain.flare_target == Some(pos) {
                    self.state.brain.flare_target = None;
                }
                self.log.push(LogEvent::FlareConsumed { pos });
            }
            Tile::CerealDropped => {
                self.set_tile(pos, codes::EMPTY);
                self.transition(BehaviorState::Stunned);
                self.log.push(LogEvent::EnemyStunned { pos });
                self.log.push(LogEvent::StopSound(sounds::BELL));
                self.log.push(LogEvent::PlaySound(sounds::BELL));
            }
            _ => {}
        }
    }
}
