use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};
use slotmap::SlotMap;

use crate::content::{Tuning, TuningError};
use crate::movement::{self, MoveOutcome};
use crate::pathfinding::{find_path, straight_run};
use crate::state::{Agent, EnemyBrain, GameState, Inventory, ItemCounter, TileGrid};
use crate::tiles::{SpawnMarker, codes};
use crate::types::*;

mod behavior;
mod hash;
mod interactions;
mod pet;
mod player;
#[cfg(test)]
mod test_support;

pub use interactions::{capture_check, distance_between};

/// Events kept in [`Game::log`]. Once the log grows past twice this, the oldest are dropped.
const LOG_HISTORY: usize = 4096;

pub struct Game {
    seed: u64,
    tick: u64,
    rng: ChaCha8Rng,
    tuning: Tuning,
    state: GameState,
    log: Vec<LogEvent>,
    drained: usize,
    outcome: Option<RunOutcome>,
}

impl Game {
    /// Builds a run from a level grid. Spawn markers are read and erased; a
    /// level without a pet marker starts the pet on the player's cell.
    pub fn new(seed: u64, mut grid: TileGrid, tuning: Tuning) -> Result<Self, InitError> {
        tuning.validate().map_err(|err| match err {
            TuningError::Invalid(reason) => InitError::InvalidTuning(reason),
            TuningError::Parse(_) => InitError::InvalidTuning("tuning failed to parse"),
        })?;
        let player_spawn = take_spawn(&mut grid, SpawnMarker::Player)?;
        let enemy_spawn = take_spawn(&mut grid, SpawnMarker::Enemy)?;
        let pet_spawn = match take_spawn(&mut grid, SpawnMarker::Pet) {
            Ok(pos) => pos,
            Err(InitError::MissingSpawn { .. }) => player_spawn,
            Err(err) => return Err(err),
        };

        let mut agents = SlotMap::with_key();
        let player_id = insert_agent(
            &mut agents,
            Agent::new(AgentKind::Player, player_spawn, tuning.player_speed),
        );
        let pet_id =
            insert_agent(&mut agents, Agent::new(AgentKind::Pet, pet_spawn, tuning.pet_speed));
        let enemy_id = insert_agent(
            &mut agents,
            Agent::new(AgentKind::Enemy, enemy_spawn, tuning.enemy_speed),
        );

        let inventory = Inventory::new(
            ItemCounter::new(tuning.start_lives, tuning.max_lives),
            ItemCounter::new(0, tuning.item_capacity),
            ItemCounter::new(tuning.whistle_charges, tuning.whistle_charges),
        );

        log::info!(
            "run {seed} starting on {}x{} map, player at {player_spawn:?}, enemy at {enemy_spawn:?}",
            grid.width(),
            grid.height()
        );

        Ok(Self {
            seed,
            tick: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            tuning,
            state: GameState {
                grid,
                agents,
                player_id,
                pet_id,
                enemy_id,
                brain: EnemyBrain::new(player_spawn),
                inventory,
                held: None,
                pet_called: false,
            },
            log: vec![LogEvent::PlaySound(sounds::BGM)],
            drained: 0,
            outcome: None,
        })
    }

    /// Runs one simulation step: player, then enemy, then pet, then outcome checks.
    pub fn tick(&mut self, input: &TickInput) -> TickStatus {
        if let Some(outcome) = self.outcome {
            return TickStatus::Finished(outcome);
        }
        self.tick += 1;

        let whistle = self.step_player(input);
        if self.outcome.is_none() {
            self.step_enemy(whistle);
        }
        if self.outcome.is_none() {
            self.step_pet();
        }
        self.evaluate_outcome();
        self.trim_log();

        match self.outcome {
            Some(outcome) => TickStatus::Finished(outcome),
            None => TickStatus::Running,
        }
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    /// Recent event history, bounded by [`LOG_HISTORY`].
    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    /// Events recorded since the previous drain. Callers that drain every tick see every event.
    pub fn drain_events(&mut self) -> Vec<LogEvent> {
        let fresh = self.log[self.drained..].to_vec();
        self.drained = self.log.len();
        fresh
    }

    fn trim_log(&mut self) {
        if self.log.len() <= 2 * LOG_HISTORY {
            return;
        }
        let excess = self.log.len() - LOG_HISTORY;
        self.log.drain(..excess);
        self.drained = self.drained.saturating_sub(excess);
    }

    fn evaluate_outcome(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        if self.state.inventory.count(ItemKey::Lives) <= 0 {
            log::info!("run {} lost at tick {}: out of lives", self.seed, self.tick);
            self.log.push(LogEvent::StopSound(sounds::BGM));
            self.log.push(LogEvent::ScreenRequested(Screen::LoseWin));
            self.outcome = Some(RunOutcome::Defeat(DefeatCause::OutOfLives));
        }
    }

    fn finish(&mut self, outcome: RunOutcome) {
        if self.outcome.is_none() {
            log::info!("run {} finished at tick {}: {outcome:?}", self.seed, self.tick);
            self.outcome = Some(outcome);
        }
    }

    /// Walks `id` one micro-step along its leading straight run of `route`,
    /// realigning on the other axis first when the run turns.
    fn follow_route(&mut self, id: AgentId, route: &Route) -> Option<(Pos, MoveOutcome)> {
        let steps = self.tuning.steps_per_tile;
        let grid = &self.state.grid;
        let agent = &mut self.state.agents[id];
        let (direction, destination) = straight_run(agent.pos, route)?;
        let heading = movement::realign_direction(agent, direction.axis().other())
            .unwrap_or(direction);
        Some((destination, movement::try_move(agent, heading, grid, steps)))
    }

    fn route_to(&self, id: AgentId, goal: Pos, heuristic: Heuristic) -> Route {
        let from = self.state.agents[id].pos;
        find_path(&self.state.grid, from, goal, heuristic, self.tuning.path_budget)
    }

    /// One-in-`odds` roll from the run's RNG.
    fn roll(&mut self, odds: u32) -> bool {
        self.rng.next_u64() % u64::from(odds.max(1)) == 0
    }

    fn set_tile(&mut self, pos: Pos, code: i32) {
        if let Err(err) = self.state.grid.set_tile(pos.y, pos.x, code) {
            log::warn!("ignoring tile write: {err}");
        }
    }

    fn tile_code(&self, pos: Pos) -> i32 {
        self.state.grid.get_tile(pos.y, pos.x).unwrap_or(codes::OBSTACLE_MIN)
    }
}

fn take_spawn(grid: &mut TileGrid, marker: SpawnMarker) -> Result<Pos, InitError> {
    let code = marker.code();
    let pos =
        grid.find_first_tile_with_value(code).ok_or(InitError::MissingSpawn { marker: code })?;
    grid.set_tile(pos.y, pos.x, codes::EMPTY)?;
    Ok(pos)
}

fn insert_agent(agents: &mut SlotMap<AgentId, Agent>, agent: Agent) -> AgentId {
    let id = agents.insert(agent);
    agents[id].id = id;
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::DEFAULT_LEVEL;
    use crate::game::test_support::open_arena_game;

    #[test]
    fn spawn_markers_are_consumed_at_init() {
        let grid = TileGrid::from_csv(DEFAULT_LEVEL).expect("level parses");
        let game = Game::new(1, grid, Tuning::default()).expect("level has spawns");
        let state = game.state();
        for code in [codes::PLAYER_SPAWN, codes::PET_SPAWN, codes::ENEMY_SPAWN] {
            assert_eq!(state.grid.find_first_tile_with_value(code), None);
        }
        assert_eq!(state.player().pos, Pos { y: 1, x: 1 });
        assert_eq!(state.pet().pos, Pos { y: 1, x: 2 });
        assert_eq!(state.enemy().pos, Pos { y: 10, x: 14 });
        assert_eq!(state.brain.state, BehaviorState::Idle);
        assert_eq!(state.inventory.count(ItemKey::Lives), 1);
        assert_eq!(state.inventory.count(ItemKey::Whistle), 2);
    }

    #[test]
    fn missing_player_or_enemy_spawn_fails_init() {
        let no_player = TileGrid::from_csv("0,0,300\n").expect("grid");
        assert_eq!(
            Game::new(1, no_player, Tuning::default()).err(),
            Some(InitError::MissingSpawn { marker: codes::PLAYER_SPAWN })
        );
        let no_enemy = TileGrid::from_csv("200,0,0\n").expect("grid");
        assert_eq!(
            Game::new(1, no_enemy, Tuning::default()).err(),
            Some(InitError::MissingSpawn { marker: codes::ENEMY_SPAWN })
        );
    }

    #[test]
    fn out_of_range_tuning_fails_init() {
        let grid = TileGrid::from_csv("200,0,300\n").expect("grid");
        let tuning = Tuning { player_speed: -3, ..Tuning::default() };
        assert_eq!(
            Game::new(1, grid.clone(), tuning).err(),
            Some(InitError::InvalidTuning("speeds must be within 1..=steps_per_tile"))
        );
        let tuning = Tuning { ambient_sound_odds: 0, ..Tuning::default() };
        assert!(matches!(Game::new(1, grid, tuning), Err(InitError::InvalidTuning(_))));
    }

    #[test]
    fn pet_defaults_to_player_spawn() {
        let grid = TileGrid::from_csv("200,0,0,0,0,0,0,0,0,0,0,300\n").expect("grid");
        let game = Game::new(1, grid, Tuning::default()).expect("init");
        assert_eq!(game.state().pet().pos, game.state().player().pos);
    }

    #[test]
    fn drain_returns_only_fresh_events() {
        let grid = TileGrid::from_csv(DEFAULT_LEVEL).expect("level parses");
        let mut game = Game::new(3, grid, Tuning::default()).expect("init");
        assert_eq!(game.drain_events(), vec![LogEvent::PlaySound(sounds::BGM)]);
        assert!(game.drain_events().is_empty());
        game.tick(&TickInput { whistle: true, ..TickInput::default() });
        let fresh = game.drain_events();
        assert!(fresh.contains(&LogEvent::WhistleBlown { remaining: 1 }));
        assert!(game.log().len() > fresh.len());
    }

    #[test]
    fn event_log_keeps_recent_history_only() {
        let mut game = open_arena_game(3, Pos { y: 1, x: 1 }, Pos { y: 9, x: 9 });
        let filler = LogEvent::PlaySound(sounds::ENEMY_ATTACK);
        game.log.extend(vec![filler.clone(); 3 * LOG_HISTORY]);
        assert_eq!(game.drain_events().len(), 3 * LOG_HISTORY + 1);

        game.tick(&TickInput { whistle: true, ..TickInput::default() });

        assert!(game.log().len() <= 2 * LOG_HISTORY);
        let fresh = game.drain_events();
        assert!(fresh.contains(&LogEvent::WhistleBlown { remaining: 1 }));
        assert!(!fresh.contains(&filler));
    }

    #[test]
    fn finished_run_stops_advancing() {
        let grid = TileGrid::from_csv("200,99,0,0,0,0,0,0,0,0,0,0,300\n").expect("grid");
        let mut game = Game::new(5, grid, Tuning::default()).expect("init");
        let right = TickInput { move_x: 1, ..TickInput::default() };
        let mut status = TickStatus::Running;
        for _ in 0..8 {
            status = game.tick(&right);
        }
        assert_eq!(status, TickStatus::Finished(RunOutcome::Victory));
        let tick = game.current_tick();
        assert_eq!(game.tick(&right), TickStatus::Finished(RunOutcome::Victory));
        assert_eq!(game.current_tick(), tick);
    }
}
