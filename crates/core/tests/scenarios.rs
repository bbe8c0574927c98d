use chase_core::movement::{self, MoveOutcome};
use chase_core::tiles::codes;
use chase_core::{
    Agent, AgentKind, BehaviorState, DefeatCause, Direction, Game, HeldItem, Heuristic, ItemKey,
    LogEvent, Pos, RunOutcome, Screen, TickInput, TickStatus, TileGrid, Tuning, capture_check,
    find_path,
};

fn right() -> TickInput {
    TickInput { move_x: 1, ..TickInput::default() }
}

#[test]
fn open_grid_corner_route_has_manhattan_length() {
    let grid = TileGrid::new(5, 5);
    let route = find_path(&grid, Pos { y: 0, x: 0 }, Pos { y: 4, x: 4 }, Heuristic::Euclidean, 100);
    assert_eq!(route.len(), 8);
    assert_eq!(route.last(), Some(Pos { y: 4, x: 4 }));
}

#[test]
fn moving_left_into_obstacle_leaves_position_unchanged() {
    let mut grid = TileGrid::new(5, 5);
    grid.set_tile(2, 1, 150).expect("in range");
    let mut enemy = Agent::new(AgentKind::Enemy, Pos { y: 2, x: 2 }, 2);
    let outcome = movement::try_move(&mut enemy, Direction::Left, &grid, 8);
    assert_eq!(outcome, MoveOutcome::Blocked);
    assert_eq!(enemy.pos, Pos { y: 2, x: 2 });
    assert_eq!(enemy.offset.x, 0);
}

#[test]
fn walking_into_the_enemy_requests_jumpscare_once() {
    let mut grid = TileGrid::new(12, 12);
    grid.set_tile(10, 9, codes::PLAYER_SPAWN).expect("in range");
    grid.set_tile(10, 10, codes::ENEMY_SPAWN).expect("in range");
    grid.set_tile(0, 0, codes::PET_SPAWN).expect("in range");
    let mut game = Game::new(10, grid, Tuning::default()).expect("init");

    let mut status = TickStatus::Running;
    for _ in 0..10 {
        status = game.tick(&right());
    }

    assert_eq!(status, TickStatus::Finished(RunOutcome::Defeat(DefeatCause::Caught)));
    assert!(capture_check(game.state().enemy().pos, game.state().player().pos));
    let jumpscares = game
        .log()
        .iter()
        .filter(|event| **event == LogEvent::ScreenRequested(Screen::Jumpscare))
        .count();
    assert_eq!(jumpscares, 1);
    assert_eq!(Screen::Jumpscare.name(), "JumpscareState");
}

#[test]
fn last_life_lost_on_spikes_is_observable() {
    let grid = TileGrid::from_csv("200,20,0,0,0,0,0,0,0,0,0,0,0,0,300\n").expect("grid");
    let mut game = Game::new(3, grid, Tuning::default()).expect("init");
    assert_eq!(game.state().inventory.count(ItemKey::Lives), 1);

    let mut status = TickStatus::Running;
    for _ in 0..4 {
        status = game.tick(&right());
    }

    assert_eq!(game.state().inventory.count(ItemKey::Lives), 0);
    assert_eq!(status, TickStatus::Finished(RunOutcome::Defeat(DefeatCause::OutOfLives)));
    assert!(game.log().contains(&LogEvent::LivesChanged { lives: 0 }));
    assert!(game.log().contains(&LogEvent::ScreenRequested(Screen::LoseWin)));
}

#[test]
fn cereal_dropped_in_the_enemy_path_stuns_it() {
    let grid =
        TileGrid::from_csv("100,100,100,100,100,100\n100,200,4,0,300,100\n100,100,100,100,100,100\n")
            .expect("grid");
    let mut tuning = Tuning::default();
    tuning.capture_radius = 0.0;
    let mut game = Game::new(8, grid, tuning).expect("init");
    let left = TickInput { move_x: -1, ..TickInput::default() };

    for _ in 0..4 {
        game.tick(&right());
    }
    assert_eq!(game.state().held, Some(HeldItem::Cereal));
    game.tick(&TickInput { drop_cereal: true, ..TickInput::default() });
    assert_eq!(game.state().grid.get_tile(1, 2), Ok(codes::CEREAL_DROPPED));
    for _ in 0..4 {
        game.tick(&left);
    }
    assert_eq!(game.state().player().pos, Pos { y: 1, x: 1 });

    game.tick(&TickInput { whistle: true, ..TickInput::default() });
    assert_eq!(game.state().brain.state, BehaviorState::Hunting);
    for _ in 0..8 {
        game.tick(&TickInput::default());
    }

    assert_eq!(game.state().brain.state, BehaviorState::Stunned);
    assert_eq!(game.state().enemy().pos, Pos { y: 1, x: 2 });
    assert_eq!(game.state().grid.get_tile(1, 2), Ok(codes::EMPTY));
    assert_eq!(game.outcome(), None);
}
