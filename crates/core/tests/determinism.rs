use chase_core::journal::InputJournal;
use chase_core::replay::replay_to_end;
use chase_core::{DEFAULT_LEVEL, Game, LogEvent, TickInput, TickStatus, TileGrid, Tuning};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

fn random_input(rng: &mut ChaCha8Rng) -> TickInput {
    let roll = rng.next_u64() % 100;
    let axis = (rng.next_u64() % 3) as i8 - 1;
    TickInput {
        move_x: if roll < 50 { axis } else { 0 },
        move_y: if roll >= 50 { axis } else { 0 },
        whistle: roll == 7,
        drop_flare: roll == 11,
        drop_cereal: roll == 13,
    }
}

fn recorded_journal(seed: u64, input_seed: u64, ticks: usize) -> InputJournal {
    let grid = TileGrid::from_csv(DEFAULT_LEVEL).expect("built-in level parses");
    let mut game = Game::new(seed, grid.clone(), Tuning::default()).expect("init");
    let mut journal = InputJournal::new(seed, &grid);
    let mut rng = ChaCha8Rng::seed_from_u64(input_seed);
    for _ in 0..ticks {
        let input = random_input(&mut rng);
        journal.append_tick(input);
        if let TickStatus::Finished(_) = game.tick(&input) {
            break;
        }
    }
    journal
}

#[test]
fn test_determinism_identical_seeds_produce_same_hash() {
    let grid = TileGrid::from_csv(DEFAULT_LEVEL).expect("built-in level parses");
    let journal1 = recorded_journal(12345, 9, 900);
    let journal2 = recorded_journal(12345, 9, 900);

    let result1 = replay_to_end(&grid, &Tuning::default(), &journal1).expect("Replay 1 failed");
    let result2 = replay_to_end(&grid, &Tuning::default(), &journal2).expect("Replay 2 failed");

    assert_eq!(
        result1.final_snapshot_hash, result2.final_snapshot_hash,
        "Identical runs must produce identical hashes"
    );
    assert_eq!(result1.final_tick, result2.final_tick);
}

#[test]
fn test_determinism_different_seeds_produce_different_hashes() {
    let grid = TileGrid::from_csv(DEFAULT_LEVEL).expect("built-in level parses");
    let journal1 = recorded_journal(123, 9, 300);
    let journal2 = recorded_journal(456, 9, 300);

    let result1 = replay_to_end(&grid, &Tuning::default(), &journal1).expect("Replay 1 failed");
    let result2 = replay_to_end(&grid, &Tuning::default(), &journal2).expect("Replay 2 failed");

    assert_ne!(result1.final_snapshot_hash, result2.final_snapshot_hash);
}

#[test]
fn test_deterministic_smoke_fixed_seed_stable_event_sequence() {
    fn run_trace(seed: u64) -> Vec<LogEvent> {
        let grid = TileGrid::from_csv(DEFAULT_LEVEL).expect("built-in level parses");
        let mut game = Game::new(seed, grid, Tuning::default()).expect("init");
        let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0x5eed);
        let mut trace = Vec::new();
        while game.current_tick() < 600 {
            let status = game.tick(&random_input(&mut rng));
            trace.extend(game.drain_events());
            if status != TickStatus::Running {
                break;
            }
        }
        trace
    }

    let first = run_trace(4242);
    assert_eq!(first, run_trace(4242));
    assert!(!first.is_empty());
}
