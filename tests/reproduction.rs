//! Literal scenario 6: take an accepted row's `(difficulty, seed)` and
//! replay it directly through the engine; expect an identical score
//! and board string.

use std::sync::atomic::AtomicBool;

use game_forge::config::{DifficultyConfig, GameConfig, RootConfig};
use game_forge::driver;
use game_forge::game_module::registry;

#[test]
fn replaying_a_recorded_seed_reproduces_the_board() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("boards.csv");

    let mut properties = std::collections::HashMap::new();
    properties.insert("columns".to_string(), "9".to_string());
    properties.insert("rows".to_string(), "9".to_string());
    properties.insert("mines.minimum".to_string(), "10".to_string());
    properties.insert("mines.maximum".to_string(), "10".to_string());
    properties.insert("tags".to_string(), "repro".to_string());

    let difficulty = DifficultyConfig {
        name: "classic".to_string(),
        count: 1,
        properties,
    };

    let config = RootConfig {
        threads: 1,
        games: vec![GameConfig {
            engine_name: "minesweeper".to_string(),
            output: output.to_str().unwrap().to_string(),
            append: false,
            difficulties: vec![difficulty.clone()],
        }],
    };

    driver::run(&config, &AtomicBool::new(true), true);

    let content = std::fs::read_to_string(&output).unwrap();
    let row = content.lines().nth(1).expect("one accepted row");
    let fields: Vec<&str> = row.splitn(8, ',').collect();
    let recorded_seed: u32 = fields[1].parse().unwrap();
    let recorded_score: f64 = fields[2].parse().unwrap();
    let recorded_board_string = fields[7];

    let module = registry::get_module("minesweeper").expect("minesweeper is registered");
    let ctx = module.init(&difficulty);
    let replayed = ctx.process(recorded_seed);

    assert!(replayed.success);
    assert_eq!(replayed.score, recorded_score);
    let payload = replayed.payload.unwrap();
    let replayed_board_string = payload.rsplit(',').next().unwrap();
    assert_eq!(replayed_board_string, recorded_board_string);
}
