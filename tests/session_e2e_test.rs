//! Session end-to-end tests - scripted JSON lines in, JSON lines out

use match3::adapter::{Session, SessionConfig};
use match3::core::Board;
use match3::engine::{Game, GameConfig, RuleSet};
use match3::types::TileKind::{self, Blue as B, Green as G, Red as R, Yellow as Y};

fn session(rows: Vec<Vec<TileKind>>, rules: RuleSet, refill_step_ms: u32) -> Session {
    let rows = rows
        .into_iter()
        .map(|row| row.into_iter().map(Some).collect())
        .collect();
    let config = SessionConfig {
        game: GameConfig {
            rules,
            kinds: 4,
            moves: 3,
            ..GameConfig::default()
        },
        refill_step_ms,
        ..SessionConfig::default()
    };
    let game = Game::from_board(Board::from_rows(rows).unwrap(), config.game, 9);
    Session::with_game(game, config)
}

async fn run_script(session: &mut Session, script: &str) -> Vec<serde_json::Value> {
    let mut out: Vec<u8> = Vec::new();
    session.run(script.as_bytes(), &mut out).await.unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[tokio::test(start_paused = true)]
async fn session_guarded_commit_waits_then_refills() {
    let mut s = session(
        vec![
            vec![G, R, R, R],
            vec![R, B, Y, G],
            vec![B, Y, G, B],
        ],
        RuleSet::guarded(),
        30,
    );

    let start = tokio::time::Instant::now();
    let msgs = run_script(
        &mut s,
        "{\"type\":\"select\",\"seq\":1,\"x\":0,\"y\":1}\n\
         {\"type\":\"select\",\"seq\":2,\"x\":0,\"y\":0}\n\
         {\"type\":\"snapshot\",\"seq\":3}\n",
    )
    .await;

    // The provisional wait and at least one refill step elapsed on the paused clock
    assert!(start.elapsed() >= std::time::Duration::from_millis(200));

    assert_eq!(msgs.first().unwrap()["type"], "welcome");
    assert_eq!(msgs.first().unwrap()["rules"], "guarded");
    assert_eq!(msgs.last().unwrap()["type"], "bye");

    let pending = msgs
        .iter()
        .find(|m| m["outcome"] == "swap_pending")
        .expect("expected a pending swap");
    assert_eq!(pending["command_seq"], 2);
    assert_eq!(pending["pending"]["will_commit"], true);

    let resolved = msgs.iter().find(|m| m["type"] == "resolved").unwrap();
    assert_eq!(resolved["result"], "committed");
    assert_eq!(resolved["cleared"].as_array().unwrap().len(), 4);

    let refill = msgs.iter().find(|m| m["type"] == "refill").unwrap();
    assert!(refill["ticks"].as_u64().unwrap() >= 1);

    let snapshot = msgs.iter().find(|m| m["type"] == "snapshot").unwrap();
    assert_eq!(snapshot["moves_left"], 2);
    assert_eq!(snapshot["shifting"], false);

    // Outbound sequence numbers are strictly increasing
    let seqs: Vec<u64> = msgs.iter().map(|m| m["seq"].as_u64().unwrap()).collect();
    assert!(seqs.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test(start_paused = true)]
async fn session_reports_errors_and_keeps_going() {
    let mut s = session(vec![vec![R, G, B]], RuleSet::guarded(), 0);
    let msgs = run_script(
        &mut s,
        "not json\n\
         {\"type\":\"jump\",\"seq\":4}\n\
         {\"type\":\"select\",\"seq\":5,\"x\":9,\"y\":9}\n",
    )
    .await;

    let errors: Vec<_> = msgs.iter().filter(|m| m["type"] == "error").collect();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["code"], "invalid_command");
    assert_eq!(errors[1]["code"], "unknown_type");
    assert_eq!(errors[1]["command_seq"], 4);

    let ignored = msgs.iter().find(|m| m["type"] == "outcome").unwrap();
    assert_eq!(ignored["outcome"], "ignored");
    assert_eq!(ignored["reason"], "out_of_bounds");

    let bye = msgs.last().unwrap();
    assert_eq!(bye["commands"], 1);
    assert_eq!(bye["errors"], 2);
}

#[tokio::test(start_paused = true)]
async fn session_unconditional_game_runs_out_of_moves() {
    let mut s = session(vec![vec![R, G, B, Y]], RuleSet::unconditional(), 0);
    let msgs = run_script(
        &mut s,
        "{\"type\":\"select\",\"x\":0,\"y\":0}\n{\"type\":\"select\",\"x\":1,\"y\":0}\n\
         {\"type\":\"select\",\"x\":2,\"y\":0}\n{\"type\":\"select\",\"x\":3,\"y\":0}\n\
         {\"type\":\"select\",\"x\":0,\"y\":0}\n{\"type\":\"select\",\"x\":1,\"y\":0}\n\
         {\"type\":\"select\",\"x\":2,\"y\":0}\n",
    )
    .await;

    let last_outcome = msgs.iter().rev().find(|m| m["type"] == "outcome").unwrap();
    assert_eq!(last_outcome["reason"], "out_of_moves");

    let bye = msgs.last().unwrap();
    assert_eq!(bye["moves_left"], 0);
    assert_eq!(bye["game_over"], true);
}
