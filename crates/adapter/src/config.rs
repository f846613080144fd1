//! Session configuration from environment variables and command-line flags

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::engine::{GameConfig, RuleSet, SwapRule};
use crate::types::REFILL_STEP_MS;

/// Everything a session needs to deal and run a game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub game: GameConfig,
    pub seed: u32,
    /// Wait between two refill steps; 0 settles the board without waiting
    pub refill_step_ms: u32,
    /// Emit a snapshot after every select command
    pub echo_snapshots: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            seed: 1,
            refill_step_ms: REFILL_STEP_MS,
            echo_snapshots: false,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup; unset or unparsable values keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::build(&lookup, None)
    }

    /// `rule` replaces `MATCH3_RULES`; row size and delay from the lookup still apply on top
    fn build(lookup: &dyn Fn(&str) -> Option<String>, rule: Option<SwapRule>) -> Self {
        fn parsed<T: std::str::FromStr>(
            lookup: &dyn Fn(&str) -> Option<String>,
            key: &str,
        ) -> Option<T> {
            lookup(key).and_then(|s| s.trim().parse().ok())
        }

        let mut config = Self::default();

        let rule =
            rule.or_else(|| lookup("MATCH3_RULES").and_then(|s| SwapRule::from_str(s.trim())));
        if let Some(rule) = rule {
            config.game.rules = RuleSet::for_rule(rule);
        }
        if let Some(row_size) = parsed::<usize>(lookup, "MATCH3_ROW_SIZE") {
            config.game.rules = config.game.rules.with_row_size(row_size);
        }
        if let Some(ms) = parsed::<u32>(lookup, "MATCH3_SWAP_DELAY_MS") {
            config.game.rules = config.game.rules.with_swap_delay_ms(ms);
        }
        if let Some(width) = parsed::<u8>(lookup, "MATCH3_WIDTH") {
            config.game.width = width;
        }
        if let Some(height) = parsed::<u8>(lookup, "MATCH3_HEIGHT") {
            config.game.height = height;
        }
        if let Some(kinds) = parsed::<u8>(lookup, "MATCH3_KINDS") {
            config.game.kinds = kinds;
        }
        if let Some(moves) = parsed::<u32>(lookup, "MATCH3_MOVES") {
            config.game.moves = moves;
        }
        if let Some(seed) = parsed::<u32>(lookup, "MATCH3_SEED") {
            config.seed = seed;
        }
        if let Some(ms) = parsed::<u32>(lookup, "MATCH3_REFILL_STEP_MS") {
            config.refill_step_ms = ms;
        }
        if let Some(flag) = lookup("MATCH3_ECHO_SNAPSHOTS") {
            let flag = flag.trim();
            config.echo_snapshots = flag == "1" || flag.eq_ignore_ascii_case("true");
        }

        config
    }
}

/// Command-line overrides for the `match3` binary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub seed: Option<u32>,
    pub rules: Option<SwapRule>,
    /// Read commands from this file instead of stdin
    pub script: Option<PathBuf>,
    pub echo_snapshots: bool,
}

impl CliArgs {
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut out = Self::default();
        let mut i = 0usize;
        while i < args.len() {
            match args[i].as_str() {
                "--seed" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("match3: missing value for --seed"))?;
                    out.seed = Some(
                        v.parse::<u32>()
                            .map_err(|_| anyhow!("match3: invalid --seed value: {}", v))?,
                    );
                }
                "--rules" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("match3: missing value for --rules"))?;
                    out.rules = Some(
                        SwapRule::from_str(v)
                            .ok_or_else(|| anyhow!("match3: invalid --rules value: {}", v))?,
                    );
                }
                "--script" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("match3: missing value for --script"))?;
                    out.script = Some(PathBuf::from(v));
                }
                "--snapshots" => out.echo_snapshots = true,
                other => {
                    return Err(anyhow!("match3: unknown argument: {}", other));
                }
            }
            i += 1;
        }
        Ok(out)
    }

    /// Session config from environment variables with these flags on top
    pub fn session_config(&self) -> SessionConfig {
        self.session_config_from(|key| std::env::var(key).ok())
    }

    /// `--rules` picks the preset; `MATCH3_ROW_SIZE` and `MATCH3_SWAP_DELAY_MS`
    /// still adjust it
    pub fn session_config_from<F>(&self, lookup: F) -> SessionConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = SessionConfig::build(&lookup, self.rules);
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.echo_snapshots {
            config.echo_snapshots = true;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = SessionConfig::from_lookup(|_| None);
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.game.rules, RuleSet::guarded());
        assert_eq!(config.refill_step_ms, 30);
    }

    #[test]
    fn test_env_overrides() {
        let config = SessionConfig::from_lookup(lookup_from(&[
            ("MATCH3_RULES", "unconditional"),
            ("MATCH3_WIDTH", "5"),
            ("MATCH3_HEIGHT", " 6 "),
            ("MATCH3_MOVES", "12"),
            ("MATCH3_SEED", "99"),
            ("MATCH3_SWAP_DELAY_MS", "50"),
            ("MATCH3_ECHO_SNAPSHOTS", "true"),
        ]));

        assert_eq!(config.game.rules.swap_rule, SwapRule::Unconditional);
        assert_eq!(config.game.rules.row_size, 2);
        assert_eq!(config.game.rules.swap_delay_ms, 50);
        assert_eq!((config.game.width, config.game.height), (5, 6));
        assert_eq!(config.game.moves, 12);
        assert_eq!(config.seed, 99);
        assert!(config.echo_snapshots);
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let config = SessionConfig::from_lookup(lookup_from(&[
            ("MATCH3_WIDTH", "wide"),
            ("MATCH3_RULES", "sometimes"),
            ("MATCH3_ROW_SIZE", "-1"),
        ]));
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_cli_args() {
        let args: Vec<String> = ["--seed", "7", "--rules", "a", "--script", "moves.jsonl", "--snapshots"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let cli = CliArgs::parse(&args).unwrap();
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.rules, Some(SwapRule::Unconditional));
        assert_eq!(cli.script, Some(PathBuf::from("moves.jsonl")));

        let config = cli.session_config_from(|_| None);
        assert_eq!(config.seed, 7);
        assert_eq!(config.game.rules, RuleSet::unconditional());
        assert!(config.echo_snapshots);
    }

    #[test]
    fn test_cli_rules_keep_env_row_size_and_delay() {
        let args: Vec<String> = ["--rules", "guarded"].iter().map(|s| s.to_string()).collect();
        let cli = CliArgs::parse(&args).unwrap();
        let config = cli.session_config_from(lookup_from(&[
            ("MATCH3_RULES", "unconditional"),
            ("MATCH3_ROW_SIZE", "4"),
            ("MATCH3_SWAP_DELAY_MS", "75"),
            ("MATCH3_SEED", "5"),
        ]));

        assert_eq!(config.game.rules.swap_rule, SwapRule::Guarded);
        assert_eq!(config.game.rules.row_size, 4);
        assert_eq!(config.game.rules.swap_delay_ms, 75);
        assert_eq!(config.seed, 5);
    }

    #[test]
    fn test_cli_rejects_bad_input() {
        let bad = |a: &[&str]| CliArgs::parse(&a.iter().map(|s| s.to_string()).collect::<Vec<_>>());
        assert!(bad(&["--seed"]).is_err());
        assert!(bad(&["--seed", "x"]).is_err());
        assert!(bad(&["--rules", "maybe"]).is_err());
        assert!(bad(&["--fast"]).is_err());
    }
}
