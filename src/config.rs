//! The configuration data model (§3) and a hand-rolled loader for the
//! YAML subset described in §6. The format is intentionally narrow —
//! comments and blank lines are ignored, indentation alone defines
//! nesting, and only the keys the engines understand are meaningful.
//! Anything else is retained verbatim as a `"parent.child"` property
//! so an engine can read keys the core format doesn't know about.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

/// One named difficulty bundle: dimensions, mine range, tags, target
/// count, timeout — everything beyond `name`/`count` is stored as a
/// generic string property so engines can read their own keys.
#[derive(Clone, Debug)]
pub struct DifficultyConfig {
    pub name: String,
    pub count: u64,
    pub properties: HashMap<String, String>,
}

impl DifficultyConfig {
    fn new(name: &str) -> Self {
        DifficultyConfig {
            name: name.to_string(),
            count: 0,
            properties: HashMap::new(),
        }
    }

    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.properties
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.properties
            .get(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}

/// One engine's block: where it writes, whether it appends, and the
/// difficulty classes to run, in declared order.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub engine_name: String,
    pub output: String,
    pub append: bool,
    pub difficulties: Vec<DifficultyConfig>,
}

impl GameConfig {
    fn new(engine_name: &str) -> Self {
        GameConfig {
            engine_name: engine_name.to_string(),
            output: "output.csv".to_string(),
            append: false,
            difficulties: Vec::new(),
        }
    }

    fn difficulty_mut(&mut self, name: &str) -> &mut DifficultyConfig {
        if let Some(idx) = self.difficulties.iter().position(|d| d.name == name) {
            &mut self.difficulties[idx]
        } else {
            self.difficulties.push(DifficultyConfig::new(name));
            self.difficulties.last_mut().unwrap()
        }
    }
}

/// The whole configuration file: the worker-thread count and every
/// declared engine block, in declared order.
#[derive(Clone, Debug, Default)]
pub struct RootConfig {
    pub threads: usize,
    pub games: Vec<GameConfig>,
}

impl RootConfig {
    fn game_mut(&mut self, engine_name: &str) -> &mut GameConfig {
        if let Some(idx) = self.games.iter().position(|g| g.engine_name == engine_name) {
            &mut self.games[idx]
        } else {
            self.games.push(GameConfig::new(engine_name));
            self.games.last_mut().unwrap()
        }
    }
}

pub fn load(path: &Path) -> Result<RootConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    parse(&text).with_context(|| format!("failed to parse config file at {}", path.display()))
}

/// One non-blank, non-comment source line: its indentation (leading
/// space count) and its trimmed `key`/`value` content.
struct Line<'a> {
    indent: usize,
    key: &'a str,
    value: &'a str,
}

fn scan_line(raw: &str) -> Result<Option<Line<'_>>> {
    let indent = raw.len() - raw.trim_start_matches(' ').len();
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let Some((key, value)) = trimmed.split_once(':') else {
        bail!("malformed line (expected \"key: value\" or \"key:\"): {trimmed:?}");
    };

    let key = key.trim();
    let mut value = value.trim();
    if value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
    {
        value = &value[1..value.len() - 1];
    }

    Ok(Some(Line { indent, key, value }))
}

fn parse(text: &str) -> Result<RootConfig> {
    let mut root = RootConfig {
        threads: 1,
        games: Vec::new(),
    };

    // A stack of (indent, key) pairs tracking the open block path, so
    // a leaf line's full path is the stack plus its own key.
    let mut stack: Vec<(usize, String)> = Vec::new();

    for raw in text.lines() {
        let Some(line) = scan_line(raw)? else {
            continue;
        };

        while let Some(&(top_indent, _)) = stack.last() {
            if top_indent >= line.indent {
                stack.pop();
            } else {
                break;
            }
        }

        if line.value.is_empty() {
            stack.push((line.indent, line.key.to_string()));
            continue;
        }

        let mut path: Vec<&str> = stack.iter().map(|(_, k)| k.as_str()).collect();
        path.push(line.key);
        apply_leaf(&mut root, &path, line.value)?;
    }

    Ok(root)
}

/// Interprets one fully-qualified `path -> value` leaf against the
/// known §6 schema, falling back to a generic `"parent.child"`
/// property on the owning difficulty for anything unrecognized.
fn apply_leaf(root: &mut RootConfig, path: &[&str], value: &str) -> Result<()> {
    match path {
        ["config", "threads"] => {
            root.threads = value
                .parse()
                .with_context(|| format!("config.threads is not an integer: {value:?}"))?;
        }
        ["game", engine, "output"] => {
            root.game_mut(engine).output = value.to_string();
        }
        ["game", engine, "append"] => {
            root.game_mut(engine).append = value.eq_ignore_ascii_case("true");
        }
        ["game", engine, "puzzles", diff, "count"] => {
            root.game_mut(engine).difficulty_mut(diff).count = value
                .parse()
                .with_context(|| format!("puzzle count is not an integer: {value:?}"))?;
        }
        ["game", engine, "puzzles", diff, "size", "columns"] => {
            set_property(root, engine, diff, "columns", value);
        }
        ["game", engine, "puzzles", diff, "size", "rows"] => {
            set_property(root, engine, diff, "rows", value);
        }
        ["game", engine, "puzzles", diff, "mines", "minimum"] => {
            set_property(root, engine, diff, "mines.minimum", value);
        }
        ["game", engine, "puzzles", diff, "mines", "maximum"] => {
            set_property(root, engine, diff, "mines.maximum", value);
        }
        ["game", engine, "puzzles", diff, "tags"] => {
            set_property(root, engine, diff, "tags", value);
        }
        ["game", engine, "puzzles", diff, "max_time"] => {
            set_property(root, engine, diff, "max_time", value);
        }
        ["game", engine, "puzzles", diff, rest @ ..] if !rest.is_empty() => {
            let key = rest.join(".");
            set_property(root, engine, diff, &key, value);
        }
        _ => {
            // Unknown top-level shape: ignored rather than fatal, so
            // a future engine or config extension doesn't break older
            // runs of this loader.
        }
    }
    Ok(())
}

fn set_property(root: &mut RootConfig, engine: &str, diff: &str, key: &str, value: &str) {
    root.game_mut(engine)
        .difficulty_mut(diff)
        .properties
        .insert(key.to_string(), value.to_string());
}
