/// External configuration loader.
///
/// Reads `wayfinder.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or
/// incomplete. Map dimensions are sanitized here so the rest of the
/// game never sees a degenerate size.

use serde::Deserialize;
use std::path::PathBuf;

use crate::ui::glyphs::GlyphSet;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub map: MapConfig,
    pub hints: HintConfig,
    pub glyphs: GlyphSet,
}

#[derive(Clone, Debug)]
pub struct MapConfig {
    pub width: usize,
    pub height: usize,
}

#[derive(Clone, Debug)]
pub struct HintConfig {
    pub enabled: bool,
    pub all_exits: bool,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    map: TomlMap,
    #[serde(default)]
    hints: TomlHints,
    #[serde(default)]
    glyphs: TomlGlyphs,
}

#[derive(Deserialize, Debug)]
struct TomlMap {
    #[serde(default = "default_map_width")]
    width: usize,
    #[serde(default = "default_map_height")]
    height: usize,
}

#[derive(Deserialize, Debug)]
struct TomlHints {
    #[serde(default)]
    enabled: bool,
    #[serde(default)]
    all_exits: bool,
}

/// Per-glyph overrides; anything unset keeps the built-in character.
#[derive(Deserialize, Debug, Default)]
struct TomlGlyphs {
    player: Option<String>,
    friend: Option<String>,
    enemy: Option<String>,
    exit: Option<String>,
    breadcrumb: Option<String>,
    obstacle: Option<String>,
    open: Option<String>,
}

// ── Defaults ──

fn default_map_width() -> usize { 31 }
fn default_map_height() -> usize { 31 }

impl Default for TomlMap {
    fn default() -> Self {
        TomlMap {
            width: default_map_width(),
            height: default_map_height(),
        }
    }
}

impl Default for TomlHints {
    fn default() -> Self {
        TomlHints {
            enabled: false,
            all_exits: false,
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `wayfinder.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        resolve(load_toml(&search_dirs))
    }
}

fn resolve(toml_cfg: TomlConfig) -> GameConfig {
    let base = GlyphSet::default();
    GameConfig {
        map: MapConfig {
            width: sanitize_dim(toml_cfg.map.width),
            height: sanitize_dim(toml_cfg.map.height),
        },
        hints: HintConfig {
            enabled: toml_cfg.hints.enabled,
            all_exits: toml_cfg.hints.all_exits,
        },
        glyphs: GlyphSet {
            player: pick_glyph(&toml_cfg.glyphs.player, base.player),
            friend: pick_glyph(&toml_cfg.glyphs.friend, base.friend),
            enemy: pick_glyph(&toml_cfg.glyphs.enemy, base.enemy),
            exit: pick_glyph(&toml_cfg.glyphs.exit, base.exit),
            breadcrumb: pick_glyph(&toml_cfg.glyphs.breadcrumb, base.breadcrumb),
            obstacle: pick_glyph(&toml_cfg.glyphs.obstacle, base.obstacle),
            open: pick_glyph(&toml_cfg.glyphs.open, base.open),
        },
    }
}

/// The maze carver needs odd dimensions and a border, so sizes are
/// forced odd and at least 5.
fn sanitize_dim(value: usize) -> usize {
    let clamped = value.max(5);
    if clamped % 2 == 0 {
        clamped + 1
    } else {
        clamped
    }
}

/// First character of an override string, or the built-in glyph.
fn pick_glyph(over: &Option<String>, fallback: char) -> char {
    over.as_ref()
        .and_then(|s| s.chars().next())
        .unwrap_or(fallback)
}

/// Candidate directories to search: exe dir + CWD + system paths (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        // Resolve symlinks so a packaged binary still finds data
        // relative to the real location.
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. XDG data home (~/.local/share/wayfinder)
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/wayfinder");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    // 4. System data directory (/usr/share/wayfinder)
    let sys = PathBuf::from("/usr/share/wayfinder");
    if sys.is_dir() && !dirs.iter().any(|d| d == &sys) {
        dirs.push(sys);
    }

    // 5. Fallback
    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for wayfinder.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("wayfinder.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: wayfinder.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_text(text: &str) -> GameConfig {
        resolve(toml::from_str(text).unwrap())
    }

    #[test]
    fn an_empty_file_yields_the_defaults() {
        let config = from_text("");
        assert_eq!(config.map.width, 31);
        assert_eq!(config.map.height, 31);
        assert!(!config.hints.enabled);
        assert_eq!(config.glyphs.player, '⚔');
    }

    #[test]
    fn dimensions_are_forced_odd_and_bounded() {
        let config = from_text("[map]\nwidth = 2\nheight = 10\n");
        assert_eq!(config.map.width, 5);
        assert_eq!(config.map.height, 11);
    }

    #[test]
    fn partial_glyph_overrides_keep_the_rest() {
        let config = from_text("[glyphs]\nplayer = \"@\"\n");
        assert_eq!(config.glyphs.player, '@');
        assert_eq!(config.glyphs.friend, '☺');
    }

    #[test]
    fn hint_flags_parse() {
        let config = from_text("[hints]\nenabled = true\nall_exits = true\n");
        assert!(config.hints.enabled);
        assert!(config.hints.all_exits);
    }
}
