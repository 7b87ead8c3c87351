/// Entry point and game loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::io;

use rand::rngs::StdRng;
use rand::SeedableRng;

use config::GameConfig;
use domain::grid::Pos;
use sim::editor::{self, Editor};
use sim::save;
use sim::session::{Phase, Session};
use ui::glyphs::GlyphSet;
use ui::input::{self, Command, PromptKey};
use ui::render::Renderer;

fn main() {
    let config = GameConfig::load();

    let mut session = Session::new();
    session.show_hints = config.hints.enabled;
    session.all_exit_hints = config.hints.all_exits;

    let mut rng = StdRng::from_entropy();

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = game_loop(&mut session, &mut renderer, &config, &mut rng);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    println!();
    println!("Thanks for playing Wayfinder!");
}

fn game_loop(
    session: &mut Session,
    renderer: &mut Renderer,
    config: &GameConfig,
    rng: &mut StdRng,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut editor = Editor::new(Pos::new(1, 1));

    loop {
        renderer.draw(session, &editor, &config.glyphs)?;

        match session.phase {
            Phase::Title => match input::read_menu_command()? {
                Command::NewGame => {
                    session.new_maze(config.map.width, config.map.height, rng);
                }
                Command::EnterEditor => {
                    session.new_maze(config.map.width, config.map.height, rng);
                    session.phase = Phase::Editor;
                    editor = Editor::new(Pos::new(1, 1));
                }
                Command::LoadMap => {
                    match prompt_filename(session, renderer, &editor, &config.glyphs, "Load map")? {
                        Some(name) if !name.is_empty() => match save::load_map(&name) {
                            Ok(grid) => {
                                session.adopt_grid(grid);
                                session.set_message(format!("Loaded {name}"));
                            }
                            Err(e) => session.set_message(format!("Load failed: {e}")),
                        },
                        _ => {}
                    }
                }
                Command::ToggleHints => session.toggle_hints(),
                Command::Quit => break,
                _ => {}
            },

            Phase::Playing => match input::read_game_command()? {
                Command::Move(dir) => {
                    session.move_player(dir);
                }
                Command::ToggleHints => session.toggle_hints(),
                Command::NewGame => {
                    session.new_maze(config.map.width, config.map.height, rng);
                }
                Command::EnterEditor => {
                    editor = Editor::new(session.player);
                    session.phase = Phase::Editor;
                }
                Command::Quit => {
                    session.phase = Phase::Title;
                    session.message.clear();
                }
                _ => {}
            },

            Phase::Editor => match input::read_editor_command()? {
                Command::Move(dir) => {
                    editor.move_cursor(dir, &session.grid);
                }
                Command::Stamp(state) => {
                    editor.stamp(&mut session.grid, state);
                    // Edits can move the player or the exits, so the
                    // session rereads them right away.
                    session.rescan();
                }
                Command::SaveMap => {
                    let label = "Save map as (empty for a timestamped name)";
                    if let Some(name) =
                        prompt_filename(session, renderer, &editor, &config.glyphs, label)?
                    {
                        let name = if name.is_empty() {
                            editor::default_filename()
                        } else {
                            name
                        };
                        match save::save_map(&session.grid, &name) {
                            Ok(()) => session.set_message(format!("Saved {name}")),
                            Err(e) => session.set_message(format!("Save failed: {e}")),
                        }
                    }
                }
                Command::Quit => {
                    session.rescan();
                    session.phase = Phase::Playing;
                }
                _ => {}
            },

            Phase::Won => match input::read_won_command()? {
                Command::Quit => {
                    session.phase = Phase::Title;
                    session.message.clear();
                }
                Command::Redraw => {}
                _ => {
                    session.new_maze(config.map.width, config.map.height, rng);
                }
            },
        }
    }

    Ok(())
}

/// Inline filename prompt on the status line. Returns `None` when the
/// user cancels.
fn prompt_filename(
    session: &mut Session,
    renderer: &mut Renderer,
    editor: &Editor,
    glyphs: &GlyphSet,
    label: &str,
) -> io::Result<Option<String>> {
    let mut buf = String::new();
    loop {
        session.set_message(format!("{label}: {buf}_"));
        renderer.draw(session, editor, glyphs)?;
        match input::read_prompt_key()? {
            PromptKey::Char(ch) => buf.push(ch),
            PromptKey::Backspace => {
                buf.pop();
            }
            PromptKey::Enter => {
                session.message.clear();
                return Ok(Some(buf));
            }
            PromptKey::Cancel => {
                session.message.clear();
                return Ok(None);
            }
        }
    }
}
