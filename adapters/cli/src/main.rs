#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Tiger Run experience.

mod game;
mod script;
mod settings;

use std::{path::PathBuf, process::ExitCode, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use tiger_run_core::Command;
use tiger_run_rendering::{text_frame, Color, Palette, Presentation, RenderingBackend, Scene};
use tiger_run_rendering_macroquad::MacroquadBackend;
use tiger_run_system_bootstrap::{Bootstrap, INSTRUCTIONS};
use tiger_run_world::World;

use self::{game::GameLoop, script::parse_script, settings::Settings};

/// Tiger Run - collect dollars, dodge the monkey, bank your money
#[derive(Parser, Debug)]
#[command(name = "tiger-run")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML settings file (monkey_pace, cell_size, vsync)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tiger moves per monkey step; 0 keeps the monkey still (overrides the settings file)
    #[arg(long)]
    monkey_pace: Option<u32>,

    /// Play a move script such as "RRDL" or "right, down" without opening a window
    #[arg(short, long)]
    script: Option<String>,

    /// Print the final snapshot as JSON instead of a text frame
    #[arg(long, requires = "script")]
    json: bool,

    /// Print every world event to stderr while the script plays
    #[arg(long, requires = "script")]
    trace: bool,
}

/// Entry point for the Tiger Run command-line interface.
fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(monkey_pace) = args.monkey_pace {
        settings.monkey_pace = monkey_pace;
    }

    match &args.script {
        Some(script) => run_script(script, settings, args.json, args.trace),
        None => run_window(settings),
    }
}

fn run_script(script: &str, settings: Settings, json: bool, trace: bool) -> Result<()> {
    let moves = parse_script(script).context("invalid --script value")?;
    let bootstrap = Bootstrap;
    let mut game = GameLoop::new(World::new());

    game.step(bootstrap.opening_commands(settings.monkey_pace), Duration::ZERO);
    trace_events(trace, &game);
    for direction in moves {
        game.play_move(direction);
        trace_events(trace, &game);
    }

    let snapshot = game.snapshot();
    if json {
        let encoded =
            serde_json::to_string_pretty(&snapshot).context("failed to encode snapshot as json")?;
        println!("{encoded}");
        return Ok(());
    }

    let scene = build_scene(&game, settings.cell_size)?;
    println!("{}", bootstrap.welcome_banner(game.world()));
    print!("{}", text_frame(&snapshot));
    println!("{}", scene.hud_line());
    if let Some(announcement) = &scene.announcement {
        println!("{announcement}");
    }
    println!("{}", game.report());
    Ok(())
}

fn trace_events(enabled: bool, game: &GameLoop) {
    if !enabled {
        return;
    }
    for event in game.last_events() {
        eprintln!("{event:?}");
    }
}

fn run_window(settings: Settings) -> Result<()> {
    let bootstrap = Bootstrap;
    let mut game = GameLoop::new(World::new());
    game.step(
        bootstrap.configure_commands(settings.monkey_pace),
        Duration::ZERO,
    );

    let banner = bootstrap.welcome_banner(game.world()).to_owned();
    println!("{banner}");
    println!("{INSTRUCTIONS}");

    let cell_size = settings.cell_size;
    let scene = build_scene(&game, cell_size)?;
    let presentation = Presentation::new(
        banner,
        Color::from_rgb_u8(20, 28, 18),
        Palette::default(),
        scene,
    );

    MacroquadBackend::new()
        .with_vsync(settings.vsync)
        .run(presentation, move |dt, input, scene| {
            let mut commands = Vec::new();
            if input.start {
                commands.push(Command::StartGame);
            }
            if let Some(direction) = input.direction {
                commands.push(Command::MoveTiger { direction });
            }
            game.step(commands, dt);

            match build_scene(&game, cell_size) {
                Ok(next) => *scene = next,
                Err(error) => eprintln!("error: {error:#}"),
            }
        })
}

fn build_scene(game: &GameLoop, cell_size: f32) -> Result<Scene> {
    let scene = Scene::from_snapshot(
        &game.snapshot(),
        cell_size,
        |dollar| game.cues().fade_progress(dollar),
        game.announcement_text(),
    )
    .context("failed to build scene from world snapshot")?;
    Ok(scene)
}
