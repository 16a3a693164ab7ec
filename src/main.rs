use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use menu_stack::menus::{self, SampleMenus};
use menu_stack::{
    ConfigInitialiser, GameSession, InputRouter, InputSignal, JsonSettingsStore, MemorySettings,
    MenuCategory, MenuConfig, MenuContext, MenuId, MenuInitialiser,
};

/// Drive a menu stack from the console
#[derive(Parser, Debug)]
#[command(name = "menu_stack", version, about)]
struct Args {
    /// JSON menu configuration; the stock welcome/main/options/pause menus are used without one
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Settings file (defaults to the user config directory)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "menu_stack=trace"
    #[arg(long, default_value = "info")]
    log: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&args.log).context("invalid log filter")?)
        .with_writer(io::stderr)
        .init();

    let (initialiser, pause_menu): (Box<dyn MenuInitialiser>, MenuId) = match &args.config {
        Some(path) => {
            let config = MenuConfig::load(path)
                .with_context(|| format!("failed to load menu configuration {}", path.display()))?;
            let pause_menu = config
                .menus
                .iter()
                .find(|entry| entry.category == MenuCategory::Pause)
                .map(|entry| entry.id.clone())
                .unwrap_or(menus::PAUSE);
            (Box::new(ConfigInitialiser::new(config)), pause_menu)
        }
        None => (Box::new(SampleMenus::new()), menus::PAUSE),
    };

    let mut ctx = build_context(GameSession::new(pause_menu), args.settings.as_ref());
    ctx.bootstrap(initialiser.as_ref())
        .context("failed to register menus")?;
    ctx.run_pending();

    print_help();
    print_stack(&ctx);

    let router = InputRouter::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !ctx.quit_requested() {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();

        match words.as_slice() {
            [] => continue,
            ["help"] => print_help(),
            ["stack"] => {}
            ["show", id] => {
                ctx.show(&MenuId::new(*id));
            }
            ["hide", id] => {
                ctx.hide(&MenuId::new(*id));
            }
            ["press", button] => {
                if let Err(err) = ctx.press_top(button) {
                    println!("{err}");
                }
            }
            ["press", id, button] => {
                if let Err(err) = ctx.press(&MenuId::new(*id), button) {
                    println!("{err}");
                }
            }
            ["back"] => {
                ctx.go_back();
            }
            ["cancel"] => {
                let route = router.handle(&mut ctx, InputSignal::Cancel);
                println!("cancel -> {route:?}");
            }
            ["start"] => ctx.start_game(),
            ["menu"] => ctx.return_to_menu(),
            ["quit"] => {
                router.handle(&mut ctx, InputSignal::Quit);
            }
            _ => {
                println!("unknown command '{line}', type 'help' for a list");
                continue;
            }
        }

        ctx.run_pending();
        print_stack(&ctx);
    }

    info!("shutting down");
    Ok(())
}

/// Opens the settings file, falling back to in-memory settings if it cannot be used
fn build_context(session: GameSession, path: Option<&PathBuf>) -> MenuContext {
    let store = match path {
        Some(path) => JsonSettingsStore::open(path),
        None => JsonSettingsStore::open_default(),
    };

    match store {
        Ok(store) => {
            info!(path = %store.path().display(), "settings loaded");
            MenuContext::new(session, store)
        }
        Err(err) => {
            warn!(%err, "settings unavailable, changes will not be saved");
            MenuContext::new(session, MemorySettings::new())
        }
    }
}

fn print_stack(ctx: &MenuContext) {
    let mode = match (ctx.in_game(), ctx.is_paused()) {
        (false, _) => "menus",
        (true, false) => "playing",
        (true, true) => "paused",
    };

    println!("[{mode}]");
    print!("{}", ctx.menus().report());

    if let Some(top) = ctx.menus().top() {
        println!("buttons: {}", top.buttons().join(", "));
    }
}

fn print_help() {
    println!("Commands:");
    println!("  show <menu>            open a menu");
    println!("  hide <menu>            close a menu (must be on top)");
    println!("  press <button>         press a button on the top menu");
    println!("  press <menu> <button>  press a button on a specific menu");
    println!("  back                   back button on the top menu");
    println!("  cancel                 escape key, routed by game state");
    println!("  start                  enter gameplay");
    println!("  menu                   return to the initial menu");
    println!("  stack                  print the stack");
    println!("  quit                   exit");
}
