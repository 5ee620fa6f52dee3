use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use pageshade::TabId;
use pageshade::popup::{Popup, ThemeChoice};
use pageshade::runtime::{PageHandle, Runtime};
use pageshade::storage::{JsonFileStore, KvStore, MemoryStore};
use pageshade::stylesheet::OVERRIDE_STYLE_ID;

/// Dark/light page theme switcher, driven from stdin.
#[derive(Parser, Debug)]
#[command(name = "pageshade", version, about)]
struct Cli {
    /// Persist the theme to this JSON file instead of keeping it in memory.
    #[arg(long, env = "PAGESHADE_STORE")]
    store: Option<PathBuf>,

    /// Pages to open at startup.
    #[arg(long, default_value_t = 1)]
    pages: usize,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let store: Arc<dyn KvStore> = match &cli.store {
        Some(path) => {
            tracing::info!(path = %path.display(), "using file-backed theme store");
            Arc::new(JsonFileStore::new(path))
        }
        None => Arc::new(MemoryStore::new()),
    };

    let runtime = Runtime::new(store);
    let _coordinator = runtime.start_background().await;

    let mut pages: Vec<PageHandle> = Vec::new();
    for _ in 0..cli.pages {
        pages.push(runtime.open_page().await);
    }
    let mut popup = runtime.open_popup().await;

    println!("pageshade ready. commands: dark, light, open, activate <tab>, close <tab>, status, quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("stdin error: {e}");
                break;
            }
        };
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("dark") => select(&mut popup, ThemeChoice::Dark).await,
            Some("light") => select(&mut popup, ThemeChoice::Light).await,
            Some("open") => {
                let page = runtime.open_page().await;
                println!("opened tab {}", page.tab_id);
                pages.push(page);
            }
            Some("activate") => match parse_tab(parts.next()) {
                Some(id) => {
                    if runtime.tabs.activate(id).await {
                        println!("tab {id} focused");
                    } else {
                        println!("no such tab: {id}");
                    }
                }
                None => println!("usage: activate <tab>"),
            },
            Some("close") => match parse_tab(parts.next()) {
                Some(id) => {
                    if let Some(index) = pages.iter().position(|page| page.tab_id == id) {
                        pages.remove(index).close().await;
                        println!("closed tab {id}");
                    } else {
                        println!("no such tab: {id}");
                    }
                }
                None => println!("usage: close <tab>"),
            },
            Some("status") => print_status(&runtime, &pages, &popup).await,
            Some("quit" | "exit") => break,
            None => {}
            Some(other) => println!("unknown command: {other}"),
        }
    }
}

fn parse_tab(arg: Option<&str>) -> Option<TabId> {
    arg.and_then(|raw| raw.parse().ok())
}

async fn select(popup: &mut Popup, choice: ThemeChoice) {
    match popup.select(choice).await {
        Ok(_) => println!("applied {choice:?}"),
        Err(e) => eprintln!("apply failed: {e}"),
    }
}

async fn print_status(runtime: &Runtime, pages: &[PageHandle], popup: &Popup) {
    let badge = runtime.badge.snapshot().await;
    println!("badge: {:?} on {:?}", badge.text, badge.color);
    println!("open tabs: {:?}", runtime.tabs.open_tabs().await);
    println!("active tab: {:?}", runtime.tabs.active_tab().await);
    for page in pages {
        let doc = page.document.read().await;
        let override_state = if doc.style(OVERRIDE_STYLE_ID).is_some() { "installed" } else { "absent" };
        println!("tab {}: override {override_state}", page.tab_id);
    }
    println!("{}", popup.preview_json());
}
