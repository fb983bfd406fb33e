use borders_client::command::{Command, CommandError, HELP};
use borders_client::config::ClientConfig;
use borders_client::game::GameClient;
use borders_client::network::HttpAuthority;
use borders_client::rendering::{render_board, render_reveal, render_suggestions};
use borders_client::store::GameStore;
use borders_shared::{GameState, DEBOUNCE_DELAY_MS, DEFAULT_API_BASE, HINT_CLEAR_DELAY_MS};
use clap::Parser;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the game authority API
    #[arg(short = 'a', long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Quiet period before typed input is sent, in milliseconds
    #[arg(long, default_value_t = DEBOUNCE_DELAY_MS)]
    debounce_ms: u64,

    /// How long a hint stays visible, in milliseconds
    #[arg(long, default_value_t = HINT_CLEAR_DELAY_MS)]
    hint_clear_ms: u64,
}

impl Args {
    fn into_config(self) -> ClientConfig {
        ClientConfig::new(self.api_base)
            .with_debounce_delay(Duration::from_millis(self.debounce_ms))
            .with_hint_clear_delay(Duration::from_millis(self.hint_clear_ms))
    }
}

fn subscribe_views(store: &GameStore) {
    store.game_state.subscribe(|state: &GameState| {
        if !state.is_empty() {
            println!("{}", render_board(state));
        }
    });
    store.message.subscribe(|message: &String| {
        if !message.is_empty() {
            println!(">> {}", message);
        }
    });
    store.show_hint.subscribe(|hint: &String| {
        if !hint.is_empty() {
            println!("?? {}", hint);
        }
    });
    store.is_loading.subscribe(|loading: &bool| {
        if *loading {
            println!("Loading...");
        }
    });
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let config = Args::parse().into_config();

    info!("Starting borders quiz client...");
    info!("Authority: {}", config.api_base);

    let authority = Arc::new(HttpAuthority::new(&config.api_base)?);
    let store = GameStore::new();
    subscribe_views(&store);

    let client = GameClient::new(authority, store, config);
    client.get_current_game().await;
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        match command {
            Command::NewGame => {
                client.start_new_game().await;
            }
            Command::Type { field_id, text } => {
                client.update_field(field_id, &text, false).await;
            }
            Command::Enter { field_id, text } => {
                client.update_field(field_id, &text, true).await;
            }
            Command::Clear { field_id } => {
                client.update_field(field_id, "", true).await;
            }
            Command::Hint => {
                client.get_hint().await;
            }
            Command::Reveal => {
                if let Some(answers) = client.reveal_answers().await {
                    println!("{}", render_reveal(&answers));
                }
            }
            Command::Suggest { query } => {
                let suggestions = client.get_suggestions(&query, None).await;
                println!("{}", render_suggestions(&query, &suggestions));
            }
            Command::Show => {
                println!("{}", render_board(&client.store().game_state.get()));
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
        }
    }

    // Also covers an update whose delay already elapsed but whose request is
    // still on the wire; returning here would drop it with the runtime.
    if client.coordinator().has_pending() {
        warn!("Flushing typed input before exit");
    }
    client.coordinator().settle().await;

    Ok(())
}
