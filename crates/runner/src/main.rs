use market_sim::MoveKind;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tradesim_runner::console::{HELP, render_snapshot};
use tradesim_runner::{ConsoleCommand, SessionDriver, SessionEvent, SimulatorConfig, TradingSession};

const CHART_WIDTH: usize = 60;

fn print_help() {
    eprintln!(
        r#"Stock Trading Simulator - buy and sell one synthetic stock against a random price walk

USAGE:
    tradesim [OPTIONS]

OPTIONS:
    --config <PATH>     Load configuration from JSON file
    --seed <N>          Seed the price walk for a reproducible run
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (default: info)

EXAMPLES:
    # Run with defaults (MEOW at $150, $10000 balance, 2s ticks)
    tradesim

    # Replay the same price path
    tradesim --seed 42
"#
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut seed: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            "--seed" | "-s" => {
                i += 1;
                let Some(value) = args.get(i).and_then(|v| v.parse().ok()) else {
                    eprintln!("Error: --seed requires an unsigned integer");
                    std::process::exit(1);
                };
                seed = Some(value);
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = match config_path {
        Some(path) => {
            log::info!("Loading configuration from: {}", path);
            SimulatorConfig::from_file(&path)?
        }
        None => SimulatorConfig::default(),
    };
    if seed.is_some() {
        config.market.seed = seed;
    }

    let session = TradingSession::new(&config)?;
    let symbol = session.symbol().to_string();
    println!("{}", config.name);
    println!("{}", render_snapshot(&session.snapshot()));
    println!("{HELP}");

    // Subscribe before the driver starts so the immediate first tick is shown
    let (driver, handle) = SessionDriver::new(session, config.tick_interval());
    let mut events = handle.subscribe();
    let driver = tokio::spawn(driver.run());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(SessionEvent::Tick(tick)) => {
                    let marker = if tick.kind == MoveKind::Large { " !" } else { "" };
                    println!("{} ${:.2}{}", symbol, tick.price(), marker);
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("Display lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => break,
            },
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match ConsoleCommand::parse(&line) {
                    ConsoleCommand::Trade { side, quantity } => {
                        let notification = handle.trade_notification(side, quantity).await;
                        println!("[{}] {}", notification.title(), notification.message());
                        if notification.is_success() {
                            println!("{}", render_snapshot(&handle.snapshot().await?));
                        }
                    }
                    ConsoleCommand::Status => {
                        println!("{}", render_snapshot(&handle.snapshot().await?));
                    }
                    ConsoleCommand::Chart => {
                        println!("{}", handle.chart().await?.render_text(CHART_WIDTH));
                    }
                    ConsoleCommand::Help => println!("{HELP}"),
                    ConsoleCommand::Quit => break,
                    ConsoleCommand::Empty => {}
                    ConsoleCommand::Unknown(input) => {
                        println!("Unknown command: {input} (type 'help')");
                    }
                }
            }
        }
    }

    handle.shutdown().await?;
    let session = driver.await?;
    let snapshot = session.snapshot();
    log::info!(
        "Final: balance {}, {} shares @ {}, equity {}",
        snapshot.balance,
        snapshot.shares,
        snapshot.mark_price,
        snapshot.equity
    );
    Ok(())
}
