#![cfg(not(tarpaulin_include))]

use clap::Parser;
use log::{info, warn};
use roman_calc::calculator::{Calculator, Key};
use roman_calc::converter::LiveConverter;
use roman_calc::credentials::{verify_email, verify_password};
use roman_calc::modernizer::{Modernizer, StandardModernizer};
use roman_calc::numeral::NumeralEngine;
use roman_calc::registration::review_registration;
use roman_calc::storage::{FileStore, HistoryRepository, KeyValueStore, MemoryStore};
use std::io::{self, Write};
use std::path::PathBuf;

/// Interactive additive Roman numeral calculator
#[derive(Parser, Debug)]
#[command(name = "roman-calc")]
#[command(version)]
#[command(about = "Additive Roman numeral calculator", long_about = None)]
struct Args {
    /// Persist calculation history in this file (in-memory when omitted)
    #[arg(long, value_name = "PATH")]
    history_file: Option<PathBuf>,

    /// Owner of the calculation history
    #[arg(long, default_value = "guest")]
    user: String,

    /// Ask the remote romans API for modern numerals
    #[arg(long)]
    remote: bool,

    /// Base URL of the remote modernizer
    #[arg(long, value_name = "URL")]
    modernizer_url: Option<String>,
}

fn build_modernizer(args: &Args) -> Box<dyn Modernizer> {
    if args.remote {
        #[cfg(feature = "remote")]
        {
            use roman_calc::modernizer::RemoteModernizer;
            return Box::new(match &args.modernizer_url {
                Some(url) => RemoteModernizer::new(url.clone()),
                None => RemoteModernizer::default(),
            });
        }
        #[cfg(not(feature = "remote"))]
        warn!("Built without the `remote` feature; using the local modernizer");
    }
    if args.modernizer_url.is_some() && !args.remote {
        warn!("--modernizer-url has no effect without --remote");
    }
    Box::new(StandardModernizer)
}

fn print_help() {
    println!("Commands:");
    println!("  q: Quit");
    println!("  0-9, add, subtract, multiply, divide, equals, modern, clear: Keypad");
    println!("  convert <n>: Show the additive numeral for <n>");
    println!("  email <text>: Check an email address");
    println!("  password <text>: Check a password");
    println!("  register <email> <password>: Review a registration");
    println!("  history: Show the calculation history");
    println!("  forget: Clear the saved history");
}

fn run<S: KeyValueStore>(
    args: &Args,
    mut repository: HistoryRepository<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    let saved = repository.load(&args.user)?;
    info!("Loaded {} history records for {}", saved.len(), args.user);

    let mut calculator =
        Calculator::with_engine(NumeralEngine::with_history(saved), build_modernizer(args));
    let mut converter = LiveConverter::new();
    let mut status = String::from("ok");

    loop {
        print!("[{}] ({}) > ", calculator.display(), status);
        io::stdout().flush()?;

        let mut command = String::new();
        if io::stdin().read_line(&mut command)? == 0 {
            break;
        }
        let command = command.trim();
        let (word, rest) = match command.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (command, ""),
        };

        status = String::from("ok");
        match word {
            "" => status = String::from("invalid command"),
            "q" => break,
            "help" => print_help(),
            "convert" => {
                let additive = converter.update(rest);
                if additive.is_empty() {
                    status = String::from("out of range");
                } else {
                    println!("{}", additive);
                }
            }
            "email" => println!("{}", verify_email(rest)),
            "password" => println!("{}", serde_json::to_string_pretty(&verify_password(rest))?),
            "register" => {
                let (email, password) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let review = review_registration(email, password.trim());
                for message in &review.messages {
                    println!("{}", message);
                }
                if !review.is_accepted() {
                    status = String::from("rejected");
                }
            }
            "history" => {
                for record in calculator.history() {
                    println!("{}", record);
                }
            }
            "forget" => {
                repository.clear(&args.user)?;
                calculator = Calculator::new(build_modernizer(args));
            }
            _ => match Key::parse(command) {
                Some(key) => {
                    let before = calculator.history().len();
                    if let Err(e) = calculator.press(key) {
                        status = e.to_string();
                    }
                    if calculator.history().len() != before {
                        repository.save(&args.user, calculator.history())?;
                    }
                }
                None => status = String::from("invalid command"),
            },
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    match &args.history_file {
        Some(path) => run(&args, HistoryRepository::new(FileStore::open(path)?)),
        None => run(&args, HistoryRepository::new(MemoryStore::new())),
    }
}
