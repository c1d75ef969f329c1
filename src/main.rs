//! dreamlog CLI
//!
//! Usage:
//!   dreamlog --text "I was flying over the sea"          # Single analysis
//!   dreamlog --text "..." --json                         # JSON output
//!   dreamlog --interactive                               # Analyze lines from stdin
//!   dreamlog --journal dreams.json --user ana --add "..." # Record a dream
//!   dreamlog --journal dreams.json --user ana --insights # Trends, themes, feedback
//!   dreamlog --journal dreams.json --user ana --patterns # Monthly patterns
//!   dreamlog --serve --journal dreams.json               # HTTP API server

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use dreamlog::core::{open_journal, run_server, save_journal, DreamJournal, MemoryStore};
use dreamlog::types::{AnalysisResult, User};
use dreamlog::{InsightConfig, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "dreamlog",
    version = VERSION,
    about = "Dream journal mood and theme analytics",
    long_about = "dreamlog scores the mood of dream descriptions and summarizes a\n\
                  journal over time.\n\n\
                  Modes:\n  \
                  --text         Analyze one text\n  \
                  --interactive  Analyze each line from stdin\n  \
                  --journal      Record dreams and read insights from a journal file\n  \
                  --serve        HTTP API server mode\n\n\
                  Labels:\n  \
                  Very Positive  score >= 0.5\n  \
                  Positive       score >= 0.1\n  \
                  Neutral        score > -0.1\n  \
                  Negative       score > -0.5\n  \
                  Very Negative  otherwise"
)]
struct Args {
    /// Text to analyze (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Analyze lines from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Journal file (JSON); created on first write
    #[arg(short, long)]
    journal: Option<String>,

    /// Journal user; registered on first use
    #[arg(short, long)]
    user: Option<String>,

    /// Record a dream for --user
    #[arg(short, long)]
    add: Option<String>,

    /// Print mood trend, recurring themes and feedback for --user
    #[arg(long)]
    insights: bool,

    /// Print monthly patterns and the recording report for --user
    #[arg(long)]
    patterns: bool,

    /// Trend lookback window in days (defaults to the config value)
    #[arg(long)]
    days: Option<i64>,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Config file (JSON)
    #[arg(short, long)]
    config: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Show component scores
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => InsightConfig::from_file(path).unwrap_or_else(|e| fail(e)),
        None => InsightConfig::default(),
    };

    if args.serve {
        run_serve(&args, config).await;
    } else if args.journal.is_some() {
        run_journal(&args, config);
    } else if let Some(ref text) = args.text {
        run_single(text, &args, config);
    } else {
        run_interactive(&args, config);
    }
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", e);
    std::process::exit(1);
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> String {
    let result = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    result.unwrap_or_else(|e| fail(e))
}

fn open_store(args: &Args) -> (Arc<MemoryStore>, Option<String>) {
    match &args.journal {
        Some(path) => {
            let store = open_journal(path).unwrap_or_else(|e| fail(e));
            (Arc::new(store), Some(path.clone()))
        }
        None => (Arc::new(MemoryStore::new()), None),
    }
}

/// Run single text analysis
fn run_single(text: &str, args: &Args, config: InsightConfig) {
    let journal = DreamJournal::new(Arc::new(MemoryStore::new()), config);
    let result = journal.analyze(text);

    if args.json {
        println!("{}", to_json(&result, true));
    } else {
        print_analysis(&result, args.verbose);
    }
}

/// Analyze each stdin line
fn run_interactive(args: &Args, config: InsightConfig) {
    let journal = DreamJournal::new(Arc::new(MemoryStore::new()), config);

    print_header("Interactive");
    println!("Describe a dream and press Enter. Type 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        if stdout.flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }
        if line.is_empty() {
            continue;
        }

        let result = journal.analyze(line);
        if args.json {
            println!("{}", to_json(&result, false));
        } else {
            print_analysis(&result, args.verbose);
        }
    }
}

/// Resolve --user, registering it if the journal has no such user
fn resolve_user(store: &MemoryStore, args: &Args) -> User {
    let Some(name) = args.user.as_deref() else {
        fail("--user is required with --journal");
    };
    match store.user_by_name(name).unwrap_or_else(|e| fail(e)) {
        Some(user) => user,
        None => store.create_user(name, "").unwrap_or_else(|e| fail(e)),
    }
}

/// Record dreams and print insights against a journal file
fn run_journal(args: &Args, config: InsightConfig) {
    let (store, path) = open_store(args);
    let user = resolve_user(&store, args);
    let days = args.days.unwrap_or(config.lookback_days);
    let min_dreams = config.min_dreams;
    let journal = DreamJournal::new(store.clone(), config);

    if let Some(text) = &args.add {
        let entry = journal.record_dream(user.id, text).unwrap_or_else(|e| fail(e));
        if args.json {
            println!("{}", to_json(&entry, true));
        } else {
            let score = entry.mood_score.unwrap_or_default();
            println!(
                "Recorded dream #{} for {} | mood={:+.3} ({})",
                entry.id,
                user.username,
                score,
                dreamlog::types::MoodLabel::from_score(score)
            );
        }
    }

    if let Some(path) = &path {
        save_journal(&store, path).unwrap_or_else(|e| fail(e));
    }

    if args.insights {
        let report = journal.mood_trends(user.id, days);
        let themes = journal.recurring_themes(user.id, min_dreams);
        let feedback = dreamlog::core::synthesize(&report, themes.as_deref());

        if args.json {
            let value = serde_json::json!({
                "user": user.username,
                "mood_trends": report,
                "recurring_themes": themes,
                "feedback": feedback,
            });
            println!("{}", to_json(&value, true));
        } else {
            print_header("Insights");
            match report.average_mood {
                Some(avg) => println!("Average mood ({} days): {:+.3}", days, avg),
                None => println!("Average mood ({} days): -", days),
            }
            if let Some(trend) = report.trend {
                println!("Trend:         {}", trend);
            }
            println!("Dominant mood: {}", report.dominant_mood);
            match &themes {
                Some(themes) => {
                    for theme in themes {
                        println!("{}: {} ({} dreams)", theme.theme, theme.keywords.join(", "), theme.frequency);
                    }
                }
                None => println!("Themes:        not enough dreams"),
            }
            println!();
            println!("{}", feedback);
        }
    }

    if args.patterns {
        let result = journal.pattern_result(user.id);
        if args.json {
            println!("{}", to_json(&result, true));
        } else {
            print_header("Patterns");
            if result.reason.is_error() {
                println!("Patterns unavailable ({})", result.reason);
            }
            if let Some(summary) = &result.summary {
                println!("Total dreams: {}", summary.total_dreams);
                println!("Dreams per month: {:.2}", summary.average_dreams_per_month);
                for (month, count) in &summary.dreams_per_month {
                    let mood = summary
                        .mood_trends
                        .get(month)
                        .map(|m| format!("{:+.3}", m))
                        .unwrap_or_else(|| "-".to_string());
                    println!("  {}  {:>3} dreams  mood {}", month, count, mood);
                }
                println!();
            }
            println!("{}", result.report);
        }
    }
}

fn print_header(mode: &str) {
    println!("========================================");
    println!("  dreamlog v{} - {}", VERSION, mode);
    println!("========================================");
}

fn print_analysis(result: &AnalysisResult, verbose: bool) {
    println!("mood={:+.3} | label={}", result.mood_score, result.mood_label);

    if verbose {
        let s = &result.sentiment_scores;
        println!(
            "  lexicon:  {:+.4} (neg={:.3} neu={:.3} pos={:.3})",
            result.components.lexicon, s.neg, s.neu, s.pos
        );
        println!("  polarity: {:+.4}", result.components.polarity);
        println!("  theme:    {:+.4}", result.components.theme);
    }
    if !result.identified_themes.is_empty() {
        println!("  themes: {}", result.identified_themes.join(", "));
    }
    if verbose && !result.common_words.is_empty() {
        let words: Vec<String> = result
            .common_words
            .iter()
            .map(|w| format!("{}({})", w.word, w.count))
            .collect();
        println!("  words:  {}", words.join(" "));
    }
}

/// Run HTTP API server
async fn run_serve(args: &Args, config: InsightConfig) {
    let (store, path) = open_store(args);
    let journal = DreamJournal::new(store, config);

    if let Err(e) = run_server(&args.addr, journal, path).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
