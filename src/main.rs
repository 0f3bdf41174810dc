//! Wordle Bot CLI
//!
//! Interactive command-line interface for the Wordle engine.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use log::info;
use wordle_bot::solver::DEFAULT_MAX_GUESSES;
use wordle_bot::{
    evaluate, load_dictionary, FeedbackPattern, Response, Result, Strategy, Word, WordSet,
    WordleError, WordleSolver,
};

const BANNER_TEXT: &str = include_str!("text/banner.txt");

/// A multithreaded Wordle solver using entropy-based information theory
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Newline-separated word list to use instead of the built-in one
    #[arg(short, long, global = true)]
    dictionary: Option<PathBuf>,

    /// How guesses are chosen: "entropy" or "expected"
    #[arg(short, long, global = true, default_value_t = Strategy::MaxEntropy)]
    strategy: Strategy,

    /// Only suggest guesses consistent with all feedback so far
    #[arg(long, global = true)]
    hard: bool,

    /// Guesses allowed per game
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_GUESSES)]
    max_guesses: usize,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assist with a game played elsewhere (default)
    Interactive,
    /// Solve for a known target word
    Solve { word: String },
    /// Play against a random word from the dictionary
    Play,
    /// Print the best opening guesses
    Suggest {
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
    /// Solve every word in the dictionary and report the guess distribution
    Bench,
}

struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    fn new(message: &'static str) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();
        let handle = thread::spawn(move || {
            let frames = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
            let mut stdout = io::stdout();
            let mut i = 0;
            while running_clone.load(Ordering::Relaxed) {
                let _ = write!(stdout, "\r{} {}", frames[i % frames.len()], message);
                let _ = stdout.flush();
                thread::sleep(Duration::from_millis(80));
                i += 1;
            }
            let _ = write!(stdout, "\r{}\r", " ".repeat(message.len() + 3));
            let _ = stdout.flush();
        });
        Self {
            running,
            handle: Some(handle),
        }
    }

    fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

fn load_words(cli: &Cli) -> Result<WordSet> {
    let words = match &cli.dictionary {
        Some(path) => WordSet::load(path)?,
        None => load_dictionary()?,
    };
    info!(
        "loaded {} words of length {}",
        words.len(),
        words.word_length()
    );
    Ok(words)
}

fn build_solver(cli: &Cli) -> Result<WordleSolver> {
    let mut solver = WordleSolver::new(load_words(cli)?)?.with_strategy(cli.strategy);
    solver.set_hard_mode(cli.hard);
    solver.set_max_guesses(cli.max_guesses);
    Ok(solver)
}

fn prompt(stdout: &mut io::Stdout, text: &str) -> Result<()> {
    write!(stdout, "{text}")?;
    stdout.flush()?;
    Ok(())
}

fn print_remaining(solver: &WordleSolver) {
    let remaining = solver.possible_answers();
    println!();
    println!("Remaining possibilities: {}", remaining.len());
    if remaining.len() <= 20 {
        for (i, word) in remaining.iter().enumerate() {
            if i > 0 && i % 10 == 0 {
                println!();
            }
            print!("{:>8}", word.as_str().to_uppercase());
        }
        println!();
    }
    println!();
}

fn print_top(solver: &WordleSolver, n: usize) -> Result<()> {
    let top = solver.find_best_guesses(n)?;
    println!();
    println!("Top {} guesses ({}):", top.len(), solver.strategy());
    println!(
        "{:>4} {:>8} {:>8} {:>12} Possible?",
        "#", "Word", "Entropy", "Exp. Remain"
    );
    println!("{}", "-".repeat(50));
    for (i, analysis) in top.iter().enumerate() {
        println!(
            "{:>4} {:>8} {:>8.3} {:>12.1} {}",
            i + 1,
            analysis.word.as_str().to_uppercase(),
            analysis.entropy,
            analysis.expected_remaining,
            if analysis.is_possible_answer { "✓" } else { "" }
        );
    }
    println!();
    Ok(())
}

fn print_solution(guesses: &[Response]) {
    for (i, response) in guesses.iter().enumerate() {
        println!("Guess {}: {}", i + 1, response);
    }
    println!();
    match guesses.last() {
        Some(last) if last.is_win() => println!("✓ Solved in {} guesses!", guesses.len()),
        _ => println!("✗ Failed to solve within {} guesses.", guesses.len()),
    }
}

/// Runs one interactive command. Returns `false` when the user quits.
fn interactive_command(solver: &mut WordleSolver, parts: &[&str]) -> Result<bool> {
    match parts[0].to_lowercase().as_str() {
        "help" | "h" | "?" => println!("{BANNER_TEXT}"),
        "quit" | "exit" | "q" => {
            println!("Goodbye!");
            return Ok(false);
        }
        "suggest" | "s" | "best" => {
            let analysis = solver.find_best_guess()?;
            println!();
            println!("Best guess: {}", analysis.word.as_str().to_uppercase());
            println!("  Entropy: {:.3} bits", analysis.entropy);
            println!(
                "  Expected remaining: {:.1} words",
                analysis.expected_remaining
            );
            if analysis.is_possible_answer {
                println!("  ✓ This word is a possible answer");
            } else {
                println!("  ✗ This word is NOT a possible answer");
            }
            println!();
            println!("Remaining possibilities: {}", solver.remaining_count());
            if solver.is_hard_mode() {
                println!("Mode: HARD");
            }
            println!();
        }
        "top" | "t" => {
            let n = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(5);
            print_top(solver, n)?;
        }
        "hard" | "hardmode" => {
            let enabled = !solver.is_hard_mode();
            solver.set_hard_mode(enabled);
            println!("Hard mode: {}", if enabled { "ON" } else { "OFF" });
        }
        "strategy" => match parts.get(1).map(|s| s.parse::<Strategy>()) {
            Some(Ok(strategy)) => {
                solver.set_strategy(strategy);
                println!("Strategy: {strategy}");
            }
            Some(Err(e)) => println!("{e}"),
            None => println!("Strategy: {}", solver.strategy()),
        },
        "feedback" | "f" | "fb" => {
            let (Some(word), Some(pattern)) = (parts.get(1), parts.get(2)) else {
                println!("Usage: feedback <word> <pattern>");
                println!("Example: feedback crane gybbb");
                return Ok(true);
            };
            let Some(pattern) = FeedbackPattern::parse(pattern) else {
                println!("Invalid pattern: {pattern}");
                println!("Use g=green, y=yellow, b=black, one per letter");
                return Ok(true);
            };
            let guess = Word::new(word)?;
            let prev_count = solver.remaining_count();
            solver.apply_feedback(&guess, pattern)?;
            let new_count = solver.remaining_count();

            println!();
            println!("Guess: {}", guess.as_str().to_uppercase());
            println!("Feedback: {pattern}");
            println!(
                "Eliminated {} words ({} → {})",
                prev_count - new_count,
                prev_count,
                new_count
            );
            if pattern.is_win() {
                println!();
                println!("🎉 Congratulations! You solved it!");
            } else if new_count == 0 {
                println!();
                println!("⚠️  No words match this feedback pattern!");
                println!("This might indicate an error. Use 'reset' to start over.");
            } else if new_count <= 10 {
                println!();
                let remaining: Vec<_> = solver
                    .possible_answers()
                    .iter()
                    .map(|w| w.as_str().to_uppercase())
                    .collect();
                println!("Remaining words: {remaining:?}");
            }
            println!();
        }
        "remaining" | "r" | "left" => print_remaining(solver),
        "solve" => {
            let Some(target) = parts.get(1) else {
                println!("Usage: solve <target_word>");
                return Ok(true);
            };
            let target = Word::new(target)?;
            println!();
            println!("Solving for: {}", target.as_str().to_uppercase());
            println!();
            solver.reset();
            let guesses = solver.solve_for_target(&target);
            solver.reset();
            print_solution(&guesses?);
            println!();
        }
        "reset" => {
            solver.reset();
            println!(
                "Reset to initial state. {} words available.",
                solver.remaining_count()
            );
        }
        other => {
            println!("Unknown command: {other}");
            println!("Type 'help' for available commands.");
        }
    }
    Ok(true)
}

fn run_interactive(mut solver: WordleSolver) -> Result<()> {
    for line in BANNER_TEXT.lines().take(6) {
        println!("{line}");
    }
    println!("Loaded {} words.", solver.all_words().len());
    println!();
    println!("Type 'help' for commands or 'suggest' to get started.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        prompt(&mut stdout, "> ")?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        // Bad input and exhausted games are reported, not fatal.
        match interactive_command(&mut solver, &parts) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e @ WordleError::Io(_)) => return Err(e),
            Err(e) => println!("Error: {e}"),
        }
    }
    Ok(())
}

fn run_play(mut solver: WordleSolver) -> Result<()> {
    let secret = *solver
        .all_words()
        .choose(&mut rand::thread_rng())
        .ok_or(WordleError::EmptyDictionary)?;
    info!("secret chosen");

    println!(
        "Guess the {}-letter word in {} tries. Type 'hint' for a suggestion, 'quit' to give up.",
        solver.word_length(),
        solver.max_guesses()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut attempts = 0;

    while attempts < solver.max_guesses() {
        prompt(&mut stdout, &format!("[{}] > ", attempts + 1))?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        match input.to_lowercase().as_str() {
            "" => continue,
            "quit" | "q" => break,
            "hint" => {
                match solver.find_best_guess() {
                    Ok(best) => println!("Try {}", best.word.as_str().to_uppercase()),
                    Err(e) => println!("Error: {e}"),
                }
                continue;
            }
            _ => {}
        }

        let guess = match Word::new(input) {
            Ok(guess) if solver.all_words().contains(&guess) => guess,
            Ok(_) => {
                println!("Not in word list.");
                continue;
            }
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        let response = match evaluate(&secret, &guess) {
            Ok(response) => response,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        attempts += 1;
        println!("{response}");
        if response.is_win() {
            println!("🎉 Solved in {attempts} guesses!");
            return Ok(());
        }
        solver.apply_response(&response)?;
    }

    println!("The word was {}.", secret.as_str().to_uppercase());
    Ok(())
}

fn run_bench(solver: &WordleSolver) -> Result<()> {
    println!();
    println!(
        "Running benchmark on all {} words...",
        solver.all_words().len()
    );

    let spinner = Spinner::new("Computing...");
    let start = Instant::now();
    let distribution = solver.benchmark_guess_distribution();
    let elapsed = start.elapsed();
    spinner.stop();
    let distribution = distribution?;

    let total: usize = distribution.iter().map(|(_, c)| c).sum();
    let total_guesses: usize = distribution.iter().map(|(g, c)| g * c).sum();
    let average = total_guesses as f64 / total as f64;

    println!("Results ({}):", solver.strategy());
    println!("{}", "=".repeat(40));
    println!();
    println!("Guess distribution:");
    for (guesses, count) in &distribution {
        let pct = *count as f64 / total as f64 * 100.0;
        let bar = "█".repeat((*count * 40 / total).max(1));
        println!("  {guesses} guesses: {count:>5} ({pct:>5.1}%) {bar}");
    }
    println!();
    println!("Average guesses: {average:.3}");
    println!("Total words: {total}");
    println!("Time elapsed: {elapsed:.2?}");

    let failures: usize = distribution
        .iter()
        .filter(|(g, _)| *g > solver.max_guesses())
        .map(|(_, c)| c)
        .sum();
    if failures > 0 {
        println!(
            "Words not solved in {} guesses: {failures}",
            solver.max_guesses()
        );
    } else {
        println!(
            "✓ All words solved within {} guesses!",
            solver.max_guesses()
        );
    }
    println!();
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let mut solver = build_solver(&cli)?;

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => run_interactive(solver),
        Command::Play => run_play(solver),
        Command::Solve { word } => {
            let target = Word::new(&word)?;
            println!("Solving for: {}", target.as_str().to_uppercase());
            println!();
            match solver.solve_for_target(&target) {
                Ok(guesses) => {
                    print_solution(&guesses);
                    Ok(())
                }
                Err(e) => {
                    for (i, response) in solver.history().iter().enumerate() {
                        println!("Guess {}: {}", i + 1, response);
                    }
                    Err(e)
                }
            }
        }
        Command::Suggest { count } => print_top(&solver, count),
        Command::Bench => run_bench(&solver),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
