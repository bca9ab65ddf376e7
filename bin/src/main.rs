use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufReader};
use std::time::Instant;
use wordle_forge::{FrequencyTable, Generator, GeneratorConfig, Puzzle, PuzzleStatus, WordBank};

/// Generates Wordle-style deduction puzzles: the player sees four colored
/// guesses and must work out the hidden answer.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Path to a file with one five-letter word per line.
    #[clap(short = 'w', long)]
    words_file: String,

    /// Path to a file with whitespace-separated `word frequency` pairs.
    #[clap(short = 'f', long)]
    frequency_file: Option<String>,

    /// Seed for the generator's RNG; omit for a random seed.
    #[clap(short, long)]
    seed: Option<u64>,

    /// Override the maximum number of search attempts per puzzle.
    #[clap(long)]
    attempts: Option<usize>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a single puzzle.
    Generate {
        /// Use this word as the answer instead of sampling one.
        answer: Option<String>,

        /// Print the puzzle as JSON instead of text.
        #[clap(long)]
        json: bool,
    },
    /// Generate several puzzles and print them as CSV rows.
    Batch { count: usize },
    /// Color a guess against an answer.
    Feedback { guess: String, answer: String },
}

fn main() -> Result<()> {
    env_logger::init();
    let start_time = Instant::now();
    let args = Args::parse();

    let mut words_reader = BufReader::new(
        File::open(&args.words_file)
            .with_context(|| format!("failed to open words file {}", args.words_file))?,
    );
    let bank = WordBank::from_reader(&mut words_reader)?;
    let frequencies = match &args.frequency_file {
        Some(path) => {
            let mut reader = BufReader::new(
                File::open(path).with_context(|| format!("failed to open frequency file {path}"))?,
            );
            FrequencyTable::from_reader(&mut reader)?
        }
        None => FrequencyTable::default(),
    };

    let mut config = GeneratorConfig::default();
    if let Some(attempts) = args.attempts {
        config.max_attempts = attempts;
    }
    let mut generator = match args.seed {
        Some(seed) => Generator::with_seed(bank, frequencies, config, seed)?,
        None => Generator::new(bank, frequencies, config)?,
    };

    match args.command {
        Command::Generate { answer, json } => {
            let puzzle = generator.generate(answer.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&puzzle)?);
            } else {
                print_puzzle(&puzzle);
            }
        }
        Command::Batch { count } => {
            if count == 0 {
                bail!("batch size must be at least 1");
            }
            run_batch(&mut generator, count)?;
        }
        Command::Feedback { guess, answer } => {
            let pattern = generator.feedback(&guess, &answer)?;
            println!("{guess} vs {answer}: {pattern}");
        }
    }

    eprintln!(
        "Command executed in {:.3}s.",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

fn print_puzzle(puzzle: &Puzzle) {
    println!("Answer: {}", puzzle.answer);
    for (number, record) in puzzle.guesses.iter().enumerate() {
        println!("Guess {}: {}  {}", number + 1, record.word, record.pattern);
    }
    match puzzle.status {
        PuzzleStatus::Optimal => println!("The guesses identify the answer uniquely."),
        PuzzleStatus::Ambiguous => println!(
            "{} candidates remain; the puzzle is ambiguous.",
            puzzle.remaining_candidates
        ),
    }
}

fn run_batch(generator: &mut Generator, count: usize) -> Result<()> {
    use std::io::Write;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(
        out,
        "puzzle_id,answer,guess_1,guess_1_pattern,guess_2,guess_2_pattern,\
         guess_3,guess_3_pattern,guess_4,guess_4_pattern,candidates_remaining"
    )?;
    for puzzle_id in 1..=count {
        let puzzle = generator.generate(None)?;
        write!(out, "{puzzle_id},{}", puzzle.answer)?;
        for slot in 0..wordle_forge::PUZZLE_GUESSES {
            match puzzle.guesses.get(slot) {
                Some(record) => write!(out, ",{},{}", record.word, record.pattern)?,
                None => write!(out, ",,")?,
            }
        }
        writeln!(out, ",{}", puzzle.remaining_candidates)?;
    }
    Ok(())
}
