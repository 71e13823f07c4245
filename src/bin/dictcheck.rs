use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use wordmix::config::Config;
use wordmix::engine::dictionary::{Dictionary, MIN_WORD_LEN, WordSource};
use wordmix::engine::matcher;
use wordmix::engine::sequencer::{TargetSequencer, is_playable};

#[derive(Parser)]
#[command(
    name = "dictcheck",
    version,
    about = "Validate a word list and preview the round sequence"
)]
struct Cli {
    #[arg(help = "Dictionary file to check (defaults to the built-in word list)")]
    path: Option<PathBuf>,

    #[arg(short, long, default_value_t = 0, help = "Seed for the preview shuffle")]
    seed: u64,

    #[arg(short = 'n', long, default_value_t = 10, help = "Number of targets to preview")]
    preview: usize,

    #[arg(short, long, help = "Difficulty ceiling (defaults to the configured value)")]
    ceiling: Option<u8>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let ceiling = cli.ceiling.unwrap_or(config.difficulty_ceiling);

    let source = match cli.path {
        Some(path) => WordSource::File(path),
        None => config.word_source(),
    };
    let dictionary = Dictionary::load(source, &config)?;

    let stats = dictionary.stats();
    println!(
        "{} lines: {} accepted, {} ignored",
        stats.lines_seen,
        stats.accepted(),
        stats.lines_ignored
    );
    for (tier, count) in stats.tier_counts.iter().enumerate() {
        println!("  tier {tier}: {count} words");
    }
    let empty = stats.empty_tiers();
    if !empty.is_empty() {
        println!("warning: no words in tiers {empty:?}");
    }

    let target_len = config.target_word_len;
    let capacity = config.column_capacity;
    let pool = dictionary.target_pool();
    let mut playable = 0;
    let mut unplayable = Vec::new();
    for word in pool {
        let tier = dictionary.lookup(word).map(|e| e.tier).unwrap_or(0);
        let result = matcher::match_all(&dictionary, word);
        if tier <= ceiling && is_playable(&result, target_len, capacity) {
            playable += 1;
        } else {
            unplayable.push(word.as_str());
        }
    }
    println!(
        "{} target words, {} playable at ceiling {} (capacity {})",
        pool.len(),
        playable,
        ceiling,
        capacity
    );
    if !unplayable.is_empty() {
        println!("unplayable: {}", unplayable.join(", "));
    }

    if cli.preview > 0 && playable > 0 {
        println!("\npreview (seed {}):", cli.seed);
        let mut sequencer = TargetSequencer::new(&dictionary, target_len, target_len, capacity);
        sequencer.shuffle(cli.seed, 0);
        for _ in 0..cli.preview {
            match sequencer.next(&dictionary, ceiling, false) {
                Ok((word, result)) => {
                    let counts: Vec<String> = (MIN_WORD_LEN..=target_len)
                        .map(|len| format!("{len}:{}", result.count_at(len)))
                        .collect();
                    println!("  {word}  [{}]", counts.join(" "));
                }
                Err(_) => break,
            }
        }
    }

    Ok(())
}
