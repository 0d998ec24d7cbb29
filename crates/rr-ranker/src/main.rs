use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use serde::Deserialize;
use tracing::info;

use rr_common::extraction::parse_resume;
use rr_common::logging::{init_tracing_subscriber, install_tracing_panic_hook};
use rr_common::ranking::RankingEngine;
use rr_common::store::memory::CandidateRecord;
use rr_common::store::{ApplicationStore, ApplyOutcome, MemoryStore};
use rr_common::JobFilter;

/// Single-batch ranking uses one synthetic job.
const JOB_ID: i64 = 1;

#[derive(Debug, Parser)]
#[command(name = "rr-ranker", about = "Parse résumés and rank a batch against a job filter")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse one résumé text file and print the structured record as JSON.
    Parse {
        /// Path to a plain-text résumé (PDF extraction happens upstream)
        file: PathBuf,
    },
    /// Rank a JSON batch of applications against a JSON job filter.
    Rank {
        /// JSON array: {candidate_id, name, email?, phone?, file_name?, resume_text}
        #[arg(long)]
        applications: PathBuf,
        /// JSON object in the JobFilter shape
        #[arg(long)]
        filter: PathBuf,
    },
}

#[derive(Debug, Deserialize)]
struct ApplicationInput {
    candidate_id: i64,
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    file_name: String,
    resume_text: String,
}

fn main() {
    dotenv().ok();
    init_tracing_subscriber("rr-ranker");
    install_tracing_panic_hook("rr-ranker");

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Parse { file } => {
            let text = std::fs::read_to_string(&file)?;
            let parsed = parse_resume(&text);
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
        Command::Rank {
            applications,
            filter,
        } => {
            let inputs: Vec<ApplicationInput> =
                serde_json::from_str(&std::fs::read_to_string(&applications)?)?;
            let filter: JobFilter = serde_json::from_str(&std::fs::read_to_string(&filter)?)?;

            let store = MemoryStore::new();
            store.add_job(JOB_ID);
            for input in &inputs {
                store.add_candidate(
                    input.candidate_id,
                    CandidateRecord {
                        name: input.name.clone(),
                        email: input.email.clone(),
                        phone: input.phone.clone(),
                    },
                );
                store.store_resume(
                    input.candidate_id,
                    &input.file_name,
                    &parse_resume(&input.resume_text),
                )?;
                let outcome = store.apply_to_job(input.candidate_id, JOB_ID)?;
                if outcome != ApplyOutcome::Applied {
                    info!(candidate_id = input.candidate_id, ?outcome, "application not recorded");
                }
            }

            let engine = RankingEngine::from_env();
            let ranked = engine.rank_resumes(&store, JOB_ID, &filter)?;

            info!(candidates = inputs.len(), shortlisted = ranked.len(), "ranking complete");
            for (rank, candidate) in ranked.iter().enumerate() {
                println!(
                    "#{} {} <{}> score={}",
                    rank + 1,
                    candidate.candidate_name,
                    candidate.email,
                    candidate.final_score
                );
                for line in candidate.explanation.lines() {
                    println!("    {line}");
                }
            }
        }
    }

    Ok(())
}
