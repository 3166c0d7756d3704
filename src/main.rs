use clap::{Parser, Subcommand};
use slotpak::archive::{Archive, PackOptions};
use slotpak::DEFAULT_MIN_CAPACITY;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "slotpak", about = "The slot-indexed .pak container format CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack one or more files into a .pak archive
    Create {
        #[arg(short, long)]
        output: PathBuf,
        /// Minimum slot count reserved in the table (spare slots stay empty)
        #[arg(long, default_value_t = DEFAULT_MIN_CAPACITY)]
        min_capacity: u32,
        #[arg(required = true, num_args = 1..)]
        input: Vec<PathBuf>,
    },
    /// List archive contents, one name per line, in slot order
    List {
        input: PathBuf,
    },
    /// Extract an archive's records to disk
    Extract {
        input: PathBuf,
        #[arg(short = 'C', long, default_value = ".")]
        output_dir: PathBuf,
        /// Print each record name before it is written
        #[arg(short = 't', long)]
        list: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    match Cli::parse().command {
        // ── Create ───────────────────────────────────────────────────────────
        Commands::Create { output, min_capacity, input } => {
            let opts = PackOptions { min_capacity };
            let mut ar = Archive::create(&output, input.len(), opts)?;
            for path in &input {
                let data = std::fs::read(path)?;
                // Records carry the path string exactly as given, so the
                // archive reproduces the same relative layout on extraction.
                ar.add_file(&path.to_string_lossy(), &data)?;
                println!("  packed  {}", path.display());
            }
            ar.finalize()?;
            println!("Created: {}", output.display());
        }

        // ── List ─────────────────────────────────────────────────────────────
        Commands::List { input } => {
            let mut ar = Archive::open(&input)?;
            for name in ar.list()? {
                println!("{name}");
            }
        }

        // ── Extract ──────────────────────────────────────────────────────────
        Commands::Extract { input, output_dir, list } => {
            let mut ar = Archive::open(&input)?;
            if list {
                ar.extract_to_with(&output_dir, |name| println!("{name}"))?;
            } else {
                ar.extract_to(&output_dir)?;
            }
            println!("Extracted to: {}", output_dir.display());
        }
    }

    Ok(())
}
