use clap::{Parser, Subcommand};
use rust_vcs::tools::{
    QrOptions, ShareStore, binary_stats, load_binary, load_share, render_qr, save_binary,
};
use rust_vcs::{BinaryImage, PatternTable, Rendering, ShareCodec, ShareImage, Threshold, VcsError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "vcstool", version, about = "Visual cryptography share tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Split an image (or a QR code for --text) into two shares
    Split {
        #[arg(long, conflicts_with = "text", required_unless_present = "text")]
        input: Option<PathBuf>,
        #[arg(long)]
        text: Option<String>,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Reproducible shares from a fixed seed
        #[arg(long)]
        seed: Option<u64>,
        /// horizontal, vertical or diagonal
        #[arg(long, default_value = "horizontal")]
        table: PatternTable,
        /// Fixed luminance cutoff (default: VCS_THRESHOLD or 128)
        #[arg(long)]
        threshold: Option<u8>,
    },
    /// Stack two share images
    Combine {
        #[arg(long)]
        first: PathBuf,
        #[arg(long)]
        second: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Keep the raw 2x2 overlay instead of one pixel per block
        #[arg(long)]
        stacked: bool,
    },
    /// Render a QR code for a record, split it and store the shares
    Enroll {
        #[arg(long)]
        id: String,
        #[arg(long)]
        text: String,
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Print where a record's shares are stored
    Shares {
        #[arg(long)]
        id: String,
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Reconstruct a stored record's QR code
    Reveal {
        #[arg(long)]
        id: String,
        #[arg(long)]
        root: Option<PathBuf>,
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        stacked: bool,
    },
    /// List records with both shares present
    List {
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Print dimensions, black ratio and share structure of an image
    Inspect {
        #[arg(long)]
        image: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Split {
            input,
            text,
            out_dir,
            seed,
            table,
            threshold,
        } => split_cmd(input.as_deref(), text.as_deref(), &out_dir, seed, table, threshold),
        Command::Combine {
            first,
            second,
            out,
            stacked,
        } => combine_cmd(&first, &second, &out, rendering(stacked)),
        Command::Enroll { id, text, root } => enroll_cmd(&id, &text, open_store(root)),
        Command::Shares { id, root } => shares_cmd(&id, open_store(root)),
        Command::Reveal {
            id,
            root,
            out,
            stacked,
        } => reveal_cmd(&id, open_store(root), &out, rendering(stacked)),
        Command::List { root } => list_cmd(open_store(root)),
        Command::Inspect { image } => inspect_cmd(&image),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn rendering(stacked: bool) -> Rendering {
    if stacked {
        Rendering::Stacked
    } else {
        Rendering::HighContrast
    }
}

fn open_store(root: Option<PathBuf>) -> ShareStore {
    root.map(ShareStore::new).unwrap_or_else(ShareStore::from_env)
}

fn split_cmd(
    input: Option<&Path>,
    text: Option<&str>,
    out_dir: &Path,
    seed: Option<u64>,
    table: PatternTable,
    threshold: Option<u8>,
) -> Result<(), VcsError> {
    let secret = match (input, text) {
        (Some(path), _) => {
            let threshold = threshold.map(Threshold::Fixed).unwrap_or_default();
            load_binary(path, threshold)?
        }
        (None, Some(text)) => render_qr(text, &QrOptions::default())?,
        (None, None) => {
            return Err(VcsError::InvalidImage("need --input or --text".into()));
        }
    };

    let codec = ShareCodec::with_table(table);
    let start = Instant::now();
    let pair = match seed {
        Some(seed) => codec.split_seeded(&secret, seed)?,
        None => codec.split(&secret)?,
    };
    let elapsed = start.elapsed();

    std::fs::create_dir_all(out_dir)?;
    let first = out_dir.join("share1.png");
    let second = out_dir.join("share2.png");
    save_binary(pair.first.as_image(), &first)?;
    save_binary(pair.second.as_image(), &second)?;

    println!(
        "Secret {}x{} -> shares {}x{} in {:.2?}",
        secret.width(),
        secret.height(),
        pair.first.width(),
        pair.first.height(),
        elapsed
    );
    println!("  {}", first.display());
    println!("  {}", second.display());
    Ok(())
}

fn combine_cmd(
    first: &Path,
    second: &Path,
    out: &Path,
    rendering: Rendering,
) -> Result<(), VcsError> {
    let a = load_share(first)?;
    let b = load_share(second)?;
    let revealed = ShareCodec::new().rendering(rendering).combine(&a, &b)?;
    save_binary(&revealed, out)?;
    println!(
        "Revealed {}x{} ({:?}) -> {}",
        revealed.width(),
        revealed.height(),
        rendering,
        out.display()
    );
    Ok(())
}

fn enroll_cmd(id: &str, text: &str, store: ShareStore) -> Result<(), VcsError> {
    let pair = store.enroll(id, text, &QrOptions::default(), &ShareCodec::new())?;
    let (first, second) = store.share_paths(id)?;
    println!(
        "Enrolled {} ({}x{} shares)",
        id,
        pair.first.width(),
        pair.first.height()
    );
    println!("  {}", first.display());
    println!("  {}", second.display());
    Ok(())
}

fn shares_cmd(id: &str, store: ShareStore) -> Result<(), VcsError> {
    let (first, second) = store.share_paths(id)?;
    for path in [&first, &second] {
        if !path.is_file() {
            return Err(VcsError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )));
        }
    }
    println!("share1: {}", first.display());
    println!("share2: {}", second.display());
    Ok(())
}

fn reveal_cmd(
    id: &str,
    store: ShareStore,
    out: &Path,
    rendering: Rendering,
) -> Result<(), VcsError> {
    let revealed = store.reconstruct(id, rendering)?;
    save_binary(&revealed, out)?;
    println!("Revealed {} -> {}", id, out.display());
    Ok(())
}

fn list_cmd(store: ShareStore) -> Result<(), VcsError> {
    let ids = store.list()?;
    println!("{} records in {}", ids.len(), store.root().display());
    for id in ids {
        println!("  {id}");
    }
    Ok(())
}

fn inspect_cmd(path: &Path) -> Result<(), VcsError> {
    let image = load_binary(path, Threshold::Fixed(128))?;
    print_stats(path, &image);

    match ShareImage::try_from(image) {
        Ok(share) => {
            for (name, table) in [
                ("horizontal", PatternTable::horizontal()),
                ("vertical", PatternTable::vertical()),
                ("diagonal", PatternTable::diagonal()),
            ] {
                if rust_vcs::codec::is_well_formed(&share, &table) {
                    println!("Well-formed share ({name} table)");
                    return Ok(());
                }
            }
            println!("Not a well-formed share");
        }
        Err(_) => println!("Odd dimensions: not a share"),
    }
    Ok(())
}

fn print_stats(path: &Path, image: &BinaryImage) {
    let stats = binary_stats(image);
    println!("Image: {} ({}x{})", path.display(), image.width(), image.height());
    println!(
        "Binary: black_pixels={} total={} black_ratio={:.2}%",
        stats.black_pixels,
        stats.total_pixels,
        stats.black_ratio * 100.0
    );
}
