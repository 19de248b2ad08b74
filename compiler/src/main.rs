use clap::Parser;
use std::path::PathBuf;

use bfg::codegen::EncoderConfig;
use bfg::format;
use bfg::pipeline::{compute_provenance, BuildOptions, Builder};
use bfg::registry::Registry;

#[derive(Debug, Clone, PartialEq, clap::ValueEnum)]
enum EmitStage {
    Code,
    BuildInfo,
    Profiles,
}

#[derive(Parser, Debug)]
#[command(
    name = "bfg",
    version,
    about = "Compiles plain text into a Brainfuck program that prints it"
)]
struct Cli {
    /// Text to encode (or use --file)
    #[arg(conflicts_with = "file")]
    text: Option<String>,

    /// Read the text to encode from a file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Memory profile name
    #[arg(short, long, default_value = "32C")]
    profile: String,

    /// Profile definition file, JSON (repeatable)
    #[arg(short = 'I', long = "include")]
    include: Vec<PathBuf>,

    /// Wrap output into lines of this many characters (0 = single line)
    #[arg(short, long, default_value_t = 0)]
    width: usize,

    /// Pad character for the last wrapped line
    #[arg(long, default_value_t = format::DEFAULT_FILLER)]
    filler: char,

    /// Append a cleanup pass that zeroes every touched cell
    #[arg(long)]
    cleanup: bool,

    /// Output file path (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output stage
    #[arg(long, value_enum, default_value_t = EmitStage::Code)]
    emit: EmitStage,

    /// Print generator phases and statistics
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if bfg::codegen::ALPHABET.contains(cli.filler) {
        eprintln!(
            "bfg: error: filler '{}' is an instruction character",
            cli.filler
        );
        std::process::exit(2);
    }

    // ── Load profile registry ──
    let mut registry = Registry::with_builtins();
    for path in &cli.include {
        match registry.load_file(path) {
            Ok(n) => {
                if cli.verbose {
                    eprintln!("bfg: loaded {} profiles from {}", n, path.display());
                }
            }
            Err(e) => {
                eprintln!("bfg: error: {}", e);
                std::process::exit(2);
            }
        }
    }

    if cli.verbose {
        eprintln!("bfg: {} profiles registered", registry.len());
    }

    if cli.emit == EmitStage::Profiles {
        for name in registry.names() {
            let profile = registry.lookup(name).expect("internal: listed name missing");
            println!("{}\t{} cells\t{:?}", name, profile.seeds.len(), profile.seeds);
        }
        return;
    }

    // ── Read input text ──
    let input: Vec<u8> = match (&cli.text, &cli.file) {
        (Some(text), None) => text.clone().into_bytes(),
        (None, Some(path)) => match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("bfg: error: {}: {}", path.display(), e);
                std::process::exit(2);
            }
        },
        _ => {
            eprintln!("bfg: error: provide TEXT or --file");
            std::process::exit(2);
        }
    };

    if cli.verbose {
        eprintln!("bfg: {} input bytes, profile {}", input.len(), cli.profile);
    }

    if cli.emit == EmitStage::BuildInfo {
        let profile = match registry.lookup(&cli.profile) {
            Some(p) => p,
            None => {
                eprintln!("bfg: error: unknown memory profile '{}'", cli.profile);
                std::process::exit(1);
            }
        };
        print!("{}", compute_provenance(&input, profile).to_json());
        return;
    }

    // ── Build ──
    let options = BuildOptions {
        profile: cli.profile.clone(),
        cleanup: cli.cleanup,
        encoder: EncoderConfig::default(),
    };
    let generated = match Builder::new(&registry, options).build(&input) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("bfg: error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.verbose {
        eprintln!(
            "bfg: {} instructions, {} cells touched",
            generated.code.len(),
            generated.touched.len()
        );
    }

    let rendered = if cli.width > 0 {
        format::format(&generated.code, cli.width, cli.filler)
    } else {
        generated.code
    };

    match &cli.output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, rendered + "\n") {
                eprintln!("bfg: error: {}: {}", path.display(), e);
                std::process::exit(2);
            }
        }
        None => println!("{}", rendered),
    }
}
