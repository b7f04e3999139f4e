use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use rvm_asm::listing::make_listing_table;
use rvm_asm::{assemble, InstructionRegistry};

#[derive(Parser)]
#[command(name = "rvmasm")]
#[command(about = "Assembler for the RVM bytecode")]
struct Args {
  /// Assembly source, or bytecode with `--disassemble`
  input: PathBuf,

  #[arg(short, long, default_value = "out.bc")]
  output: PathBuf,

  /// Print a listing of the assembled program
  #[arg(short, long)]
  listing: bool,

  /// Print the listing of an existing bytecode file instead of assembling
  #[arg(short, long)]
  disassemble: bool,

  /// -v for info, -vv for debug output
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

fn main() -> Result<()> {
  let args = Args::parse();

  let level = match args.verbose {
    0 => "warn",
    1 => "info",
    _ => "debug",
  };
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

  let registry = InstructionRegistry::standard();

  if args.disassemble {
    let bytecode = fs::read(&args.input)
      .with_context(|| format!("could not read {}", args.input.display()))?;
    let table = make_listing_table(&bytecode, &registry)
      .with_context(|| format!("could not decode {}", args.input.display()))?;
    table.printstd();
    return Ok(());
  }

  let source = fs::read_to_string(&args.input)
    .with_context(|| format!("could not read {}", args.input.display()))?;

  // Nothing is written unless the whole program assembles.
  let bytecode = assemble(&source, &registry)
    .with_context(|| format!("could not assemble {}", args.input.display()))?;

  fs::write(&args.output, &bytecode)
    .with_context(|| format!("could not write {}", args.output.display()))?;

  info!(
    "wrote {} instructions ({} bytes) to {}",
    bytecode.len() / rvm_asm::bytecode::WORD_SIZE,
    bytecode.len(),
    args.output.display()
  );

  if args.listing {
    make_listing_table(&bytecode, &registry)?.printstd();
  }

  Ok(())
}
