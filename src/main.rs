use clap::{Parser, Subcommand};
use propdoc::SamePolicy;
use propdoc::edit::{EditOptions, Operation, Outcome, PropEdit};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
  name = "propdoc",
  about = "Edit .properties files without disturbing comments or ordering",
  version,
  author
)]
struct Cli {
  /// Verbose output (-v for verbose, -vv for very verbose)
  #[arg(short, long, action = clap::ArgAction::Count, global = true)]
  verbose: u8,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Print the value of a key
  Get { file: PathBuf, key: String },
  /// Set a key, appending it if missing
  Set {
    file: PathBuf,
    key: String,
    value: String,
    /// Create the file if it does not exist
    #[arg(short, long)]
    create: bool,
  },
  /// Delete a key and its attached comments
  Del { file: PathBuf, key: String },
  /// Add a comment block above a key
  Comment {
    file: PathBuf,
    key: String,
    #[arg(default_value = "")]
    text: String,
  },
  /// Remove the comment block above a key
  Uncomment { file: PathBuf, key: String },
  /// List all properties in file order
  List { file: PathBuf },
  /// Rewrite a file in normalized form
  Fmt { file: PathBuf },
  /// Compare the properties of two files
  Diff {
    left: PathBuf,
    right: PathBuf,
    /// Do not print unchanged keys
    #[arg(long)]
    skip_same: bool,
  },
}

fn setup_tracing(verbose: u8) {
  use tracing_subscriber::fmt;
  use tracing_subscriber::prelude::*;

  let log_level = match verbose {
    1 => "debug",
    2 => "trace",
    _ => "info",
  };

  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(tracing_subscriber::EnvFilter::new(
      std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.into()),
    ))
    .init();
}

fn edit(file: PathBuf, create: bool, operation: Operation) -> Result<Outcome, Box<dyn std::error::Error>> {
  Ok(PropEdit::run(EditOptions { file, create }, operation)?)
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
  let cli = Cli::parse();

  setup_tracing(cli.verbose);

  let outcome = match cli.command {
    Command::Get { file, key } => edit(file, false, Operation::Get { key })?,
    Command::Set {
      file,
      key,
      value,
      create,
    } => edit(file, create, Operation::Set { key, value })?,
    Command::Del { file, key } => edit(file, false, Operation::Del { key })?,
    Command::Comment { file, key, text } => edit(file, false, Operation::Comment { key, text })?,
    Command::Uncomment { file, key } => edit(file, false, Operation::Uncomment { key })?,
    Command::List { file } => edit(file, false, Operation::List)?,
    Command::Fmt { file } => {
      PropEdit::format(EditOptions {
        file,
        create: false,
      })?;
      return Ok(ExitCode::SUCCESS);
    }
    Command::Diff {
      left,
      right,
      skip_same,
    } => {
      let policy = if skip_same {
        SamePolicy::Skip
      } else {
        SamePolicy::Emit
      };
      for event in PropEdit::diff_files(left, right, policy)? {
        println!("{}", event);
      }
      return Ok(ExitCode::SUCCESS);
    }
  };

  let code = match outcome {
    Outcome::Value(Some(value)) => {
      println!("{}", value);
      ExitCode::SUCCESS
    }
    Outcome::Value(None) | Outcome::Existed(false) => ExitCode::FAILURE,
    Outcome::Properties(properties) => {
      for (key, value) in properties {
        println!("{}={}", key, value);
      }
      ExitCode::SUCCESS
    }
    Outcome::Replaced(_) | Outcome::Existed(true) => ExitCode::SUCCESS,
  };

  Ok(code)
}
