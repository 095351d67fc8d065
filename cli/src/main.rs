use std::{error::Error, io::Write, path::PathBuf, str::FromStr};

use clap::Parser;
use env_logger::TimestampPrecision;
use log::{info, warn, LevelFilter};

use rubikcipher::prelude::*;

mod config;

use config::FileConfig;

/// Cube permutation cipher written in Rust
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Length of an edge of a face (default: 3)
	#[arg(short = 'n', long)]
	size: Option<usize>,

	/// The key to apply, e.g. "R3-L2-C4"
	#[arg(short, long)]
	key: Option<String>,

	/// Use the example key
	#[arg(long, default_value_t = false)]
	example: bool,

	/// Generate a random key with the given number of moves (the key is printed to the stderr)
	#[arg(short, long)]
	random: Option<usize>,

	/// Apply the inverse of the key
	#[arg(short, long, default_value_t = false)]
	decrypt: bool,

	/// Start from the given symbols (the same format as when you output the cube via the "-c"-flag)
	#[arg(long)]
	set: Option<String>,

	/// Output the symbols on one line rather than unfolded
	#[arg(short, long, default_value_t = false)]
	char_print: bool,

	/// Color every symbol by the face it started on
	#[arg(long, default_value_t = false)]
	color: bool,

	/// Encrypt (or with "-d" decrypt) this file instead of printing the cube
	#[arg(short, long)]
	input: Option<PathBuf>,

	/// Print the output to a file rather to the stdout
	#[arg(short, long)]
	output: Option<PathBuf>,

	/// Read the size, key and layout from a TOML file
	#[arg(long)]
	config: Option<PathBuf>,

	/// Log more (-v info, -vv debug, -vvv trace)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,
}

/// Pick the key: random, example, flag or config file, in that order
fn choose_key(args: &Args, file: &FileConfig, size: usize) -> Result<Key, Box<dyn Error>> {
	if let Some(len) = args.random {
		let key = Key::random(&mut rand::thread_rng(), size, len)?;
		eprintln!("Key: {}", key);
		return Ok(key);
	}
	if args.example {
		return Ok(Key::from_str(EXAMPLE_KEY)?);
	}

	match args.key.as_ref().or(file.key.as_ref()) {
		Some(key) => Ok(Key::from_str(key)?),
		None => Ok(Key::default()),
	}
}

fn main() -> Result<(), Box<dyn Error>> {
	let args = Args::parse();

	env_logger::Builder::new()
		.filter_level(match args.verbose {
			0 => LevelFilter::Warn,
			1 => LevelFilter::Info,
			2 => LevelFilter::Debug,
			_ => LevelFilter::Trace,
		})
		.format_timestamp(Some(TimestampPrecision::Millis))
		.init();

	let file = match &args.config {
		Some(path) => FileConfig::load(path)?,
		None => FileConfig::default(),
	};

	// Whether to redirect it to the stdout or a file
	let mut out: Box<dyn Write> = match &args.output {
		Some(path) => Box::new(std::fs::File::create(path)?),
		None => Box::new(std::io::stdout()),
	};

	// Parses a cube out of the symbols, which also fixes the size
	let start = match &args.set {
		Some(symbols) => Some(FaceCube::from_str(symbols)?),
		None => None,
	};
	let size = match &start {
		Some(cube) => cube.size(),
		None => args.size.or(file.size).unwrap_or(CANONICAL_DIM),
	};
	if size == 0 {
		return Err(CubeError::InvalidSize.into());
	}
	if size != CANONICAL_DIM {
		warn!("The move counts were designed for size {}, size {} is unverified", CANONICAL_DIM, size);
	}

	let key = choose_key(&args, &file, size)?;
	key.validate(size)?;
	info!("Using key {} on a cube of size {}", key, size);

	// Encrypt or decrypt a whole file
	if let Some(input) = &args.input {
		let cipher = BlockCipher::new(size, &key)?;
		let data = std::fs::read(input)?;
		let res = if args.decrypt {
			cipher.decrypt(&data)?
		} else {
			cipher.encrypt(&data)?
		};
		out.write_all(&res)?;
		return Ok(());
	}

	let mut cube = match start {
		Some(cube) => cube,
		None => FaceCube::new(size)?,
	};
	if args.decrypt {
		key.inverse(size).apply(&mut cube)?;
	} else {
		key.apply(&mut cube)?;
	}

	// Print the resulting cube (either as a line or unfolded)
	if args.char_print {
		let symbols: Vec<Symbol> = cube.into();
		let line: Vec<String> = symbols.iter().map(|s| s.to_string()).collect();
		writeln!(out.as_mut(), "{}", line.join(" "))?;
	} else {
		let mut layout = Layout::for_cube(&cube);
		if let Some(width) = file.cell_width {
			layout.cell_width = width;
		}
		layout.colored = args.color || file.color.unwrap_or(false);
		write!(out.as_mut(), "{}", cube.display(layout))?;
	}

	Ok(())
}
