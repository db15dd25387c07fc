//! Blowfish-CBC file encryption tool
//!
//! Reads a file, encrypts or decrypts it with Blowfish in CBC mode and
//! writes the result. Data can be raw bytes or whitespace-separated hex.

use std::fs;
use std::process::ExitCode;

use blowfish_cbc::{utils, BlowfishEngine, CbcCipher, CbcError, Iv};
use clap::{Args, Parser, ValueEnum};
use thiserror::Error;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the Blowfish-CBC program.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Path to the input file.
    #[arg(short, long, help = "Path to the input file")]
    file: String,

    /// Path to the output file.
    #[arg(short, long, help = "Path to the output file")]
    output: String,

    /// Mode of operation (encrypt or decrypt).
    #[arg(short, long, help = "Mode of operation (encrypt/decrypt)")]
    mode: OperationMode,

    #[command(flatten)]
    key: KeyArgs,

    /// Initialization vector, 16 hex digits.
    #[arg(long, help = "Initialization vector as 16 hex digits (random when encrypting without one)")]
    iv: Option<String>,

    /// Encoding of the input and output files.
    #[arg(long, value_enum, default_value_t = DataFormat::Raw)]
    format: DataFormat,

    /// Log every step at debug level.
    #[arg(short, long)]
    verbose: bool,
}

/// Key for the cipher, given either as text or as hex.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct KeyArgs {
    /// Key string for the cipher.
    #[arg(short, long, help = "Key string for the cipher (1 to 56 bytes)")]
    key: Option<String>,

    /// Key for the cipher as hex.
    #[arg(long, help = "Key for the cipher as hex digits")]
    key_hex: Option<String>,
}

/// Enum representing the mode of operation for the cipher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OperationMode {
    /// Encrypt mode.
    Encrypt,
    /// Decrypt mode.
    Decrypt,
}

/// File encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum DataFormat {
    /// Bytes as they are.
    Raw,
    /// Hex digits, whitespace ignored on input, space separated on output.
    Hex,
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Cipher(#[from] CbcError),

    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("An IV is required to decrypt, pass it with --iv")]
    MissingIv,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let key = load_key(&cli.key)?;
    let engine = BlowfishEngine::with_key(&key)?;
    let iv = resolve_iv(cli.mode, cli.iv.as_deref())?;
    let cipher = CbcCipher::new(&engine, iv);

    let result = match cli.format {
        DataFormat::Raw => {
            let input = fs::read(&cli.file).map_err(|source| io_error(&cli.file, source))?;
            debug!(bytes = input.len(), file = %cli.file, "read raw input");
            match cli.mode {
                OperationMode::Encrypt => cipher.encrypt(&input)?,
                OperationMode::Decrypt => cipher.decrypt(&input)?,
            }
        }
        DataFormat::Hex => {
            let input =
                fs::read_to_string(&cli.file).map_err(|source| io_error(&cli.file, source))?;
            debug!(chars = input.len(), file = %cli.file, "read hex input");
            match cli.mode {
                OperationMode::Encrypt => cipher.encrypt_hex(&input)?,
                OperationMode::Decrypt => cipher.decrypt_hex(&input)?,
            }
        }
    };

    let output = match cli.format {
        DataFormat::Raw => result,
        DataFormat::Hex => format_hex(&result).into_bytes(),
    };
    fs::write(&cli.output, output).map_err(|source| io_error(&cli.output, source))?;

    info!(mode = ?cli.mode, output = %cli.output, "operation completed");
    Ok(())
}

fn load_key(args: &KeyArgs) -> Result<Vec<u8>, CliError> {
    match (&args.key, &args.key_hex) {
        (Some(key), _) => Ok(key.as_bytes().to_vec()),
        (None, Some(key_hex)) => Ok(utils::decode_hex(key_hex)?),
        (None, None) => Err(CbcError::UninitializedKey.into()),
    }
}

/// Uses the given IV, or draws a random one when encrypting.
fn resolve_iv(mode: OperationMode, iv: Option<&str>) -> Result<Iv, CliError> {
    match (iv, mode) {
        (Some(text), _) => Ok(Iv::from_hex(text)?),
        (None, OperationMode::Encrypt) => {
            let iv = Iv::random();
            // The IV is needed again to decrypt.
            println!("IV: {iv}");
            info!(%iv, "generated random IV");
            Ok(iv)
        }
        (None, OperationMode::Decrypt) => Err(CliError::MissingIv),
    }
}

/// Bytes as lowercase hex, separated by single spaces
fn format_hex(data: &[u8]) -> String {
    data.iter()
        .map(|b| hex::encode([*b]))
        .collect::<Vec<String>>()
        .join(" ")
}

fn io_error(path: &str, source: std::io::Error) -> CliError {
    CliError::Io {
        path: path.to_string(),
        source,
    }
}
