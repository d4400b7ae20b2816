/*!
`bgpgill` -- read one MRT archive file and print a pipe-separated line
per decoded record.

Grounded on the teacher's `src/bin/main.rs` (`clap::Parser` derive,
`env_logger::init()`, exit-code-on-error), trimmed down to the single
positional file argument this crate's external interface calls for.
*/
use bgpgill::formats::PsvFormatter;
use bgpgill::io::open_reader;
use bgpgill::stream::RecordStream;
use clap::Parser;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "bgpgill", version, about = "Parse an MRT/BGP archive file into pipe-separated records")]
struct Cli {
    /// Path to an MRT archive file (.gz / .bz2 / plain).
    file: String,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            eprint!("{e}");
            return ExitCode::from(1);
        }
    };

    let reader = match open_reader(&cli.file) {
        Ok(r) => r,
        Err(e) => {
            log::error!("failed to open {}: {e}", cli.file);
            return ExitCode::from(1);
        }
    };

    let stream = RecordStream::new(reader);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    use std::io::Write;

    for result in stream {
        match result {
            Ok(record) => {
                for line in PsvFormatter::format_chain(&record) {
                    if writeln!(out, "{line}").is_err() {
                        return ExitCode::FAILURE;
                    }
                }
            }
            Err(e) => {
                log::warn!("stopping after decode error: {e}");
                break;
            }
        }
    }

    ExitCode::SUCCESS
}
