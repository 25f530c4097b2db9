use clap::Parser;
use miette::{IntoDiagnostic, Result};
use pspconf::payload::{self, InitialDocument};
use pspconf::reader::EventReader;
use pspconf::session::EditSession;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input edit-event CSV file
    events: PathBuf,

    /// Existing associations as JSON (optional). If provided, the session
    /// starts from the stored live/test maps instead of blank rows.
    #[arg(long)]
    initial: Option<PathBuf>,

    /// PSP identifier recorded in the submission payload
    #[arg(long, default_value_t = 0)]
    psp: u16,

    /// Pretty-print the submission payload
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut session = if let Some(path) = cli.initial {
        let file = File::open(path).into_diagnostic()?;
        let doc: InitialDocument = serde_json::from_reader(file).into_diagnostic()?;
        payload::load_session(cli.psp, doc)
    } else {
        EditSession::new(cli.psp)
    };

    // Replay edit events
    let file = File::open(cli.events).into_diagnostic()?;
    let reader = EventReader::new(file);
    for event_result in reader.events() {
        match event_result {
            Ok(event) => {
                if let Err(e) = session.apply(event) {
                    eprintln!("Error applying event: {}", e);
                }
            }
            Err(e) => {
                eprintln!("Error reading event: {}", e);
            }
        }
    }

    // Submit: final reconciliation pass, then the payload
    let submission = payload::submit(session);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.pretty {
        serde_json::to_writer_pretty(&mut out, &submission).into_diagnostic()?;
    } else {
        serde_json::to_writer(&mut out, &submission).into_diagnostic()?;
    }
    writeln!(out).into_diagnostic()?;

    Ok(())
}
