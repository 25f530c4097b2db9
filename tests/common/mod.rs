use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const HEADER: [&str; 7] = ["op", "method", "side", "index", "key", "value", "amount"];

pub fn write_events(path: &Path, rows: &[[&str; 7]]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(HEADER)?;
    for row in rows {
        wtr.write_record(row)?;
    }

    wtr.flush()?;
    Ok(())
}
