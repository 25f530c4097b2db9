use crate::error::ConfigError;
use crate::event::EditEvent;
use std::io::Read;

pub struct EventReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> EventReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn events(self) -> impl Iterator<Item = Result<EditEvent, ConfigError>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(ConfigError::from))
    }
}
