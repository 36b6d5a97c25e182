//! Sink trait for log output destinations

use super::{error::Result, formatter::Formatter, level::LevelDefinition, message::Message};

pub trait Sink: Send {
    /// Write one message; `level` is the resolved definition of `message.level`
    fn write(
        &mut self,
        message: &Message,
        level: &LevelDefinition,
        formatter: &Formatter,
    ) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
