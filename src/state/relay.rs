use std::{fmt, str::FromStr};

use thiserror::Error;

/// Delivery guarantee requested from the broker: at most once, never acknowledged.
pub const RELAY_QOS: u8 = 0;

/// Numeric identifier of a physical output line on the board.
pub type LineId = i64;

/// Requested level for one line or for the whole board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    /// Energise the line.
    On,
    /// Release the line.
    Off,
}

impl Switch {
    /// Wire token understood by the board.
    pub fn as_str(self) -> &'static str {
        match self {
            Switch::On => "on",
            Switch::Off => "off",
        }
    }
}

impl fmt::Display for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a status token is anything other than the exact `on` / `off` words.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised status `{0}`")]
pub struct UnknownSwitch(pub String);

impl FromStr for Switch {
    type Err = UnknownSwitch;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "on" => Ok(Switch::On),
            "off" => Ok(Switch::Off),
            other => Err(UnknownSwitch(other.to_string())),
        }
    }
}

/// A fully formed instruction for the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayCommand {
    /// Switch every line at once.
    All(Switch),
    /// Switch a port exactly as the user named it; the board parses the number.
    Port {
        /// Port token as spoken, forwarded verbatim.
        port: String,
        /// Requested level.
        switch: Switch,
    },
    /// Switch one registry line, optionally after the board waits `delay_secs`.
    Line {
        /// Registry line to address.
        line: LineId,
        /// Requested level.
        switch: Switch,
        /// Seconds the board sleeps before acting, when set.
        delay_secs: Option<u64>,
    },
}

impl RelayCommand {
    /// Turn a registry line off, with an optional delay marker.
    pub fn switch_off(line: LineId, delay_secs: Option<u64>) -> Self {
        RelayCommand::Line {
            line,
            switch: Switch::Off,
            delay_secs,
        }
    }

    /// Space separated payload parsed by the board: `on`, `5 on`, `31 off 2`.
    pub fn payload(&self) -> String {
        match self {
            RelayCommand::All(switch) => switch.to_string(),
            RelayCommand::Port { port, switch } => format!("{port} {switch}"),
            RelayCommand::Line {
                line,
                switch,
                delay_secs: None,
            } => format!("{line} {switch}"),
            RelayCommand::Line {
                line,
                switch,
                delay_secs: Some(delay),
            } => format!("{line} {switch} {delay}"),
        }
    }
}

/// Message handed to the publish transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayMessage {
    /// Broker topic the board subscribes to.
    pub topic: String,
    /// Encoded [`RelayCommand`].
    pub payload: String,
    /// Always [`RELAY_QOS`].
    pub qos: u8,
}

impl RelayMessage {
    /// Address `command` to `topic` with the fixed at-most-once QoS.
    pub fn new(topic: impl Into<String>, command: &RelayCommand) -> Self {
        Self {
            topic: topic.into(),
            payload: command.payload(),
            qos: RELAY_QOS,
        }
    }
}
