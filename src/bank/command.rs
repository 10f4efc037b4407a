//! Commands read from a CSV script and applied to the open account.
use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, de};
use tokio::sync::mpsc;
use tracing::warn;

use crate::bank::Money;

/// Enum representing the type of command.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    Open,
    Deposit,
    Withdraw,
    Balance,
}

/// Parses a monetary value, keeping the scale it was written with.
fn deserialize_money<'de, D>(deserializer: D) -> Result<Option<Money>, D::Error>
where
    D: de::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    value
        .map(|v| v.parse::<Money>().map_err(de::Error::custom))
        .transpose()
}

/// Represents one line of a command script.
#[derive(Deserialize, Debug, Clone)]
pub struct Command {
    /// The type of command (e.g., Open, Deposit, etc.)
    #[serde(rename = "type")]
    command_type: CommandType,

    /// The account holder, only meaningful for `open`.
    #[serde(default)]
    holder: Option<String>,

    /// The amount involved in the command, if applicable.
    #[serde(default, deserialize_with = "deserialize_money")]
    amount: Option<Money>,
}

impl Command {
    /// Gets the type of the command.
    pub fn get_type(&self) -> CommandType {
        self.command_type
    }

    /// Gets the holder named by the command, if any.
    pub fn get_holder(&self) -> Option<&str> {
        self.holder.as_deref().filter(|holder| !holder.is_empty())
    }

    /// Gets the amount of the command, if applicable.
    pub fn get_amount(&self) -> Option<Money> {
        self.amount
    }

    #[cfg(test)]
    pub fn new(command_type: CommandType, holder: Option<&str>, amount: Option<Money>) -> Self {
        Command {
            command_type,
            holder: holder.map(str::to_owned),
            amount,
        }
    }
}

/// Reads every command from a CSV script and sends it down the channel.
/// Malformed rows are logged and skipped. Returns the number of commands sent.
pub async fn send_script(script: &[u8], sender: &mpsc::Sender<Command>) -> usize {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(script);

    let mut sent = 0;
    for record in reader.deserialize::<Command>() {
        let command = match record {
            Ok(command) => command,
            Err(err) => {
                warn!(%err, "skipping malformed command");
                continue;
            }
        };
        if let Err(err) = sender.send(command).await {
            warn!(%err, "session stopped receiving commands");
            break;
        }
        sent += 1;
    }
    sent
}
