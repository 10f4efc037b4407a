//! The `Session` module owns the open account and applies commands to it.
use std::io::{self, Write};

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::info;

use crate::bank::{Account, AccountError, Command, CommandType};

/// Represents a scripted session against one account at a time.
pub struct Session<W> {
    /// The currently open account, if any.
    account: Option<Account>,
    /// The number of accounts opened so far.
    opened: usize,
    /// A channel receiver for incoming commands.
    receiver: mpsc::Receiver<Command>,
    /// Where the transcript is written.
    output: W,
}

impl<W: Write> Session<W> {
    /// Creates a new session with no open account.
    pub fn new(receiver: mpsc::Receiver<Command>, output: W) -> Self {
        Session {
            account: None,
            opened: 0,
            receiver,
            output,
        }
    }

    /// Retrieves the open account, if any.
    #[cfg(test)]
    pub fn get_account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    /// Consumes the session and returns its transcript writer.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn open_account(&mut self) -> Result<&mut Account, SessionError> {
        self.account.as_mut().ok_or(SessionError::NoOpenAccount)
    }

    /// Applies a command and returns the transcript lines it produced.
    /// A failed `open` keeps the previous account.
    fn process_command(&mut self, command: Command) -> Result<Vec<String>, SessionError> {
        match command.get_type() {
            CommandType::Open => {
                let holder = command.get_holder().ok_or(SessionError::MissingHolder)?;
                let account = match command.get_amount() {
                    Some(initial_balance) => Account::with_balance(holder, initial_balance)?,
                    None => Account::new(holder),
                };
                info!(holder, balance = %account.get_balance(), "account opened");

                let mut lines = Vec::with_capacity(3);
                if self.opened > 0 {
                    lines.push(String::new());
                }
                lines.push(format!("Account created for: {}", account.get_account_holder()));
                lines.push(format!("Initial balance: ${}", account.get_balance()));
                self.account = Some(account);
                self.opened += 1;
                Ok(lines)
            }
            CommandType::Deposit => {
                let amount = command.get_amount().ok_or(SessionError::MissingAmount)?;
                Ok(vec![self.open_account()?.deposit(amount)?])
            }
            CommandType::Withdraw => {
                let amount = command.get_amount().ok_or(SessionError::MissingAmount)?;
                Ok(vec![self.open_account()?.withdraw(amount)?])
            }
            CommandType::Balance => {
                let account = self.open_account()?;
                Ok(vec![format!(
                    "Final balance for {}: ${}",
                    account.get_account_holder(),
                    account.get_balance()
                )])
            }
        }
    }

    /// Runs the session loop, applying commands from the receiver until it closes.
    /// Rejected commands are reported in the transcript and the loop carries on.
    pub async fn run(&mut self) -> io::Result<()> {
        while let Some(command) = self.receiver.recv().await {
            match self.process_command(command) {
                Ok(lines) => {
                    for line in lines {
                        writeln!(self.output, "{line}")?;
                    }
                }
                Err(err) => {
                    info!(%err, "command rejected");
                    writeln!(self.output, "Error: {err}")?;
                }
            }
        }
        self.output.flush()
    }
}

/// Errors that can occur while applying a command.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("No account is open.")]
    NoOpenAccount,
    #[error("Command is missing a holder.")]
    MissingHolder,
    #[error("Command is missing an amount.")]
    MissingAmount,
    #[error(transparent)]
    Account(#[from] AccountError),
}
