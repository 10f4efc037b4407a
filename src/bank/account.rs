//! A single bank account that guarantees its balance never goes negative.
use thiserror::Error;
use tracing::debug;

use crate::bank::Money;

/// Represents a bank account owned by one holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// The name of the account holder. Never changes after construction.
    holder: String,

    /// The current balance, always non-negative.
    balance: Money,
}

impl Account {
    /// Creates a new account for the given holder with a zero balance.
    pub fn new(holder: impl Into<String>) -> Self {
        Account {
            holder: holder.into(),
            balance: Money::ZERO,
        }
    }

    /// Creates a new account with an initial balance.
    /// Returns an error if the initial balance is negative.
    pub fn with_balance(
        holder: impl Into<String>,
        initial_balance: Money,
    ) -> Result<Self, AccountError> {
        if initial_balance < Money::ZERO {
            return Err(AccountError::InvalidAmount(
                InvalidAmount::NegativeInitialBalance,
            ));
        }
        Ok(Account {
            holder: holder.into(),
            balance: initial_balance,
        })
    }

    /// Deposits the specified amount and returns a confirmation message.
    /// Returns an error if the amount is not positive or the new balance cannot be held exactly.
    pub fn deposit(&mut self, amount: Money) -> Result<String, AccountError> {
        if amount <= Money::ZERO {
            debug!(holder = %self.holder, %amount, "deposit rejected");
            return Err(AccountError::InvalidAmount(
                InvalidAmount::NonPositiveDeposit,
            ));
        }
        // Decimal rounds past 28 significant digits; reject anything inexact.
        let balance = self
            .balance
            .checked_add(amount)
            .filter(|balance| balance.checked_sub(self.balance) == Some(amount))
            .ok_or(AccountError::Overflow)?;
        self.set_balance(balance);
        debug!(holder = %self.holder, %amount, balance = %self.balance, "deposit applied");
        Ok(format!("Deposited ${amount}. New Balance: ${}", self.balance))
    }

    /// Withdraws the specified amount and returns a confirmation message.
    /// Returns an error if the amount is not positive, exceeds the balance,
    /// or leaves a balance that cannot be held exactly.
    pub fn withdraw(&mut self, amount: Money) -> Result<String, AccountError> {
        if amount <= Money::ZERO {
            debug!(holder = %self.holder, %amount, "withdrawal rejected");
            return Err(AccountError::InvalidAmount(
                InvalidAmount::NonPositiveWithdrawal,
            ));
        }
        if amount > self.balance {
            debug!(holder = %self.holder, %amount, balance = %self.balance, "withdrawal rejected");
            return Err(AccountError::InsufficientFunds);
        }
        let balance = self
            .balance
            .checked_sub(amount)
            .filter(|balance| self.balance.checked_sub(*balance) == Some(amount))
            .ok_or(AccountError::Overflow)?;
        self.set_balance(balance);
        debug!(holder = %self.holder, %amount, balance = %self.balance, "withdrawal applied");
        Ok(format!("Withdrew ${amount}. New Balance: ${}", self.balance))
    }

    /// Gets the current balance.
    pub fn get_balance(&self) -> Money {
        self.balance
    }

    /// Gets the name of the account holder.
    pub fn get_account_holder(&self) -> &str {
        &self.holder
    }

    fn set_balance(&mut self, balance: Money) {
        debug_assert!(balance >= Money::ZERO, "balance must stay non-negative");
        self.balance = balance;
    }
}

/// Errors that can occur when operating on an account.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountError {
    #[error("{0}")]
    InvalidAmount(InvalidAmount),
    #[error("Insufficient funds.")]
    InsufficientFunds,
    #[error("Balance overflow.")]
    Overflow,
}

/// The rule an amount broke.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidAmount {
    #[error("Initial balance cannot be negative.")]
    NegativeInitialBalance,
    #[error("Deposit amount must be positive.")]
    NonPositiveDeposit,
    #[error("Withdrawal amount must be positive.")]
    NonPositiveWithdrawal,
}
