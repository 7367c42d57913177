//! Application services for accounts.

mod account;

pub use account::AccountService;
