pub mod cash_flow;
pub mod demo;
pub mod portfolio;
pub mod scenarios;
pub mod valuation;
