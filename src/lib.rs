pub mod adapter;
pub mod analyzers;
pub mod city;
pub mod condense;
pub mod config;
pub mod error;
pub mod output;
pub mod record;
pub mod report;
