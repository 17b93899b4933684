//! Tool definitions module.
//!
//! This module exports all bundled tool definitions.
//! Each tool is defined in its own file.

pub mod greeting;
pub mod todays_date;

pub use greeting::{GreetingOutput, GreetingParams, GreetingTool};
pub use todays_date::{
    Clock, FixedClock, SystemClock, TodaysDateOutput, TodaysDateParams, TodaysDateTool,
};
