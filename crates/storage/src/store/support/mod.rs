#![forbid(unsafe_code)]

mod guards;
mod renumber;
mod rows;
mod schema;
mod time;
mod versions_tx;

pub(super) use guards::*;
pub(super) use renumber::*;
pub(super) use rows::*;
pub(super) use schema::{install_schema, preflight_gate};
pub(super) use time::now_ms;
pub(super) use versions_tx::*;
