//! tickets: a terminal dashboard for support tickets.
//!
//! The core is a pure projection of the ticket list (status filter, search,
//! sort, column selection) in [`pipeline`] and the toggleable selection in
//! [`selection`]. The rest is the terminal shell around it.

pub mod controller;
pub mod dataset;
pub mod domain;
pub mod inputter;
pub mod logging;
pub mod model;
pub mod multiselect;
pub mod pipeline;
pub mod selection;
pub mod ticket;
pub mod ui;
