// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

#[macro_use]
mod macros;

pub mod demo;
pub mod filter;
pub mod forms;
pub mod ids;
pub mod model;
pub mod settings;
pub mod state;
pub mod theme;
pub mod views;

pub use forms::*;
pub use ids::*;
pub use model::*;
pub use settings::*;
pub use state::*;
pub use theme::*;
pub use views::*;
