// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod assist;
pub mod composer;
pub mod filter;
pub mod ids;
pub mod list;
pub mod model;
pub mod reveal;
pub mod selection;
pub mod state;

pub use assist::*;
pub use composer::*;
pub use filter::*;
pub use ids::*;
pub use list::*;
pub use model::*;
pub use reveal::*;
pub use selection::*;
pub use state::*;
