pub mod clock_state;
pub mod config;
pub mod face;
pub mod lookup;
pub mod markup;
pub mod observable;
pub mod ticker;
