pub mod clock;
pub mod dial;
pub mod readout;
