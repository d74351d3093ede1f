pub mod combine;
pub mod deal;
pub mod decrypt;
pub mod verify;

pub use combine::*;
pub use deal::*;
pub use decrypt::*;
pub use verify::*;
