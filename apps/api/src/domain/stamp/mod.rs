pub mod stamp;
pub mod value_objects;

pub use stamp::{NewStamp, Stamp};
pub use value_objects::{HexColor, Language, StampEffect};
