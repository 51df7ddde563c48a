pub mod cursor;
pub use self::cursor::CursorFollower;

pub mod sparkles;
pub use self::sparkles::{SparkleOverlay, SparkleOverlaySettings};
