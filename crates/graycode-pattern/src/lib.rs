//! Gray-code structured-light pattern generation.
//!
//! ## Quickstart
//!
//! ```
//! use graycode_pattern::PatternGenerator;
//!
//! let mut player = PatternGenerator::new(64, 48).unwrap();
//! let mut shown = 0;
//! loop {
//!     let _frame = player.current(); // hand to the display
//!     shown += 1;
//!     if !player.advance() {
//!         break;
//!     }
//! }
//! assert_eq!(shown, player.required_image_count());
//! ```

mod cursor;
mod generator;
mod io;

pub use cursor::SequenceCursor;
pub use generator::{PatternGenerator, PatternSet};
pub use io::{frame_file_name, write_png, PatternIoError};
