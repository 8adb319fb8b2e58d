pub mod designator;
pub mod lookup;
pub mod record;

pub use designator::*;
pub use lookup::*;
pub use record::*;
