pub mod fact;
pub mod rule;
pub mod trace;
pub mod analysis;

pub use fact::*;
pub use rule::*;
pub use trace::*;
pub use analysis::*;
