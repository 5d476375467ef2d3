pub mod documents;
pub mod macros;
pub mod observation;
pub mod role;
pub mod scale;
pub mod staffing;

pub use documents::*;
pub use observation::*;
pub use role::*;
pub use scale::*;
pub use staffing::*;
